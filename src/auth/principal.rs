//! Authenticated identity for request handling.

use surrealdb::RecordId;

use crate::db::schema::UserRecord;
use crate::types::Username;

/// The authenticated caller of a request.
///
/// A principal wraps the account record re-resolved from the database at
/// verification time, never the stale snapshot inside the token. It can
/// only be produced by a successful authentication strategy and is passed
/// explicitly to whatever needs it; it is immutable once created.
#[derive(Debug, Clone)]
pub struct Principal {
    user: UserRecord,
}

impl Principal {
    /// Wrap a freshly resolved account.
    pub(super) fn new(user: UserRecord) -> Self {
        Self { user }
    }

    /// The account's username, the identity that ownership checks compare.
    pub fn username(&self) -> &Username {
        &self.user.username
    }

    /// The account's database record ID.
    pub fn user_id(&self) -> &RecordId {
        &self.user.id
    }

    /// Borrow the full account record.
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// Consume the principal and take the account record.
    pub fn into_user(self) -> UserRecord {
        self.user
    }
}
