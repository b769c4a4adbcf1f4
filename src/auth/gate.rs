//! Ownership check for username-scoped routes.

use tracing::debug;

use crate::auth::principal::Principal;
use crate::auth::strategy::AuthError;

/// Allow the request only if the caller owns the addressed account.
///
/// The comparison is byte-exact: usernames differing only in case are
/// different accounts. This is the sole access-control rule in the
/// service; there are no roles and no admin override.
pub fn authorize_owner(principal: &Principal, username: &str) -> Result<(), AuthError> {
    if principal.username().as_str() == username {
        Ok(())
    } else {
        debug!(
            caller = %principal.username(),
            target = %username,
            "Ownership check failed"
        );
        Err(AuthError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::UserRecord;
    use crate::types::{PasswordDigest, Username};
    use surrealdb::RecordId;

    fn principal_for(username: &str) -> Principal {
        Principal::new(UserRecord {
            id: RecordId::from_table_key("user", "test123"),
            username: Username::new(username),
            password_digest: PasswordDigest::new("$2b$10$fakedigestfortests"),
            email: format!("{username}@example.com"),
            birth_date: None,
            favourites: vec![],
            created_at: None,
            updated_at: None,
        })
    }

    #[test]
    fn test_owner_is_allowed() {
        let principal = principal_for("alice");
        assert!(authorize_owner(&principal, "alice").is_ok());
    }

    #[test]
    fn test_other_account_is_denied() {
        let principal = principal_for("alice");
        let err = authorize_owner(&principal, "bob").unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let principal = principal_for("alice");
        assert!(matches!(
            authorize_owner(&principal, "Alice"),
            Err(AuthError::PermissionDenied)
        ));
    }
}
