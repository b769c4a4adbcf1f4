//! Authentication strategies for HTTP requests.

use std::fmt;
use std::sync::Arc;

use surrealdb::RecordId;
use tracing::{debug, info};

use crate::auth::password::verify_password;
use crate::auth::principal::Principal;
use crate::auth::token::{AuthConfig, TokenIssuer};
use crate::auth::user_store::UserStore;
use crate::db::Db;
use crate::db::schema::UserRecord;

/// Authentication errors.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No bearer token on a protected route
    MissingToken,
    /// Invalid, malformed, or expired token
    InvalidToken(String),
    /// Unknown username or wrong password, deliberately indistinguishable
    BadCredentials,
    /// Verified token whose subject no longer has an account
    UnknownPrincipal,
    /// Caller does not own the addressed account
    PermissionDenied,
    /// Token could not be signed
    TokenCreation(String),
    /// Database error
    DatabaseError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Authentication required"),
            Self::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            Self::BadCredentials => write!(f, "Incorrect username or password."),
            Self::UnknownPrincipal => write!(f, "User account no longer exists"),
            Self::PermissionDenied => write!(f, "Permission denied."),
            Self::TokenCreation(msg) => write!(f, "Token creation failed: {}", msg),
            Self::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Successful login: the authenticated account and its fresh token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserRecord,
    pub token: String,
}

/// Both authentication strategies over one credential store.
///
/// The local strategy handles the login endpoint; the bearer strategy
/// handles every protected route. Each produces a typed result that the
/// caller threads onward explicitly.
pub struct Authenticator {
    user_store: Arc<UserStore>,
    issuer: TokenIssuer,
}

impl Authenticator {
    /// Create a new authenticator.
    pub fn new(config: AuthConfig, db: Db) -> Self {
        Self {
            user_store: Arc::new(UserStore::new(db)),
            issuer: TokenIssuer::new(config),
        }
    }

    /// Get reference to the user store.
    pub fn user_store(&self) -> &Arc<UserStore> {
        &self.user_store
    }

    /// Local strategy: check a username and password against the store.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; the two cases differ only in the internal debug log.
    pub async fn authenticate_local(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        let user = self
            .user_store
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let Some(user) = user else {
            debug!(user = %username, "Login failed: unknown username");
            return Err(AuthError::BadCredentials);
        };

        if !verify_password(password, &user.password_digest) {
            debug!(user = %username, "Login failed: wrong password");
            return Err(AuthError::BadCredentials);
        }

        Ok(user)
    }

    /// Login orchestration: local strategy, then token issuance.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self.authenticate_local(username, password).await?;
        let token = self.issuer.issue(&user)?;

        info!(user = %user.username, "Login succeeded");

        Ok(LoginOutcome { user, token })
    }

    /// Bearer strategy: verify the token, then re-resolve the account.
    ///
    /// The claims are treated as a stale snapshot. Only the record key is
    /// taken from them, and the principal handed back reflects whatever
    /// the account looks like right now. A token whose subject has been
    /// deleted in the meantime is rejected.
    pub async fn authenticate_bearer(
        &self,
        authorization: Option<&str>,
    ) -> Result<Principal, AuthError> {
        let token = authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        let claims = self.issuer.verify(token)?;

        debug!("Bearer token verified for subject: {}", claims.sub);

        let user_id = RecordId::from_table_key("user", claims.uid.as_str());
        let user = self
            .user_store
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::UnknownPrincipal)?;

        Ok(Principal::new(user))
    }
}
