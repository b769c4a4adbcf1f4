//! Authentication and authorization module.
//!
//! This module owns the security core of the service: password hashing,
//! the two authentication strategies, token issuance, and the ownership
//! check that guards username-scoped routes.
//!
//! - **Local strategy**: username + password, used only by the login
//!   endpoint. Unknown account and wrong password are indistinguishable.
//! - **Bearer strategy**: HS256 token verification followed by a fresh
//!   account lookup, used by every protected route.
//!
//! ## Security Model
//!
//! - Passwords are stored as salted bcrypt digests, never as plaintext
//! - Tokens carry a minimal claims snapshot; the account is re-resolved
//!   from the database on every request
//! - Authorization is a single rule: a caller may only act on the
//!   account whose username matches their own, byte for byte
//! - Every outcome is an explicit `Result` threaded through the
//!   handlers; there is no ambient request identity
//!
//! ## Usage
//!
//! ```ignore
//! // At the edge of a protected handler
//! let principal = authenticator.authenticate_bearer(bearer_header(&headers)).await?;
//! authorize_owner(&principal, &path_username)?;
//! ```

mod gate;
mod password;
mod principal;
mod strategy;
mod token;
mod user_store;

pub use gate::authorize_owner;
pub use password::{HASH_COST, hash_password, verify_password};
pub use principal::Principal;
pub use strategy::{AuthError, Authenticator, LoginOutcome};
pub use token::{AuthConfig, Claims, DEFAULT_TOKEN_TTL_DAYS, TokenIssuer};
pub use user_store::UserStore;
