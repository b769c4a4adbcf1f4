// Core modules
pub mod api;
pub mod auth;
mod config;
pub mod db;
pub mod types;

// Re-export key types and functions
pub use api::{AppState, create_router};
pub use auth::{AuthConfig, Authenticator, DEFAULT_TOKEN_TTL_DAYS, UserStore, hash_password};
pub use config::load_seed_movies;
pub use db::connection::{DatabaseConfig, Db, create_connection, ensure_schema};
pub use db::movies::MovieStore;

use anyhow::Result;
use axum::Router;

/// Convenience function to create a fully wired application.
///
/// This connects to the database, applies the schema, and returns the
/// router with every route and middleware layer attached, ready to be
/// passed to `axum::serve`.
pub async fn create_app(
    db_config: DatabaseConfig,
    auth_config: AuthConfig,
    allowed_origins: &[String],
) -> Result<Router> {
    let db = create_connection(db_config).await?;
    ensure_schema(&db).await?;

    let state = AppState::new(auth_config, db);
    Ok(create_router(state, allowed_origins))
}
