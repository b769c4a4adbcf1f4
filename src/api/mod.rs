// REST API for the movie catalogue and its user accounts

pub mod error;
pub mod login;
pub mod movies;
pub mod users;

use axum::{
    Router,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Json,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::{AuthConfig, Authenticator, UserStore};
use crate::db::connection::Db;
use crate::db::movies::MovieStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    pub movies: Arc<MovieStore>,
}

impl AppState {
    pub fn new(config: AuthConfig, db: Db) -> Self {
        Self {
            auth: Arc::new(Authenticator::new(config, db.clone())),
            movies: Arc::new(MovieStore::new(db)),
        }
    }

    /// The account store shared with the authenticator.
    pub fn users(&self) -> &UserStore {
        self.auth.user_store()
    }
}

/// Raw `Authorization` header value, if the request carries one.
pub(crate) fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Assemble the application router.
///
/// Registration, login, the welcome page, and the health probe are open;
/// every other route authenticates the bearer token inside its handler.
/// An empty origin list leaves CORS permissive for local development.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route("/login", post(login::login))
        .route(
            "/users",
            post(users::register_user).get(users::list_users),
        )
        .route(
            "/users/{username}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{username}/movies/{movie_id}",
            post(users::add_favourite).delete(users::remove_favourite),
        )
        .route("/movies", get(movies::list_movies))
        .route("/movies/{title}", get(movies::get_movie))
        .route("/movies/genres/{name}", get(movies::get_genre))
        .route("/movies/directors/{name}", get(movies::get_director))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn welcome() -> &'static str {
    "Welcome to Movie Nest!"
}

async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::{DatabaseConfig, create_connection, ensure_schema};

    async fn setup_state(database: &str) -> AppState {
        let config = DatabaseConfig {
            url: "memory".to_string(),
            namespace: "test".to_string(),
            database: database.to_string(),
            username: None,
            password: None,
        };
        let db = create_connection(config).await.unwrap();
        ensure_schema(&db).await.unwrap();
        AppState::new(AuthConfig::new("test-secret"), db)
    }

    #[tokio::test]
    async fn test_router_assembles_with_and_without_origins() {
        let state = setup_state("router").await;

        // Route conflicts panic at registration time, so building the
        // router at all is the thing under test here.
        let _ = create_router(state.clone(), &[]);
        let _ = create_router(state, &["http://localhost:1234".to_string()]);
    }

    #[tokio::test]
    async fn test_welcome_message() {
        assert_eq!(welcome().await, "Welcome to Movie Nest!");
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let Json(body) = health_check().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_bearer_header_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_header(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_header(&headers), Some("Bearer abc.def.ghi"));
    }
}
