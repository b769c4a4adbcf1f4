// User account endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use surrealdb::{RecordId, sql::Datetime};

use crate::api::{AppState, bearer_header, error::ApiError};
use crate::auth::{authorize_owner, hash_password};
use crate::db::schema::{UserCreate, UserRecord, UserUpdate};

/// Request body accepted by registration and profile updates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserBody {
    pub username: String,
    pub password: String,
    pub email: String,
    /// ISO 8601 date, e.g. "1990-05-17".
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Wire form of a user account. The password digest is deliberately absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub birth_date: Option<String>,
    /// Keys of the movies on this account's favourites list.
    pub favourite_movies: Vec<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username.into_inner(),
            email: record.email,
            birth_date: record
                .birth_date
                .map(|date| DateTime::<Utc>::from(date).to_rfc3339()),
            favourite_movies: record
                .favourites
                .iter()
                .map(|id| id.key().to_string())
                .collect(),
        }
    }
}

/// Register a new account.
///
/// The password is hashed before anything touches the database. A taken
/// username answers 400 with the same message the route has always used.
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<UserBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_user_body(&body)?;

    if state.users().find_by_username(&body.username).await?.is_some() {
        return Err(ApiError::BadRequest(format!(
            "{} already exists.",
            body.username
        )));
    }

    let password_digest = hash_password(&body.password)?;
    let birth_date = body.birth_date.as_deref().and_then(parse_birth_date);

    let created = state
        .users()
        .create(&UserCreate {
            username: body.username.into(),
            password_digest,
            email: body.email,
            birth_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List every registered account. Requires a valid bearer token.
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;

    let users = state.users().list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one account. Callers may only read their own.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let principal = state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;
    authorize_owner(&principal, &username)?;

    // The ownership check passed, so the freshly resolved principal is
    // the requested account.
    Ok(Json(principal.into_user().into()))
}

/// Replace an account's profile fields. Callers may only update their own.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let principal = state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;
    validate_user_body(&body)?;
    authorize_owner(&principal, &username)?;

    let password_digest = hash_password(&body.password)?;
    let birth_date = body.birth_date.as_deref().and_then(parse_birth_date);

    let updated = state
        .users()
        .update(
            &username,
            &UserUpdate {
                username: body.username.into(),
                password_digest,
                email: body.email,
                birth_date,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{username} was not found.")))?;

    Ok(Json(updated.into()))
}

/// Remove an account. Callers may only delete their own.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let principal = state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;
    authorize_owner(&principal, &username)?;

    let removed = state.users().delete(&username).await?;
    if removed {
        Ok(Json(json!({ "message": format!("{username} was deleted.") })))
    } else {
        Err(ApiError::BadRequest(format!("{username} was not found.")))
    }
}

/// Add a movie to an account's favourites list. Adding a movie that is
/// already on the list changes nothing.
pub async fn add_favourite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let principal = state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;
    authorize_owner(&principal, &username)?;

    let movie = RecordId::from_table_key("movie", movie_id.as_str());
    let updated = state
        .users()
        .add_favourite(&username, &movie)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{username} was not found.")))?;

    Ok(Json(updated.into()))
}

/// Remove a movie from an account's favourites list. Removing a movie
/// that is not on the list is a no-op, not an error.
pub async fn remove_favourite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let principal = state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;
    authorize_owner(&principal, &username)?;

    let movie = RecordId::from_table_key("movie", movie_id.as_str());
    let updated = state
        .users()
        .remove_favourite(&username, &movie)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{username} was not found.")))?;

    Ok(Json(updated.into()))
}

/// Check the request body the same way for registration and updates.
///
/// Every failed check is collected so the client sees all of them at
/// once instead of fixing one per round trip.
fn validate_user_body(body: &UserBody) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if body.username.chars().count() < 5 {
        errors.push("Username must be at least five characters long.".to_string());
    }
    if body.username.is_empty()
        || !body.username.chars().all(|c| c.is_ascii_alphanumeric())
    {
        errors.push("Username may only contain alphanumeric characters.".to_string());
    }
    if body.password.is_empty() {
        errors.push("Password is required.".to_string());
    }
    if !looks_like_email(&body.email) {
        errors.push("Email does not appear to be valid.".to_string());
    }
    if let Some(raw) = &body.birth_date {
        if parse_birth_date(raw).is_none() {
            errors.push("BirthDate must be a date in YYYY-MM-DD form.".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

// Shape check only. Deliverability is the mail server's problem.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

fn parse_birth_date(raw: &str) -> Option<Datetime> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Datetime::from(date.and_hms_opt(0, 0, 0)?.and_utc()))
}
