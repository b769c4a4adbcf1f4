// Movie catalogue endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde::Serialize;

use crate::api::{AppState, bearer_header, error::ApiError};
use crate::db::schema::{Director, Genre, MovieRecord};

/// Wire form of a catalogue entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieResponse {
    /// Key clients pass to the favourites endpoints.
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: GenreResponse,
    pub director: DirectorResponse,
    pub actors: Vec<String>,
    pub image_path: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenreResponse {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectorResponse {
    pub name: String,
    pub bio: String,
}

impl From<MovieRecord> for MovieResponse {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: record.id.key().to_string(),
            title: record.title.into_inner(),
            description: record.description,
            genre: record.genre.into(),
            director: record.director.into(),
            actors: record.actors,
            image_path: record.image_path,
            featured: record.featured,
        }
    }
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            name: genre.name.into_inner(),
            description: genre.description,
        }
    }
}

impl From<Director> for DirectorResponse {
    fn from(director: Director) -> Self {
        Self {
            name: director.name.into_inner(),
            bio: director.bio,
        }
    }
}

/// List the whole catalogue, ordered by title.
pub async fn list_movies(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;

    let movies = state.movies.list().await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// Fetch a single movie by its exact title.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MovieResponse>, ApiError> {
    state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;

    let movie = state
        .movies
        .find_by_title(&title)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{title} was not found.")))?;

    Ok(Json(movie.into()))
}

/// Fetch a genre description by genre name.
pub async fn get_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<GenreResponse>, ApiError> {
    state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;

    let genre = state
        .movies
        .find_genre(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{name} was not found.")))?;

    Ok(Json(genre.into()))
}

/// Fetch a director's details by name.
pub async fn get_director(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DirectorResponse>, ApiError> {
    state
        .auth
        .authenticate_bearer(bearer_header(&headers))
        .await?;

    let director = state
        .movies
        .find_director(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{name} was not found.")))?;

    Ok(Json(director.into()))
}
