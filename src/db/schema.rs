use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use crate::types::{DirectorName, GenreName, MovieTitle, PasswordDigest, Username};

/// Persisted user account in SurrealDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable database identifier for this account (table: `user`).
    pub id: RecordId,
    /// Login name, unique across the table.
    pub username: Username,
    /// Bcrypt digest of the password. The plaintext is never stored.
    pub password_digest: PasswordDigest,
    /// Contact address supplied at registration.
    pub email: String,
    /// Optional date of birth.
    pub birth_date: Option<Datetime>,
    /// Movie records this user has favorited. Duplicates are never stored.
    pub favourites: Vec<RecordId>,
    /// When this record was first created.
    pub created_at: Option<Datetime>,
    /// When this record was last updated.
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new user into the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    /// Login name, checked for uniqueness before insert.
    pub username: Username,
    /// Digest produced by the password hasher.
    pub password_digest: PasswordDigest,
    /// Contact address.
    pub email: String,
    /// Optional date of birth.
    pub birth_date: Option<Datetime>,
}

/// Payload for replacing a user's profile fields.
///
/// The favourites list is managed through its own operations and is
/// untouched by a profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Username,
    pub password_digest: PasswordDigest,
    pub email: String,
    pub birth_date: Option<Datetime>,
}

/// Genre information embedded in a movie record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    /// Genre name (e.g., "Drama").
    pub name: GenreName,
    /// Short description of the genre.
    pub description: String,
}

/// Director information embedded in a movie record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    /// Director's credited name.
    pub name: DirectorName,
    /// Director's biography.
    pub bio: String,
}

/// Persisted movie in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Stable database identifier for this movie (table: `movie`).
    pub id: RecordId,
    /// Title, unique across the catalog.
    pub title: MovieTitle,
    /// Short plot description.
    pub description: String,
    /// Genre info, embedded rather than referenced.
    pub genre: Genre,
    /// Director info, embedded rather than referenced.
    pub director: Director,
    /// Credited actor names.
    pub actors: Vec<String>,
    /// URL or path of the poster image.
    pub image_path: Option<String>,
    /// Whether the movie is featured on the landing view.
    pub featured: bool,
    /// When this record was first created.
    pub created_at: Option<Datetime>,
    /// When this record was last updated.
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new movie into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreate {
    pub title: MovieTitle,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    pub actors: Vec<String>,
    pub image_path: Option<String>,
    pub featured: bool,
}
