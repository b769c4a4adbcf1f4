//! User account storage.

use anyhow::Result;
use surrealdb::RecordId;

use crate::db::Db;
use crate::db::schema::{UserCreate, UserRecord, UserUpdate};

/// User store for database operations.
///
/// This is the credential store behind both authentication strategies:
/// the local strategy resolves accounts by username, the bearer strategy
/// re-resolves them by record id on every request.
pub struct UserStore {
    db: Db,
}

impl UserStore {
    /// Create a new user store.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Get a user by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let username = username.to_string();

        let query = r#"
            SELECT * FROM user
            WHERE username = $username
            LIMIT 1
        "#;

        let mut res = self.db
            .query(query)
            .bind(("username", username))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Get a user by database ID.
    pub async fn find_by_id(&self, user_id: &RecordId) -> Result<Option<UserRecord>> {
        let query = "SELECT * FROM user WHERE id = $id LIMIT 1";

        let mut res = self.db
            .query(query)
            .bind(("id", user_id.clone()))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    /// List all accounts, ordered by username.
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        let query = "SELECT * FROM user ORDER BY username";

        let mut res = self.db.query(query).await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users)
    }

    /// Create a new user.
    ///
    /// Fails if the username is already taken (unique index on `username`).
    pub async fn create(&self, create: &UserCreate) -> Result<UserRecord> {
        let username = create.username.clone();
        let password_digest = create.password_digest.clone();
        let email = create.email.clone();
        let birth_date = create.birth_date.clone();

        let query = r#"
            CREATE user CONTENT {
                username: $username,
                password_digest: $password_digest,
                email: $email,
                birth_date: $birth_date,
                favourites: []
            }
        "#;

        let mut res = self.db
            .query(query)
            .bind(("username", username))
            .bind(("password_digest", password_digest))
            .bind(("email", email))
            .bind(("birth_date", birth_date))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        users.into_iter().next()
            .ok_or_else(|| anyhow::anyhow!("Failed to create user"))
    }

    /// Replace a user's profile fields, leaving the favourites list intact.
    ///
    /// Returns the updated record, or `None` if no account matches.
    pub async fn update(&self, username: &str, update: &UserUpdate) -> Result<Option<UserRecord>> {
        let current = username.to_string();
        let new_username = update.username.clone();
        let password_digest = update.password_digest.clone();
        let email = update.email.clone();
        let birth_date = update.birth_date.clone();

        let query = r#"
            UPDATE user SET
                username = $new_username,
                password_digest = $password_digest,
                email = $email,
                birth_date = $birth_date,
                updated_at = time::now()
            WHERE username = $current
        "#;

        let mut res = self.db
            .query(query)
            .bind(("current", current))
            .bind(("new_username", new_username))
            .bind(("password_digest", password_digest))
            .bind(("email", email))
            .bind(("birth_date", birth_date))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Delete an account by username.
    ///
    /// Returns `true` if an account was removed.
    pub async fn delete(&self, username: &str) -> Result<bool> {
        let username = username.to_string();

        let query = r#"
            DELETE user
            WHERE username = $username
            RETURN BEFORE
        "#;

        let mut res = self.db
            .query(query)
            .bind(("username", username))
            .await?;

        let deleted: Vec<UserRecord> = res.take(0)?;
        Ok(!deleted.is_empty())
    }

    /// Add a movie to a user's favourites.
    ///
    /// Set semantics: adding an id that is already present is a no-op, so
    /// duplicates never accumulate. The movie id is not checked against the
    /// catalog.
    pub async fn add_favourite(
        &self,
        username: &str,
        movie_id: &RecordId,
    ) -> Result<Option<UserRecord>> {
        let username = username.to_string();

        let query = r#"
            UPDATE user SET
                favourites = array::union(favourites, [$movie]),
                updated_at = time::now()
            WHERE username = $username
        "#;

        let mut res = self.db
            .query(query)
            .bind(("username", username))
            .bind(("movie", movie_id.clone()))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Remove a movie from a user's favourites.
    ///
    /// Removing an id that is not in the list leaves the list unchanged.
    pub async fn remove_favourite(
        &self,
        username: &str,
        movie_id: &RecordId,
    ) -> Result<Option<UserRecord>> {
        let username = username.to_string();

        let query = r#"
            UPDATE user SET
                favourites = array::complement(favourites, [$movie]),
                updated_at = time::now()
            WHERE username = $username
        "#;

        let mut res = self.db
            .query(query)
            .bind(("username", username))
            .bind(("movie", movie_id.clone()))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }
}
