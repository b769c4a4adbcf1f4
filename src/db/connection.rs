use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

pub type Db = Surreal<Any>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: env::var("SURREALDB_URL")
                .unwrap_or_else(|_| "memory".to_string()),
            namespace: env::var("SURREALDB_NAMESPACE")
                .unwrap_or_else(|_| "movienest".to_string()),
            database: env::var("SURREALDB_DATABASE")
                .unwrap_or_else(|_| "catalog".to_string()),
            username: env::var("SURREALDB_USERNAME").ok(),
            password: env::var("SURREALDB_PASSWORD").ok(),
        }
    }
}

pub async fn create_connection(config: DatabaseConfig) -> Result<Db> {
    let db = surrealdb::engine::any::connect(config.url).await?;

    // Sign in if credentials are provided
    if let (Some(username), Some(password)) = (config.username, config.password) {
        db.signin(Root {
            username: &username,
            password: &password,
        })
        .await?;
    }

    // Use the specified namespace and database
    db.use_ns(config.namespace).use_db(config.database).await?;

    Ok(db)
}

pub async fn ensure_schema(db: &Db) -> Result<()> {
    // Define schema for each table
    let schema_queries = vec![
        // User accounts
        "DEFINE TABLE user SCHEMAFULL;
         DEFINE FIELD username ON TABLE user TYPE string;
         DEFINE FIELD password_digest ON TABLE user TYPE string;
         DEFINE FIELD email ON TABLE user TYPE string;
         DEFINE FIELD birth_date ON TABLE user TYPE option<datetime>;
         DEFINE FIELD favourites ON TABLE user TYPE array<record<movie>> DEFAULT [];
         DEFINE FIELD created_at ON TABLE user VALUE time::now();
         DEFINE FIELD updated_at ON TABLE user VALUE time::now();",

        // Movie catalog
        "DEFINE TABLE movie SCHEMAFULL;
         DEFINE FIELD title ON TABLE movie TYPE string;
         DEFINE FIELD description ON TABLE movie TYPE string;
         DEFINE FIELD genre ON TABLE movie TYPE object;
         DEFINE FIELD genre.name ON TABLE movie TYPE string;
         DEFINE FIELD genre.description ON TABLE movie TYPE string;
         DEFINE FIELD director ON TABLE movie TYPE object;
         DEFINE FIELD director.name ON TABLE movie TYPE string;
         DEFINE FIELD director.bio ON TABLE movie TYPE string;
         DEFINE FIELD actors ON TABLE movie TYPE array<string> DEFAULT [];
         DEFINE FIELD image_path ON TABLE movie TYPE option<string>;
         DEFINE FIELD featured ON TABLE movie TYPE bool DEFAULT false;
         DEFINE FIELD created_at ON TABLE movie VALUE time::now();
         DEFINE FIELD updated_at ON TABLE movie VALUE time::now();",

        // Uniqueness constraints and lookup indexes
        "DEFINE INDEX user_username ON TABLE user COLUMNS username UNIQUE;
         DEFINE INDEX movie_title ON TABLE movie COLUMNS title UNIQUE;
         DEFINE INDEX movie_genre_name ON TABLE movie COLUMNS genre.name;
         DEFINE INDEX movie_director_name ON TABLE movie COLUMNS director.name;",
    ];

    for query in schema_queries {
        db.query(query).await?;
    }

    Ok(())
}
