//! Movie catalog storage.

use anyhow::Result;

use crate::db::Db;
use crate::db::schema::{Director, Genre, MovieCreate, MovieRecord};

/// Movie store for database operations.
pub struct MovieStore {
    db: Db,
}

impl MovieStore {
    /// Create a new movie store.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// List the whole catalog, ordered by title.
    pub async fn list(&self) -> Result<Vec<MovieRecord>> {
        let query = "SELECT * FROM movie ORDER BY title";

        let mut res = self.db.query(query).await?;

        let movies: Vec<MovieRecord> = res.take(0)?;
        Ok(movies)
    }

    /// Find a single movie by its exact title.
    pub async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>> {
        let title = title.to_string();

        let query = r#"
            SELECT * FROM movie
            WHERE title = $title
            LIMIT 1
        "#;

        let mut res = self.db
            .query(query)
            .bind(("title", title))
            .await?;

        let movies: Vec<MovieRecord> = res.take(0)?;
        Ok(movies.into_iter().next())
    }

    /// Look up genre info by genre name.
    ///
    /// Any movie carrying the genre is a valid source since the info is
    /// embedded, so the first match wins.
    pub async fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        let name = name.to_string();

        let query = r#"
            SELECT * FROM movie
            WHERE genre.name = $name
            LIMIT 1
        "#;

        let mut res = self.db
            .query(query)
            .bind(("name", name))
            .await?;

        let movies: Vec<MovieRecord> = res.take(0)?;
        Ok(movies.into_iter().next().map(|m| m.genre))
    }

    /// Look up director info by the director's name.
    pub async fn find_director(&self, name: &str) -> Result<Option<Director>> {
        let name = name.to_string();

        let query = r#"
            SELECT * FROM movie
            WHERE director.name = $name
            LIMIT 1
        "#;

        let mut res = self.db
            .query(query)
            .bind(("name", name))
            .await?;

        let movies: Vec<MovieRecord> = res.take(0)?;
        Ok(movies.into_iter().next().map(|m| m.director))
    }

    /// Insert a new movie into the catalog.
    ///
    /// Fails if the title is already taken (unique index on `title`).
    pub async fn create(&self, create: &MovieCreate) -> Result<MovieRecord> {
        let title = create.title.clone();
        let description = create.description.clone();
        let genre = create.genre.clone();
        let director = create.director.clone();
        let actors = create.actors.clone();
        let image_path = create.image_path.clone();
        let featured = create.featured;

        let query = r#"
            CREATE movie CONTENT {
                title: $title,
                description: $description,
                genre: $genre,
                director: $director,
                actors: $actors,
                image_path: $image_path,
                featured: $featured
            }
        "#;

        let mut res = self.db
            .query(query)
            .bind(("title", title))
            .bind(("description", description))
            .bind(("genre", genre))
            .bind(("director", director))
            .bind(("actors", actors))
            .bind(("image_path", image_path))
            .bind(("featured", featured))
            .await?;

        let movies: Vec<MovieRecord> = res.take(0)?;
        movies.into_iter().next()
            .ok_or_else(|| anyhow::anyhow!("Failed to create movie"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection, ensure_schema, DatabaseConfig};
    use crate::types::{DirectorName, GenreName, MovieTitle};

    async fn setup_test_db() -> Db {
        let config = DatabaseConfig {
            url: "memory".to_string(),
            ..Default::default()
        };
        let db = create_connection(config).await.unwrap();
        ensure_schema(&db).await.unwrap();
        db
    }

    fn make_movie(title: &str, genre: &str, director: &str) -> MovieCreate {
        MovieCreate {
            title: MovieTitle::new(title),
            description: format!("Plot of {title}"),
            genre: Genre {
                name: GenreName::new(genre),
                description: format!("About {genre}"),
            },
            director: Director {
                name: DirectorName::new(director),
                bio: format!("Career of {director}"),
            },
            actors: vec!["Some Actor".to_string()],
            image_path: None,
            featured: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_title() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        let created = store
            .create(&make_movie("Alien", "Horror", "Ridley Scott"))
            .await
            .unwrap();
        assert_eq!(created.title.as_str(), "Alien");
        assert!(!created.featured);

        let found = store.find_by_title("Alien").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.director.name.as_str(), "Ridley Scott");
    }

    #[tokio::test]
    async fn test_find_by_title_miss() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        let found = store.find_by_title("Nonexistent").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        store
            .create(&make_movie("Alien", "Horror", "Ridley Scott"))
            .await
            .unwrap();

        let res = store
            .create(&make_movie("Alien", "Sci-Fi", "Someone Else"))
            .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_list_ordered_by_title() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        store
            .create(&make_movie("Zodiac", "Thriller", "David Fincher"))
            .await
            .unwrap();
        store
            .create(&make_movie("Alien", "Horror", "Ridley Scott"))
            .await
            .unwrap();

        let movies = store.list().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title.as_str(), "Alien");
        assert_eq!(movies[1].title.as_str(), "Zodiac");
    }

    #[tokio::test]
    async fn test_find_genre() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        store
            .create(&make_movie("Alien", "Horror", "Ridley Scott"))
            .await
            .unwrap();

        let genre = store.find_genre("Horror").await.unwrap().unwrap();
        assert_eq!(genre.name.as_str(), "Horror");
        assert_eq!(genre.description, "About Horror");

        assert!(store.find_genre("Musical").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_director() {
        let db = setup_test_db().await;
        let store = MovieStore::new(db);

        store
            .create(&make_movie("Alien", "Horror", "Ridley Scott"))
            .await
            .unwrap();

        let director = store.find_director("Ridley Scott").await.unwrap().unwrap();
        assert_eq!(director.bio, "Career of Ridley Scott");

        assert!(store.find_director("Nobody").await.unwrap().is_none());
    }
}
