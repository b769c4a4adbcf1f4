// Seed catalogue loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::db::schema::{Director, Genre, MovieCreate};

/// One movie entry in a seed file.
///
/// The keys match the API's wire shape, so a catalogue captured from
/// `GET /movies` can be fed straight back in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedMovie {
    pub title: String,
    pub description: String,
    pub genre: SeedGenre,
    pub director: SeedDirector,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedGenre {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedDirector {
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

impl SeedMovie {
    fn into_create(self) -> MovieCreate {
        MovieCreate {
            title: self.title.into(),
            description: self.description,
            genre: Genre {
                name: self.genre.name.into(),
                description: self.genre.description,
            },
            director: Director {
                name: self.director.name.into(),
                bio: self.director.bio,
            },
            actors: self.actors,
            image_path: self.image_path,
            featured: self.featured,
        }
    }
}

/// Load a seed catalogue from a JSON file.
pub fn load_seed_movies(path: &Path) -> Result<Vec<MovieCreate>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read seed file {}", path.display()))?;
    let seeds: Vec<SeedMovie> = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse seed file {}", path.display()))?;

    Ok(seeds.into_iter().map(SeedMovie::into_create).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEED: &str = r#"[
        {
            "Title": "Arrival",
            "Description": "A linguist decodes an alien language.",
            "Genre": { "Name": "Science Fiction", "Description": "Speculative futures." },
            "Director": { "Name": "Denis Villeneuve", "Bio": "Canadian director." },
            "Actors": ["Amy Adams", "Jeremy Renner"],
            "ImagePath": "/img/arrival.png",
            "Featured": true
        },
        {
            "Title": "Clerks",
            "Description": "A day behind the counter.",
            "Genre": { "Name": "Comedy" },
            "Director": { "Name": "Kevin Smith" }
        }
    ]"#;

    #[test]
    fn test_load_seed_movies() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let movies = load_seed_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title.as_str(), "Arrival");
        assert!(movies[0].featured);
        assert_eq!(movies[0].actors.len(), 2);

        // Omitted optional fields fall back to defaults.
        assert_eq!(movies[1].genre.name.as_str(), "Comedy");
        assert_eq!(movies[1].genre.description, "");
        assert!(!movies[1].featured);
        assert!(movies[1].image_path.is_none());
    }

    #[test]
    fn test_load_reports_the_path_on_failure() {
        let err = load_seed_movies(Path::new("/nonexistent/movies.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/movies.json"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        assert!(load_seed_movies(file.path()).is_err());
    }
}
