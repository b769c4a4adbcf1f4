use anyhow::Result;
use clap::{Parser, Subcommand};
use movienest::{
    AuthConfig, DEFAULT_TOKEN_TTL_DAYS, DatabaseConfig, MovieStore, UserStore, create_app,
    create_connection, ensure_schema, hash_password, load_seed_movies,
};
use movienest::db::schema::UserCreate;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movienest")]
#[command(about = "Movie catalogue REST API with token-based authentication")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST server
    Serve {
        /// Bind address for the HTTP listener
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, default_value = "memory")]
        db_url: String,
        /// Secret used to sign and verify bearer tokens
        #[arg(long, env = "MOVIENEST_JWT_SECRET", hide_env_values = true)]
        jwt_secret: String,
        /// Token lifetime in days
        #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_DAYS)]
        token_ttl_days: i64,
        /// Allowed CORS origin (repeat for several; none leaves CORS permissive)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },
    /// Initialize the database schema
    Init {
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
    /// Load movies from a JSON file into the catalogue
    Seed {
        /// Path to the seed file
        #[arg(long, env = "MOVIENEST_SEED", default_value = "movies.json")]
        file: PathBuf,
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
    /// Create a user account from the command line
    CreateUser {
        username: String,
        /// Password for the new account
        #[arg(long, env = "MOVIENEST_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("movienest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            db_url,
            jwt_secret,
            token_ttl_days,
            allowed_origins,
        } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            info!("Using database url for REST server: {}", db_config.url);

            let app = create_app(
                db_config,
                AuthConfig::with_ttl_days(jwt_secret, token_ttl_days),
                &allowed_origins,
            )
            .await?;

            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!("Listening on http://{}", bind);

            axum::serve(listener, app).await?;
        }
        Commands::Init { db_url } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            info!("Using database url for initialization: {}", db_config.url);

            info!("Initializing database...");
            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;
            info!("Database initialized successfully");
        }
        Commands::Seed { file, db_url } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;

            let movies = load_seed_movies(&file)?;
            let store = MovieStore::new(db);

            let mut loaded = 0usize;
            let mut skipped = 0usize;
            for movie in &movies {
                if store.find_by_title(movie.title.as_str()).await?.is_some() {
                    skipped += 1;
                } else {
                    store.create(movie).await?;
                    loaded += 1;
                }
            }

            println!(
                "Seeded {} movies from {} ({} already present)",
                loaded,
                file.display(),
                skipped
            );
        }
        Commands::CreateUser {
            username,
            password,
            email,
            db_url,
        } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;

            let store = UserStore::new(db);
            if store.find_by_username(&username).await?.is_some() {
                println!("{} already exists.", username);
                return Ok(());
            }

            let password_digest = hash_password(&password)?;
            let user = store
                .create(&UserCreate {
                    username: username.into(),
                    password_digest,
                    email,
                    birth_date: None,
                })
                .await?;

            println!("Created user '{}'.", user.username);
        }
    }

    Ok(())
}
