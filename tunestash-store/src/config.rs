use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Default id of the local "main user". Overridable via settings.toml
/// or the TUNESTASH_MAIN_USER_ID environment variable; the bundled
/// seed data registers its "Main User" record under this id.
pub const DEFAULT_MAIN_USER_ID: &str = "9b0591b3-2f92-4811-9ed3-304d7d49c9e7";

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainUser {
    pub id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    /// Directory holding users.json / songs.json / song_instances.json
    /// / genres.json.
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: Database,
    pub main_user: MainUser,
    pub seed: Seed,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Try to load from settings.toml (optional)
        let config_file_name = "settings.toml";

        // Check in current directory
        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Check in tunestash-store directory (for development)
        let dev_path = PathBuf::from("tunestash-store").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = builder
            .set_default("database.path", "tunestash.db")?
            .set_default("main_user.id", DEFAULT_MAIN_USER_ID)?
            .set_default("seed.dir", "seeds")?;

        // 2. Override with environment variables (highest priority)
        if let Ok(db_path) = std::env::var("TUNESTASH_DB_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(main_user_id) = std::env::var("TUNESTASH_MAIN_USER_ID") {
            builder = builder.set_override("main_user.id", main_user_id)?;
        }
        if let Ok(seed_dir) = std::env::var("TUNESTASH_SEED_DIR") {
            builder = builder.set_override("seed.dir", seed_dir)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }

    /// In-memory settings with the stock main-user id, used by tests
    /// and by callers that manage their own seed data.
    pub fn in_memory() -> Self {
        Self {
            database: Database {
                path: ":memory:".to_string(),
            },
            main_user: MainUser {
                id: DEFAULT_MAIN_USER_ID.parse().expect("valid default id"),
            },
            seed: Seed {
                dir: "seeds".to_string(),
            },
        }
    }
}
