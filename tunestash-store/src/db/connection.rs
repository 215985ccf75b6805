use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::SCHEMA;
use crate::error::StoreResult;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let manager = Self::create_connection_manager(path);
        let pool = Pool::new(manager)?;
        Ok(Self { pool })
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    ///
    /// Foreign keys are switched off on every pooled connection. The
    /// schema declares them for documentation, but deletes must not
    /// cascade and edge rows referencing absent parents are tolerated;
    /// the bundled SQLite build defaults enforcement on, so it has to
    /// be disabled explicitly.
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> SqliteConnectionManager {
        let path_str = path.as_ref().to_string_lossy();
        let trimmed_path = path_str.trim();

        let manager = if trimmed_path.eq_ignore_ascii_case(MEMORY_DB_PATH) {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path)
        };

        manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = OFF;"))
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> StoreResult<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_creation() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");

        // Verify tables exist
        let conn = db.connection().expect("Failed to get connection");
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .expect("Failed to prepare statement");

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .expect("Failed to query tables")
            .collect::<Result<Vec<_>, _>>()
            .expect("Failed to collect tables");

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"songs".to_string()));
        assert!(tables.contains(&"song_instances".to_string()));
        assert!(tables.contains(&"comments".to_string()));
        assert!(tables.contains(&"genres".to_string()));
        assert!(tables.contains(&"friendships".to_string()));
        assert!(tables.contains(&"follow_requests".to_string()));
        assert!(tables.contains(&"likes".to_string()));
        assert!(tables.contains(&"stashes".to_string()));
        assert!(tables.contains(&"genre_toggles".to_string()));
    }

    #[test]
    fn test_memory_database_detection() {
        // Various memory database path spellings
        let memory_paths = [":memory:", " :memory: ", ":MEMORY:", " :Memory: "];

        for path in &memory_paths {
            let db = Database::new(path).expect("Failed to create memory database");
            db.initialize().expect("Failed to initialize schema");
        }
    }

    #[test]
    fn test_foreign_keys_stay_disabled_on_pooled_connections() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");

        let conn = db.connection().expect("Failed to get connection");
        let enforced: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("Failed to read pragma");
        assert_eq!(enforced, 0);

        // edge rows referencing absent parents must insert cleanly
        conn.execute(
            "INSERT INTO likes (user_id, instance_id, created_at) VALUES (?, ?, 0)",
            ["no-such-user", "no-such-instance"],
        )
        .expect("orphaned edge insert should succeed");
    }

    #[test]
    fn test_initialize_is_repeatable() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("first initialize");
        db.initialize().expect("second initialize");
    }
}
