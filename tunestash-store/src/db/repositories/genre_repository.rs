use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use tunestash_types::Genre;

use super::uuid_column;
use crate::db::DbPool;
use crate::error::StoreResult;

/// Genre tags and the user <-> genre toggle edges.
pub struct GenreRepository {
    pool: DbPool,
}

fn genre_from_row(row: &Row) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
    })
}

impl GenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a genre, deduplicated by its unique name.
    pub fn insert(&self, genre: &Genre) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO genres (id, name) VALUES (?, ?)",
            (genre.id.to_string(), &genre.name),
        )?;
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<Genre>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM genres WHERE name = ?")?;
        let genre = stmt.query_row([name], genre_from_row).optional()?;
        Ok(genre)
    }

    /// Toggle a genre on for a user, creating the genre row if it does
    /// not exist yet. Idempotent per (user, genre); the create, lookup,
    /// and edge insert commit as one transaction.
    pub fn toggle(&self, user_id: &Uuid, genre_name: &str) -> StoreResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        // Create genre if it doesn't exist
        let genre_id = Uuid::new_v4();
        tx.execute(
            "INSERT OR IGNORE INTO genres (id, name) VALUES (?, ?)",
            (genre_id.to_string(), genre_name),
        )?;

        // Get the genre ID (either just created or existing)
        let existing_id: String = tx.query_row(
            "SELECT id FROM genres WHERE name = ?",
            [genre_name],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT OR IGNORE INTO genre_toggles (user_id, genre_id, created_at) VALUES (?, ?, ?)",
            (user_id.to_string(), existing_id, Utc::now().timestamp()),
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Toggle a genre off for a user. No-op when the edge is absent.
    pub fn untoggle(&self, user_id: &Uuid, genre_name: &str) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM genre_toggles
             WHERE user_id = ?
               AND genre_id IN (SELECT id FROM genres WHERE name = ?)",
            (user_id.to_string(), genre_name),
        )?;
        Ok(rows_affected)
    }

    /// Genres a user has toggled on, name ascending.
    pub fn toggled_by(&self, user_id: &Uuid) -> StoreResult<Vec<Genre>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name
             FROM genres g
             JOIN genre_toggles gt ON g.id = gt.genre_id
             WHERE gt.user_id = ?
             ORDER BY g.name ASC, g.id ASC",
        )?;

        let genres = stmt
            .query_map([user_id.to_string()], genre_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }
}
