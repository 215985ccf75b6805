use rusqlite::OptionalExtension;
use uuid::Uuid;

use tunestash_types::User;

use super::user_from_row;
use crate::db::DbPool;
use crate::error::StoreResult;

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user record
    pub fn insert(&self, user: &User) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (id, name, bio, avatar) VALUES (?, ?, ?, ?)",
            (
                user.id.to_string(),
                &user.name,
                &user.bio,
                &user.avatar,
            ),
        )?;
        Ok(())
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: &Uuid) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, bio, avatar
             FROM users
             WHERE id = ?",
        )?;

        let user = stmt
            .query_row([user_id.to_string()], user_from_row)
            .optional()?;

        Ok(user)
    }

    /// Get user by display name. Names are treated as de-facto natural
    /// keys by the seed wiring; when duplicates exist the lowest id
    /// wins, deterministically.
    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, bio, avatar
             FROM users
             WHERE name = ?
             ORDER BY id ASC
             LIMIT 1",
        )?;

        let user = stmt.query_row([name], user_from_row).optional()?;

        Ok(user)
    }

    /// Get all users (for search), id-deduplicated by the primary key,
    /// name ascending.
    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, bio, avatar
             FROM users
             ORDER BY name ASC, id ASC",
        )?;

        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Delete every user in one statement (atomic batch).
    pub fn delete_all(&self) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute("DELETE FROM users", [])?;
        Ok(rows_affected)
    }
}
