use chrono::Utc;
use uuid::Uuid;

use tunestash_types::{SongInstance, User};

use super::{instance_from_row, user_from_row};
use crate::db::DbPool;
use crate::error::StoreResult;

/// Like and stash edges between users and song instances.
pub struct ReactionRepository {
    pool: DbPool,
}

impl ReactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Like a song instance. Idempotent per (user, instance).
    pub fn like(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO likes (user_id, instance_id, created_at) VALUES (?, ?, ?)",
            (
                user_id.to_string(),
                instance_id.to_string(),
                Utc::now().timestamp(),
            ),
        )?;
        Ok(())
    }

    /// Remove a like. No-op when the edge does not exist.
    pub fn unlike(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM likes WHERE user_id = ? AND instance_id = ?",
            (user_id.to_string(), instance_id.to_string()),
        )?;
        Ok(rows_affected)
    }

    pub fn has_liked(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE user_id = ? AND instance_id = ?",
            (user_id.to_string(), instance_id.to_string()),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of distinct users who like an instance.
    pub fn like_count(&self, instance_id: &Uuid) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE instance_id = ?",
            [instance_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Users who like an instance, name ascending.
    pub fn likers_of(&self, instance_id: &Uuid) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.bio, u.avatar
             FROM users u
             JOIN likes l ON u.id = l.user_id
             WHERE l.instance_id = ?
             ORDER BY u.name ASC, u.id ASC",
        )?;

        let users = stmt
            .query_map([instance_id.to_string()], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Stash a song instance for later. Idempotent per (user, instance).
    pub fn stash(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO stashes (user_id, instance_id, created_at) VALUES (?, ?, ?)",
            (
                user_id.to_string(),
                instance_id.to_string(),
                Utc::now().timestamp(),
            ),
        )?;
        Ok(())
    }

    /// Remove a stashed instance. No-op when the edge does not exist.
    pub fn unstash(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM stashes WHERE user_id = ? AND instance_id = ?",
            (user_id.to_string(), instance_id.to_string()),
        )?;
        Ok(rows_affected)
    }

    pub fn is_stashed(&self, user_id: &Uuid, instance_id: &Uuid) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM stashes WHERE user_id = ? AND instance_id = ?",
            (user_id.to_string(), instance_id.to_string()),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// A user's stashed song instances, song name ascending.
    pub fn stash_for_user(&self, user_id: &Uuid) -> StoreResult<Vec<SongInstance>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT si.id, si.song_id, si.user_id, si.song_name, si.date_listened
             FROM song_instances si
             JOIN stashes s ON si.id = s.instance_id
             WHERE s.user_id = ?
             ORDER BY si.song_name ASC, si.id ASC",
        )?;

        let instances = stmt
            .query_map([user_id.to_string()], instance_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(instances)
    }
}
