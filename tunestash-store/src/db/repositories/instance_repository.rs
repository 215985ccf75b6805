use rusqlite::OptionalExtension;
use uuid::Uuid;

use tunestash_types::{SongInstance, LISTEN_TIME_FORMAT};

use super::instance_from_row;
use crate::db::DbPool;
use crate::error::StoreResult;

pub struct InstanceRepository {
    pool: DbPool,
}

impl InstanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a song instance (a user logging a listen).
    pub fn insert(&self, instance: &SongInstance) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO song_instances (id, song_id, user_id, song_name, date_listened)
             VALUES (?, ?, ?, ?, ?)",
            (
                instance.id.to_string(),
                instance.song_id.to_string(),
                instance.user_id.to_string(),
                &instance.song_name,
                instance.date_listened.format(LISTEN_TIME_FORMAT).to_string(),
            ),
        )?;
        Ok(())
    }

    /// Get song instance by ID
    pub fn get_by_id(&self, instance_id: &Uuid) -> StoreResult<Option<SongInstance>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, song_id, user_id, song_name, date_listened
             FROM song_instances
             WHERE id = ?",
        )?;

        let instance = stmt
            .query_row([instance_id.to_string()], instance_from_row)
            .optional()?;

        Ok(instance)
    }

    /// A user's listens, most recent first.
    pub fn recently_listened_by(&self, user_id: &Uuid) -> StoreResult<Vec<SongInstance>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, song_id, user_id, song_name, date_listened
             FROM song_instances
             WHERE user_id = ?
             ORDER BY date_listened DESC, id ASC",
        )?;

        let instances = stmt
            .query_map([user_id.to_string()], instance_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(instances)
    }

    /// Delete one song instance; reports whether a row was removed.
    /// Edges pointing at the instance are left to the caller.
    pub fn delete_by_id(&self, instance_id: &Uuid) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM song_instances WHERE id = ?",
            [instance_id.to_string()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete every song instance in one statement (atomic batch).
    pub fn delete_all(&self) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute("DELETE FROM song_instances", [])?;
        Ok(rows_affected)
    }
}
