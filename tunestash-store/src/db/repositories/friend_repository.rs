use chrono::Utc;
use uuid::Uuid;

use tunestash_types::User;

use super::user_from_row;
use crate::db::DbPool;
use crate::error::StoreResult;

/// Friendships and follow requests.
///
/// A friendship is logically symmetric but stored as one directed row
/// per add call; every query traverses both directions, so a single
/// add is visible from either side. Follow requests are directional
/// (requester -> target) and a separate relation entirely.
pub struct FriendRepository {
    pool: DbPool,
}

impl FriendRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a friendship edge. Idempotent: re-adding an existing
    /// edge changes nothing.
    pub fn add_friend(&self, user_id: &Uuid, friend_id: &Uuid) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at) VALUES (?, ?, ?)",
            (
                user_id.to_string(),
                friend_id.to_string(),
                Utc::now().timestamp(),
            ),
        )?;
        Ok(())
    }

    /// Remove a friendship in either stored orientation. No-op when
    /// the edge does not exist.
    pub fn remove_friend(&self, user_id: &Uuid, friend_id: &Uuid) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM friendships
             WHERE (user_id = ?1 AND friend_id = ?2)
                OR (user_id = ?2 AND friend_id = ?1)",
            (user_id.to_string(), friend_id.to_string()),
        )?;
        Ok(rows_affected)
    }

    /// Check friendship regardless of which side added it.
    pub fn are_friends(&self, user_a: &Uuid, user_b: &Uuid) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM friendships
             WHERE (user_id = ?1 AND friend_id = ?2)
                OR (user_id = ?2 AND friend_id = ?1)",
            (user_a.to_string(), user_b.to_string()),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All friends of a user, name ascending. The UNION collapses
    /// edges stored in either orientation.
    pub fn friends_of(&self, user_id: &Uuid) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.bio, u.avatar
             FROM users u
             JOIN (SELECT friend_id AS other_id FROM friendships WHERE user_id = ?1
                   UNION
                   SELECT user_id FROM friendships WHERE friend_id = ?1) e
               ON u.id = e.other_id
             ORDER BY u.name ASC, u.id ASC",
        )?;

        let friends = stmt
            .query_map([user_id.to_string()], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(friends)
    }

    /// Record a pending follow request from requester to target.
    pub fn send_follow_request(&self, requester_id: &Uuid, target_id: &Uuid) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO follow_requests (requester_id, target_id, created_at)
             VALUES (?, ?, ?)",
            (
                requester_id.to_string(),
                target_id.to_string(),
                Utc::now().timestamp(),
            ),
        )?;
        Ok(())
    }

    /// Withdraw or reject a pending follow request. No-op when absent.
    pub fn remove_follow_request(
        &self,
        requester_id: &Uuid,
        target_id: &Uuid,
    ) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM follow_requests WHERE requester_id = ? AND target_id = ?",
            (requester_id.to_string(), target_id.to_string()),
        )?;
        Ok(rows_affected)
    }

    /// Users who have a pending request TO this user, name ascending.
    pub fn received_follow_requests(&self, user_id: &Uuid) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.bio, u.avatar
             FROM users u
             JOIN follow_requests fr ON u.id = fr.requester_id
             WHERE fr.target_id = ?
             ORDER BY u.name ASC, u.id ASC",
        )?;

        let users = stmt
            .query_map([user_id.to_string()], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Users this user has a pending request to, name ascending.
    pub fn sent_follow_requests(&self, user_id: &Uuid) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.bio, u.avatar
             FROM users u
             JOIN follow_requests fr ON u.id = fr.target_id
             WHERE fr.requester_id = ?
             ORDER BY u.name ASC, u.id ASC",
        )?;

        let users = stmt
            .query_map([user_id.to_string()], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }
}
