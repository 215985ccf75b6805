use rusqlite::{types::Type, Row};
use uuid::Uuid;

use tunestash_types::{Comment, CommentType, LISTEN_TIME_FORMAT};

use super::{listen_time_column, uuid_column};
use crate::db::DbPool;
use crate::error::StoreResult;

pub struct CommentRepository {
    pool: DbPool,
}

fn comment_from_row(row: &Row) -> rusqlite::Result<Comment> {
    let kind_raw: String = row.get(3)?;
    let kind = CommentType::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown comment kind: {kind_raw}").into(),
        )
    })?;
    Ok(Comment {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        instance_id: uuid_column(row, 2)?,
        kind,
        created_at: listen_time_column(row, 4)?,
    })
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attach a comment to a song instance.
    pub fn insert(&self, comment: &Comment) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO comments (id, user_id, instance_id, kind, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                comment.id.to_string(),
                comment.user_id.to_string(),
                comment.instance_id.to_string(),
                comment.kind.as_str(),
                comment.created_at.format(LISTEN_TIME_FORMAT).to_string(),
            ),
        )?;
        Ok(())
    }

    /// Remove a comment. No-op when it does not exist.
    pub fn remove(&self, comment_id: &Uuid) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "DELETE FROM comments WHERE id = ?",
            [comment_id.to_string()],
        )?;
        Ok(rows_affected)
    }

    /// Comments on a song instance, oldest first.
    pub fn for_instance(&self, instance_id: &Uuid) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, instance_id, kind, created_at
             FROM comments
             WHERE instance_id = ?
             ORDER BY created_at ASC, id ASC",
        )?;

        let comments = stmt
            .query_map([instance_id.to_string()], comment_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::NaiveDate;

    fn setup_test_db() -> (Database, CommentRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        let repo = CommentRepository::new(db.pool.clone());
        (db, repo)
    }

    fn comment_at(instance_id: Uuid, kind: CommentType, minute: u32) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            instance_id,
            kind,
            created_at: NaiveDate::from_ymd_opt(2020, 12, 1)
                .unwrap()
                .and_hms_opt(10, minute, 0)
                .unwrap(),
        }
    }

    #[test]
    fn comments_listed_oldest_first() {
        let (_db, repo) = setup_test_db();
        let listen = Uuid::new_v4();

        let later = comment_at(listen, CommentType::Interesting, 30);
        let earlier = comment_at(listen, CommentType::Great, 1);
        repo.insert(&later).unwrap();
        repo.insert(&earlier).unwrap();

        let comments = repo.for_instance(&listen).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, earlier.id);
        assert_eq!(comments[1].id, later.id);
        assert_eq!(comments[0].kind, CommentType::Great);
    }

    #[test]
    fn comments_scoped_to_their_instance() {
        let (_db, repo) = setup_test_db();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        repo.insert(&comment_at(a, CommentType::Great, 1)).unwrap();

        assert_eq!(repo.for_instance(&a).unwrap().len(), 1);
        assert!(repo.for_instance(&b).unwrap().is_empty());
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let (_db, repo) = setup_test_db();
        let comment = comment_at(Uuid::new_v4(), CommentType::Dislike, 5);
        repo.insert(&comment).unwrap();

        assert_eq!(repo.remove(&comment.id).unwrap(), 1);
        assert_eq!(repo.remove(&comment.id).unwrap(), 0);
    }
}
