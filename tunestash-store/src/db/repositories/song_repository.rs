use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use tunestash_types::Song;

use super::uuid_column;
use crate::db::DbPool;
use crate::error::StoreResult;

pub struct SongRepository {
    pool: DbPool,
}

fn song_from_row(row: &Row) -> rusqlite::Result<Song> {
    Ok(Song {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        artist: row.get(2)?,
        genre: row.get(3)?,
        image: row.get(4)?,
        duration_secs: row.get(5)?,
    })
}

impl SongRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a song record
    pub fn insert(&self, song: &Song) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO songs (id, name, artist, genre, image, duration_secs)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                song.id.to_string(),
                &song.name,
                &song.artist,
                &song.genre,
                &song.image,
                song.duration_secs,
            ),
        )?;
        Ok(())
    }

    /// Get song by ID
    pub fn get_by_id(&self, song_id: &Uuid) -> StoreResult<Option<Song>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, artist, genre, image, duration_secs
             FROM songs
             WHERE id = ?",
        )?;

        let song = stmt
            .query_row([song_id.to_string()], song_from_row)
            .optional()?;

        Ok(song)
    }

    /// Get song by exact name; lowest id wins on duplicates.
    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<Song>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, artist, genre, image, duration_secs
             FROM songs
             WHERE name = ?
             ORDER BY id ASC
             LIMIT 1",
        )?;

        let song = stmt.query_row([name], song_from_row).optional()?;

        Ok(song)
    }

    /// Case-insensitive existence check by song name.
    pub fn exists(&self, name: &str) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM songs WHERE name = ? COLLATE NOCASE",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete every song in one statement (atomic batch).
    pub fn delete_all(&self) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute("DELETE FROM songs", [])?;
        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup_test_db() -> (Database, SongRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        let repo = SongRepository::new(db.pool.clone());
        (db, repo)
    }

    fn adagio() -> Song {
        Song {
            id: Uuid::new_v4(),
            name: "Adagio".to_string(),
            artist: Some("Tomaso Albinoni".to_string()),
            genre: Some("Classical".to_string()),
            image: "northern-lights".to_string(),
            duration_secs: Some(651.0),
        }
    }

    #[test]
    fn insert_then_lookup_by_id_and_name() {
        let (_db, repo) = setup_test_db();
        let song = adagio();
        repo.insert(&song).unwrap();

        assert_eq!(repo.get_by_id(&song.id).unwrap().unwrap(), song);
        assert_eq!(repo.get_by_name("Adagio").unwrap().unwrap().id, song.id);
        assert!(repo.get_by_name("adagio").unwrap().is_none());
    }

    #[test]
    fn existence_check_is_case_insensitive() {
        let (_db, repo) = setup_test_db();
        repo.insert(&adagio()).unwrap();

        assert!(repo.exists("Adagio").unwrap());
        assert!(repo.exists("adagio").unwrap());
        assert!(repo.exists("ADAGIO").unwrap());
        assert!(!repo.exists("Sandstorm").unwrap());
    }

    #[test]
    fn delete_all_empties_the_table() {
        let (_db, repo) = setup_test_db();
        repo.insert(&adagio()).unwrap();
        assert_eq!(repo.delete_all().unwrap(), 1);
        assert!(!repo.exists("Adagio").unwrap());
    }
}
