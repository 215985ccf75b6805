mod comment_repository;
mod friend_repository;
mod genre_repository;
mod instance_repository;
mod reaction_repository;
mod song_repository;
mod user_repository;

pub use comment_repository::CommentRepository;
pub use friend_repository::FriendRepository;
pub use genre_repository::GenreRepository;
pub use instance_repository::InstanceRepository;
pub use reaction_repository::ReactionRepository;
pub use song_repository::SongRepository;
pub use user_repository::UserRepository;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

use tunestash_types::{SongInstance, User, LISTEN_TIME_FORMAT};

/// Read a TEXT column as a Uuid, surfacing corrupt ids as conversion
/// failures instead of panicking mid-query.
pub(crate) fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a TEXT column holding a minute-precision listen timestamp.
pub(crate) fn listen_time_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, LISTEN_TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Map a `SELECT id, name, bio, avatar` row onto a User.
pub(crate) fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        bio: row.get(2)?,
        avatar: row.get(3)?,
    })
}

/// Map a `SELECT id, song_id, user_id, song_name, date_listened` row
/// onto a SongInstance.
pub(crate) fn instance_from_row(row: &Row) -> rusqlite::Result<SongInstance> {
    Ok(SongInstance {
        id: uuid_column(row, 0)?,
        song_id: uuid_column(row, 1)?,
        user_id: uuid_column(row, 2)?,
        song_name: row.get(3)?,
        date_listened: listen_time_column(row, 4)?,
    })
}
