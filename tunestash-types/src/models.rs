use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::CommentType;

/// Timestamp format used by the bundled seed files and the store:
/// minute precision, no timezone, no seconds.
pub const LISTEN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Custom serde module pinning listen timestamps to the
/// `yyyy-MM-ddTHH:mm` textual format so seed files round-trip exactly.
pub mod listen_time {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::LISTEN_TIME_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.format(LISTEN_TIME_FORMAT).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, LISTEN_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Immutable reference data describing a song, independent of any
/// particular listen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub name: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub image: String,
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

/// One user's listen of a song at a point in time. `song_name` is
/// denormalized from the song so listens can be sorted without a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongInstance {
    pub id: Uuid,
    pub song_id: Uuid,
    pub user_id: Uuid,
    pub song_name: String,
    #[serde(with = "listen_time")]
    pub date_listened: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub instance_id: Uuid,
    pub kind: CommentType,
    #[serde(with = "listen_time")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}
