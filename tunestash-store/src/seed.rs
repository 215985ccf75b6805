//! Seed-data loading: decodes the bundled JSON collections and wires
//! the fixed starter topology around the main user.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};
use uuid::Uuid;

use tunestash_types::{
    Comment, CommentType, Genre, Song, SongInstance, User, LISTEN_TIME_FORMAT,
};

use crate::db::repositories::UserRepository;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

const SEED_SARAH: &str = "Sarah Connor";
const SEED_BOB: &str = "Bob LobLaw";
const SEED_PETER: &str = "Peter Parker";
const SEED_VINNY: &str = "Vinny Gambini";

/// Bob's "Adagio" listen in the bundled seed data; the starter comment
/// from Sarah attaches to this instance.
pub const SEED_COMMENT_INSTANCE_ID: &str = "d362db4f-a6ac-46c9-809b-a6137f43c4da";
const SEED_COMMENT_TIME: &str = "2020-12-01T10:01";

/// The four seed collections. Each is loaded independently: a missing
/// or malformed file logs and leaves that collection `None` without
/// blocking the others.
#[derive(Debug, Default)]
pub struct SeedData {
    pub users: Option<Vec<User>>,
    pub songs: Option<Vec<Song>>,
    pub song_instances: Option<Vec<SongInstance>>,
    pub genres: Option<Vec<Genre>>,
}

impl SeedData {
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            users: load_collection(dir, "users.json"),
            songs: load_collection(dir, "songs.json"),
            song_instances: load_collection(dir, "song_instances.json"),
            genres: load_collection(dir, "genres.json"),
        }
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_collection<T: DeserializeOwned>(dir: &Path, file: &str) -> Option<Vec<T>> {
    let path = dir.join(file);
    match read_collection(&path) {
        Ok(records) => Some(records),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not load seed collection");
            None
        }
    }
}

/// One boolean per seed step, matching the per-collection isolation of
/// the loader: a failed step never blocks the remaining ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedReport {
    pub users_loaded: bool,
    pub songs_loaded: bool,
    pub instances_loaded: bool,
    pub genres_loaded: bool,
    pub relationships_wired: bool,
}

impl SeedReport {
    pub fn complete(&self) -> bool {
        self.users_loaded
            && self.songs_loaded
            && self.instances_loaded
            && self.genres_loaded
            && self.relationships_wired
    }
}

impl Store {
    /// Seed a fresh store: insert each collection (one transaction per
    /// collection), then wire the starter friendships, follow
    /// requests, and comment by name lookup. Inserts are OR IGNORE, so
    /// re-seeding an already seeded store changes nothing.
    pub fn seed(&self, data: &SeedData) -> SeedReport {
        let users_loaded = match &data.users {
            Some(users) => report_step("users", self.insert_seed_users(users)),
            None => false,
        };
        let songs_loaded = match &data.songs {
            Some(songs) => report_step("songs", self.insert_seed_songs(songs)),
            None => false,
        };
        let instances_loaded = match &data.song_instances {
            Some(instances) => report_step("song_instances", self.insert_seed_instances(instances)),
            None => false,
        };
        let genres_loaded = match &data.genres {
            Some(genres) => report_step("genres", self.insert_seed_genres(genres)),
            None => false,
        };
        let relationships_wired =
            report_step("relationships", self.wire_seed_relationships());

        SeedReport {
            users_loaded,
            songs_loaded,
            instances_loaded,
            genres_loaded,
            relationships_wired,
        }
    }

    fn insert_seed_users(&self, users: &[User]) -> StoreResult<()> {
        let mut conn = self.database().connection()?;
        let tx = conn.transaction()?;
        for user in users {
            tx.execute(
                "INSERT OR IGNORE INTO users (id, name, bio, avatar) VALUES (?, ?, ?, ?)",
                (user.id.to_string(), &user.name, &user.bio, &user.avatar),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_seed_songs(&self, songs: &[Song]) -> StoreResult<()> {
        let mut conn = self.database().connection()?;
        let tx = conn.transaction()?;
        for song in songs {
            tx.execute(
                "INSERT OR IGNORE INTO songs (id, name, artist, genre, image, duration_secs)
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
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_seed_instances(&self, instances: &[SongInstance]) -> StoreResult<()> {
        let mut conn = self.database().connection()?;
        let tx = conn.transaction()?;
        for instance in instances {
            tx.execute(
                "INSERT OR IGNORE INTO song_instances
                 (id, song_id, user_id, song_name, date_listened)
                 VALUES (?, ?, ?, ?, ?)",
                (
                    instance.id.to_string(),
                    instance.song_id.to_string(),
                    instance.user_id.to_string(),
                    &instance.song_name,
                    instance.date_listened.format(LISTEN_TIME_FORMAT).to_string(),
                ),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_seed_genres(&self, genres: &[Genre]) -> StoreResult<()> {
        let mut conn = self.database().connection()?;
        let tx = conn.transaction()?;
        for genre in genres {
            tx.execute(
                "INSERT OR IGNORE INTO genres (id, name) VALUES (?, ?)",
                (genre.id.to_string(), &genre.name),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Starter topology, resolved by display name:
    /// Main User <-> Sarah, Main User <-> Bob, Bob <-> Sarah,
    /// Peter <-> Sarah; Peter has a pending request to Main User;
    /// Main User has a pending request to Vinny; Sarah leaves a
    /// "great" comment on Bob's Adagio listen.
    fn wire_seed_relationships(&self) -> StoreResult<()> {
        let users = self.users();
        let friends = self.friends();

        let main = self
            .main_user()?
            .ok_or_else(|| StoreError::NotFound("main user".to_string()))?;
        let sarah = require_user(&users, SEED_SARAH)?;
        let bob = require_user(&users, SEED_BOB)?;
        let peter = require_user(&users, SEED_PETER)?;
        let vinny = require_user(&users, SEED_VINNY)?;

        friends.add_friend(&main.id, &sarah.id)?;
        friends.add_friend(&main.id, &bob.id)?;
        friends.add_friend(&bob.id, &sarah.id)?;
        friends.add_friend(&peter.id, &sarah.id)?;

        friends.send_follow_request(&peter.id, &main.id)?;
        friends.send_follow_request(&main.id, &vinny.id)?;

        self.wire_seed_comment(&sarah)?;

        info!("wired seed relationships");
        Ok(())
    }

    fn wire_seed_comment(&self, author: &User) -> StoreResult<()> {
        let instance_id = seed_comment_instance_id();
        match self.instances().get_by_id(&instance_id)? {
            Some(instance) => {
                // skip when a previous seed already left the comment
                let already = self
                    .comments()
                    .for_instance(&instance.id)?
                    .iter()
                    .any(|c| c.user_id == author.id);
                if !already {
                    self.comments().insert(&Comment {
                        id: Uuid::new_v4(),
                        user_id: author.id,
                        instance_id: instance.id,
                        kind: CommentType::Great,
                        created_at: seed_comment_time(),
                    })?;
                }
                Ok(())
            }
            None => {
                warn!(%instance_id, "seed comment target missing, skipping");
                Ok(())
            }
        }
    }
}

fn require_user(users: &UserRepository, name: &str) -> StoreResult<User> {
    users
        .get_by_name(name)?
        .ok_or_else(|| StoreError::NotFound(format!("user '{name}'")))
}

fn seed_comment_instance_id() -> Uuid {
    Uuid::parse_str(SEED_COMMENT_INSTANCE_ID).expect("fixed seed instance id")
}

fn seed_comment_time() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(SEED_COMMENT_TIME, LISTEN_TIME_FORMAT)
        .expect("fixed seed comment time")
}

fn report_step(step: &str, result: StoreResult<()>) -> bool {
    match result {
        Ok(()) => {
            info!(step, "seed step done");
            true
        }
        Err(e) => {
            error!(step, error = %e, "seed step failed");
            false
        }
    }
}
