use tracing::info;
use uuid::Uuid;

use tunestash_types::User;

use crate::config::Settings;
use crate::db::repositories::{
    CommentRepository, FriendRepository, GenreRepository, InstanceRepository, ReactionRepository,
    SongRepository, UserRepository,
};
use crate::db::Database;
use crate::error::StoreResult;

/// Facade over the SQLite store: owns the pooled database plus the
/// injected settings (notably the main-user id) and hands out
/// per-concern repositories.
pub struct Store {
    db: Database,
    settings: Settings,
}

impl Store {
    /// Open (and initialize) the store described by the settings.
    pub fn open(settings: Settings) -> StoreResult<Self> {
        let db = Database::new(&settings.database.path)?;
        db.initialize()?;
        Ok(Self { db, settings })
    }

    /// An initialized in-memory store with default settings.
    pub fn in_memory() -> StoreResult<Self> {
        Self::open(Settings::in_memory())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.pool.clone())
    }

    pub fn songs(&self) -> SongRepository {
        SongRepository::new(self.db.pool.clone())
    }

    pub fn instances(&self) -> InstanceRepository {
        InstanceRepository::new(self.db.pool.clone())
    }

    pub fn comments(&self) -> CommentRepository {
        CommentRepository::new(self.db.pool.clone())
    }

    pub fn genres(&self) -> GenreRepository {
        GenreRepository::new(self.db.pool.clone())
    }

    pub fn friends(&self) -> FriendRepository {
        FriendRepository::new(self.db.pool.clone())
    }

    pub fn reactions(&self) -> ReactionRepository {
        ReactionRepository::new(self.db.pool.clone())
    }

    /// Id of the local main user, as configured.
    pub fn main_user_id(&self) -> Uuid {
        self.settings.main_user.id
    }

    /// The local main user's record; `None` until the store is seeded
    /// or the record is inserted.
    pub fn main_user(&self) -> StoreResult<Option<User>> {
        self.users().get_by_id(&self.settings.main_user.id)
    }

    pub fn is_friends_with_main_user(&self, user_id: &Uuid) -> StoreResult<bool> {
        self.friends().are_friends(user_id, &self.settings.main_user.id)
    }

    /// Wipe the store: delete all users, songs, and song instances,
    /// each as one atomic statement. Edge rows and comments are left
    /// orphaned rather than cascaded.
    pub fn empty(&self) -> StoreResult<()> {
        let songs = self.songs().delete_all()?;
        let users = self.users().delete_all()?;
        let instances = self.instances().delete_all()?;
        info!(songs, users, instances, "emptied store");
        Ok(())
    }
}
