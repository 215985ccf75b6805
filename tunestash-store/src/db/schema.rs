/// SQL schema for the tunestash store.
///
/// Entities live in their own tables; every relationship is an
/// explicit junction table with a composite primary key, so edges are
/// sets rather than multisets. Foreign keys are declared for
/// documentation only; connections open with PRAGMA foreign_keys OFF
/// (see connection.rs), so deleting an entity never cascades and
/// orphaned edge rows are tolerated.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    bio TEXT,
    avatar TEXT
);

CREATE INDEX IF NOT EXISTS idx_users_name ON users(name);

-- Songs table (immutable reference data)
CREATE TABLE IF NOT EXISTS songs (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    artist TEXT,
    genre TEXT,
    image TEXT NOT NULL,
    duration_secs REAL
);

CREATE INDEX IF NOT EXISTS idx_songs_name ON songs(name);

-- Song instances: one user's listen of a song at a point in time.
-- song_name is denormalized for sorting; date_listened uses the
-- minute-precision yyyy-MM-ddTHH:mm format, which sorts
-- lexicographically in chronological order.
CREATE TABLE IF NOT EXISTS song_instances (
    id TEXT PRIMARY KEY,
    song_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    song_name TEXT NOT NULL,
    date_listened TEXT NOT NULL,
    FOREIGN KEY (song_id) REFERENCES songs(id),
    FOREIGN KEY (user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_instances_user ON song_instances(user_id);
CREATE INDEX IF NOT EXISTS idx_instances_date ON song_instances(date_listened DESC);

-- Comments on song instances, with a fixed reaction kind
CREATE TABLE IF NOT EXISTS comments (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    instance_id TEXT NOT NULL,
    kind TEXT NOT NULL CHECK(kind IN ('great', 'interesting', 'dislike')),
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (instance_id) REFERENCES song_instances(id)
);

CREATE INDEX IF NOT EXISTS idx_comments_instance ON comments(instance_id);

-- Genres table (unique genre names)
CREATE TABLE IF NOT EXISTS genres (
    id TEXT PRIMARY KEY,
    name TEXT UNIQUE NOT NULL
);

-- Friendships: logically symmetric, stored one row per add call;
-- queries traverse both directions.
CREATE TABLE IF NOT EXISTS friendships (
    user_id TEXT NOT NULL,
    friend_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, friend_id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (friend_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_friendships_user ON friendships(user_id);
CREATE INDEX IF NOT EXISTS idx_friendships_friend ON friendships(friend_id);

-- Follow requests (directional: requester -> target)
CREATE TABLE IF NOT EXISTS follow_requests (
    requester_id TEXT NOT NULL,
    target_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (requester_id, target_id),
    FOREIGN KEY (requester_id) REFERENCES users(id),
    FOREIGN KEY (target_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_follow_requests_requester ON follow_requests(requester_id);
CREATE INDEX IF NOT EXISTS idx_follow_requests_target ON follow_requests(target_id);

-- Likes on song instances
CREATE TABLE IF NOT EXISTS likes (
    user_id TEXT NOT NULL,
    instance_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, instance_id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (instance_id) REFERENCES song_instances(id)
);

CREATE INDEX IF NOT EXISTS idx_likes_instance ON likes(instance_id);

-- Stashed song instances (a user's saved listens)
CREATE TABLE IF NOT EXISTS stashes (
    user_id TEXT NOT NULL,
    instance_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, instance_id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (instance_id) REFERENCES song_instances(id)
);

CREATE INDEX IF NOT EXISTS idx_stashes_user ON stashes(user_id);

-- Genre toggles (user <-> genre membership)
CREATE TABLE IF NOT EXISTS genre_toggles (
    user_id TEXT NOT NULL,
    genre_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, genre_id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (genre_id) REFERENCES genres(id)
);

CREATE INDEX IF NOT EXISTS idx_genre_toggles_user ON genre_toggles(user_id);
"#;
