// Library exports for tunestash-store
// The db module owns the SQLite layer; store::Store is the facade the
// view-model layer talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod store;

pub use config::Settings;
pub use db::{Database, DbPool};
pub use error::{StoreError, StoreResult};
pub use seed::{SeedData, SeedReport};
pub use store::Store;
