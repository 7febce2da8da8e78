//! StudyBuddy Storage Layer
//!
//! SQLite-backed key/value storage that stands in for the browser's
//! `localStorage`. The session token is the only value the client persists.

mod database;
mod error;
mod local_storage;
mod migrations;

pub use database::Database;
pub use error::StorageError;
pub use local_storage::{LocalStorage, TOKEN_KEY};

pub type Result<T> = std::result::Result<T, StorageError>;
