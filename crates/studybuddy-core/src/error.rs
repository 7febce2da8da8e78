//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] studybuddy_storage::StorageError),

    #[error(transparent)]
    Session(#[from] studybuddy_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] studybuddy_navigation::NavigationError),

    #[error(transparent)]
    Page(#[from] studybuddy_pages::PageError),

    #[error("Configuration error: {0}")]
    Config(String),
}
