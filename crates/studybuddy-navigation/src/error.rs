//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown path: {0}")]
    UnknownPath(String),

    #[error("Invalid room id: {0}")]
    InvalidRoomId(String),
}
