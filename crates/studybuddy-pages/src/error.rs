//! Page error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Session(#[from] studybuddy_session::SessionError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Please log in to continue")]
    NotAuthenticated,

    #[error("{0}")]
    InvalidInput(String),

    #[error("No conversation selected")]
    NoActiveConversation,

    #[error("No active study session")]
    NoActiveStudySession,
}
