//! StudyBuddy Session Context
//!
//! Holds the signed-in user and bearer token, and owns the single request
//! helper every page goes through:
//! - A stored token is verified once on startup and discarded if rejected
//! - Login and registration persist the returned token
//! - Logout and profile edits are local only
//! - No retries, no backoff, no token refresh

mod error;
mod manager;
pub mod models;
mod notice;
mod request;
mod session;

pub use error::SessionError;
pub use manager::{ApiConfig, SessionManager};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use request::RequestOptions;
pub use session::{RegisterRequest, Session, User};

pub type Result<T> = std::result::Result<T, SessionError>;
