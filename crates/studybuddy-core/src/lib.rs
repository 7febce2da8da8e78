//! StudyBuddy Core
//!
//! Coordination layer for the StudyBuddy client. The app owns the local
//! store and the session context; pages and the navigation shell only read
//! from the session.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::{Config, API_URL_ENV, DATA_DIR_ENV, DEFAULT_API_URL};
pub use error::CoreError;

// Re-export client components
pub use studybuddy_navigation::{
    GuardOutcome, NavAction, NavLink, NavbarView, NavigationError, Route, UserMenu,
};
pub use studybuddy_pages::{
    AiTutorPage, DashboardPage, DashboardView, DocumentsPage, PageError, ProfilePage,
    ProfileView, StudyRoomPage, StudyRoomsPage, StudySource, MAX_GENERATED_ITEMS,
};
pub use studybuddy_session::models;
pub use studybuddy_session::{
    Notice, NoticeLevel, RegisterRequest, Session, SessionError, SessionManager, User,
};
pub use studybuddy_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging to stderr. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
