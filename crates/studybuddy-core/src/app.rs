//! Application state container
//!
//! Owns the local store and the session context, and hands out pages that
//! share that session. Pages never talk to each other.

use studybuddy_navigation::{GuardOutcome, Navbar, NavbarView, Route, RouteGuard};
use studybuddy_pages::{
    AiTutorPage, DashboardPage, DocumentsPage, ProfilePage, StudyRoomPage, StudyRoomsPage,
};
use studybuddy_session::{ApiConfig, SessionManager, User};
use studybuddy_storage::{Database, LocalStorage};

use crate::config::Config;
use crate::Result;

pub struct App {
    config: Config,
    session: SessionManager,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        let storage = LocalStorage::new(db);
        let session = SessionManager::new(ApiConfig::new(config.api_base_url.clone()), storage)?;

        Ok(Self { config, session })
    }

    /// Build an app over an in-memory store
    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;

        let storage = LocalStorage::new(Database::open_in_memory()?);
        let session = SessionManager::new(ApiConfig::new(config.api_base_url.clone()), storage)?;

        Ok(Self { config, session })
    }

    /// Verify the stored token, if any
    pub async fn initialize(&self) -> Result<Option<User>> {
        let user = self.session.initialize().await?;

        tracing::info!(
            api = %self.config.api_base_url,
            authenticated = user.is_some(),
            "App initialized"
        );

        Ok(user)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Resolve a path against the route table and the current session
    pub fn navigate(&self, path: &str) -> Result<GuardOutcome> {
        let route = Route::parse(path)?;
        Ok(self.guard(route))
    }

    pub fn guard(&self, route: Route) -> GuardOutcome {
        RouteGuard::resolve(route, &self.session.session())
    }

    pub fn navbar(&self, current_path: &str) -> NavbarView {
        Navbar::render(&self.session.session(), current_path)
    }

    // === Pages ===

    pub fn dashboard(&self) -> DashboardPage {
        DashboardPage::new(self.session.clone())
    }

    pub fn study_rooms(&self) -> StudyRoomsPage {
        StudyRoomsPage::new(self.session.clone())
    }

    pub fn study_room(&self, room_id: i64) -> StudyRoomPage {
        StudyRoomPage::new(self.session.clone(), room_id)
    }

    pub fn documents(&self) -> DocumentsPage {
        DocumentsPage::new(self.session.clone())
    }

    pub fn ai_tutor(&self) -> AiTutorPage {
        AiTutorPage::new(self.session.clone())
    }

    pub fn profile(&self) -> ProfilePage {
        ProfilePage::new(self.session.clone())
    }
}
