//! Route table

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", content = "room_id", rename_all = "snake_case")]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    StudyRooms,
    StudyRoom(i64),
    Documents,
    AiTutor,
    Profile,
}

impl Route {
    /// Parse a path (`/study-rooms/3`) or a full URL into a route.
    /// Query strings, fragments and trailing slashes are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let path = Self::extract_path(input)?;

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["study-rooms"] => Route::StudyRooms,
            ["study-rooms", id] => {
                let id = id
                    .parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| NavigationError::InvalidRoomId(id.to_string()))?;
                Route::StudyRoom(id)
            }
            ["documents"] => Route::Documents,
            ["ai-tutor"] => Route::AiTutor,
            ["profile"] => Route::Profile,
            _ => return Err(NavigationError::UnknownPath(input.to_string())),
        };

        Ok(route)
    }

    fn extract_path(input: &str) -> Result<String> {
        let url = match Url::parse(input) {
            Ok(url) if url.has_host() => url,
            _ => {
                let base = Url::parse("http://studybuddy.local/")
                    .map_err(|_| NavigationError::UnknownPath(input.to_string()))?;
                let relative = if input.starts_with('/') {
                    input.to_string()
                } else {
                    format!("/{input}")
                };
                base.join(&relative)
                    .map_err(|_| NavigationError::UnknownPath(input.to_string()))?
            }
        };

        Ok(url.path().to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::StudyRooms => "/study-rooms".to_string(),
            Route::StudyRoom(id) => format!("/study-rooms/{id}"),
            Route::Documents => "/documents".to_string(),
            Route::AiTutor => "/ai-tutor".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "StudyBuddy",
            Route::Login => "Login",
            Route::Register => "Sign Up",
            Route::Dashboard => "Dashboard",
            Route::StudyRooms => "Study Rooms",
            Route::StudyRoom(_) => "Study Room",
            Route::Documents => "Documents",
            Route::AiTutor => "AI Tutor",
            Route::Profile => "Profile",
        }
    }

    /// Pages that need a signed-in user
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }

    /// Pages only meaningful while signed out
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
