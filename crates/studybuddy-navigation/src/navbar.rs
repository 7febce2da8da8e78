//! Navigation bar view model

use serde::Serialize;

use studybuddy_session::Session;

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
}

/// Primary links, shown only to signed-in users
pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        route: Route::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        route: Route::StudyRooms,
        label: "Study Rooms",
    },
    NavItem {
        route: Route::Documents,
        label: "Documents",
    },
    NavItem {
        route: Route::AiTutor,
        label: "AI Tutor",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    Profile,
    Logout,
    Login,
    SignUp,
}

impl NavAction {
    pub fn label(&self) -> &'static str {
        match self {
            NavAction::Profile => "Profile",
            NavAction::Logout => "Logout",
            NavAction::Login => "Login",
            NavAction::SignUp => "Sign Up",
        }
    }

    /// Where the shell goes after the action; logout lands on the home page
    pub fn target(&self) -> Route {
        match self {
            NavAction::Profile => Route::Profile,
            NavAction::Logout => Route::Home,
            NavAction::Login => Route::Login,
            NavAction::SignUp => Route::Register,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMenu {
    pub display_name: String,
    pub email: String,
    pub initials: String,
    pub avatar_url: Option<String>,
    pub streak_label: String,
    pub is_premium: bool,
    pub entries: Vec<NavAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarView {
    pub links: Vec<NavLink>,
    pub user_menu: Option<UserMenu>,
    pub actions: Vec<NavAction>,
}

pub struct Navbar;

impl Navbar {
    pub fn render(session: &Session, current_path: &str) -> NavbarView {
        let current = Route::parse(current_path).ok();

        let user = match (&session.user, session.is_authenticated()) {
            (Some(user), true) => user,
            _ => {
                return NavbarView {
                    links: Vec::new(),
                    user_menu: None,
                    actions: vec![NavAction::Login, NavAction::SignUp],
                };
            }
        };

        let links = NAV_ITEMS
            .iter()
            .map(|item| NavLink {
                label: item.label,
                path: item.route.path(),
                active: current == Some(item.route),
            })
            .collect();

        let user_menu = UserMenu {
            display_name: user.display_name(),
            email: user.email.clone(),
            initials: user.initials(),
            avatar_url: user.avatar_url.clone(),
            streak_label: format!("{} day streak", user.streak_count),
            is_premium: user.is_premium,
            entries: vec![NavAction::Profile, NavAction::Logout],
        };

        NavbarView {
            links,
            user_menu: Some(user_menu),
            actions: Vec::new(),
        }
    }
}
