//! StudyBuddy Navigation Shell
//!
//! - Route table: `/`, `/login`, `/register`, `/dashboard`, `/study-rooms`,
//!   `/study-rooms/:id`, `/documents`, `/ai-tutor`, `/profile`
//! - Navigation bar: primary links only when signed in, login/sign-up otherwise
//! - Route guard: protected pages redirect to login, auth pages to the dashboard

mod error;
mod guard;
mod navbar;
mod route;

pub use error::NavigationError;
pub use guard::{GuardOutcome, RouteGuard};
pub use navbar::{NavAction, NavItem, NavLink, Navbar, NavbarView, UserMenu, NAV_ITEMS};
pub use route::Route;

pub type Result<T> = std::result::Result<T, NavigationError>;
