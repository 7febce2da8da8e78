//! StudyBuddy Pages
//!
//! Each page fetches what it shows when it is opened, keeps the results in
//! local state, and appends objects returned by create calls to that state.
//! Failures are logged and pushed as error notices; nothing is retried or
//! rolled back, and nothing is cached across pages.

mod ai_tutor;
mod dashboard;
mod documents;
mod error;
mod loadable;
mod profile;
mod study_room;
mod study_rooms;

#[cfg(test)]
mod test_support;

pub use ai_tutor::{AiTutorPage, StudySource, MAX_GENERATED_ITEMS};
pub use dashboard::{
    format_study_time, Achievement, DashboardPage, DashboardStats, DashboardView, QuickAction,
    WeeklyGoal, WEEKLY_GOAL_HOURS,
};
pub use documents::DocumentsPage;
pub use error::PageError;
pub use loadable::Loadable;
pub use profile::{ProfilePage, ProfileView};
pub use study_room::StudyRoomPage;
pub use study_rooms::StudyRoomsPage;

pub type Result<T> = std::result::Result<T, PageError>;

/// Log a failed page action and surface it as an error notice.
pub(crate) fn surface<T, E: Into<PageError>>(
    session: &studybuddy_session::SessionManager,
    result: std::result::Result<T, E>,
) -> Result<T> {
    result.map_err(|e| {
        let e = e.into();
        tracing::error!(error = %e, "Page action failed");
        session.notifier().error(e.to_string());
        e
    })
}
