//! Dashboard page
//!
//! Aggregates counts from the rooms, documents and flashcard lists and
//! derives the stats, achievements and weekly goal progress shown to the
//! signed-in user.

use serde::Serialize;
use serde_json::Value;

use studybuddy_navigation::Route;
use studybuddy_session::{RequestOptions, SessionManager, User};

use crate::error::PageError;
use crate::loadable::Loadable;
use crate::{surface, Result};

pub const WEEKLY_GOAL_HOURS: u64 = 20;

/// `125` -> `"2h 5m"`
pub fn format_study_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Minutes
    pub total_study_time: u64,
    pub rooms_joined: usize,
    pub documents_uploaded: usize,
    pub flashcards_created: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyGoal {
    pub hours_studied: u64,
    pub goal_hours: u64,
    /// Capped at 100
    pub percent: u64,
    pub remaining_hours: u64,
}

impl WeeklyGoal {
    fn from_minutes(minutes: u64) -> Self {
        let goal_minutes = WEEKLY_GOAL_HOURS * 60;
        let hours_studied = minutes / 60;

        Self {
            hours_studied,
            goal_hours: WEEKLY_GOAL_HOURS,
            percent: (minutes * 100 / goal_minutes).min(100),
            remaining_hours: WEEKLY_GOAL_HOURS.saturating_sub(hours_studied),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub greeting: String,
    pub study_time_label: String,
    pub streak_count: u32,
    pub stats: DashboardStats,
    pub quick_actions: Vec<QuickAction>,
    pub achievements: Vec<Achievement>,
    pub weekly_goal: WeeklyGoal,
}

const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "Create Study Room",
        description: "Start a new collaborative study session",
        route: Route::StudyRooms,
    },
    QuickAction {
        title: "Upload Document",
        description: "Add PDFs and create flipbooks",
        route: Route::Documents,
    },
    QuickAction {
        title: "Ask AI Tutor",
        description: "Get instant help with your studies",
        route: Route::AiTutor,
    },
];

pub struct DashboardPage {
    session: SessionManager,
    stats: Loadable<DashboardStats>,
}

impl DashboardPage {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            stats: Loadable::new(),
        }
    }

    /// Count the user's rooms, documents and flashcards. A list that fails
    /// to load is logged and counted as zero.
    pub async fn load(&mut self) -> Result<&DashboardStats> {
        self.stats.begin();

        let Some(user) = self.session.user() else {
            self.stats.fail();
            return surface(&self.session, Err(PageError::NotAuthenticated));
        };

        let stats = DashboardStats {
            total_study_time: user.total_study_time,
            rooms_joined: self.count("/rooms", "rooms").await,
            documents_uploaded: self.count("/documents", "documents").await,
            flashcards_created: self.count("/ai/flashcards", "flashcards").await,
        };

        tracing::debug!(
            rooms = stats.rooms_joined,
            documents = stats.documents_uploaded,
            flashcards = stats.flashcards_created,
            "Loaded dashboard"
        );

        self.stats.finish(stats);
        Ok(self.stats.data())
    }

    async fn count(&self, endpoint: &str, field: &str) -> usize {
        match self
            .session
            .request_field::<Vec<Value>>(endpoint, RequestOptions::get(), field)
            .await
        {
            Ok(items) => items.len(),
            Err(e) => {
                tracing::error!(endpoint = %endpoint, error = %e, "Failed to fetch dashboard data");
                0
            }
        }
    }

    pub fn view(&self) -> Result<DashboardView> {
        let user = self.session.user().ok_or(PageError::NotAuthenticated)?;
        Ok(self.build_view(&user))
    }

    fn build_view(&self, user: &User) -> DashboardView {
        // Study time follows the live user so ended sessions show up
        let stats = DashboardStats {
            total_study_time: user.total_study_time,
            ..self.stats.data().clone()
        };

        let achievements = vec![
            Achievement {
                name: "First Steps",
                description: "Created your first study room",
                earned: stats.rooms_joined >= 1,
            },
            Achievement {
                name: "Knowledge Seeker",
                description: "Uploaded 5 documents",
                earned: stats.documents_uploaded >= 5,
            },
            Achievement {
                name: "Streak Master",
                description: "Maintain a 7-day study streak",
                earned: user.streak_count >= 7,
            },
            Achievement {
                name: "Collaborator",
                description: "Join 10 study rooms",
                earned: stats.rooms_joined >= 10,
            },
            Achievement {
                name: "AI Enthusiast",
                description: "Generate 50 flashcards",
                earned: stats.flashcards_created >= 50,
            },
        ];

        DashboardView {
            greeting: format!("Welcome back, {}!", user.first_name),
            study_time_label: format_study_time(stats.total_study_time),
            streak_count: user.streak_count,
            quick_actions: QUICK_ACTIONS.to_vec(),
            achievements,
            weekly_goal: WeeklyGoal::from_minutes(stats.total_study_time),
            stats,
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        self.stats.data()
    }

    pub fn is_loading(&self) -> bool {
        self.stats.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::signed_in;
    use serde_json::json;
    use studybuddy_session::ApiConfig;
    use studybuddy_storage::{Database, LocalStorage};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn items(n: usize) -> Vec<Value> {
        (1..=n).map(|id| json!({ "id": id })).collect()
    }

    #[test]
    fn test_format_study_time() {
        assert_eq!(format_study_time(0), "0h 0m");
        assert_eq!(format_study_time(125), "2h 5m");
        assert_eq!(format_study_time(60), "1h 0m");
    }

    #[test]
    fn test_weekly_goal_progress() {
        let goal = WeeklyGoal::from_minutes(125);
        assert_eq!(goal.hours_studied, 2);
        assert_eq!(goal.percent, 10);
        assert_eq!(goal.remaining_hours, 18);

        let goal = WeeklyGoal::from_minutes(30 * 60);
        assert_eq!(goal.percent, 100);
        assert_eq!(goal.remaining_hours, 0);
    }

    #[tokio::test]
    async fn test_load_counts_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rooms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rooms": items(10) })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "documents": items(2) })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ai/flashcards"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "flashcards": items(24) })),
            )
            .mount(&server)
            .await;

        let mut page = DashboardPage::new(signed_in(&server).await);
        let stats = page.load().await.unwrap().clone();
        assert_eq!(
            stats,
            DashboardStats {
                total_study_time: 125,
                rooms_joined: 10,
                documents_uploaded: 2,
                flashcards_created: 24,
            }
        );
        assert!(!page.is_loading());

        let view = page.view().unwrap();
        assert_eq!(view.greeting, "Welcome back, Ada!");
        assert_eq!(view.study_time_label, "2h 5m");
        assert_eq!(view.quick_actions[2].route, Route::AiTutor);

        let earned: Vec<_> = view
            .achievements
            .iter()
            .filter(|a| a.earned)
            .map(|a| a.name)
            .collect();
        assert_eq!(earned, vec!["First Steps", "Streak Master", "Collaborator"]);
    }

    #[tokio::test]
    async fn test_failed_lists_count_as_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rooms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rooms": items(1) })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ai/flashcards"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "error": "Failed to fetch flashcards" })),
            )
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let mut page = DashboardPage::new(session.clone());
        let stats = page.load().await.unwrap();

        assert_eq!(stats.rooms_joined, 1);
        assert_eq!(stats.documents_uploaded, 0);
        assert_eq!(stats.flashcards_created, 0);

        // Dashboard fetch failures are logged only
        assert!(session
            .notifier()
            .drain()
            .iter()
            .all(|n| n.level != studybuddy_session::NoticeLevel::Error));
    }

    #[tokio::test]
    async fn test_requires_user() {
        let storage = LocalStorage::new(Database::open_in_memory().unwrap());
        let session = SessionManager::new(ApiConfig::default(), storage).unwrap();
        session.initialize().await.unwrap();

        let mut page = DashboardPage::new(session);
        assert!(matches!(
            page.load().await,
            Err(PageError::NotAuthenticated)
        ));
        assert!(page.view().is_err());
        assert!(!page.is_loading());
    }
}
