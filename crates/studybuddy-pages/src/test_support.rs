use serde_json::{json, Value};
use studybuddy_session::{ApiConfig, SessionManager};
use studybuddy_storage::{Database, LocalStorage, TOKEN_KEY};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "ada",
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "streak_count": 8,
        "total_study_time": 125,
        "is_premium": false
    })
}

/// A session signed in against `server` with token `test-token`
pub async fn signed_in(server: &MockServer) -> SessionManager {
    Mock::given(method("POST"))
        .and(path("/api/auth/verify-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .mount(server)
        .await;

    let storage = LocalStorage::new(Database::open_in_memory().unwrap());
    storage.set_item(TOKEN_KEY, "test-token").unwrap();

    let session =
        SessionManager::new(ApiConfig::new(format!("{}/api", server.uri())), storage).unwrap();
    session.initialize().await.unwrap();
    session
}
