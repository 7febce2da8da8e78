//! Study rooms list page

use serde_json::json;

use studybuddy_session::models::{NewRoom, Room};
use studybuddy_session::{RequestOptions, SessionManager};

use crate::error::PageError;
use crate::loadable::Loadable;
use crate::{surface, Result};

pub struct StudyRoomsPage {
    session: SessionManager,
    rooms: Loadable<Vec<Room>>,
}

impl StudyRoomsPage {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            rooms: Loadable::new(),
        }
    }

    /// Public rooms plus the user's own and joined rooms
    pub async fn load(&mut self) -> Result<&[Room]> {
        self.rooms.begin();

        let result = self
            .session
            .request_field::<Vec<Room>>("/rooms", RequestOptions::get(), "rooms")
            .await;

        match surface(&self.session, result) {
            Ok(rooms) => {
                tracing::debug!(count = rooms.len(), "Loaded rooms");
                self.rooms.finish(rooms);
                Ok(self.rooms.data().as_slice())
            }
            Err(e) => {
                self.rooms.fail();
                Err(e)
            }
        }
    }

    pub async fn create_room(&mut self, new_room: NewRoom) -> Result<Room> {
        if new_room.name.trim().is_empty() {
            return surface(
                &self.session,
                Err(PageError::InvalidInput("Room name is required".to_string())),
            );
        }

        let body = surface(&self.session, serde_json::to_value(&new_room))?;
        let result = self
            .session
            .request_field::<Room>("/rooms", RequestOptions::post(body), "room")
            .await;
        let room = surface(&self.session, result)?;

        self.rooms.data_mut().push(room.clone());

        tracing::info!(room_id = room.id, name = %room.name, "Created room");
        self.session.notifier().success("Room created successfully");

        Ok(room)
    }

    pub async fn join(&mut self, room_id: i64) -> Result<Room> {
        let result = self
            .session
            .request_field::<Room>(
                &format!("/rooms/{room_id}/join"),
                RequestOptions::post_empty(),
                "room",
            )
            .await;
        let room = surface(&self.session, result)?;

        self.upsert(room.clone());

        tracing::info!(room_id = room.id, "Joined room");
        self.session.notifier().success("Successfully joined room");

        Ok(room)
    }

    pub async fn join_by_code(&mut self, room_code: &str) -> Result<Room> {
        let room_code = room_code.trim();
        if room_code.is_empty() {
            return surface(
                &self.session,
                Err(PageError::InvalidInput("Room code is required".to_string())),
            );
        }

        let result = self
            .session
            .request_field::<Room>(
                "/rooms/join-by-code",
                RequestOptions::post(json!({ "room_code": room_code })),
                "room",
            )
            .await;
        let room = surface(&self.session, result)?;

        self.upsert(room.clone());

        tracing::info!(room_id = room.id, "Joined room by code");
        self.session.notifier().success("Successfully joined room");

        Ok(room)
    }

    /// Leave a room. Private rooms drop out of the list since they are no
    /// longer visible to the user.
    pub async fn leave(&mut self, room_id: i64) -> Result<()> {
        let result = self
            .session
            .request(
                &format!("/rooms/{room_id}/leave"),
                RequestOptions::post_empty(),
            )
            .await;
        surface(&self.session, result)?;

        self.rooms
            .data_mut()
            .retain(|room| room.id != room_id || !room.is_private);

        tracing::info!(room_id, "Left room");
        self.session.notifier().success("Successfully left room");

        Ok(())
    }

    fn upsert(&mut self, room: Room) {
        let rooms = self.rooms.data_mut();
        match rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room,
            None => rooms.push(room),
        }
    }

    pub fn rooms(&self) -> &[Room] {
        self.rooms.data()
    }

    pub fn is_loading(&self) -> bool {
        self.rooms.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::signed_in;
    use studybuddy_session::NoticeLevel;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn room(id: i64, name: &str, is_private: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "subject": "Math",
            "owner_id": 1,
            "max_participants": 10,
            "is_private": is_private,
            "room_code": format!("CODE{id}")
        })
    }

    async fn mount_rooms(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/rooms"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rooms": [room(1, "Calculus", false), room(2, "Secret Club", true)]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_load_rooms() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;

        let mut page = StudyRoomsPage::new(signed_in(&server).await);
        assert!(page.is_loading());

        let rooms = page.load().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].room_code.as_deref(), Some("CODE2"));
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_notifies_and_stops_loading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rooms"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch rooms"})),
            )
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let mut page = StudyRoomsPage::new(session.clone());

        assert!(page.load().await.is_err());
        assert!(!page.is_loading());
        assert!(page.rooms().is_empty());

        let notices = session.notifier().drain();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Error);
        assert_eq!(notices.last().unwrap().message, "Failed to fetch rooms");
    }

    #[tokio::test]
    async fn test_create_room_appends_server_object() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/rooms"))
            .and(body_json(json!({"name": "Physics", "subject": "Science", "is_private": false})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Room created successfully",
                "room": room(3, "Physics", false)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut page = StudyRoomsPage::new(signed_in(&server).await);
        page.load().await.unwrap();

        let created = page
            .create_room(NewRoom {
                name: "Physics".to_string(),
                subject: Some("Science".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(page.rooms().len(), 3);
        assert_eq!(page.rooms()[2].name, "Physics");
    }

    #[tokio::test]
    async fn test_create_room_requires_name() {
        let server = MockServer::start().await;
        let session = signed_in(&server).await;
        let mut page = StudyRoomsPage::new(session.clone());

        let err = page.create_room(NewRoom::default()).await.unwrap_err();
        assert!(matches!(err, PageError::InvalidInput(_)));
        assert_eq!(
            session.notifier().drain().last().unwrap().message,
            "Room name is required"
        );
    }

    #[tokio::test]
    async fn test_join_replaces_listed_room_and_join_by_code_appends() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/rooms/1/join"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Successfully joined room",
                "room": room(1, "Calculus II", false)
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/rooms/join-by-code"))
            .and(body_json(json!({"room_code": "CODE9"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "room": room(9, "Chemistry", true)
            })))
            .mount(&server)
            .await;

        let mut page = StudyRoomsPage::new(signed_in(&server).await);
        page.load().await.unwrap();

        page.join(1).await.unwrap();
        assert_eq!(page.rooms().len(), 2);
        assert_eq!(page.rooms()[0].name, "Calculus II");

        page.join_by_code("  CODE9 ").await.unwrap();
        assert_eq!(page.rooms().len(), 3);
    }

    #[tokio::test]
    async fn test_join_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/rooms/1/join"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Already a member of this room"
            })))
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let mut page = StudyRoomsPage::new(session.clone());

        let err = page.join(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Already a member of this room");
    }

    #[tokio::test]
    async fn test_leave_drops_private_rooms_only() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/rooms/1/leave"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Successfully left room"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/rooms/2/leave"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Successfully left room"})),
            )
            .mount(&server)
            .await;

        let mut page = StudyRoomsPage::new(signed_in(&server).await);
        page.load().await.unwrap();

        page.leave(1).await.unwrap();
        assert_eq!(page.rooms().len(), 2);

        page.leave(2).await.unwrap();
        assert_eq!(page.rooms().len(), 1);
        assert_eq!(page.rooms()[0].id, 1);
    }
}
