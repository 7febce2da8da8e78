//! Single study room page

use serde_json::{json, Value};

use studybuddy_session::models::{RoomDetail, StudySession};
use studybuddy_session::{RequestOptions, SessionManager};

use crate::error::PageError;
use crate::loadable::Loadable;
use crate::{surface, Result};

pub struct StudyRoomPage {
    session: SessionManager,
    room_id: i64,
    room: Loadable<Option<RoomDetail>>,
    study_session: Option<StudySession>,
    whiteboard: Option<Value>,
}

impl StudyRoomPage {
    pub fn new(session: SessionManager, room_id: i64) -> Self {
        Self {
            session,
            room_id,
            room: Loadable::new(),
            study_session: None,
            whiteboard: None,
        }
    }

    pub async fn load(&mut self) -> Result<&RoomDetail> {
        self.room.begin();

        let result = self
            .session
            .request_field::<RoomDetail>(
                &format!("/rooms/{}", self.room_id),
                RequestOptions::get(),
                "room",
            )
            .await;

        match surface(&self.session, result) {
            Ok(detail) => {
                tracing::debug!(
                    room_id = self.room_id,
                    members = detail.members.len(),
                    "Loaded room"
                );
                self.room.finish(None);
                let detail: &RoomDetail = self.room.data_mut().insert(detail);
                Ok(detail)
            }
            Err(e) => {
                self.room.fail();
                Err(e)
            }
        }
    }

    pub async fn start_session(&mut self) -> Result<StudySession> {
        if self.study_session.is_some() {
            return surface(
                &self.session,
                Err(PageError::InvalidInput("Session already active".to_string())),
            );
        }

        let result = self
            .session
            .request_field::<StudySession>(
                &format!("/rooms/{}/sessions", self.room_id),
                RequestOptions::post_empty(),
                "session",
            )
            .await;
        let study_session = surface(&self.session, result)?;

        tracing::info!(
            room_id = self.room_id,
            session_id = study_session.id,
            "Started study session"
        );
        self.session.notifier().success("Study session started");

        self.study_session = Some(study_session.clone());
        Ok(study_session)
    }

    /// End the running study session and credit its minutes to the local user
    pub async fn end_session(&mut self) -> Result<StudySession> {
        let Some(active) = self.study_session.as_ref() else {
            return surface(&self.session, Err(PageError::NoActiveStudySession));
        };

        let result = self
            .session
            .request_field::<StudySession>(
                &format!("/rooms/{}/sessions/{}/end", self.room_id, active.id),
                RequestOptions::post_empty(),
                "session",
            )
            .await;
        let ended = surface(&self.session, result)?;
        self.study_session = None;

        let minutes = ended.duration_minutes.unwrap_or(0);
        if let Some(user) = self.session.user() {
            let total = user.total_study_time + minutes;
            surface(
                &self.session,
                self.session
                    .update_user(json!({ "total_study_time": total })),
            )?;
        }

        tracing::info!(
            room_id = self.room_id,
            session_id = ended.id,
            minutes,
            "Ended study session"
        );
        self.session
            .notifier()
            .success(format!("Study session ended ({minutes} min)"));

        Ok(ended)
    }

    pub async fn whiteboard(&mut self) -> Result<&Value> {
        let result = self
            .session
            .request_field::<Value>(
                &format!("/rooms/{}/whiteboard", self.room_id),
                RequestOptions::get(),
                "whiteboard_data",
            )
            .await;
        let data = surface(&self.session, result)?;

        let data: &Value = self.whiteboard.insert(data);
        Ok(data)
    }

    pub async fn save_whiteboard(&mut self, data: Value) -> Result<()> {
        let result = self
            .session
            .request(
                &format!("/rooms/{}/whiteboard", self.room_id),
                RequestOptions::post(json!({ "whiteboard_data": data })),
            )
            .await;
        surface(&self.session, result)?;

        self.whiteboard = Some(data);
        self.session
            .notifier()
            .success("Whiteboard updated successfully");

        Ok(())
    }

    pub async fn leave(&mut self) -> Result<()> {
        let result = self
            .session
            .request(
                &format!("/rooms/{}/leave", self.room_id),
                RequestOptions::post_empty(),
            )
            .await;
        surface(&self.session, result)?;

        tracing::info!(room_id = self.room_id, "Left room");
        self.session.notifier().success("Successfully left room");

        Ok(())
    }

    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    pub fn room(&self) -> Option<&RoomDetail> {
        self.room.data().as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.room.is_loading()
    }

    pub fn study_session(&self) -> Option<&StudySession> {
        self.study_session.as_ref()
    }

    /// Resume tracking a session started earlier (e.g. by another invocation)
    pub fn resume_session(&mut self, study_session: StudySession) {
        self.study_session = Some(study_session);
    }
}
