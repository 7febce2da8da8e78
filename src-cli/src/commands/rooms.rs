//! Study room commands

use serde_json::{json, Value};
use studybuddy_core::models::{NewRoom, StudySession};
use studybuddy_core::Route;

use super::to_json;
use crate::cli::RoomsCmd;
use crate::state::AppState;

pub async fn run(state: &AppState, cmd: RoomsCmd) -> anyhow::Result<Value> {
    match cmd {
        RoomsCmd::List => {
            state.enter(Route::StudyRooms)?;
            let mut page = state.app().study_rooms();
            to_json(page.load().await?)
        }
        RoomsCmd::Create {
            name,
            description,
            subject,
            max_participants,
            private,
        } => {
            state.enter(Route::StudyRooms)?;
            let mut page = state.app().study_rooms();
            let room = page
                .create_room(NewRoom {
                    name,
                    description,
                    subject,
                    max_participants,
                    is_private: private,
                })
                .await?;
            to_json(room)
        }
        RoomsCmd::Show { room_id } => {
            state.enter(Route::StudyRoom(room_id))?;
            let mut page = state.app().study_room(room_id);
            to_json(page.load().await?)
        }
        RoomsCmd::Join { room_id } => {
            state.enter(Route::StudyRooms)?;
            to_json(state.app().study_rooms().join(room_id).await?)
        }
        RoomsCmd::JoinCode { code } => {
            state.enter(Route::StudyRooms)?;
            to_json(state.app().study_rooms().join_by_code(&code).await?)
        }
        RoomsCmd::Leave { room_id } => {
            state.enter(Route::StudyRoom(room_id))?;
            state.app().study_room(room_id).leave().await?;
            Ok(Value::Null)
        }
        RoomsCmd::Start { room_id } => {
            state.enter(Route::StudyRoom(room_id))?;
            to_json(state.app().study_room(room_id).start_session().await?)
        }
        RoomsCmd::End {
            room_id,
            session_id,
        } => {
            state.enter(Route::StudyRoom(room_id))?;
            let mut page = state.app().study_room(room_id);
            page.resume_session(StudySession {
                id: session_id,
                room_id: Some(room_id),
                ..Default::default()
            });
            let ended = page.end_session().await?;
            let total_study_time = state
                .app()
                .session()
                .user()
                .map(|user| user.total_study_time);
            Ok(json!({ "session": ended, "total_study_time": total_study_time }))
        }
        RoomsCmd::Whiteboard { room_id, set } => {
            state.enter(Route::StudyRoom(room_id))?;
            let mut page = state.app().study_room(room_id);
            match set {
                Some(raw) => {
                    let data: Value = serde_json::from_str(&raw)?;
                    page.save_whiteboard(data.clone()).await?;
                    Ok(data)
                }
                None => Ok(page.whiteboard().await?.clone()),
            }
        }
    }
}
