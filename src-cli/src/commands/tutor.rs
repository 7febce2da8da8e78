//! AI tutor commands

use serde_json::{json, Value};
use studybuddy_core::Route;

use super::to_json;
use crate::cli::TutorCmd;
use crate::state::AppState;

pub async fn run(state: &AppState, cmd: TutorCmd) -> anyhow::Result<Value> {
    state.enter(Route::AiTutor)?;
    let mut page = state.app().ai_tutor();

    match cmd {
        TutorCmd::Conversations => to_json(page.load().await?),
        TutorCmd::New {
            conversation_type,
            title,
            room,
        } => to_json(
            page.create_conversation(conversation_type, title.as_deref(), room)
                .await?,
        ),
        TutorCmd::Messages { conversation_id } => to_json(page.open(conversation_id).await?),
        TutorCmd::Send {
            conversation_id,
            content,
        } => {
            page.open(conversation_id).await?;
            to_json(page.send_message(&content).await?)
        }
        TutorCmd::Flashcards => to_json(page.load_flashcards().await?),
        TutorCmd::GenerateFlashcards {
            source,
            count,
            category,
        } => to_json(
            page.generate_flashcards(&source.to_source(), count, category.as_deref())
                .await?,
        ),
        TutorCmd::Review {
            flashcard_id,
            correct,
            incorrect: _,
        } => to_json(page.review_flashcard(flashcard_id, correct).await?),
        TutorCmd::Tests => to_json(page.load_practice_tests().await?),
        TutorCmd::GenerateTest {
            source,
            count,
            title,
        } => to_json(
            page.generate_practice_test(&source.to_source(), count, title.as_deref())
                .await?,
        ),
        TutorCmd::Summarize { source } => {
            let summary = page.summarize(&source.to_source()).await?;
            Ok(json!({ "summary": summary }))
        }
    }
}
