//! Document commands
use serde_json::{json, Value};
use studybuddy_core::Route;

use super::to_json;
use crate::cli::DocumentsCmd;
use crate::state::AppState;

pub async fn run(state: &AppState, cmd: DocumentsCmd) -> anyhow::Result<Value> {
    state.enter(Route::Documents)?;
    let mut page = state.app().documents();

    match cmd {
        DocumentsCmd::List => to_json(page.load().await?),
        DocumentsCmd::Summarize { document_id } => {
            let summary = page.summarize(document_id).await?;
            Ok(json!({ "document_id": document_id, "summary": summary }))
        }
    }
}
