//! Dashboard command
use serde_json::Value;
use studybuddy_core::Route;

use super::to_json;
use crate::state::AppState;

pub async fn show(state: &AppState) -> anyhow::Result<Value> {
    state.enter(Route::Dashboard)?;

    let mut page = state.app().dashboard();
    page.load().await?;
    to_json(page.view()?)
}
