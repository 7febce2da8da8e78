//! Navigation shell commands

use serde::Serialize;
use serde_json::Value;
use studybuddy_core::{GuardOutcome, NavbarView};

use super::to_json;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NavInfo {
    pub title: &'static str,
    pub outcome: GuardOutcome,
    pub navbar: NavbarView,
}

pub fn nav(state: &AppState, path: &str) -> anyhow::Result<Value> {
    let outcome = state.app().navigate(path)?;
    let shown = match outcome {
        GuardOutcome::Render(route) | GuardOutcome::Redirect(route) => route,
        GuardOutcome::Loading => studybuddy_core::Route::Home,
    };

    to_json(NavInfo {
        title: shown.title(),
        outcome,
        navbar: state.app().navbar(&shown.path()),
    })
}
