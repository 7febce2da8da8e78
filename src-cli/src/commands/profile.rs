//! Profile commands

use serde_json::{Map, Value};
use studybuddy_core::Route;

use super::to_json;
use crate::cli::ProfileCmd;
use crate::state::AppState;

/// Each invocation is a fresh process and the backend has no profile
/// update endpoint, so `profile set` only lasts for the current run.
pub const LOCAL_EDIT_NOTICE: &str = "Profile changes apply to this run only and are not saved";

/// `key=value` pairs into a JSON object. Values that parse as JSON keep
/// their type (`streak_count=3`, `is_premium=true`); anything else is a
/// string.
pub fn parse_assignments(assignments: &[String]) -> anyhow::Result<Value> {
    let mut fields = Map::new();
    for assignment in assignments {
        let Some((key, raw)) = assignment.split_once('=') else {
            anyhow::bail!("expected KEY=VALUE, got `{assignment}`");
        };
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("empty field name in `{assignment}`");
        }

        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(Value::Object(fields))
}

pub async fn run(state: &AppState, cmd: ProfileCmd) -> anyhow::Result<Value> {
    state.enter(Route::Profile)?;
    let mut page = state.app().profile();

    match cmd {
        ProfileCmd::Show => to_json(page.view()?),
        ProfileCmd::Set { assignments } => {
            let partial = parse_assignments(&assignments)?;
            page.edit(partial)?;
            state.app().session().notifier().info(LOCAL_EDIT_NOTICE);
            to_json(page.view()?)
        }
        ProfileCmd::Subscription => {
            page.load_subscription().await?;
            Ok(serde_json::json!({
                "status": page.subscription(),
                "plans": page.plans(),
            }))
        }
        ProfileCmd::Payments => to_json(page.payment_history().await?),
        ProfileCmd::Upgrade { plan_id } => to_json(page.upgrade(&plan_id).await?),
        ProfileCmd::Cancel => {
            page.cancel_subscription().await?;
            to_json(page.view()?)
        }
    }
}
