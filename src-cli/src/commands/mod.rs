//! CLI commands
//!
//! Each command enters its page through the route guard, runs one page
//! action and returns the resulting view as JSON.

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod navigation;
pub mod profile;
pub mod rooms;
pub mod tutor;

use serde::Serialize;
use serde_json::Value;
use studybuddy_core::Notice;

use crate::cli::Command;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub notices: Vec<Notice>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            notices: Vec::new(),
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            notices: Vec::new(),
        }
    }

    pub fn with_notices(mut self, notices: Vec<Notice>) -> Self {
        self.notices = notices;
        self
    }
}

pub(crate) fn to_json<T: Serialize>(data: T) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(data)?)
}

pub async fn dispatch(state: &AppState, command: Command) -> anyhow::Result<Value> {
    match command {
        Command::Login { email, password } => auth::login(state, &email, password).await,
        Command::Register(args) => auth::register(state, args).await,
        Command::Logout => auth::logout(state),
        Command::Whoami => auth::whoami(state),
        Command::Nav { path } => navigation::nav(state, &path),
        Command::Dashboard => dashboard::show(state).await,
        Command::Rooms { cmd } => rooms::run(state, cmd).await,
        Command::Documents { cmd } => documents::run(state, cmd).await,
        Command::Tutor { cmd } => tutor::run(state, cmd).await,
        Command::Profile { cmd } => profile::run(state, cmd).await,
    }
}
