//! Authentication commands
use std::io::{self, BufRead, Write};

use serde_json::Value;
use studybuddy_core::{PageError, ProfileView, RegisterRequest, Route};

use super::to_json;
use crate::cli::RegisterArgs;
use crate::state::AppState;

fn read_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    state: &AppState,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<Value> {
    state.enter(Route::Login)?;
    let password = read_password(password)?;

    let user = state.app().session().login(email, &password).await?;
    to_json(ProfileView::from(&user))
}

pub async fn register(state: &AppState, args: RegisterArgs) -> anyhow::Result<Value> {
    state.enter(Route::Register)?;

    let request = RegisterRequest {
        username: args.username,
        email: args.email,
        password: read_password(args.password)?,
        first_name: args.first_name,
        last_name: args.last_name,
    };

    let user = state.app().session().register(&request).await?;
    to_json(ProfileView::from(&user))
}

pub fn logout(state: &AppState) -> anyhow::Result<Value> {
    state.app().session().logout()?;
    Ok(Value::Null)
}

pub fn whoami(state: &AppState) -> anyhow::Result<Value> {
    let user = state
        .app()
        .session()
        .user()
        .ok_or(PageError::NotAuthenticated)?;
    to_json(ProfileView::from(&user))
}
