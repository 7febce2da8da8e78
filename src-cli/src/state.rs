//! Application state for one CLI invocation
use studybuddy_core::{App, Config, GuardOutcome, PageError, Result, Route};

pub struct AppState {
    app: App,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            app: App::new(config)?,
        })
    }

    pub fn with_app(app: App) -> Self {
        Self { app }
    }

    pub async fn initialize(&self) -> Result<()> {
        self.app.initialize().await?;
        Ok(())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Apply the route guard for the page a command acts on
    pub fn enter(&self, route: Route) -> anyhow::Result<()> {
        match self.app.guard(route) {
            GuardOutcome::Render(_) => Ok(()),
            GuardOutcome::Redirect(Route::Login) | GuardOutcome::Loading => {
                Err(PageError::NotAuthenticated.into())
            }
            GuardOutcome::Redirect(target) => {
                let name = self
                    .app
                    .session()
                    .user()
                    .map(|user| user.display_name())
                    .unwrap_or_default();
                anyhow::bail!("Already logged in as {name}; see {target}")
            }
        }
    }
}
