use crate::args::ViewModeArgs;
use crate::presentation::presenters::{self, LoanDisplay};
use crate::presentation::view_models::{CommandResultViewModel, CreateView};
use crate::presentation::{ConsoleRenderer, Renderer, ViewMode};
use crate::types::OutputFormat;
use anyhow::Result;
use monlivre_engine::Notification;
use monlivre_runtime::{MonLivre, StudentDashboard};
use serde::Serialize;

/// Context for handler execution with consistent presentation utilities
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub workspace: &'a MonLivre,
    pub format: OutputFormat,
    pub view_mode: ViewMode,
}

impl<'a> HandlerContext<'a> {
    pub fn new(workspace: &'a MonLivre, format: OutputFormat) -> Self {
        Self {
            workspace,
            format,
            view_mode: ViewMode::default(),
        }
    }

    pub fn with_view_mode(self, args: &ViewModeArgs) -> Self {
        Self {
            view_mode: args.resolve(),
            ..self
        }
    }

    /// Render a view model using the configured format and view mode
    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView + Send + Sync,
    {
        let renderer = ConsoleRenderer::new(self.format, self.view_mode);
        renderer.render(view_model)
    }

    /// Show the failed action with its notifications, then hand the error back
    pub fn fail<T>(
        &self,
        action: &'static str,
        err: monlivre_runtime::Error,
        notifications: Vec<Notification>,
    ) -> Result<T> {
        self.render(presenters::present_failure(action, &err, notifications))?;
        Err(err.into())
    }

    pub fn placeholder_cover(&self) -> &'a str {
        &self.workspace.config().catalog.placeholder_cover
    }

    pub fn loan_display(&self, dashboard: &StudentDashboard) -> LoanDisplay<'a> {
        LoanDisplay {
            today: dashboard.today(),
            due_soon_days: dashboard.settings().due_soon_days,
            placeholder_cover: self.placeholder_cover(),
        }
    }
}
