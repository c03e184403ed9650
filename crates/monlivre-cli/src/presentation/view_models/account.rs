use chrono::NaiveDate;
use monlivre_types::AccountStatus;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::{CreateView, LoanStatsViewModel, ViewMode};

#[derive(Debug, Serialize)]
pub struct SessionViewModel {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginViewModel {
    pub user_id: String,
    pub is_admin: bool,
    /// Page the web client would open next
    pub landing: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileViewModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub registration_date: Option<NaiveDate>,
    pub status: AccountStatus,
    pub max_books: u32,
    pub stats: LoanStatsViewModel,
}

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub data_dir: PathBuf,
    pub config_file_exists: bool,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub renewal_days: i64,
    pub due_soon_days: i64,
    pub renewal_mode: String,
    pub overdue_policy: String,
    pub placeholder_cover: String,
}

impl CreateView for SessionViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::SessionView;
        Box::new(SessionView::new(self, mode))
    }
}

impl CreateView for LoginViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::LoginView;
        Box::new(LoginView::new(self, mode))
    }
}

impl CreateView for ProfileViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::ProfileView;
        Box::new(ProfileView::new(self, mode))
    }
}

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::ConfigView;
        Box::new(ConfigView::new(self, mode))
    }
}
