use chrono::NaiveDate;
use monlivre_engine::RenewOutcome;
use monlivre_types::{DueStatus, LoanState};
use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

#[derive(Debug, Clone, Serialize)]
pub struct LoanEntryViewModel {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    /// Cover to display; the configured placeholder when the loan has none
    pub cover_url: String,
    pub has_cover: bool,
    pub borrow_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub renewal_count: u32,
    pub max_renewals: u32,
    pub renewals_left: u32,
    pub state: LoanState,
    pub due: DueStatus,
    pub can_renew: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoanStatsViewModel {
    pub borrowed: usize,
    pub overdue: usize,
    pub renewals: u32,
    pub available_slots: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LoanListViewModel {
    pub loans: Vec<LoanEntryViewModel>,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub stats: LoanStatsViewModel,
}

#[derive(Debug, Serialize)]
pub struct LoanDetailViewModel {
    pub loan: LoanEntryViewModel,
}

#[derive(Debug, Serialize)]
pub struct RenewResultViewModel {
    pub loan_id: i64,
    pub outcome: RenewOutcome,
    /// The loan after the attempt, absent when it does not exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanEntryViewModel>,
}

#[derive(Debug, Serialize)]
pub struct ReturnResultViewModel {
    pub loan_id: i64,
    pub remaining: Vec<LoanEntryViewModel>,
}

impl CreateView for LoanListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::loan::LoanListView;
        Box::new(LoanListView::new(self, mode))
    }
}

impl CreateView for LoanDetailViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::loan::LoanDetailView;
        Box::new(LoanDetailView::new(&self.loan, mode))
    }
}

impl CreateView for RenewResultViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::loan::RenewResultView;
        Box::new(RenewResultView::new(self, mode))
    }
}

impl CreateView for ReturnResultViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::loan::ReturnResultView;
        Box::new(ReturnResultView::new(self, mode))
    }
}
