use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

#[derive(Debug, Clone, Serialize)]
pub struct StudentEntryViewModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub borrowed_books: u32,
}

#[derive(Debug, Serialize)]
pub struct StudentListViewModel {
    pub students: Vec<StudentEntryViewModel>,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Outcome of one admin mutation
#[derive(Debug, Serialize)]
pub struct AdminActionViewModel {
    pub action: &'static str,
    pub collection: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Size of the collection after the refetch
    pub total_count: usize,
}

impl CreateView for StudentListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::admin::StudentListView;
        Box::new(StudentListView::new(self, mode))
    }
}

impl CreateView for AdminActionViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::admin::AdminActionView;
        Box::new(AdminActionView::new(self, mode))
    }
}
