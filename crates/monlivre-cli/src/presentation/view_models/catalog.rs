use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntryViewModel {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub published_year: Option<i32>,
    pub cover_url: String,
    pub available_copies: i64,
    pub available: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Single query matched against title, author or genre (admin listing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<String>,
}

impl CatalogFilters {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none() && self.any.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogListViewModel {
    pub books: Vec<CatalogEntryViewModel>,
    pub total_count: usize,
    pub filters: CatalogFilters,
}

#[derive(Debug, Serialize)]
pub struct CatalogDetailViewModel {
    pub book: CatalogEntryViewModel,
}

#[derive(Debug, Serialize)]
pub struct BorrowResultViewModel {
    pub book_id: i64,
    pub return_date: NaiveDate,
    /// The book as listed after the catalog was refetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<CatalogEntryViewModel>,
}

impl CreateView for CatalogListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::catalog::CatalogListView;
        Box::new(CatalogListView::new(self, mode))
    }
}

impl CreateView for CatalogDetailViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::catalog::CatalogDetailView;
        Box::new(CatalogDetailView::new(&self.book, mode))
    }
}

impl CreateView for BorrowResultViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::catalog::BorrowResultView;
        Box::new(BorrowResultView::new(self, mode))
    }
}
