pub mod account;
pub mod admin;
pub mod catalog;
pub mod common;
pub mod failure;
pub mod loan;
pub mod result;

use std::fmt;

pub use account::{ConfigViewModel, LoginViewModel, ProfileViewModel, SessionViewModel};
pub use admin::{AdminActionViewModel, StudentEntryViewModel, StudentListViewModel};
pub use catalog::{
    BorrowResultViewModel, CatalogDetailViewModel, CatalogEntryViewModel, CatalogFilters,
    CatalogListViewModel,
};
pub use failure::ActionFailureViewModel;
pub use common::{Guidance, StatusBadge, ViewMode};
pub use loan::{
    LoanDetailViewModel, LoanEntryViewModel, LoanListViewModel, LoanStatsViewModel,
    RenewResultViewModel, ReturnResultViewModel,
};
pub use result::CommandResultViewModel;

/// Bridge from a view model to its text layout for a given density
pub trait CreateView {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a>;
}
