use chrono::NaiveDate;
use monlivre_engine::Notification;
use monlivre_types::{BookId, CatalogBook};

use super::badge_for;
use crate::args::hints::cmd;
use crate::presentation::view_models::{
    BorrowResultViewModel, CatalogDetailViewModel, CatalogEntryViewModel, CatalogFilters,
    CatalogListViewModel, CommandResultViewModel, Guidance, StatusBadge,
};

pub fn catalog_entry(book: &CatalogBook, placeholder_cover: &str) -> CatalogEntryViewModel {
    let cover_url = if book.cover_url.trim().is_empty() {
        placeholder_cover.to_string()
    } else {
        book.cover_url.clone()
    };
    CatalogEntryViewModel {
        id: book.id.get(),
        title: book.title.clone(),
        author: book.author.clone(),
        genre: book.genre.clone(),
        isbn: book.isbn.clone(),
        published_year: book.published_year,
        cover_url,
        available_copies: book.available_copies,
        available: book.is_available(),
    }
}

pub fn present_catalog_list(
    shown: &[CatalogBook],
    total_count: usize,
    filters: CatalogFilters,
    placeholder_cover: &str,
) -> CommandResultViewModel<CatalogListViewModel> {
    let books: Vec<_> = shown
        .iter()
        .map(|b| catalog_entry(b, placeholder_cover))
        .collect();
    let available = books.iter().filter(|b| b.available).count();

    let mut result = CommandResultViewModel::new(CatalogListViewModel {
        books,
        total_count,
        filters,
    });

    if result.content.books.is_empty() {
        result = result.with_badge(StatusBadge::info("No books found"));
    } else {
        let shown_count = result.content.books.len();
        result = result
            .with_badge(StatusBadge::success(format!(
                "{} book(s), {} available",
                shown_count,
                available
            )))
            .with_suggestion(
                Guidance::new("Borrow a book").with_command(cmd::CATALOG_BORROW),
            );
    }
    result
}

pub fn present_catalog_detail(
    book: &CatalogBook,
    placeholder_cover: &str,
) -> CommandResultViewModel<CatalogDetailViewModel> {
    CommandResultViewModel::new(CatalogDetailViewModel {
        book: catalog_entry(book, placeholder_cover),
    })
}

pub fn present_borrow(
    id: BookId,
    return_date: NaiveDate,
    book: Option<&CatalogBook>,
    placeholder_cover: &str,
    notifications: Vec<Notification>,
) -> CommandResultViewModel<BorrowResultViewModel> {
    let badge = badge_for(&notifications, "Borrowed");
    CommandResultViewModel::new(BorrowResultViewModel {
        book_id: id.get(),
        return_date,
        book: book.map(|b| catalog_entry(b, placeholder_cover)),
    })
    .with_badge(badge)
    .with_notifications(notifications)
    .with_suggestion(Guidance::new("See your loans").with_command(cmd::LOANS_LIST))
}
