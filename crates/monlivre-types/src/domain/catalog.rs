use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::BookId;

/// A book as listed in the public catalog and in the admin console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBook {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: Option<i32>,
    pub cover_url: String,
    pub available_copies: i64,
}

impl CatalogBook {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

/// Body of `POST /user/books/{userId}/borrow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub book_id: BookId,
    pub book_name: String,
    /// Requested return date
    pub date: NaiveDate,
}

/// Admin form for creating or editing a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub published_year: Option<i32>,
    pub available_copies: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_url: String,
}

impl BookForm {
    /// Pre-fill the form from an existing catalog entry
    pub fn from_book(book: &CatalogBook) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            isbn: book.isbn.clone(),
            published_year: book.published_year,
            available_copies: book.available_copies,
            cover_url: book.cover_url.clone(),
        }
    }
}
