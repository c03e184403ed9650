use monlivre_types::{CatalogBook, contains_ignore_case};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{array_items, normalize_catalog_book};

/// Normalize a `GET /books` payload, preserving order
pub fn load(payload: &Value) -> Vec<CatalogBook> {
    array_items(payload).iter().map(normalize_catalog_book).collect()
}

/// Catalog search box: one field per column, all of which must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.genre.is_empty()
    }

    pub fn matches(&self, book: &CatalogBook) -> bool {
        contains_ignore_case(&book.title, &self.title)
            && contains_ignore_case(&book.author, &self.author)
            && contains_ignore_case(&book.genre, &self.genre)
    }
}

pub fn search<'a>(
    books: &'a [CatalogBook],
    query: &'a CatalogQuery,
) -> impl Iterator<Item = &'a CatalogBook> + 'a {
    books.iter().filter(move |book| query.matches(book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monlivre_types::BookId;
    use serde_json::json;

    fn books() -> Vec<CatalogBook> {
        load(&json!([
            {"id": 1, "title": "Le Petit Prince", "author": "Antoine de Saint-Exupéry",
             "genre": "Conte", "available_copies": 3},
            {"id": 2, "title": "Le Rouge et le Noir", "author": "Stendhal",
             "genre": "Roman", "available_copies": 0},
            {"id": 3, "title": "Madame Bovary", "author": "Gustave Flaubert",
             "genre": "Roman", "available_copies": 1}
        ]))
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let books = books();
        let query = CatalogQuery::new();
        assert!(query.is_empty());
        assert_eq!(search(&books, &query).count(), 3);
    }

    #[test]
    fn test_all_fields_must_match() {
        let books = books();

        let query = CatalogQuery::new().title("le").genre("ROMAN");
        let ids: Vec<BookId> = search(&books, &query).map(|b| b.id).collect();
        assert_eq!(ids, vec![BookId::new(2)]);

        let query = CatalogQuery::new().author("flaubert").genre("conte");
        assert_eq!(search(&books, &query).count(), 0);
    }

    #[test]
    fn test_availability() {
        let books = books();
        assert!(books[0].is_available());
        assert!(!books[1].is_available());
    }
}
