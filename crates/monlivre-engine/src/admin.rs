use monlivre_types::{CatalogBook, StudentAccount, contains_ignore_case};
use serde_json::Value;

use crate::normalize::{array_items, normalize_account};

pub use crate::catalog::load as load_books;

/// Normalize a `GET /admin/users` payload, preserving order
pub fn load_accounts(payload: &Value) -> Vec<StudentAccount> {
    array_items(payload).iter().map(normalize_account).collect()
}

/// Admin book table search: one query over title, author or genre
pub fn filter_books<'a>(
    books: &'a [CatalogBook],
    query: &'a str,
) -> impl Iterator<Item = &'a CatalogBook> + 'a {
    books.iter().filter(move |book| {
        contains_ignore_case(&book.title, query)
            || contains_ignore_case(&book.author, query)
            || contains_ignore_case(&book.genre, query)
    })
}

/// Admin student table search: one query over name or email
pub fn filter_students<'a>(
    accounts: &'a [StudentAccount],
    query: &'a str,
) -> impl Iterator<Item = &'a StudentAccount> + 'a {
    accounts.iter().filter(move |account| {
        contains_ignore_case(&account.name, query) || contains_ignore_case(&account.email, query)
    })
}
