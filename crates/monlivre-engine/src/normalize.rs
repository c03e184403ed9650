// Backend payload normalization
//
// The backend is not consistent about field naming: the same loan can arrive
// as `borrow_date` or `borrowDate`, covers as `cover_url` or `coverImage`,
// numbers sometimes as strings. Each normalizer below looks a field up under
// every known alias and falls back to a default instead of failing, so one
// malformed field never hides the rest of the record.

use chrono::NaiveDate;
use monlivre_types::{
    AccountId, AccountStatus, BookId, BorrowedBook, CatalogBook, DEFAULT_MAX_BOOKS,
    DEFAULT_MAX_RENEWALS, LoanId, StudentAccount, StudentProfile, UserId, parse_calendar_date,
};
use serde_json::Value;

const COVER_ALIASES: &[&str] = &["cover_url", "coverUrl", "coverImage", "cover_image"];

/// Normalize one raw loan object. Non-object input yields an all-default record.
pub fn normalize_loan(raw: &Value) -> BorrowedBook {
    BorrowedBook {
        id: LoanId::new(int_field(raw, &["id"]).unwrap_or_default()),
        title: string_field(raw, &["title"]).unwrap_or_default(),
        author: string_field(raw, &["author"]).unwrap_or_default(),
        genre: string_field(raw, &["genre"]).unwrap_or_default(),
        isbn: string_field(raw, &["isbn"]).unwrap_or_default(),
        cover_url: non_empty_string_field(raw, COVER_ALIASES).unwrap_or_default(),
        borrow_date: date_field(raw, &["borrow_date", "borrowDate"]),
        due_date: date_field(raw, &["due_date", "dueDate"]),
        renewal_count: count_field(raw, &["renewal_count", "renewalCount"]).unwrap_or(0),
        max_renewals: count_field(raw, &["max_renewals", "maxRenewals"])
            .unwrap_or(DEFAULT_MAX_RENEWALS),
        is_overdue: bool_field(raw, &["is_overdue", "isOverdue"]).unwrap_or(false),
    }
}

/// Normalize the profile payload.
///
/// `user_id` is the session's id, used when the payload does not carry one;
/// `today` stands in for a missing registration date.
pub fn normalize_profile(raw: &Value, user_id: &UserId, today: NaiveDate) -> StudentProfile {
    let id = string_field(raw, &["id"]).unwrap_or_else(|| user_id.to_string());
    let student_id = non_empty_string_field(raw, &["studentId", "student_id", "id"])
        .unwrap_or_else(|| user_id.to_string());

    let status = match string_field(raw, &["status"]).as_deref() {
        Some(s) if s.eq_ignore_ascii_case("suspended") => AccountStatus::Suspended,
        _ => AccountStatus::Active,
    };

    StudentProfile {
        id,
        name: string_field(raw, &["name"]).unwrap_or_default(),
        email: string_field(raw, &["email"]).unwrap_or_default(),
        student_id,
        registration_date: date_field(raw, &["registrationDate", "registration_date"])
            .or(Some(today)),
        status,
        max_books: count_field(raw, &["maxBooks", "max_books"]).unwrap_or(DEFAULT_MAX_BOOKS),
    }
}

pub fn normalize_catalog_book(raw: &Value) -> CatalogBook {
    CatalogBook {
        id: BookId::new(int_field(raw, &["id", "book_id", "bookId"]).unwrap_or_default()),
        isbn: string_field(raw, &["isbn"]).unwrap_or_default(),
        title: string_field(raw, &["title"]).unwrap_or_default(),
        author: string_field(raw, &["author"]).unwrap_or_default(),
        genre: string_field(raw, &["genre"]).unwrap_or_default(),
        published_year: int_field(raw, &["published_year", "publishedYear"])
            .and_then(|y| i32::try_from(y).ok()),
        cover_url: non_empty_string_field(raw, COVER_ALIASES).unwrap_or_default(),
        available_copies: int_field(raw, &["available_copies", "availableCopies"])
            .unwrap_or_default(),
    }
}

pub fn normalize_account(raw: &Value) -> StudentAccount {
    StudentAccount {
        id: AccountId::new(int_field(raw, &["id"]).unwrap_or_default()),
        name: string_field(raw, &["name"]).unwrap_or_default(),
        email: string_field(raw, &["email"]).unwrap_or_default(),
        borrowed_books: count_field(raw, &["borrowedBooks", "borrowed_books"]).unwrap_or(0),
    }
}

/// Iterate the elements of an array payload; anything else is treated as empty
pub fn array_items(payload: &Value) -> &[Value] {
    payload.as_array().map(Vec::as_slice).unwrap_or(&[])
}

// --------------------------------------------------------
// Field accessors
// --------------------------------------------------------

/// First alias whose value is present and not null
fn lookup<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let obj = raw.as_object()?;
    aliases
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

fn string_field(raw: &Value, aliases: &[&str]) -> Option<String> {
    match lookup(raw, aliases)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like `string_field`, but an empty string falls through to the next alias
fn non_empty_string_field(raw: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|alias| string_field(raw, &[*alias]).filter(|s| !s.trim().is_empty()))
}

fn int_field(raw: &Value, aliases: &[&str]) -> Option<i64> {
    match lookup(raw, aliases)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-negative integer; negative or oversized values count as malformed
fn count_field(raw: &Value, aliases: &[&str]) -> Option<u32> {
    int_field(raw, aliases).and_then(|n| u32::try_from(n).ok())
}

fn bool_field(raw: &Value, aliases: &[&str]) -> Option<bool> {
    match lookup(raw, aliases)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn date_field(raw: &Value, aliases: &[&str]) -> Option<NaiveDate> {
    match lookup(raw, aliases)? {
        Value::String(s) => parse_calendar_date(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_loan_snake_case() {
        let raw = json!({
            "id": 3,
            "title": "Calculus",
            "author": "Michael Spivak",
            "genre": "Mathematics",
            "isbn": "9780914098911",
            "cover_url": "https://covers.example/calculus.jpg",
            "borrow_date": "2025-01-02",
            "due_date": "2025-02-01T00:00:00.000Z",
            "renewal_count": 1,
            "max_renewals": 3,
            "is_overdue": true
        });

        let loan = normalize_loan(&raw);
        assert_eq!(loan.id, LoanId::new(3));
        assert_eq!(loan.cover_url, "https://covers.example/calculus.jpg");
        assert_eq!(loan.borrow_date, Some(date(2025, 1, 2)));
        assert_eq!(loan.due_date, Some(date(2025, 2, 1)));
        assert_eq!(loan.renewal_count, 1);
        assert_eq!(loan.max_renewals, 3);
        assert!(loan.is_overdue);
    }

    #[test]
    fn test_loan_camel_case() {
        let raw = json!({
            "id": "4",
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Science-fiction",
            "isbn": 9780441013593u64,
            "coverImage": "https://covers.example/dune.jpg",
            "borrowDate": "2025-01-02",
            "dueDate": "2025-02-01",
            "renewalCount": "2",
            "maxRenewals": 2,
            "isOverdue": false
        });

        let loan = normalize_loan(&raw);
        assert_eq!(loan.id, LoanId::new(4));
        assert_eq!(loan.isbn, "9780441013593");
        assert_eq!(loan.cover_url, "https://covers.example/dune.jpg");
        assert_eq!(loan.borrow_date, Some(date(2025, 1, 2)));
        assert_eq!(loan.renewal_count, 2);
        assert!(!loan.is_overdue);
    }

    #[test]
    fn test_loan_defaults_for_missing_fields() {
        let loan = normalize_loan(&json!({"id": 9, "title": "Untitled"}));
        assert_eq!(loan.renewal_count, 0);
        assert_eq!(loan.max_renewals, DEFAULT_MAX_RENEWALS);
        assert!(!loan.is_overdue);
        assert_eq!(loan.cover_url, "");
        assert_eq!(loan.due_date, None);
    }

    #[test]
    fn test_loan_malformed_fields_default() {
        let raw = json!({
            "id": 5,
            "renewal_count": -1,
            "max_renewals": "lots",
            "is_overdue": "maybe",
            "due_date": "soon",
            "cover_url": ""
        });

        let loan = normalize_loan(&raw);
        assert_eq!(loan.renewal_count, 0);
        assert_eq!(loan.max_renewals, DEFAULT_MAX_RENEWALS);
        assert!(!loan.is_overdue);
        assert_eq!(loan.due_date, None);
        assert_eq!(loan.cover_url, "");
    }

    #[test]
    fn test_empty_cover_falls_through_to_next_alias() {
        let loan = normalize_loan(&json!({"cover_url": "", "coverImage": "x.png"}));
        assert_eq!(loan.cover_url, "x.png");
    }

    #[test]
    fn test_non_object_loan() {
        let loan = normalize_loan(&json!("not a loan"));
        assert_eq!(loan.id, LoanId::default());
        assert_eq!(loan.max_renewals, DEFAULT_MAX_RENEWALS);
    }

    #[test]
    fn test_profile_fallbacks() {
        let user = UserId::new("17");
        let today = date(2025, 9, 1);
        let profile = normalize_profile(
            &json!({"name": "Awa Diop", "email": "awa@university.edu"}),
            &user,
            today,
        );

        assert_eq!(profile.id, "17");
        assert_eq!(profile.student_id, "17");
        assert_eq!(profile.registration_date, Some(today));
        assert_eq!(profile.status, AccountStatus::Active);
        assert_eq!(profile.max_books, DEFAULT_MAX_BOOKS);
    }

    #[test]
    fn test_profile_snake_case() {
        let profile = normalize_profile(
            &json!({
                "id": 17,
                "name": "Awa Diop",
                "email": "awa@university.edu",
                "student_id": "ETU-2025-017",
                "registration_date": "2024-09-15T08:00:00Z",
                "status": "suspended",
                "max_books": 3
            }),
            &UserId::new("17"),
            date(2025, 9, 1),
        );

        assert_eq!(profile.student_id, "ETU-2025-017");
        assert_eq!(profile.registration_date, Some(date(2024, 9, 15)));
        assert_eq!(profile.status, AccountStatus::Suspended);
        assert_eq!(profile.max_books, 3);
    }

    #[test]
    fn test_catalog_book() {
        let book = normalize_catalog_book(&json!({
            "id": 12,
            "isbn": "9782070368228",
            "title": "L'Étranger",
            "author": "Albert Camus",
            "genre": "Roman",
            "published_year": 1942,
            "available_copies": 0
        }));

        assert_eq!(book.id, BookId::new(12));
        assert_eq!(book.published_year, Some(1942));
        assert!(!book.is_available());
        assert_eq!(book.cover_url, "");
    }

    #[test]
    fn test_account() {
        let account = normalize_account(&json!({
            "id": 2, "name": "Awa Diop", "email": "awa@university.edu", "borrowedBooks": 4
        }));
        assert_eq!(account.id, AccountId::new(2));
        assert_eq!(account.borrowed_books, 4);
    }

    #[test]
    fn test_array_items_non_array() {
        assert!(array_items(&json!({"error": "nope"})).is_empty());
        assert_eq!(array_items(&json!([1, 2])).len(), 2);
    }
}
