//! Raw backend payloads.
//!
//! Dates are chosen around [`TODAY`] so that the three loans land in three
//! different display buckets.

use chrono::NaiveDate;
use serde_json::{Value, json};

/// Reference date for every fixture
pub const TODAY: (i32, u32, u32) = (2025, 2, 1);

pub fn today() -> NaiveDate {
    let (y, m, d) = TODAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub const STUDENT_ID: &str = "42";

/// `GET /user/borrowed-books/{userId}`: snake_case, camelCase and minimal rows
pub fn borrowed_books() -> Value {
    json!([
        {
            "id": 1,
            "title": "Calculus",
            "author": "Michael Spivak",
            "genre": "Mathematics",
            "isbn": "9780914098911",
            "cover_url": "https://covers.example/calculus.jpg",
            "borrow_date": "2025-01-03",
            "due_date": "2025-02-03",
            "renewal_count": 1,
            "max_renewals": 2,
            "is_overdue": false
        },
        {
            "id": 2,
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Science-fiction",
            "isbn": "9780441013593",
            "coverImage": "https://covers.example/dune.jpg",
            "borrowDate": "2024-12-20T09:30:00.000Z",
            "dueDate": "2025-01-20T09:30:00.000Z",
            "renewalCount": 0,
            "isOverdue": true
        },
        {
            "id": 3,
            "title": "Les Misérables",
            "author": "Victor Hugo",
            "genre": "Roman",
            "isbn": "9782253096337",
            "borrow_date": "2025-01-20",
            "due_date": "2025-02-19"
        }
    ])
}

/// `GET /user/profile/{userId}`
pub fn profile() -> Value {
    json!({
        "id": 42,
        "name": "Amina Diallo",
        "email": "amina.diallo@monlivre.edu",
        "student_id": "ETU-2024-042",
        "registration_date": "2024-09-02",
        "status": "active",
        "max_books": 5
    })
}

/// `GET /user/books` and `GET /admin/books`
pub fn catalog() -> Value {
    json!([
        {
            "id": 10,
            "isbn": "9782070360024",
            "title": "L'Étranger",
            "author": "Albert Camus",
            "genre": "Roman",
            "published_year": 1942,
            "cover_url": "",
            "available_copies": 3
        },
        {
            "id": 11,
            "isbn": "9782070368228",
            "title": "La Peste",
            "author": "Albert Camus",
            "genre": "Roman",
            "publishedYear": 1947,
            "coverImage": "https://covers.example/peste.jpg",
            "availableCopies": 0
        },
        {
            "id": 12,
            "isbn": "9780262033848",
            "title": "Introduction to Algorithms",
            "author": "Cormen, Leiserson, Rivest, Stein",
            "genre": "Informatique",
            "published_year": 2009,
            "available_copies": 1
        }
    ])
}

/// `GET /admin/users`
pub fn admin_users() -> Value {
    json!([
        {"id": 42, "name": "Amina Diallo", "email": "amina.diallo@monlivre.edu", "borrowed_books": 3},
        {"id": 43, "name": "Lucas Martin", "email": "lucas.martin@monlivre.edu", "borrowedBooks": 0}
    ])
}

/// `POST /user/login` answer for a student
pub fn login_student() -> Value {
    json!({"message": "Connexion réussie", "userId": 42, "is_admin": false})
}

/// `POST /user/login` answer for an administrator
pub fn login_admin() -> Value {
    json!({"message": "Connexion réussie", "id": 1, "is_admin": true})
}
