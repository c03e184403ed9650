//! In-process HTTP backend for CLI tests.
//!
//! The binary talks to a real socket, so the server runs on its own thread
//! with its own runtime and lives until the test process exits.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use monlivre_testing::fixtures;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Library {
    loans: Arc<Mutex<Vec<Value>>>,
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn rejected(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn known_user(user: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if user == fixtures::STUDENT_ID {
        Ok(())
    } else {
        Err(rejected(StatusCode::NOT_FOUND, "Utilisateur introuvable"))
    }
}

async fn borrowed_books(State(lib): State<Library>, Path(user): Path<String>) -> Reply {
    known_user(&user)?;
    Ok(Json(Value::Array(lib.loans.lock().unwrap().clone())))
}

async fn profile(Path(user): Path<String>) -> Reply {
    known_user(&user)?;
    Ok(Json(fixtures::profile()))
}

async fn renew(Path(user): Path<String>, Json(body): Json<Value>) -> Reply {
    known_user(&user)?;
    if body.get("idempotency_key").is_none() {
        return Err(rejected(StatusCode::BAD_REQUEST, "idempotency_key manquant"));
    }
    Ok(Json(json!({"message": "Emprunt renouvelé", "due_date": "2025-03-03"})))
}

async fn return_book(
    State(lib): State<Library>,
    Path(user): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    known_user(&user)?;
    let id = body["book_id"].as_i64().unwrap_or_default();
    lib.loans.lock().unwrap().retain(|loan| loan["id"].as_i64() != Some(id));
    Ok(Json(json!({"message": "Livre retourné"})))
}

async fn borrow(Path(user): Path<String>) -> Reply {
    known_user(&user)?;
    Ok(Json(json!({"message": "Livre emprunté"})))
}

async fn login(Json(body): Json<Value>) -> Reply {
    match body["email"].as_str() {
        Some("amina.diallo@monlivre.edu") => Ok(Json(fixtures::login_student())),
        Some("admin@monlivre.edu") => Ok(Json(fixtures::login_admin())),
        _ => Err(rejected(StatusCode::UNAUTHORIZED, "Identifiants invalides")),
    }
}

async fn catalog() -> Json<Value> {
    Json(fixtures::catalog())
}

async fn users() -> Json<Value> {
    Json(fixtures::admin_users())
}

async fn create_user() -> Reply {
    Err(rejected(StatusCode::CONFLICT, "Email déjà utilisé"))
}

fn router() -> Router {
    let loans = match fixtures::borrowed_books() {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let state = Library {
        loans: Arc::new(Mutex::new(loans)),
    };

    Router::new()
        .route("/user/borrowed-books/{user}", get(borrowed_books))
        .route("/user/profile/{user}", get(profile))
        .route("/user/renew-book/{user}", post(renew))
        .route("/user/return-book/{user}", post(return_book))
        .route("/user/books", get(catalog))
        .route("/user/books/{user}/borrow", post(borrow))
        .route("/user/login", post(login))
        .route("/admin/books", get(catalog))
        .route("/admin/users", get(users).post(create_user))
        .with_state(state)
}

/// Start a fresh backend and return its base URL
pub fn spawn_backend() -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router()).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

/// A base URL nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
