use super::{LibraryBackend, RenewRequest, ReturnRequest, SignupRequest};
use crate::config::BackendSettings;
use crate::{Error, Result};
use async_trait::async_trait;
use monlivre_types::{
    AccountId, BookForm, BookId, BorrowRequest, Credentials, StudentForm, UserId,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// `LibraryBackend` over plain HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "backend request");
        self.client.request(method, url)
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = send(self.request(Method::GET, path)).await?;
        read_json(response).await
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        send(self.request(method, path).json(body)).await
    }
}

/// Send once and turn any non-2xx answer into `BackendRejected`
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), %message, "backend rejected request");
    Err(Error::BackendRejected {
        status: status.as_u16(),
        message,
    })
}

/// Empty bodies read as `null`
async fn read_json(response: Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Prefer a `message`/`error` field of a JSON body, then the raw text
fn rejection_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("request failed with status {}", status);
    }
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = json.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}

#[async_trait]
impl LibraryBackend for HttpBackend {
    async fn borrowed_books(&self, user: &UserId) -> Result<Value> {
        self.get_json(&format!("/user/borrowed-books/{}", user)).await
    }

    async fn profile(&self, user: &UserId) -> Result<Value> {
        self.get_json(&format!("/user/profile/{}", user)).await
    }

    async fn return_book(&self, user: &UserId, request: ReturnRequest) -> Result<()> {
        self.send_json(Method::POST, &format!("/user/return-book/{}", user), &request)
            .await?;
        Ok(())
    }

    async fn renew_book(&self, user: &UserId, request: RenewRequest) -> Result<Value> {
        let response = self
            .send_json(Method::POST, &format!("/user/renew-book/{}", user), &request)
            .await?;
        read_json(response).await
    }

    async fn catalog(&self) -> Result<Value> {
        self.get_json("/user/books").await
    }

    async fn borrow_book(&self, user: &UserId, request: &BorrowRequest) -> Result<()> {
        self.send_json(Method::POST, &format!("/user/books/{}/borrow", user), request)
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<Value> {
        let response = self
            .send_json(Method::POST, "/user/login", credentials)
            .await?;
        read_json(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.send_json(Method::POST, "/user/signup", request).await?;
        Ok(())
    }

    async fn admin_books(&self) -> Result<Value> {
        self.get_json("/admin/books").await
    }

    async fn create_book(&self, form: &BookForm) -> Result<()> {
        self.send_json(Method::POST, "/admin/books", form).await?;
        Ok(())
    }

    async fn update_book(&self, id: BookId, form: &BookForm) -> Result<()> {
        self.send_json(Method::PUT, &format!("/admin/books/{}", id), form)
            .await?;
        Ok(())
    }

    async fn delete_book(&self, id: BookId) -> Result<()> {
        send(self.request(Method::DELETE, &format!("/admin/books/{}", id))).await?;
        Ok(())
    }

    async fn admin_users(&self) -> Result<Value> {
        self.get_json("/admin/users").await
    }

    async fn create_user(&self, form: &StudentForm) -> Result<()> {
        self.send_json(Method::POST, "/admin/users", form).await?;
        Ok(())
    }

    async fn update_user(&self, id: AccountId, form: &StudentForm) -> Result<()> {
        self.send_json(Method::PUT, &format!("/admin/users/{}", id), form)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: AccountId) -> Result<()> {
        send(self.request(Method::DELETE, &format!("/admin/users/{}", id))).await?;
        Ok(())
    }
}
