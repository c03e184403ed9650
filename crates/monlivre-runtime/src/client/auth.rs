use super::lock;
use crate::backend::{LibraryBackend, SignupRequest};
use crate::session::SessionStore;
use crate::{Error, Result};
use monlivre_engine::forms::{validate_credentials, validate_registration};
use monlivre_engine::{Notification, NotificationQueue};
use monlivre_types::{Credentials, LoginGrant, Registration, Session, UserId};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Login, sign-up and logout
pub struct AuthFlow {
    backend: Arc<dyn LibraryBackend>,
    store: SessionStore,
    notifications: Mutex<NotificationQueue>,
}

impl AuthFlow {
    pub fn new(backend: Arc<dyn LibraryBackend>, store: SessionStore) -> Self {
        Self {
            backend,
            store,
            notifications: Mutex::new(NotificationQueue::new()),
        }
    }

    pub fn session(&self) -> Result<Session> {
        self.store.load()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).drain()
    }

    /// Log in and remember the returned user id
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginGrant> {
        let result = self.try_login(credentials).await;
        let mut queue = lock(&self.notifications);
        match &result {
            Ok(_) => queue.success("Login successful. Welcome to MonLivre."),
            Err(err) => queue.error(format!("Login failed: {}", err.user_message())),
        }
        result
    }

    async fn try_login(&self, credentials: &Credentials) -> Result<LoginGrant> {
        validate_credentials(credentials)?;
        let body = self.backend.login(credentials).await?;
        let grant = login_grant(&body)?;

        self.store.save(&Session::Authenticated {
            user_id: grant.user_id.clone(),
            is_admin: grant.is_admin,
        })?;
        tracing::info!(user = %grant.user_id, admin = grant.is_admin, "logged in");
        Ok(grant)
    }

    /// Create an account; the user still has to log in afterwards
    pub async fn signup(&self, registration: &Registration) -> Result<()> {
        let result = self.try_signup(registration).await;
        let mut queue = lock(&self.notifications);
        match &result {
            Ok(()) => queue.success("Account created. You can now log in."),
            Err(err) => queue.error(format!("Sign-up failed: {}", err.user_message())),
        }
        result
    }

    async fn try_signup(&self, registration: &Registration) -> Result<()> {
        validate_registration(registration)?;
        let request = SignupRequest {
            name: registration.name.clone(),
            email: registration.email.clone(),
            password: registration.password.clone(),
        };
        self.backend.signup(&request).await?;
        tracing::info!(email = %registration.email, "account created");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        lock(&self.notifications).info("Logged out.");
        tracing::info!("logged out");
        Ok(())
    }
}

/// Read the user id (`userId`, else `id`) and admin flag from a login body
fn login_grant(body: &Value) -> Result<LoginGrant> {
    let user_id = ["userId", "user_id", "id"]
        .iter()
        .find_map(|key| match body.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .ok_or_else(|| Error::UnexpectedResponse("login response carries no user id".to_string()))?;

    let is_admin = ["is_admin", "isAdmin"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_bool))
        .unwrap_or(false);

    Ok(LoginGrant {
        user_id: UserId::new(user_id),
        is_admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_grant_prefers_user_id() {
        let grant = login_grant(&json!({"userId": 12, "id": 99, "is_admin": true})).unwrap();
        assert_eq!(grant.user_id.as_str(), "12");
        assert!(grant.is_admin);
    }

    #[test]
    fn test_login_grant_falls_back_to_id() {
        let grant = login_grant(&json!({"id": "abc"})).unwrap();
        assert_eq!(grant.user_id.as_str(), "abc");
        assert!(!grant.is_admin);
    }

    #[test]
    fn test_login_grant_without_id_is_unexpected() {
        let err = login_grant(&json!({"message": "ok"})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }
}
