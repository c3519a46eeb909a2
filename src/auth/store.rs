//! Session store: login, logout, token refresh
//!
//! The store is an explicit context object. It is built once from local
//! storage and shared behind an `Arc` by everything that needs the session.
//! Every mutation is written through to storage.

use crate::api::http::HttpClient;
use crate::api::envelope;
use crate::api::transport::{HttpRequest, HttpResponse};
use crate::auth::models::{LoginData, LoginRequest, RefreshData, RefreshRequest};
use crate::auth::session::{Session, SessionState};
use crate::core::error::{ClientError, Result};
use crate::core::storage::LocalStorage;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

pub struct SessionStore {
    http: HttpClient,
    storage: Arc<dyn LocalStorage>,
    session: RwLock<Session>,
    /// Number of refresh requests in flight
    refreshing: AtomicUsize,
}

/// Counts one in-flight refresh until dropped, even if the caller is cancelled
struct RefreshGuard<'a>(&'a AtomicUsize);

impl<'a> RefreshGuard<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionStore {
    /// Build the store from whatever the previous run left in storage
    pub fn new(http: HttpClient, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let session = Session::load(storage.as_ref())?;

        tracing::debug!(
            authenticated = session.is_authenticated(),
            has_refresh_token = session.refresh_token.is_some(),
            "Session restored from storage"
        );

        Ok(Self {
            http,
            storage,
            session: RwLock::new(session),
            refreshing: AtomicUsize::new(0),
        })
    }

    /// The plain client used for login and refresh
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        let session = self.session.read().await;
        if self.refreshing.load(Ordering::SeqCst) > 0 {
            SessionState::Refreshing
        } else if session.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    pub async fn username(&self) -> Option<String> {
        self.session.read().await.username.clone()
    }

    pub async fn role(&self) -> Option<String> {
        self.session.read().await.role.clone()
    }

    /// Log in, reporting only success. See [`SessionStore::authenticate`].
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.authenticate(username, password).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    username = %username,
                    error_type = e.error_type(),
                    error = %e,
                    "Login failed"
                );
                false
            }
        }
    }

    /// Log in and store all four session fields.
    ///
    /// Empty credentials fail with `ValidationError` before any request is
    /// made. A rejection by the backend fails with `AuthError`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::ValidationError(
                "username and password are required".to_string(),
            ));
        }

        tracing::info!(username = %username, "Login attempt");

        let body = serde_json::to_value(LoginRequest { username, password })?;
        let response = self.http.send(HttpRequest::post(LOGIN_PATH, body)).await?;
        let data: LoginData = auth_payload(response, "Login failed")?;

        let session = Session {
            access_token: Some(data.access_token),
            refresh_token: Some(data.refresh_token),
            username: Some(data.username),
            role: data.role,
        };
        session.persist(self.storage.as_ref())?;

        self.http.set_default_token(session.access_token.as_deref()).await;
        let mut current = self.session.write().await;
        *current = session;

        tracing::info!(username = ?current.username, role = ?current.role, "Login successful");
        Ok(())
    }

    /// Forget the session in memory and in storage. Makes no request.
    pub async fn logout(&self) {
        if let Err(e) = Session::clear(self.storage.as_ref()) {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.http.set_default_token(None).await;

        *self.session.write().await = Session::default();

        tracing::info!("Logged out");
    }

    /// Optimistic check: a stored access token counts as authenticated
    /// without asking the backend. Without one, a refresh token is traded
    /// for a new access token.
    pub async fn check_auth(&self) -> bool {
        let session = self.session().await;

        if let Some(token) = session.access_token.as_deref() {
            self.http.set_default_token(Some(token)).await;
            return true;
        }

        if session.refresh_token.is_some() {
            return self.refresh_access_token().await;
        }

        false
    }

    /// Trade the refresh token for a new access token.
    ///
    /// A single attempt is made. Any failure ends the session.
    /// Overlapping calls each perform their own refresh, and the state stays
    /// `Refreshing` until the last of them finishes.
    pub async fn refresh_access_token(&self) -> bool {
        let refresh_token = match self.session.read().await.refresh_token.clone() {
            Some(token) => token,
            None => {
                tracing::debug!("No refresh token, skipping refresh");
                return false;
            }
        };
        let _guard = RefreshGuard::start(&self.refreshing);

        match self.request_refresh(&refresh_token).await {
            Ok(()) => {
                tracing::info!("Access token refreshed");
                true
            }
            Err(e) => {
                tracing::warn!(
                    error_type = e.error_type(),
                    error = %e,
                    "Token refresh failed, ending session"
                );
                self.logout().await;
                false
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<()> {
        let body = serde_json::to_value(RefreshRequest { refresh_token })?;
        let response = self.http.send(HttpRequest::post(REFRESH_PATH, body)).await?;
        let data: RefreshData = auth_payload(response, "Token refresh failed")?;

        let mut current = self.session.write().await;
        let mut session = current.clone();
        session.access_token = Some(data.access_token);
        if data.username.is_some() {
            session.username = data.username;
        }
        if data.role.is_some() {
            session.role = data.role;
        }
        session.persist(self.storage.as_ref())?;

        self.http.set_default_token(session.access_token.as_deref()).await;
        *current = session;
        Ok(())
    }
}

/// Decode the envelope of a login or refresh response. Backend-reported
/// failures and 400/401/403 answers become `AuthError`.
fn auth_payload<T: DeserializeOwned>(response: HttpResponse, default_message: &str) -> Result<T> {
    if !response.is_success() {
        let message = envelope::error_message(&response.body)
            .unwrap_or_else(|| default_message.to_string());
        return Err(match response.status {
            400 | 401 | 403 => ClientError::AuthError(message),
            status => ClientError::ServerError { status, message },
        });
    }

    envelope::unwrap_data(response.body, default_message).map_err(|e| match e {
        ClientError::ApiError(message) => ClientError::AuthError(message),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::auth::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USERNAME_KEY};
    use crate::core::storage::MemoryStorage;
    use serde_json::json;

    fn store_with(
        entries: &[(&str, &str)],
    ) -> (SessionStore, Arc<MockTransport>, Arc<MemoryStorage>) {
        let transport = Arc::new(MockTransport::new());
        let storage = Arc::new(MemoryStorage::with_entries(entries.iter().copied()));
        let store = SessionStore::new(HttpClient::new(transport.clone()), storage.clone()).unwrap();
        (store, transport, storage)
    }

    fn login_success() -> serde_json::Value {
        json!({
            "success": true,
            "data": {"accessToken": "A1", "refreshToken": "R1", "username": "alice", "role": "user"}
        })
    }

    #[tokio::test]
    async fn test_login_success_persists_session() {
        let (store, transport, storage) = store_with(&[]);
        transport.push_response(200, login_success());

        assert!(store.login("alice", "pw1").await);

        let session = store.session().await;
        assert_eq!(session.access_token.as_deref(), Some("A1"));
        assert_eq!(session.refresh_token.as_deref(), Some("R1"));
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.role.as_deref(), Some("user"));
        assert!(store.is_authenticated().await);
        assert_eq!(store.state().await, SessionState::Authenticated);

        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A1"));
        assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));
        assert_eq!(storage.get_item(USERNAME_KEY).unwrap().as_deref(), Some("alice"));
        assert_eq!(storage.get_item(ROLE_KEY).unwrap().as_deref(), Some("user"));

        let sent = transport.requests();
        assert_eq!(sent[0].path, LOGIN_PATH);
        assert_eq!(sent[0].body, Some(json!({"username": "alice", "password": "pw1"})));
        assert_eq!(store.http().default_authorization().await.as_deref(), Some("Bearer A1"));
    }

    #[tokio::test]
    async fn test_login_empty_credentials_makes_no_request() {
        let (store, transport, _) = store_with(&[]);

        assert!(!store.login("", "pw1").await);
        assert!(!store.login("alice", "").await);
        assert!(matches!(
            store.authenticate("", "").await,
            Err(ClientError::ValidationError(_))
        ));

        assert!(transport.requests().is_empty());
        assert_eq!(store.state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let (store, transport, storage) = store_with(&[]);
        transport.push_response(200, json!({"success": false, "error": {"message": "bad password"}}));
        transport.push_response(401, json!({"success": false}));
        transport.push_network_error("connection refused");

        let first = store.authenticate("alice", "wrong").await.unwrap_err();
        assert!(matches!(first, ClientError::AuthError(m) if m == "bad password"));
        assert!(!store.login("alice", "wrong").await);
        assert!(!store.login("alice", "pw1").await);

        assert!(!store.is_authenticated().await);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (store, _, storage) = store_with(&[
            (ACCESS_TOKEN_KEY, "A1"),
            (REFRESH_TOKEN_KEY, "R1"),
            (USERNAME_KEY, "alice"),
            (ROLE_KEY, "user"),
        ]);
        assert!(store.check_auth().await);

        store.logout().await;
        let after_first = store.session().await;
        store.logout().await;

        assert_eq!(after_first, Session::default());
        assert_eq!(store.session().await, after_first);
        assert!(!store.is_authenticated().await);
        assert!(storage.is_empty());
        assert_eq!(store.http().default_authorization().await, None);
    }

    #[tokio::test]
    async fn test_check_auth_is_optimistic() {
        let (store, transport, _) = store_with(&[(ACCESS_TOKEN_KEY, "A1")]);

        assert!(store.check_auth().await);
        assert!(transport.requests().is_empty());
        assert_eq!(store.http().default_authorization().await.as_deref(), Some("Bearer A1"));
    }

    #[tokio::test]
    async fn test_check_auth_without_tokens() {
        let (store, transport, _) = store_with(&[]);

        assert!(!store.check_auth().await);
        assert!(!store.refresh_access_token().await);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_check_auth_refreshes_with_refresh_token() {
        let (store, transport, storage) = store_with(&[(REFRESH_TOKEN_KEY, "R1"), (USERNAME_KEY, "alice")]);
        transport.push_response(
            200,
            json!({"success": true, "data": {"accessToken": "A2", "username": "alice", "role": "admin"}}),
        );

        assert!(store.check_auth().await);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, REFRESH_PATH);
        assert_eq!(sent[0].body, Some(json!({"refreshToken": "R1"})));

        let session = store.session().await;
        assert_eq!(session.access_token.as_deref(), Some("A2"));
        assert_eq!(session.refresh_token.as_deref(), Some("R1"));
        assert_eq!(session.role.as_deref(), Some("admin"));
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A2"));
        assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));
        assert_eq!(store.state().await, SessionState::Authenticated);
        assert_eq!(store.http().default_authorization().await.as_deref(), Some("Bearer A2"));
    }

    #[tokio::test]
    async fn test_refresh_failure_logs_out() {
        let (store, transport, storage) = store_with(&[
            (ACCESS_TOKEN_KEY, "A1"),
            (REFRESH_TOKEN_KEY, "R1"),
            (USERNAME_KEY, "alice"),
        ]);
        transport.push_response(200, json!({"success": false, "error": {"message": "expired"}}));

        assert!(!store.refresh_access_token().await);

        assert_eq!(transport.requests().len(), 1);
        assert_eq!(store.session().await, Session::default());
        assert_eq!(store.state().await, SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_network_error_logs_out() {
        let (store, transport, _) = store_with(&[(REFRESH_TOKEN_KEY, "R1")]);
        transport.push_network_error("timed out");

        assert!(!store.refresh_access_token().await);
        assert_eq!(store.session().await.refresh_token, None);
    }

    async fn wait_for_requests(transport: &MockTransport, count: usize) {
        while transport.requests().len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_state_is_refreshing_until_last_refresh_finishes() {
        let (store, transport, _) = store_with(&[(REFRESH_TOKEN_KEY, "R1")]);
        let store = Arc::new(store);
        let first = transport.push_held_response(200, json!({"success": true, "data": {"accessToken": "A2"}}));
        let second = transport.push_held_response(200, json!({"success": true, "data": {"accessToken": "A3"}}));
        assert_eq!(store.state().await, SessionState::Anonymous);

        let a = tokio::spawn({
            let store = store.clone();
            async move { store.refresh_access_token().await }
        });
        wait_for_requests(&transport, 1).await;
        assert_eq!(store.state().await, SessionState::Refreshing);

        let b = tokio::spawn({
            let store = store.clone();
            async move { store.refresh_access_token().await }
        });
        wait_for_requests(&transport, 2).await;

        first.notify_one();
        assert!(a.await.unwrap());
        assert_eq!(store.access_token().await.as_deref(), Some("A2"));
        assert_eq!(store.state().await, SessionState::Refreshing);

        second.notify_one();
        assert!(b.await.unwrap());
        assert_eq!(store.access_token().await.as_deref(), Some("A3"));
        assert_eq!(store.state().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_refreshing_state() {
        let (store, transport, _) = store_with(&[(REFRESH_TOKEN_KEY, "R1")]);
        let store = Arc::new(store);
        let gate = transport.push_held_response(401, json!({"success": false}));

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.refresh_access_token().await }
        });
        wait_for_requests(&transport, 1).await;
        assert_eq!(store.state().await, SessionState::Refreshing);

        gate.notify_one();
        assert!(!task.await.unwrap());
        assert_eq!(store.state().await, SessionState::Anonymous);
    }
}
