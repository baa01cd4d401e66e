//! Login, registration and the locally stored session.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

use super::error::AuthError;
use super::types::{AuthResponse, LoginRequest, User};

/// Remote auth endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError>;
    async fn register_client(&self, details: &Value) -> Result<AuthResponse, ApiError>;
}

/// [`AuthApi`] over the shared HTTP client.
#[derive(Clone)]
pub struct HttpAuthApi {
    api: ApiClient,
}

impl HttpAuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/login/", request).await
    }

    async fn register_client(&self, details: &Value) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/register/cliente/", details).await
    }
}

/// Session state kept in the `token` and `user` slots.
#[derive(Clone)]
pub struct Session {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Session backed by the HTTP endpoints and the client's own store.
    pub fn over_http(client: &ApiClient) -> Self {
        Self::new(Arc::new(HttpAuthApi::new(client.clone())), client.store())
    }

    /// Sign in and remember the returned token and user.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let response = self
            .api
            .login(&LoginRequest {
                email,
                senha: password,
            })
            .await?;
        let Some(token) = response.token.as_deref() else {
            return Err(AuthError::MissingToken);
        };
        self.store.set(TOKEN_KEY, token)?;
        if let Some(user) = &response.user {
            self.set_current_user(user)?;
        }
        tracing::info!(email, "logged in");
        Ok(response)
    }

    /// Register a client account. A returned token signs the new account in.
    pub async fn register_client(&self, details: &Value) -> Result<AuthResponse, AuthError> {
        let response = self.api.register_client(details).await?;
        if let Some(token) = response.token.as_deref() {
            self.store.set(TOKEN_KEY, token)?;
        }
        if let Some(user) = &response.user {
            self.set_current_user(user)?;
        }
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.get(TOKEN_KEY), Ok(Some(token)) if !token.trim().is_empty())
    }

    /// Stored user, if any. An unparsable record reads as signed out.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::debug!("stored user record unreadable: {err}");
                None
            }
        }
    }

    pub fn set_current_user(&self, user: &User) -> Result<(), AuthError> {
        let text = serde_json::to_string(user).map_err(|err| {
            AuthError::Store(crate::error::StoreError::Invalid(format!(
                "failed to serialize user: {err}"
            )))
        })?;
        self.store.set(USER_KEY, &text)?;
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin())
    }

    pub fn is_client(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_client())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::storage::MemoryStore;
    use crate::testsupport::{spawn_stub_server, StubResponse};
    use serde_json::json;

    fn session_for(base: &str) -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = ApiConfig {
            base_url: base.to_string(),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config, store.clone());
        (Session::over_http(&client), store)
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let (base, mut requests) = spawn_stub_server(vec![StubResponse::json(
            "200 OK",
            r#"{"token":"abc","user":{"id":1,"nome":"Ana","tipo":"admin"}}"#,
        )])
        .await;
        let (session, store) = session_for(&base);

        session.login("ana@example.com", "segredo").await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.current_user().unwrap().nome.as_deref(), Some("Ana"));

        let raw = requests.recv().await.unwrap();
        assert!(raw.starts_with("POST /auth/login/ "), "got: {raw}");
        let body = raw.split("\r\n\r\n").nth(1).unwrap_or_default();
        let sent: Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!({"email": "ana@example.com", "senha": "segredo"}));
    }

    #[tokio::test]
    async fn login_without_token_is_an_error() {
        let (base, _requests) =
            spawn_stub_server(vec![StubResponse::json("200 OK", r#"{"user":null}"#)]).await;
        let (session, store) = session_for(&base);
        let err = session.login("a@b.c", "x").await.expect_err("no token");
        assert!(matches!(err, AuthError::MissingToken));
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn rejected_login_surfaces_backend_message() {
        let (base, _requests) = spawn_stub_server(vec![StubResponse::json(
            "400 Bad Request",
            r#"{"message":"Credenciais inválidas"}"#,
        )])
        .await;
        let (session, _) = session_for(&base);
        let err = session.login("a@b.c", "x").await.expect_err("rejected");
        assert_eq!(err.to_string(), "Credenciais inválidas");
    }

    #[tokio::test]
    async fn register_without_token_leaves_session_signed_out() {
        let (base, mut requests) = spawn_stub_server(vec![StubResponse::json(
            "201 Created",
            r#"{"message":"ok"}"#,
        )])
        .await;
        let (session, _) = session_for(&base);
        let details = json!({"nome": "Bia", "email": "bia@example.com", "senha": "x"});
        let response = session.register_client(&details).await.unwrap();
        assert_eq!(response.message.as_deref(), Some("ok"));
        assert!(!session.is_authenticated());
        let raw = requests.recv().await.unwrap();
        assert!(raw.starts_with("POST /auth/register/cliente/ "), "got: {raw}");
    }

    #[test]
    fn logout_clears_both_slots_and_roles() {
        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::new(
            &ApiConfig {
                base_url: "http://127.0.0.1:9".into(),
                timeout_secs: 1,
            },
            store.clone(),
        );
        let session = Session::over_http(&client);
        store.set(TOKEN_KEY, "t").unwrap();
        session
            .set_current_user(&User {
                tipo: Some("cliente".into()),
                ..User::default()
            })
            .unwrap();
        assert!(session.is_client());

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
        assert!(!session.is_client());
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_user_record_reads_as_none() {
        let store = Arc::new(MemoryStore::new());
        store.set(USER_KEY, "{nope").unwrap();
        let client = ApiClient::new(
            &ApiConfig {
                base_url: "http://127.0.0.1:9".into(),
                timeout_secs: 1,
            },
            store,
        );
        assert_eq!(Session::over_http(&client).current_user(), None);
    }
}
