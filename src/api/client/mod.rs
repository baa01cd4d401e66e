//! API client orchestration.
//!
//! The facade stays small:
//! - bearer lookup and session clearing are delegated to `auth`.
//! - client construction, URL joining and body decoding to `transport`.

mod auth;
mod transport;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Receives the global "session expired" side effect of a 401.
pub trait SessionListener: Send + Sync {
    fn session_expired(&self);
}

/// Default listener: records the expiry in the log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSessionListener;

impl SessionListener for LogSessionListener {
    fn session_expired(&self) {
        tracing::warn!("backend rejected stored credentials; session cleared");
    }
}

/// Client for the AgendaVet REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
    session: Arc<dyn SessionListener>,
}

impl ApiClient {
    /// Build a client from resolved API configuration.
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            http: transport::build_http_client(config.timeout()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            session: Arc::new(LogSessionListener),
        }
    }

    /// Replace the listener notified when a 401 clears the session.
    pub fn with_session_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.session = listener;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store shared with the rest of the client (theme snapshot, user slot).
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// `PATCH` with a multipart body (file uploads).
    pub async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PATCH, path).multipart(form))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Store the bearer credential used by subsequent requests.
    pub fn set_token(&self, token: &str) -> Result<(), crate::error::StoreError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn remove_token(&self) -> Result<(), crate::error::StoreError> {
        self.store.remove(TOKEN_KEY)
    }

    /// True when a bearer credential is stored.
    pub fn is_authenticated(&self) -> bool {
        auth::resolve_bearer_token(self.store.as_ref()).is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = transport::endpoint_url(&self.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = auth::resolve_bearer_token(self.store.as_ref()) {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = match req.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("API error: {err}");
                return Err(ApiError::Http(err));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!(url = %response.url(), "API error: 401 unauthorized");
            auth::clear_session(self.store.as_ref());
            self.session.session_expired();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let code = status.as_u16();
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%url, code, "API error: {body}");
            return Err(ApiError::Status { code, body });
        }

        transport::decode_body(response).await
    }
}
