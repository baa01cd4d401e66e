//! Brand configuration endpoints.
//!
//! CRUD failures are logged and handed back to the caller unchanged; nothing
//! here retries.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::path::Path;

use crate::api::ApiClient;
use crate::error::ApiError;

use super::ThemeConfig;

/// Remote brand operations used by the resolver and the admin commands.
///
/// The trait lets tests drive the resolver with scripted responses instead of
/// a live backend; production code uses [`BrandService`].
#[async_trait]
pub trait BrandApi: Send + Sync {
    /// The configuration the backend currently marks active.
    async fn fetch_active(&self) -> Result<ThemeConfig, ApiError>;
    async fn list(&self) -> Result<Vec<ThemeConfig>, ApiError>;
    async fn create(&self, theme: &ThemeConfig) -> Result<ThemeConfig, ApiError>;
    async fn update(&self, id: i64, theme: &ThemeConfig) -> Result<ThemeConfig, ApiError>;
    async fn activate(&self, id: i64) -> Result<(), ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
    async fn upload_logo(&self, id: i64, logo: LogoUpload) -> Result<ThemeConfig, ApiError>;
}

/// A logo file ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl LogoUpload {
    /// Read a logo from disk, inferring the content type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "logo".to_string());
        Ok(Self {
            mime: mime_for(&file_name),
            file_name,
            bytes,
        })
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime)?;
        Ok(Form::new().part("logo", part))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// The list endpoint may answer with a bare array or a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Plain(Vec<ThemeConfig>),
    Paged { results: Vec<ThemeConfig> },
}

/// [`BrandApi`] over the shared HTTP client.
#[derive(Clone)]
pub struct BrandService {
    api: ApiClient,
}

impl BrandService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn logged<T>(what: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &result {
        tracing::error!("failed to {what}: {err}");
    }
    result
}

#[async_trait]
impl BrandApi for BrandService {
    async fn fetch_active(&self) -> Result<ThemeConfig, ApiError> {
        self.api.get("/brand/ativa/").await
    }

    async fn list(&self) -> Result<Vec<ThemeConfig>, ApiError> {
        let payload = logged(
            "list brand configurations",
            self.api.get::<ListPayload>("/brand/").await,
        )?;
        Ok(match payload {
            ListPayload::Plain(items) | ListPayload::Paged { results: items } => items,
        })
    }

    async fn create(&self, theme: &ThemeConfig) -> Result<ThemeConfig, ApiError> {
        logged(
            "create brand configuration",
            self.api.post("/brand/", theme).await,
        )
    }

    async fn update(&self, id: i64, theme: &ThemeConfig) -> Result<ThemeConfig, ApiError> {
        logged(
            "update brand configuration",
            self.api.put(&format!("/brand/{id}/"), theme).await,
        )
    }

    async fn activate(&self, id: i64) -> Result<(), ApiError> {
        let empty = serde_json::json!({});
        logged(
            "activate brand configuration",
            self.api
                .post::<_, IgnoredAny>(&format!("/brand/{id}/ativar/"), &empty)
                .await,
        )
        .map(|_| ())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        logged(
            "delete brand configuration",
            self.api
                .delete::<IgnoredAny>(&format!("/brand/{id}/"))
                .await,
        )
        .map(|_| ())
    }

    async fn upload_logo(&self, id: i64, logo: LogoUpload) -> Result<ThemeConfig, ApiError> {
        let form = logged("prepare logo upload", logo.into_form())?;
        logged(
            "upload logo",
            self.api
                .patch_multipart(&format!("/brand/{id}/upload_logo/"), form)
                .await,
        )
    }
}
