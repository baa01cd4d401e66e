//! Three-tier active theme resolution: remote, then local snapshot, then the
//! built-in default.

use std::fmt;
use std::sync::Arc;

use super::applicator::ThemeApplicator;
use super::service::BrandApi;
use super::{default_theme, ThemeConfig};

/// Which tier produced a resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Remote,
    Local,
    Default,
}

impl fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Local => "local snapshot",
            Self::Default => "built-in default",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub theme: ThemeConfig,
    pub source: ThemeSource,
}

#[derive(Clone)]
pub struct ThemeResolver {
    api: Arc<dyn BrandApi>,
    applicator: ThemeApplicator,
}

impl ThemeResolver {
    pub fn new(api: Arc<dyn BrandApi>, applicator: ThemeApplicator) -> Self {
        Self { api, applicator }
    }

    pub fn applicator(&self) -> &ThemeApplicator {
        &self.applicator
    }

    /// Resolve the active theme and apply it exactly once.
    ///
    /// Never fails. A remote failure of any kind falls through to the local
    /// snapshot, and a missing or corrupt snapshot to [`default_theme`].
    pub async fn resolve_active_theme(&self) -> ResolvedTheme {
        let resolved = match self.try_remote().await {
            Some(theme) => ResolvedTheme {
                theme,
                source: ThemeSource::Remote,
            },
            None => match self.try_local() {
                Some(theme) => ResolvedTheme {
                    theme,
                    source: ThemeSource::Local,
                },
                None => ResolvedTheme {
                    theme: default_theme(),
                    source: ThemeSource::Default,
                },
            },
        };
        tracing::info!(source = %resolved.source, name = resolved.theme.display_name(), "resolved active theme");
        self.applicator.apply(&resolved.theme);
        resolved
    }

    /// Apply a caller-supplied theme without consulting the backend.
    pub fn set_active_theme(&self, theme: &ThemeConfig) {
        self.applicator.apply(theme);
    }

    async fn try_remote(&self) -> Option<ThemeConfig> {
        match self.api.fetch_active().await {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!("could not fetch active theme, using fallback: {err}");
                None
            }
        }
    }

    fn try_local(&self) -> Option<ThemeConfig> {
        self.applicator.store().load()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::brand::applicator::DocumentSurface;
    use crate::brand::service::LogoUpload;
    use crate::brand::store::ThemeStore;
    use crate::error::ApiError;
    use crate::storage::{KeyValueStore, MemoryStore, BRAND_CONFIG_KEY};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted `fetch_active` answers; every other operation is unsupported.
    #[derive(Default)]
    pub(crate) struct ScriptedBrandApi {
        answers: Mutex<VecDeque<Result<ThemeConfig, ApiError>>>,
        pub(crate) calls: AtomicUsize,
    }

    impl ScriptedBrandApi {
        pub(crate) fn new(answers: Vec<Result<ThemeConfig, ApiError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    fn unsupported<T>() -> Result<T, ApiError> {
        Err(ApiError::InvalidResponse("not scripted".into()))
    }

    #[async_trait]
    impl BrandApi for ScriptedBrandApi {
        async fn fetch_active(&self) -> Result<ThemeConfig, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Status { code: 503, body: String::new() }))
        }
        async fn list(&self) -> Result<Vec<ThemeConfig>, ApiError> {
            unsupported()
        }
        async fn create(&self, _: &ThemeConfig) -> Result<ThemeConfig, ApiError> {
            unsupported()
        }
        async fn update(&self, _: i64, _: &ThemeConfig) -> Result<ThemeConfig, ApiError> {
            unsupported()
        }
        async fn activate(&self, _: i64) -> Result<(), ApiError> {
            unsupported()
        }
        async fn delete(&self, _: i64) -> Result<(), ApiError> {
            unsupported()
        }
        async fn upload_logo(&self, _: i64, _: LogoUpload) -> Result<ThemeConfig, ApiError> {
            unsupported()
        }
    }

    struct Fixture {
        resolver: ThemeResolver,
        api: Arc<ScriptedBrandApi>,
        doc: Arc<Mutex<DocumentSurface>>,
        kv: Arc<MemoryStore>,
    }

    fn fixture(answers: Vec<Result<ThemeConfig, ApiError>>) -> Fixture {
        let api = Arc::new(ScriptedBrandApi::new(answers));
        let doc = Arc::new(Mutex::new(DocumentSurface::new()));
        let kv = Arc::new(MemoryStore::new());
        let applicator = ThemeApplicator::new(doc.clone(), ThemeStore::new(kv.clone()));
        Fixture {
            resolver: ThemeResolver::new(api.clone(), applicator),
            api,
            doc,
            kv,
        }
    }

    fn remote_theme() -> ThemeConfig {
        ThemeConfig {
            id: Some(1),
            establishment_name: Some("Clínica Remota".into()),
            color_primary: Some("#ff0000".into()),
            ..ThemeConfig::default()
        }
    }

    #[tokio::test]
    async fn remote_success_wins_and_is_persisted() {
        let f = fixture(vec![Ok(remote_theme())]);
        ThemeStore::new(f.kv.clone())
            .save(&ThemeConfig {
                establishment_name: Some("Stale".into()),
                ..ThemeConfig::default()
            })
            .unwrap();

        let resolved = f.resolver.resolve_active_theme().await;
        assert_eq!(resolved.source, ThemeSource::Remote);
        assert_eq!(resolved.theme, remote_theme());
        assert_eq!(f.doc.lock().unwrap().variable("primary-color"), Some("#ff0000"));
        let raw = f.kv.get(BRAND_CONFIG_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<ThemeConfig>(&raw).unwrap(), remote_theme());
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_snapshot() {
        let f = fixture(vec![Err(ApiError::Status {
            code: 500,
            body: "boom".into(),
        })]);
        let snapshot = ThemeConfig {
            establishment_name: Some("Local".into()),
            color_primary: Some("#00ff00".into()),
            ..ThemeConfig::default()
        };
        ThemeStore::new(f.kv.clone()).save(&snapshot).unwrap();

        let resolved = f.resolver.resolve_active_theme().await;
        assert_eq!(resolved.source, ThemeSource::Local);
        assert_eq!(resolved.theme, snapshot);
        assert_eq!(f.doc.lock().unwrap().title(), Some("Local"));
        let raw = f.kv.get(BRAND_CONFIG_KEY).unwrap().expect("snapshot kept");
        assert_eq!(serde_json::from_str::<ThemeConfig>(&raw).unwrap(), snapshot);
    }

    #[tokio::test]
    async fn no_remote_and_corrupt_snapshot_yields_default() {
        let f = fixture(vec![Err(ApiError::Unauthorized)]);
        f.kv.set(BRAND_CONFIG_KEY, "{broken").unwrap();

        let resolved = f.resolver.resolve_active_theme().await;
        assert_eq!(resolved.source, ThemeSource::Default);
        assert_eq!(resolved.theme, default_theme());
        let doc = f.doc.lock().unwrap();
        assert_eq!(doc.variable("primary-color"), Some("#00d1b2"));
        assert_eq!(doc.title(), Some("AgendaVet"));
    }

    #[tokio::test]
    async fn remote_empty_object_is_used_as_is() {
        let f = fixture(vec![Ok(ThemeConfig::default())]);
        let resolved = f.resolver.resolve_active_theme().await;
        assert_eq!(resolved.source, ThemeSource::Remote);
        let doc = f.doc.lock().unwrap();
        assert!(doc.variables().is_empty());
        assert_eq!(doc.title(), Some("AgendaVet"));
    }

    #[tokio::test]
    async fn resolving_twice_with_same_remote_is_idempotent() {
        let f = fixture(vec![Ok(remote_theme()), Ok(remote_theme())]);
        f.resolver.resolve_active_theme().await;
        let first = f.doc.lock().unwrap().clone();
        f.resolver.resolve_active_theme().await;
        let second = f.doc.lock().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(f.api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn set_active_theme_never_calls_remote() {
        let f = fixture(vec![]);
        f.resolver.set_active_theme(&remote_theme());
        assert_eq!(f.api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.doc.lock().unwrap().title(), Some("Clínica Remota"));
        assert_eq!(ThemeStore::new(f.kv.clone()).load(), Some(remote_theme()));
    }
}
