//! Last-known-good theme snapshot in the `brandConfig` slot.

use std::sync::Arc;

use crate::error::StoreError;
use crate::storage::{KeyValueStore, BRAND_CONFIG_KEY};

use super::ThemeConfig;

#[derive(Clone)]
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the snapshot with `theme`.
    pub fn save(&self, theme: &ThemeConfig) -> Result<(), StoreError> {
        let text = serde_json::to_string(theme)
            .map_err(|err| StoreError::Invalid(format!("failed to serialize theme: {err}")))?;
        self.store.set(BRAND_CONFIG_KEY, &text)
    }

    /// Read the snapshot. Absent, unreadable and corrupt all read as `None`.
    pub fn load(&self) -> Option<ThemeConfig> {
        let text = match self.store.get(BRAND_CONFIG_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                tracing::debug!("local theme snapshot unreadable: {err}");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::debug!("local theme snapshot corrupt: {err}");
                None
            }
        }
    }
}
