//! Brand theme record shared by the resolver, applicator and CRUD service.

use serde::{Deserialize, Serialize};

/// Product name used when a theme carries no establishment name.
pub const DEFAULT_ESTABLISHMENT_NAME: &str = "AgendaVet";

/// An establishment's visual identity and contact metadata.
///
/// Field names on the wire follow the backend (`cor_primaria`, ...). Every
/// field is optional: absence is tolerated everywhere and omitted when
/// serializing, so a persisted snapshot parses back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "nome_estabelecimento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub establishment_name: Option<String>,

    #[serde(rename = "cor_primaria", default, skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
    #[serde(rename = "cor_secundaria", default, skip_serializing_if = "Option::is_none")]
    pub color_secondary: Option<String>,
    #[serde(rename = "cor_accent", default, skip_serializing_if = "Option::is_none")]
    pub color_accent: Option<String>,
    #[serde(rename = "cor_background", default, skip_serializing_if = "Option::is_none")]
    pub color_background: Option<String>,

    // Extended palette.
    #[serde(rename = "cor_success", default, skip_serializing_if = "Option::is_none")]
    pub color_success: Option<String>,
    #[serde(rename = "cor_danger", default, skip_serializing_if = "Option::is_none")]
    pub color_danger: Option<String>,
    #[serde(rename = "cor_warning", default, skip_serializing_if = "Option::is_none")]
    pub color_warning: Option<String>,
    #[serde(rename = "cor_info", default, skip_serializing_if = "Option::is_none")]
    pub color_info: Option<String>,
    #[serde(rename = "cor_texto", default, skip_serializing_if = "Option::is_none")]
    pub color_text: Option<String>,
    #[serde(rename = "cor_borda", default, skip_serializing_if = "Option::is_none")]
    pub color_border: Option<String>,
    #[serde(rename = "cor_sombra", default, skip_serializing_if = "Option::is_none")]
    pub color_shadow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    // Contact details are carried along but never applied.
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(rename = "ativo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ThemeConfig {
    /// Title shown for this theme, falling back to the product name.
    pub fn display_name(&self) -> &str {
        self.establishment_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ESTABLISHMENT_NAME)
    }

    /// Logo URL when one is set to something non-blank.
    pub fn logo(&self) -> Option<&str> {
        self.logo_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Populated color fields, keyed by their wire name, in palette order.
    pub fn colors(&self) -> Vec<(&'static str, &str)> {
        [
            ("cor_primaria", &self.color_primary),
            ("cor_secundaria", &self.color_secondary),
            ("cor_accent", &self.color_accent),
            ("cor_background", &self.color_background),
            ("cor_success", &self.color_success),
            ("cor_danger", &self.color_danger),
            ("cor_warning", &self.color_warning),
            ("cor_info", &self.color_info),
            ("cor_texto", &self.color_text),
            ("cor_borda", &self.color_border),
            ("cor_sombra", &self.color_shadow),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// Hardcoded last-resort theme.
pub fn default_theme() -> ThemeConfig {
    ThemeConfig {
        establishment_name: Some(DEFAULT_ESTABLISHMENT_NAME.to_string()),
        color_primary: Some("#00d1b2".to_string()),
        color_secondary: Some("#363636".to_string()),
        color_accent: Some("#3273dc".to_string()),
        color_background: Some("#f5f5f5".to_string()),
        ..ThemeConfig::default()
    }
}
