//! Establishment branding.
//!
//! The active theme is resolved from the backend, falling back to the last
//! applied snapshot and then to the built-in identity. Applying a theme sets
//! root style variables, the document title and the favicon, and persists the
//! theme as the new snapshot.

pub mod applicator;
pub mod context;
pub mod resolver;
pub mod service;
pub mod store;
mod types;
mod validate;

pub use applicator::{
    plan_theme, DocumentSurface, SharedSurface, ThemeApplicator, ThemePlan, ThemeSurface,
};
pub use context::{BrandContext, BrandState};
pub use resolver::{ResolvedTheme, ThemeResolver, ThemeSource};
pub use service::{BrandApi, BrandService, LogoUpload};
pub use store::ThemeStore;
pub use types::{default_theme, ThemeConfig, DEFAULT_ESTABLISHMENT_NAME};
pub use validate::{invalid_colors, validate_hex_color};
