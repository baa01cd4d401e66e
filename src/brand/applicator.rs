//! Theme application: a pure plan plus a thin surface adapter.
//!
//! [`plan_theme`] turns a [`ThemeConfig`] into the exact set of style
//! variable assignments and document metadata it implies. A [`ThemeSurface`]
//! performs them; [`DocumentSurface`] is the in-memory document used by the
//! CLI (rendered as a `:root` stylesheet) and by tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::store::ThemeStore;
use super::ThemeConfig;

/// Everything applying one theme does to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePlan {
    /// `(variable, value)` in application order, without the `--` prefix.
    pub variables: Vec<(&'static str, String)>,
    pub title: String,
    /// Favicon href; `None` leaves any existing favicon alone.
    pub favicon: Option<String>,
}

/// Build the application plan for `theme`.
///
/// Unpopulated color fields produce no assignment. Values are copied as-is,
/// valid or not.
pub fn plan_theme(theme: &ThemeConfig) -> ThemePlan {
    let mut variables = Vec::new();
    for (value, names) in variable_targets(theme) {
        let Some(value) = value else {
            continue;
        };
        for name in names {
            variables.push((*name, value.to_string()));
        }
    }
    ThemePlan {
        variables,
        title: theme.display_name().to_string(),
        favicon: theme.logo().map(str::to_string),
    }
}

/// Each color field and the variables it drives (primary name, legacy
/// alias, editor preview).
fn variable_targets(theme: &ThemeConfig) -> [(Option<&str>, &'static [&'static str]); 11] {
    [
        (
            theme.color_primary.as_deref(),
            &["primary-color", "primary", "preview-primary"][..],
        ),
        (
            theme.color_secondary.as_deref(),
            &["secondary-color", "secondary", "preview-secondary"][..],
        ),
        (
            theme.color_accent.as_deref(),
            &["accent-color", "preview-accent"][..],
        ),
        (
            theme.color_background.as_deref(),
            &["background-color", "background", "preview-background"][..],
        ),
        (
            theme.color_success.as_deref(),
            &["success-color", "preview-success"][..],
        ),
        (
            theme.color_danger.as_deref(),
            &["danger-color", "preview-danger"][..],
        ),
        (
            theme.color_warning.as_deref(),
            &["warning-color", "preview-warning"][..],
        ),
        (
            theme.color_info.as_deref(),
            &["info-color", "preview-info"][..],
        ),
        (theme.color_text.as_deref(), &["text-color", "text"][..]),
        (theme.color_border.as_deref(), &["border-color"][..]),
        (theme.color_shadow.as_deref(), &["shadow-color"][..]),
    ]
}

/// Platform side of theme application.
///
/// Each call stands alone; an adapter that cannot perform one effect must
/// swallow (and log) the failure rather than skip the others.
pub trait ThemeSurface: Send {
    fn set_variable(&mut self, name: &str, value: &str);
    fn set_title(&mut self, title: &str);
    /// Point the single favicon link at `href`, creating it if missing.
    fn set_favicon(&mut self, href: &str);
}

/// One `<link>` element in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLink {
    pub rel: String,
    pub href: String,
}

/// In-memory document: root style variables, title and head links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSurface {
    variables: BTreeMap<String, String>,
    title: Option<String>,
    links: Vec<HeadLink>,
}

impl DocumentSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn links(&self) -> &[HeadLink] {
        &self.links
    }

    pub fn favicon(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "icon")
            .map(|link| link.href.as_str())
    }

    /// Render the root variables as a stylesheet, sorted by name.
    pub fn render_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  --{name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

impl ThemeSurface for DocumentSurface {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_favicon(&mut self, href: &str) {
        if let Some(link) = self.links.iter_mut().find(|link| link.rel == "icon") {
            link.href = href.to_string();
            return;
        }
        self.links.push(HeadLink {
            rel: "icon".to_string(),
            href: href.to_string(),
        });
    }
}

/// Shared handle to whatever surface the application renders into.
pub type SharedSurface = Arc<Mutex<dyn ThemeSurface>>;

/// Applies themes to a surface and records each as the last known good one.
#[derive(Clone)]
pub struct ThemeApplicator {
    surface: SharedSurface,
    store: ThemeStore,
}

impl ThemeApplicator {
    pub fn new(surface: SharedSurface, store: ThemeStore) -> Self {
        Self { surface, store }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// Apply `theme` and persist it. Never fails; problems are logged.
    pub fn apply(&self, theme: &ThemeConfig) {
        let plan = plan_theme(theme);
        match self.surface.lock() {
            Ok(mut surface) => run_plan(&mut *surface, &plan),
            Err(poisoned) => {
                tracing::warn!("theme surface lock poisoned; applying anyway");
                run_plan(&mut *poisoned.into_inner(), &plan);
            }
        }
        if let Err(err) = self.store.save(theme) {
            tracing::warn!("failed to persist applied theme: {err}");
        }
        tracing::debug!(
            title = %plan.title,
            variables = plan.variables.len(),
            favicon = plan.favicon.is_some(),
            "theme applied"
        );
    }
}

/// Perform a plan on a surface.
pub fn run_plan(surface: &mut dyn ThemeSurface, plan: &ThemePlan) {
    for (name, value) in &plan.variables {
        surface.set_variable(name, value);
    }
    surface.set_title(&plan.title);
    if let Some(href) = &plan.favicon {
        surface.set_favicon(href);
    }
}
