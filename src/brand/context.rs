//! Process-wide brand state shared by every consumer.
//!
//! Build one [`BrandContext`] at startup and hand out clones; they all share
//! the same state. Observers follow changes through [`BrandContext::subscribe`].

use std::sync::Arc;
use tokio::sync::watch;

use super::resolver::{ResolvedTheme, ThemeResolver};
use super::ThemeConfig;

/// Snapshot published to subscribers.
///
/// The load bookkeeping lives in the same value as `is_loading`, so every
/// change to it goes through the channel's lock together with the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandState {
    pub current_theme: Option<ThemeConfig>,
    pub is_loading: bool,
    in_flight: usize,
    // Bumped by `reset`; loads from an older generation are forgotten.
    generation: u64,
}

impl BrandState {
    fn begin_load(&mut self) -> u64 {
        self.in_flight += 1;
        self.is_loading = true;
        self.generation
    }

    fn end_load(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_loading = self.in_flight > 0;
        true
    }
}

#[derive(Clone)]
pub struct BrandContext {
    resolver: ThemeResolver,
    state: Arc<watch::Sender<BrandState>>,
}

/// Ends a counted load even when its future is dropped.
struct LoadGuard<'a> {
    ctx: &'a BrandContext,
    generation: u64,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.ctx
            .state
            .send_if_modified(|state| state.end_load(generation));
    }
}

impl BrandContext {
    pub fn new(resolver: ThemeResolver) -> Self {
        let (state, _) = watch::channel(BrandState::default());
        Self {
            resolver,
            state: Arc::new(state),
        }
    }

    pub fn current_theme(&self) -> Option<ThemeConfig> {
        self.state.borrow().current_theme.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn state(&self) -> BrandState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BrandState> {
        self.state.subscribe()
    }

    /// Load on first use. Returns `None` when a theme is already present or
    /// another load is running.
    pub async fn mount(&self) -> Option<ResolvedTheme> {
        let mut claimed = None;
        self.state.send_if_modified(|state| {
            if state.current_theme.is_some() || state.in_flight > 0 {
                return false;
            }
            claimed = Some(state.begin_load());
            true
        });
        let Some(generation) = claimed else {
            tracing::debug!("brand theme present or load in flight; mount skipped");
            return None;
        };
        Some(self.run_load(generation).await)
    }

    /// Resolve and apply the active theme, publishing it as current.
    pub async fn load(&self) -> ResolvedTheme {
        let mut generation = 0;
        self.state
            .send_modify(|state| generation = state.begin_load());
        self.run_load(generation).await
    }

    /// Make `theme` current and apply it right away.
    ///
    /// Does not wait for, cancel or touch a running load; whichever write
    /// lands last wins.
    pub fn update(&self, theme: ThemeConfig) {
        self.resolver.set_active_theme(&theme);
        self.state
            .send_modify(|state| state.current_theme = Some(theme));
    }

    /// Forget the current theme and any running loads.
    ///
    /// A load started before the reset still applies its theme when it
    /// finishes but no longer publishes it or counts as in flight.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            *state = BrandState {
                generation: state.generation.wrapping_add(1),
                ..BrandState::default()
            };
        });
    }

    // Caller has already counted this load under `generation`.
    async fn run_load(&self, generation: u64) -> ResolvedTheme {
        let _guard = LoadGuard {
            ctx: self,
            generation,
        };
        let resolved = self.resolver.resolve_active_theme().await;
        let theme = resolved.theme.clone();
        self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.current_theme = Some(theme);
            true
        });
        resolved
    }
}
