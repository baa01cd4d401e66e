//! AgendaVet brand client.
//!
//! Resolves the establishment's active visual theme (remote configuration,
//! then the last applied snapshot, then the built-in identity), applies it to
//! a document surface and keeps it in durable local storage. Also carries the
//! HTTP client adapter and session handling the theme endpoints rely on.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use agendavet::api::ApiClient;
//! use agendavet::brand::{
//!     BrandContext, BrandService, DocumentSurface, ThemeApplicator, ThemeResolver, ThemeStore,
//! };
//! use agendavet::config::load_config;
//! use agendavet::storage::MemoryStore;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let store = Arc::new(MemoryStore::new());
//! let client = ApiClient::new(&config.api, store.clone());
//! let surface = Arc::new(Mutex::new(DocumentSurface::new()));
//! let applicator = ThemeApplicator::new(surface.clone(), ThemeStore::new(store));
//! let context = BrandContext::new(ThemeResolver::new(
//!     Arc::new(BrandService::new(client)),
//!     applicator,
//! ));
//! context.mount().await;
//! println!("{}", surface.lock().unwrap().render_css());
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod brand;
pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod storage;
#[cfg(test)]
pub mod testsupport;
