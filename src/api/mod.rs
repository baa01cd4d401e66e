//! HTTP client adapter for the AgendaVet REST backend.
//!
//! Every call goes through [`ApiClient`], which owns the three cross-cutting
//! rules of the backend contract:
//! - bearer token injection from the durable `token` slot;
//! - a configured base URL and request timeout;
//! - 401 handling: clear `token` and `user`, then notify the
//!   [`SessionListener`] so the surface can send the user back to login.

mod client;

pub use client::{ApiClient, LogSessionListener, SessionListener};
