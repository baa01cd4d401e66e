//! Session handling: login, client registration, logout, the stored user and
//! role-based access checks.
//!
//! The bearer token lives in the `token` slot and the user record in `user`;
//! both are cleared together on logout and when the backend answers 401.

mod error;
mod guard;
mod session;
mod types;

pub use error::AuthError;
pub use guard::{decide, Access, GuardDecision};
pub use session::{AuthApi, HttpAuthApi, Session};
pub use types::{AuthResponse, LoginRequest, User, UserRole};
