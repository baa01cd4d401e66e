//! Durable key-value slots backing the client's local state.
//!
//! The whole local footprint is three string slots: the last applied brand
//! theme, the bearer token, and the serialized current user. Values are opaque
//! strings here; callers own their encoding.

mod file;
mod memory;

pub use file::{default_store_path, FileStore};
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Slot holding the JSON-serialized last applied theme.
pub const BRAND_CONFIG_KEY: &str = "brandConfig";
/// Slot holding the bearer credential.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the JSON-serialized current user.
pub const USER_KEY: &str = "user";

/// Synchronous string key-value storage.
///
/// Implementations must make each call atomic on its own; there is no
/// read-modify-write transaction across calls (last write wins).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
