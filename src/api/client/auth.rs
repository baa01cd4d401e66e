//! Bearer resolution and session invalidation against the local store.

use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// Read the bearer token for an outbound request, if one is stored.
///
/// A store read failure sends the request unauthenticated; the backend then
/// decides whether that is acceptable.
pub(super) fn resolve_bearer_token(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(TOKEN_KEY) {
        Ok(token) => token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        Err(err) => {
            tracing::warn!("failed to read stored token: {err}");
            None
        }
    }
}

/// Drop the stored credential and user identity after a 401.
pub(super) fn clear_session(store: &dyn KeyValueStore) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(err) = store.remove(key) {
            tracing::warn!(key, "failed to clear session slot: {err}");
        }
    }
}
