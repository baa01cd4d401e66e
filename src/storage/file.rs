//! JSON-file store (`~/.config/agendavet/storage.json`).

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

use super::KeyValueStore;

const STORE_FILE_NAME: &str = "storage.json";

/// Store file path inside `dir`.
pub fn default_store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE_NAME)
}

/// All slots live in one JSON object rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes load-modify-write within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store rooted in `dir`, using the standard file name.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(default_store_path(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Invalid("store write lock poisoned".to_string()))?;
        let mut slots = match load_slots(&self.path) {
            Ok(slots) => slots,
            Err(StoreError::Invalid(msg)) => {
                // An unreadable file must not block new writes forever.
                tracing::warn!(path = %self.path.display(), "{msg}; starting a fresh store");
                quarantine(&self.path);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        if apply(&mut slots) {
            write_slots(&self.path, &slots)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(load_slots(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(|slots| {
            slots.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.mutate(|slots| slots.remove(key).is_some())
    }
}

fn load_slots(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => serde_json::from_str(&text).map_err(|err| {
            StoreError::Invalid(format!(
                "failed to parse local store `{}`: {err}",
                path.display()
            ))
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(StoreError::Io(err)),
    }
}

/// Move a corrupt store aside so its content stays available for inspection.
fn quarantine(path: &Path) {
    let aside = path.with_extension("json.corrupt");
    if let Err(err) = std::fs::rename(path, &aside) {
        tracing::warn!(path = %path.display(), "failed to move corrupt store aside: {err}");
    }
}

/// Persist the slot map with restrictive permissions via write-then-rename.
fn write_slots(path: &Path, slots: &BTreeMap<String, String>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700));
        }
    }

    let text = serde_json::to_string_pretty(slots)
        .map_err(|err| StoreError::Invalid(format!("failed to serialize local store: {err}")))?;
    let tmp = path.with_extension("json.tmp");
    let mut options = std::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    drop(file);
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, TOKEN_KEY, USER_KEY};
    use crate::testsupport::TestTempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let fixture = TestTempDir::new("store-missing");
        let store = FileStore::in_dir(fixture.path());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn set_get_remove_persist_across_instances() {
        let fixture = TestTempDir::new("store-roundtrip");
        let store = FileStore::in_dir(&fixture.child("nested"));
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{\"id\":1}").unwrap();

        let reopened = FileStore::in_dir(&fixture.child("nested"));
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        reopened.remove(TOKEN_KEY).unwrap();
        reopened.remove("never-set").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{\"id\":1}"));
    }

    #[cfg(unix)]
    #[test]
    fn store_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let fixture = TestTempDir::new("store-perms");
        let store = FileStore::in_dir(fixture.path());
        store.set(TOKEN_KEY, "secret").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_errors_on_read_and_is_replaced_on_write() {
        let fixture = TestTempDir::new("store-corrupt");
        fixture.write_text("storage.json", "{not json");
        let store = FileStore::in_dir(fixture.path());
        assert!(matches!(store.get(TOKEN_KEY), Err(StoreError::Invalid(_))));

        store.set(TOKEN_KEY, "fresh").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
        assert!(fixture.child("storage.json.corrupt").exists());
    }

    #[test]
    fn memory_store_matches_file_semantics() {
        let store = MemoryStore::new();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.set(TOKEN_KEY, "a").unwrap();
        store.set(TOKEN_KEY, "b").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("b"));
        store.remove(TOKEN_KEY).unwrap();
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }
}
