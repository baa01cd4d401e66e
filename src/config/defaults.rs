//! Default configuration constants.

/// Embedded default `agendavet.toml` template written by `agendavet init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/agendavet.toml");
/// Config file name used for local and global lookup.
pub(super) const CONFIG_FILE_NAME: &str = "agendavet.toml";
/// Directory name under the user config root.
pub(super) const APP_DIR_NAME: &str = "agendavet";
/// Default backend base URL.
pub(super) const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Default timeout for backend requests.
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
