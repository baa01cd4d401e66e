//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`AGENDAVET_BASE_URL`, `AGENDAVET_API_TIMEOUT_SECS`,
//!    `AGENDAVET_STORAGE_DIR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./agendavet.toml in the current directory
//! 4. $XDG_CONFIG_HOME/agendavet/agendavet.toml (or ~/.config/agendavet/agendavet.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::{load_config, load_config_with_source};
pub use types::{
    ApiConfig, Config, DisplayConfig, GlobalConfigInitResult, LoadedConfig, StorageConfig,
};
