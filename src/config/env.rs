//! Environment overrides.
//!
//! `AGENDAVET_*` variables win over any file-sourced value.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_BASE_URL: &str = "AGENDAVET_BASE_URL";
pub(super) const ENV_API_TIMEOUT_SECS: &str = "AGENDAVET_API_TIMEOUT_SECS";
pub(super) const ENV_STORAGE_DIR: &str = "AGENDAVET_STORAGE_DIR";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup(ENV_BASE_URL)) {
        config.api.base_url = url;
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_API_TIMEOUT_SECS)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_API_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Zero would mean "no timeout" to reqwest.
        config.api.timeout_secs = parsed.max(1);
    }
    if let Some(dir) = non_empty(env_lookup(ENV_STORAGE_DIR)) {
        config.storage.dir = Some(dir);
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
