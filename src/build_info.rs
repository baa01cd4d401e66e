//! Build metadata baked in by `build.rs`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: &str = env!("AGENDAVET_BUILD_GIT_HASH");
pub const BUILD_TIMESTAMP: &str = env!("AGENDAVET_BUILD_TIMESTAMP");

/// Appended to `agendavet --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build:\n  commit: ",
    env!("AGENDAVET_BUILD_GIT_HASH"),
    "\n  built:  ",
    env!("AGENDAVET_BUILD_TIMESTAMP")
);

/// Text printed by `agendavet --version`.
pub fn cli_version_text() -> String {
    format!("{VERSION} (commit {GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_text_carries_commit_and_build_time() {
        let text = cli_version_text();
        assert!(text.starts_with(VERSION));
        assert!(text.contains(GIT_COMMIT));
        assert!(text.contains(BUILD_TIMESTAMP));
    }
}
