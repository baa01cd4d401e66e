//! CLI argument parsing via clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use agendavet::build_info;

/// Resolve, apply and manage AgendaVet establishment branding.
#[derive(Debug, Parser)]
#[command(
    name = "agendavet",
    version = build_info::VERSION,
    long_version = build_info::cli_version_text(),
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./agendavet.toml or ~/.config/agendavet/agendavet.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/agendavet/agendavet.toml.
    Init {
        /// Overwrite an existing file (a timestamped backup is kept).
        #[arg(long)]
        force: bool,
    },
    /// Resolve and apply the active theme.
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Manage brand configurations on the backend (admin only for writes).
    #[command(subcommand)]
    Brand(BrandCommand),
    /// Check values against the `#RGB` / `#RRGGBB` color format.
    ValidateColor {
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        /// Password; prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Register a client account from a JSON file.
    Register(FileArg),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Fetch the active theme (falling back locally), apply and persist it.
    Resolve {
        /// Write the resulting stylesheet here instead of stdout.
        #[arg(long)]
        css: Option<PathBuf>,
    },
    /// Print the last applied theme snapshot.
    Show,
    /// Apply a theme from a JSON file without contacting the backend.
    Apply(FileArg),
}

#[derive(Debug, Subcommand)]
pub enum BrandCommand {
    List,
    Create(FileArg),
    Update {
        id: i64,
        #[command(flatten)]
        file: FileArg,
    },
    /// Mark a configuration as the active one.
    Activate { id: i64 },
    Delete { id: i64 },
    /// Upload a logo image for a configuration.
    UploadLogo { id: i64, path: PathBuf },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FileArg {
    /// JSON document to read.
    #[arg(long = "file", short = 'f')]
    pub file: PathBuf,
}
