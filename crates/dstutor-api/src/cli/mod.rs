//! CLI command definitions for the `dstutor` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `dstutor set secret GOOGLE_API_KEY`).

pub mod secret;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Data science tutor chat server.
#[derive(Parser)]
#[command(name = "dstutor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml.
    #[arg(long, env = "DSTUTOR_HOME", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat server (web page + JSON API).
    Serve {
        /// Address to bind (overrides [server].host).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides [server].port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Set a secret value.
    Set {
        #[command(subcommand)]
        resource: SetResource,
    },

    /// Show configuration and credential status.
    Status,
}

#[derive(Subcommand)]
pub enum SetResource {
    /// Store a secret in the OS keychain (prompts for the value if omitted).
    Secret {
        /// Secret name (e.g., GOOGLE_API_KEY).
        key: String,

        /// Secret value. Omit to be prompted with hidden input.
        #[arg(long)]
        value: Option<String>,
    },
}
