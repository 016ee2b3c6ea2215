//! CLI definitions for sitewright.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sitewright CLI.
#[derive(Parser)]
#[command(name = "sitewright")]
#[command(about = "Generate runnable tool servers from websites")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.sitewright/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Authenticate into a site, discover its actions, and generate a tool server
    Create {
        /// Target site URL or domain
        url: String,

        /// Output directory for the generated package
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the credential vault entirely (no lookup, no save offer)
        #[arg(long)]
        no_vault: bool,
    },

    /// Explore a site without authenticating and print its action catalog as JSON
    Discover {
        /// Target site URL or domain
        url: String,
    },
}
