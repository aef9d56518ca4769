#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for address detection and suggestion matching.
//!
//! Provides subcommands for scanning text for addresses, normalizing
//! individual addresses, picking the matching row out of a suggestion
//! list, polling a live suggestion file with a partner site's timings,
//! and listing the known partner sites.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

/// Find, normalize, and match US street addresses.
#[derive(Parser)]
#[command(name = "address_bridge")]
#[command(about = "Find, normalize, and match US street addresses")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan text for addresses and print each with its canonical form.
    Scan {
        /// File to scan (default: stdin).
        file: Option<PathBuf>,

        /// Emit one JSON object per address instead of tab-separated text.
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical form of each address argument.
    Normalize {
        /// Raw addresses to normalize.
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Pick the suggestion row that matches an address.
    Match {
        /// Address the suggestions should refer to.
        #[arg(long)]
        target: String,

        /// File with one suggestion per line (default: stdin).
        file: Option<PathBuf>,
    },

    /// Poll a suggestion file with a partner site's timings.
    Prefill {
        /// Site profile id (see `sites`).
        #[arg(long)]
        site: String,

        /// Address the suggestions should refer to.
        #[arg(long)]
        target: String,

        /// File with one suggestion per line, re-read on every poll.
        #[arg(long)]
        suggestions: PathBuf,
    },

    /// List the enabled partner site profiles.
    Sites,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { file, json } => commands::scan(file.as_deref(), json)?,
        Commands::Normalize { addresses } => commands::normalize_addresses(&addresses),
        Commands::Match { target, file } => {
            return Ok(commands::match_suggestions(&target, file.as_deref())?);
        }
        Commands::Prefill {
            site,
            target,
            suggestions,
        } => return Ok(commands::prefill(&site, &target, suggestions).await?),
        Commands::Sites => commands::list_sites(),
    }

    Ok(ExitCode::SUCCESS)
}
