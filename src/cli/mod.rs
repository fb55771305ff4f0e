//! cli
//!
//! Command-line interface layer for Statline.
//!
//! # Responsibilities
//!
//! - Parse flags
//! - Resolve the working directory and run one cache query
//! - Print fragments (or JSON) for the host status line
//!
//! The CLI layer is thin: all status computation lives in [`crate::cache`]
//! and below. Two outcomes are rendered specially rather than treated as
//! failures: no enclosing repository prints nothing, and a vanished working
//! directory prints a degraded marker so the status line shows *something*
//! instead of crashing the prompt.

pub mod args;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cache::{StatusCache, DEFAULT_CAPACITY};
use crate::core::config::Config;
use crate::git::{self, GitError};
use crate::segments::{self, Fragment, IconSet};
use crate::status::Snapshot;

/// Marker printed when the working directory no longer exists.
const DIRECTORY_GONE: &str = "[not found]";

#[derive(Serialize)]
struct JsonOutput<'a> {
    snapshot: &'a Snapshot,
    fragments: &'a [Fragment],
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = Config::load().context("failed to load configuration")?;
    let icons = IconSet::with_overrides(&config.icons);
    let cache = StatusCache::new(config.cache_capacity.unwrap_or(DEFAULT_CAPACITY));

    let cwd = match working_dir(&cli) {
        Ok(dir) => dir,
        Err(_) => {
            // The shell can sit in a deleted directory; degrade, don't crash
            degraded(&cli);
            return Ok(());
        }
    };

    let repo_id = match git::locate(&cwd) {
        Ok(Some(id)) => id,
        Ok(None) => return Ok(()), // Not a repository: render nothing
        Err(GitError::DirectoryGone { .. }) => {
            degraded(&cli);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if cli.debug {
        eprintln!("[debug] repository: {}", repo_id.display());
    }

    let entry = cache
        .get_or_refresh(&repo_id)
        .context("failed to refresh repository status")?;
    let snapshot = entry.snapshot();
    let fragments = segments::build(&snapshot, &icons);

    if cli.json {
        let out = JsonOutput {
            snapshot: &snapshot,
            fragments: &fragments,
        };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        let line: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        println!("{}", line.join(" "));
    }

    Ok(())
}

/// Resolve the directory to query: `--cwd` if given, else the process cwd.
fn working_dir(cli: &Cli) -> std::io::Result<PathBuf> {
    match &cli.cwd {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir(),
    }
}

/// Print the degraded-state marker (respects quiet mode).
fn degraded(cli: &Cli) {
    if !cli.quiet {
        println!("{DIRECTORY_GONE}");
    }
}
