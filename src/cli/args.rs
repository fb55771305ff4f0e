//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! Statline is single-purpose - one invocation, one status query - so there
//! are no subcommands, only flags:
//! - `--cwd <path>`: query as if run from that directory
//! - `--json`: machine-readable output
//! - `--quiet` / `-q`: suppress the degraded-state marker
//! - `--debug`: print the resolved repository identifier to stderr

use clap::Parser;
use std::path::PathBuf;

/// Statline - repository status for terminal status lines
#[derive(Parser, Debug)]
#[command(name = "statline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Query as if statline was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Emit the snapshot and fragments as JSON
    #[arg(long)]
    pub json: bool,

    /// Minimal output; suppresses degraded-state markers
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let cli = Cli::parse_from(["statline"]);
        assert!(cli.cwd.is_none());
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert!(!cli.debug);
    }

    #[test]
    fn cwd_flag_parses() {
        let cli = Cli::parse_from(["statline", "--cwd", "/work/repo"]);
        assert_eq!(cli.cwd, Some(PathBuf::from("/work/repo")));
    }
}
