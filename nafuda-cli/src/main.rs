//! Nafuda — print badge sheets from a chat channel's roster.
//!
//! # Usage
//!
//! ```text
//! nafuda render <channel-id> [--token <t>] [--layout simple|nafuda|a4] [--layout-file <yaml>]
//!               [--templates <dir>] [--output <path>] [--dry-run]
//!               [--report-json <path>] [--records-out <path>] [--timeout <secs>]
//! nafuda render-file <records.json|yaml> [--layout ...] [--output <path>]
//! nafuda layouts
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{layouts::LayoutsArgs, render::RenderArgs, render_file::RenderFileArgs};
use nafuda_core::layout::LayoutKind;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "nafuda",
    version,
    about = "Print name badges for every member of a chat channel",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a channel's members and write a printable badge sheet.
    Render(RenderArgs),

    /// Render a badge sheet from a saved record list (no network).
    RenderFile(RenderFileArgs),

    /// List the built-in layouts.
    Layouts(LayoutsArgs),
}

// ---------------------------------------------------------------------------
// Shared LayoutKind argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `LayoutKind` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutArg(pub LayoutKind);

impl FromStr for LayoutArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<LayoutKind>().map(Self).map_err(|e| e.to_string())
    }
}

impl fmt::Display for LayoutArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<LayoutArg> for LayoutKind {
    fn from(l: LayoutArg) -> Self {
        l.0
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::RenderFile(args) => args.run(),
        Commands::Layouts(args) => args.run(),
    }
}
