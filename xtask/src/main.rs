//! Quality gate for the guide workspace.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run all quality checks, report failures
//! - `cargo xtask check --ci` - Same, but exit non-zero on any failure
//! - `cargo xtask ci` - Full CI suite with per-step summary
//! - `cargo xtask layer0` - Confirm no renderer or windowing crate is in the tree
//!
//! The library crates must stay Layer 0: pure math and state, no engine,
//! renderer or windowing dependency anywhere in their dependency tree.

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Quality gate for the guide workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for the guide crates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Fail with a non-zero exit code on any issue
        #[arg(long)]
        ci: bool,
    },

    /// Run the full CI suite
    Ci,

    /// Check the library crates for renderer or windowing dependencies
    Layer0,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
        Commands::Layer0 => check::run_layer0(),
    }
}
