// Host-only tooling: unwrap/expect/panic are fine outside the firmware.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doc::DocTarget;

/// Workspace chores for the StickC admin firmware.
#[derive(Parser)]
#[command(name = "xtask", version)]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build both core crates for bare metal and the host, then clippy and fmt
    Check,
    /// Run the test suites (both when neither flag is given)
    Test {
        /// `#[cfg(test)]` modules only
        #[arg(long, conflicts_with = "integration")]
        unit: bool,
        /// `crates/firmware/tests/*` only
        #[arg(long)]
        integration: bool,
    },
    /// Build API docs with the host feature set
    Doc {
        /// Crate to document
        #[arg(long = "crate", value_enum, default_value_t = DocTarget::All)]
        target: DocTarget,
        /// Open the result in a browser
        #[arg(long)]
        open: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Check => check::run(),
        Task::Test { unit, integration } => test::run(unit, integration),
        Task::Doc { target, open } => doc::run(target, open),
    }
}
