//! CLI argument definitions using clap
//!
//! - hookscope                    # Run the demo (default)
//! - hookscope demo --name bar    # Run the demo with another onB argument
//! - hookscope nested             # Show frame isolation
//! - hookscope keys               # List declared hook keys

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "hookscope.toml";

#[derive(Parser, Debug)]
#[command(name = "hookscope")]
#[command(about = "Sample program for stack-scoped hook registration")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Register onA/onB inside accept_hooks, then fire the collected hooks
    Demo {
        /// Argument passed to the onB hook
        #[arg(long)]
        name: Option<String>,

        /// Initial value of the `x` meta field
        #[arg(long)]
        seed_x: Option<i64>,
    },
    /// Run one accept_hooks call inside another and report both results
    Nested,
    /// List the demo hook keys
    Keys,
}

impl Cli {
    /// The selected command, defaulting to the demo
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo {
            name: None,
            seed_x: None,
        })
    }
}
