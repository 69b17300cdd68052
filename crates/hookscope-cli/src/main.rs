//! hookscope sample program
//!
//! Runs small programs against a thread-local hooks context and prints what
//! they collected.
//!
//! ```bash
//! hookscope                       # demo with defaults from hookscope.toml
//! hookscope demo --name bar       # onB receives "bar"
//! hookscope demo --seed-x 42      # meta.x starts at 42
//! hookscope nested                # inner and outer frames stay separate
//! RUST_LOG=trace hookscope        # show frame push/pop
//! ```

mod args;
mod config;
mod demo;
mod logging;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Commands};
use config::{CliConfig, LoggingConfig};
use demo::DemoSettings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(&cli.config_file)?;

    if cli.verbose {
        config.logging.merge(LoggingConfig {
            level: "debug".to_string(),
            format: config.logging.format,
        });
    }
    logging::init(&config.logging);

    let transcript = match cli.command() {
        Commands::Demo { name, seed_x } => {
            let mut meta = config.meta.clone();
            if let Some(x) = seed_x {
                meta.set("x", x)?;
            }
            let settings = DemoSettings {
                name: name.unwrap_or(config.name),
                meta,
            };
            demo::run_demo(&settings)?
        }
        Commands::Nested => demo::run_nested(),
        Commands::Keys => {
            for key in demo::keys() {
                println!("{}", key);
            }
            return Ok(());
        }
    };

    for line in transcript.lines() {
        println!("{}", line);
    }

    Ok(())
}
