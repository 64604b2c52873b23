//! layerconf CLI - resolve layered configuration from the command line
//!
//! Usage: layerconf [-f FORMAT] [-c FILE]... <COMMAND>
//!
//! Commands:
//!   get      Resolve one key as a given type, optionally via its env variable
//!   env-key  Print the environment variable name derived from a key
//!   dump     Print the merged settings as JSON
//!   keys     List every resolved key

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::EnvKey { key } => commands::cmd_env_key(key),
        Commands::Get(args) => {
            let config = commands::load_config(&cli.format, &cli.files)?;
            commands::get::cmd_get(&config, args)
        }
        Commands::Dump => {
            let config = commands::load_config(&cli.format, &cli.files)?;
            commands::dump::cmd_dump(&config)
        }
        Commands::Keys => {
            let config = commands::load_config(&cli.format, &cli.files)?;
            commands::dump::cmd_keys(&config)
        }
    }
}

/// -v logs at DEBUG, -vv at TRACE. RUST_LOG directives apply alongside.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
