//! Instrument configuration command.

use std::path::PathBuf;

use clap::Args;
use tromba_config::{ConfigError, InstrumentConfig, default_config_path};

use super::common::load_config;

#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration file (defaults to the user's instrument.toml)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Write the default configuration to the file
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,

    /// Print the input wiring as well
    #[arg(long, conflicts_with = "init")]
    wiring: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = args.path.unwrap_or_else(default_config_path);
        let config = InstrumentConfig::default();
        let saved = if args.force {
            config.save(&path)
        } else {
            config.save_new(&path)
        };
        if let Err(ConfigError::AlreadyExists(existing)) = &saved {
            anyhow::bail!(
                "'{}' already exists. Use --force to overwrite.",
                existing.display()
            );
        }
        saved?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(args.path.as_deref())?;
    print!("{}", config.to_toml_string()?);

    if args.wiring {
        println!("\n# Input wiring (GPIO)");
        for (label, gpio) in config.bindings.unwrap_or_default().labeled_lines() {
            println!("#   {label:<12} {gpio:>2}");
        }
    }

    Ok(())
}
