//! Tromba CLI - Command-line interface for the tromba wind controller.

mod commands;
mod script;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tromba")]
#[command(author, version, about = "Tromba wind controller CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the note chart
    Chart(commands::chart::ChartArgs),

    /// Resolve one fingering to a note
    Resolve(commands::resolve::ResolveArgs),

    /// Render a fingering script to a WAV file
    Render(commands::render::RenderArgs),

    /// Play the instrument live from the keyboard
    Play(commands::play::PlayArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Show or create the instrument configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart(args) => commands::chart::run(&args),
        Commands::Resolve(args) => commands::resolve::run(&args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
