//! Audio output device listing command.

use clap::{Args, Subcommand};
use tromba_io::{default_output_device, find_output_device, list_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all output devices
    List,

    /// Show default device information
    Info,

    /// Find the device a name would select
    Find {
        /// Full or partial device name
        name: String,
    },
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_devices()?;

            if devices.is_empty() {
                println!("No audio output devices found.");
                return Ok(());
            }

            println!("Audio Output Devices");
            println!("====================\n");
            for (idx, device) in devices.iter().enumerate() {
                let marker = if device.is_default { " (default)" } else { "" };
                println!(
                    "  [{}] {} ({} Hz, {} ch){}",
                    idx, device.name, device.default_sample_rate, device.default_channels, marker
                );
            }
        }

        DevicesCommand::Info => match default_output_device()? {
            Some(device) => {
                println!("Default output device:");
                println!("  Name: {}", device.name);
                println!("  Sample rate: {} Hz", device.default_sample_rate);
                println!("  Channels: {}", device.default_channels);
            }
            None => println!("No default output device."),
        },

        DevicesCommand::Find { name } => {
            let device = find_output_device(&name)?;
            println!("{}", device.name);
        }
    }

    Ok(())
}
