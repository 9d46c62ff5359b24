pub mod devices;
pub mod output;
pub mod power;
pub mod report;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::AppError;
use crate::models::Device;
use crate::resolve;

#[derive(Parser)]
#[command(
    name = "keylight",
    version,
    about = "Control Elgato Key Lights on the local network"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default is $HOME/.keylight.toml)
    #[arg(long, global = true, env = "KEYLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as human-readable table instead of JSON
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose output (log HTTP requests/responses)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file (the dashboard logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get the current status of the configured lights
    Status {
        /// Only this light
        #[arg(short, long)]
        light: Option<String>,
    },

    /// Turn the lights on
    On {
        /// Only this light
        #[arg(short, long)]
        light: Option<String>,
        /// Brightness percentage (0-100)
        #[arg(short, long, allow_negative_numbers = true)]
        brightness: Option<i64>,
        /// Color temperature in Kelvin (2900-7000)
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        temperature: Option<i64>,
    },

    /// Turn the lights off
    Off {
        /// Only this light
        #[arg(short, long)]
        light: Option<String>,
    },

    /// List configured lights without contacting them
    List,

    /// Interactive dashboard (default)
    Tui,
}

/// No subcommand and `tui` both open the dashboard.
pub fn is_interactive(command: Option<&Commands>) -> bool {
    matches!(command, None | Some(Commands::Tui))
}

/// Resolve the targeted lights, printing the known names when `name` is unknown.
///
/// An unknown name is not an error: it yields `None` after the notice.
pub fn targets_or_notify(
    devices: &[Device],
    name: Option<&str>,
) -> Result<Option<Vec<Device>>, AppError> {
    match resolve::select_devices(devices, name) {
        Ok(targets) => Ok(Some(targets)),
        Err(err @ AppError::DeviceNotFound { .. }) => {
            println!("{err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_interactive() {
        let cli = Cli::try_parse_from(["keylight"]).unwrap();
        assert!(is_interactive(cli.command.as_ref()));
    }

    #[test]
    fn test_parse_on_flags() {
        let cli = Cli::try_parse_from([
            "keylight", "on", "-l", "Desk", "-b", "40", "-k", "4500", "--table",
        ])
        .unwrap();
        assert!(cli.table);
        match cli.command {
            Some(Commands::On {
                ref light,
                brightness,
                temperature,
            }) => {
                assert_eq!(light.as_deref(), Some("Desk"));
                assert_eq!(brightness, Some(40));
                assert_eq!(temperature, Some(4500));
            }
            _ => panic!("expected on"),
        }
        assert!(!is_interactive(cli.command.as_ref()));
    }

    #[test]
    fn test_negative_brightness_reaches_validation() {
        let cli = Cli::try_parse_from(["keylight", "on", "--brightness", "-5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::On {
                brightness: Some(-5),
                ..
            })
        ));
    }

    #[test]
    fn test_targets_or_notify() {
        let devices = vec![Device::new("Desk", "10.0.0.1")];
        assert_eq!(
            targets_or_notify(&devices, Some("Desk")).unwrap(),
            Some(devices.clone())
        );
        assert_eq!(targets_or_notify(&devices, Some("Nope")).unwrap(), None);
    }
}
