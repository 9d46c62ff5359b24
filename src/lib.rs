pub mod api;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod models;
pub mod resolve;
pub mod tui;

use api::client::KeyLightClient;
use cli::output::print_error;
use config::{FileConfig, OutputMode, RuntimeConfig};
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = RuntimeConfig {
        output_mode: if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Json
        },
        verbose: cli_args.verbose,
    };

    let result = start(cli_args, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

async fn start(cli_args: cli::Cli, config: &RuntimeConfig) -> Result<(), AppError> {
    let interactive = cli::is_interactive(cli_args.command.as_ref());
    match &cli_args.log_file {
        Some(path) => logging::init_file(path, config.verbose)?,
        None if !interactive => logging::init_stderr(config.verbose),
        None => {}
    }

    let file_config = FileConfig::load_or_default_path(cli_args.config.as_deref())?;
    let client = KeyLightClient::new(&file_config.client)?;
    let devices = file_config.lights;

    run_command(cli_args.command, &devices, &client, config).await
}

async fn run_command(
    command: Option<cli::Commands>,
    devices: &[models::Device],
    client: &KeyLightClient,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    match command {
        Some(cli::Commands::Status { light }) => {
            cli::status::handle(light.as_deref(), devices, client, config).await
        }
        Some(cli::Commands::On {
            light,
            brightness,
            temperature,
        }) => {
            cli::power::handle_on(
                light.as_deref(),
                brightness,
                temperature,
                devices,
                client,
                config,
            )
            .await
        }
        Some(cli::Commands::Off { light }) => {
            cli::power::handle_off(light.as_deref(), devices, client, config).await
        }
        Some(cli::Commands::List) => {
            cli::devices::handle_list(devices, config);
            Ok(())
        }
        Some(cli::Commands::Tui) | None => tui::run(devices.to_vec(), client.clone()).await,
    }
}
