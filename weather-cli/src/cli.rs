use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, CustomUserError, Text, validator::Validation};
use std::process::ExitCode;

use weather_now_core::{
    Config, Coordinates, DisplayRecord, LookupError, LookupOrchestrator, services_from_config,
};

use crate::terminal::TerminalPresenter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather for a city or a position")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    City {
        /// City name. Falls back to the configured default city.
        name: Option<String>,
    },

    /// Show current weather at the configured home position.
    Here,

    /// Show current weather at a latitude/longitude.
    Coords {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Interactively set the default city and home position.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let outcome = match self.command {
            Command::Configure => {
                configure(config_for_configure(Config::load()))?;
                return Ok(ExitCode::SUCCESS);
            }
            Command::City { name } => {
                let config = Config::load()?;
                let name = name.unwrap_or_else(|| config.default_city().to_string());
                orchestrator(&config)?.lookup_by_city(&name).await
            }
            Command::Here => orchestrator(&Config::load()?)?.lookup_by_current_location().await,
            Command::Coords { latitude, longitude } => {
                ensure!(
                    (-90.0..=90.0).contains(&latitude),
                    "latitude must be between -90 and 90, got {latitude}"
                );
                ensure!(
                    (-180.0..=180.0).contains(&longitude),
                    "longitude must be between -180 and 180, got {longitude}"
                );
                orchestrator(&Config::load()?)?
                    .lookup_by_coordinates(Coordinates::new(latitude, longitude))
                    .await
            }
        };

        Ok(exit_code(&outcome))
    }
}

fn orchestrator(config: &Config) -> anyhow::Result<LookupOrchestrator> {
    let services = services_from_config(config).context("Failed to build HTTP client")?;
    Ok(LookupOrchestrator::new(services, TerminalPresenter::stdio()))
}

fn exit_code(outcome: &Result<DisplayRecord, LookupError>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// `configure` must still work when the existing file is unreadable, since
/// it is how the file gets rewritten.
fn config_for_configure(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable configuration: {:#}", e);
        Config::default()
    })
}

fn within(limit: f64) -> impl Fn(&f64) -> Result<Validation, CustomUserError> + Clone {
    move |value: &f64| {
        if (-limit..=limit).contains(value) {
            Ok(Validation::Valid)
        } else {
            let message = format!("Please type a number between -{limit} and {limit}");
            Ok(Validation::Invalid(message.into()))
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current_city = config.default_city().to_string();
    let city = Text::new("Default city:")
        .with_default(&current_city)
        .prompt()?;
    config.set_default_city(city);

    let set_home = Confirm::new("Set a home position for `weather-now here`?")
        .with_default(config.home.is_some())
        .prompt()?;

    let home = if set_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number")
            .with_validator(within(90.0))
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number")
            .with_validator(within(180.0))
            .prompt()?;
        Some(Coordinates::new(latitude, longitude))
    } else {
        None
    };
    config.set_home(home);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn coords_accept_negative_values() {
        let cli = Cli::try_parse_from(["weather-now", "coords", "-33.87", "151.21"]).unwrap();
        match cli.command {
            Command::Coords { latitude, longitude } => {
                assert_eq!(latitude, -33.87);
                assert_eq!(longitude, 151.21);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn city_name_is_optional() {
        let cli = Cli::try_parse_from(["weather-now", "-v", "city"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::City { name: None }));
    }

    #[test]
    fn coordinate_prompts_reject_out_of_range_values() {
        assert!(matches!(within(90.0)(&-90.0), Ok(Validation::Valid)));
        assert!(matches!(within(90.0)(&45.5), Ok(Validation::Valid)));
        assert!(matches!(within(90.0)(&90.5), Ok(Validation::Invalid(_))));
        assert!(matches!(within(180.0)(&-181.0), Ok(Validation::Invalid(_))));
    }

    #[test]
    fn unreadable_config_does_not_block_configure() {
        let config = config_for_configure(Err(anyhow::anyhow!("invalid TOML at line 1")));
        assert_eq!(config, Config::default());

        let mut saved = Config::default();
        saved.set_default_city("Pune");
        assert_eq!(config_for_configure(Ok(saved.clone())), saved);
    }

    #[test]
    fn failed_lookup_exits_non_zero() {
        assert_eq!(exit_code(&Err(LookupError::EmptyInput)), ExitCode::FAILURE);
    }
}
