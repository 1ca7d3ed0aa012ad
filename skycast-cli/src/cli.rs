use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use skycast_core::config::Config;
use skycast_core::controller::{SelectionController, SelectionState};
use skycast_core::display::{condition_glyph, format_clock_time};
use skycast_core::resolver::{image_from_config, weather_from_config};

/// Cities offered by the interactive picker.
const POPULAR_CITIES: &[&str] = &[
    "London",
    "New York",
    "Tokyo",
    "Paris",
    "Sydney",
    "Accra",
    "Kumasi",
    "Kigali",
    "Lagos",
    "Nairobi",
    "Cairo",
    "Berlin",
    "Moscow",
    "Cape Town",
    "Toronto",
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather with a matching backdrop")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Tokyo" or "New York".
        city: String,
    },

    /// Pick a city interactively from the popular list (the default).
    Pick,

    /// Store the photo-search access key used for city backdrops.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Pick) {
            Command::Show { city } => show(&load_config()?, &city).await,
            Command::Pick => {
                let city = Select::new("Select a city", POPULAR_CITIES.to_vec())
                    .prompt()
                    .context("City selection cancelled")?;
                show(&load_config()?, city).await
            }
            Command::Configure => configure(),
        }
    }
}

fn load_config() -> Result<Config> {
    let mut config = Config::load()?;

    // The config file wins; the environment fills in a missing key.
    if config.image.access_key.is_none() {
        config.image.access_key = std::env::var("UNSPLASH_ACCESS_KEY")
            .ok()
            .filter(|key| !key.is_empty());
    }

    Ok(config)
}

async fn show(config: &Config, city: &str) -> Result<()> {
    let weather = weather_from_config(config)?;
    let images = image_from_config(config)?;
    let controller = SelectionController::new(Arc::new(weather), Arc::new(images));

    controller.select_city(city).await;
    render(&controller.snapshot());

    Ok(())
}

fn render(state: &SelectionState) {
    let Some(envelope) = &state.weather else {
        println!("No weather data.");
        return;
    };

    println!();
    match &envelope.data {
        Some(data) if envelope.success => {
            let offset = *Local::now().offset();

            println!("  {}, {}", envelope.city, data.country);
            println!(
                "  {}  {:.0}°C  {}",
                condition_glyph(&data.main_condition),
                data.temperature,
                data.description
            );
            println!("  Feels like {:.0}°C", data.feels_like);
            println!();
            println!("  Humidity    {}%", data.humidity);
            println!("  Wind        {:.0} m/s", data.wind_speed);
            println!("  Pressure    {} hPa", data.pressure);
            println!(
                "  Visibility  {:.1} km",
                f64::from(data.visibility_meters) / 1000.0
            );
            println!("  Sunrise     {}", format_clock_time(data.sunrise, offset));
            println!("  Sunset      {}", format_clock_time(data.sunset, offset));
        }
        _ => {
            println!("  Weather data not available for {}", envelope.city);
            println!("  {}", envelope.display_message());
        }
    }

    if let Some(background) = &state.background {
        println!();
        println!("  Backdrop: {}", background.url);
    }
    println!();
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let endpoint = Text::new("Weather endpoint:")
        .with_initial_value(&config.weather_endpoint)
        .prompt()
        .context("Configuration cancelled")?;
    config.weather_endpoint = endpoint.trim().to_string();

    let current = config.image.access_key.clone().unwrap_or_default();
    let key = Text::new("Photo access key (blank disables backdrops):")
        .with_initial_value(&current)
        .prompt()
        .context("Configuration cancelled")?;
    config.image.access_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());

    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_parses_a_city_argument() {
        let cli = Cli::parse_from(["skycast", "show", "New York"]);
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city, "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_pick() {
        let cli = Cli::parse_from(["skycast"]);
        assert!(cli.command.is_none());
    }
}
