use std::fmt::Debug;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;

use crate::config::Config;
use crate::model::{ImageReference, WeatherEnvelope};

pub mod image;
pub mod weather;

pub use image::ImageResolver;
pub use weather::WeatherResolver;

/// Maps a city name to a weather envelope.
///
/// Total: transport and shape problems are folded into a failure envelope,
/// never surfaced as an `Err`.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> WeatherEnvelope;
}

/// Maps a city name to a background image reference.
///
/// Total: a missing credential, an unreachable provider, or an empty result
/// set all fall back to a placeholder reference.
#[async_trait]
pub trait ImageSource: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> ImageReference;
}

/// Construct the weather resolver from config.
pub fn weather_from_config(config: &Config) -> anyhow::Result<WeatherResolver> {
    let endpoint = Url::parse(&config.weather_endpoint)
        .with_context(|| format!("Invalid weather endpoint: {}", config.weather_endpoint))?;

    Ok(WeatherResolver::new(endpoint))
}

/// Construct the image resolver from config. A missing access key is not an
/// error: the resolver then serves placeholders without network access.
pub fn image_from_config(config: &Config) -> anyhow::Result<ImageResolver> {
    let endpoint = Url::parse(&config.image.endpoint)
        .with_context(|| format!("Invalid image endpoint: {}", config.image.endpoint))?;

    Ok(ImageResolver::new(endpoint, config.image.access_key.clone()))
}
