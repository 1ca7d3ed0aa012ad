//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The tagged weather envelope and image reference models
//! - Resolvers that map a city name to weather data and a backdrop image,
//!   both total (they degrade instead of erroring)
//! - The selection controller that composes the two lookups into one
//!   race-free view state
//! - Configuration handling for the backend endpoints and credentials
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod controller;
pub mod display;
pub mod model;
pub mod resolver;

pub use config::{Config, ImageProviderConfig};
pub use controller::{SelectionController, SelectionState};
pub use model::{ImageOrigin, ImageReference, WeatherData, WeatherEnvelope};
pub use resolver::{ImageResolver, ImageSource, WeatherResolver, WeatherSource};
