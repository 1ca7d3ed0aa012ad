use serde::{Deserialize, Serialize};

/// Shown in place of a failure message when the backend omits one.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Unable to fetch weather data for this city";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for a city, as served by the weather backend.
///
/// Field names on the wire differ from the Rust names in a few places;
/// serde renames keep the JSON shape stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// When the measurement was taken (epoch seconds, UTC).
    #[serde(rename = "timestamp")]
    pub observed_at: i64,
    /// When the backend served the measurement (epoch seconds, UTC).
    #[serde(rename = "data_fetched_at")]
    pub fetched_at: i64,
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, 0-100.
    pub humidity: u8,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    pub description: String,
    /// Coarse condition category, e.g. "Clear" or "Rain".
    #[serde(rename = "main")]
    pub main_condition: String,
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_direction: u16,
    /// Cloud coverage, 0-100.
    #[serde(rename = "clouds")]
    pub cloud_coverage: u8,
    #[serde(rename = "visibility")]
    pub visibility_meters: u32,
    pub country: String,
    /// Epoch seconds, UTC.
    pub sunrise: i64,
    /// Epoch seconds, UTC.
    pub sunset: i64,
    pub coordinates: Coordinates,
}

/// Tagged success/failure result returned by the weather backend.
///
/// Invariant: `data` is present iff `success` is true. The backend is not
/// trusted on this; `WeatherResolver` normalizes envelopes that violate it
/// before they reach callers. `city` is always present regardless of outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEnvelope {
    pub success: bool,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WeatherData>,
    /// Machine-oriented short code, only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable failure detail, only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WeatherEnvelope {
    /// Build a failure envelope for `city`.
    pub fn failure(
        city: impl Into<String>,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            city: city.into(),
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success && self.data.is_some()
    }

    /// Failure message for display, falling back to a fixed string when the
    /// backend sent none.
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_FAILURE_MESSAGE)
    }
}

/// How a background image URL was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Returned by the photo search provider.
    Resolved,
    /// Synthesized locally from the city name.
    Placeholder,
}

/// Background image URL for a city.
///
/// Resolved and placeholder references are interchangeable to renderers; the
/// origin tag exists so callers and tests can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub url: String,
    pub origin: ImageOrigin,
}

impl ImageReference {
    pub fn resolved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: ImageOrigin::Resolved,
        }
    }

    /// Deterministic placeholder derived from the city name.
    pub fn placeholder_for(city: &str) -> Self {
        Self {
            url: format!("/placeholder.svg?height=1080&width=1920&query={city} cityscape"),
            origin: ImageOrigin::Placeholder,
        }
    }
}
