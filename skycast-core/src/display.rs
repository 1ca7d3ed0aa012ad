//! Pure presentation mapping: condition glyphs and clock strings.

use chrono::{DateTime, FixedOffset};

/// Glyph for conditions without a dedicated icon.
const DEFAULT_GLYPH: &str = "🌤️";

/// Rendered when a timestamp cannot be represented as a calendar time.
const INVALID_CLOCK: &str = "--:--";

/// Map a weather "main condition" string to a display glyph.
///
/// Case-insensitive exact match; mist and fog share a glyph, anything
/// unrecognized (including the empty string) gets the default.
pub fn condition_glyph(main_condition: &str) -> &'static str {
    match main_condition.to_ascii_lowercase().as_str() {
        "clear" => "☀️",
        "clouds" => "☁️",
        "rain" => "🌧️",
        "snow" => "❄️",
        "thunderstorm" => "⛈️",
        "drizzle" => "🌦️",
        "mist" | "fog" => "🌫️",
        _ => DEFAULT_GLYPH,
    }
}

/// Render epoch seconds as an `hh:mm AM/PM` clock string in the given UTC
/// offset. Out-of-range timestamps render as a fixed marker, never panic.
pub fn format_clock_time(epoch_seconds: i64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(utc) => utc.with_timezone(&offset).format("%I:%M %p").to_string(),
        None => INVALID_CLOCK.to_string(),
    }
}
