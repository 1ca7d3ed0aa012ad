use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::warn;

use crate::model::WeatherEnvelope;

use super::WeatherSource;

/// Error code carried by envelopes synthesized for transport failures.
pub const TRANSPORT_ERROR: &str = "Failed to fetch weather data";
/// Message carried by envelopes synthesized for transport failures.
pub const TRANSPORT_MESSAGE: &str = "Please try again later";

/// Resolves current weather for a city from the weather backend.
///
/// `GET {endpoint}/weather-data/{city}` with the city percent-encoded as a
/// path segment. The backend answers with a tagged envelope; anything that
/// prevents obtaining a well-formed one is normalized into a synthesized
/// failure envelope.
#[derive(Debug, Clone)]
pub struct WeatherResolver {
    endpoint: Url,
    http: Client,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("success envelope missing data payload")]
    MissingData,
    #[error("endpoint cannot carry path segments")]
    Endpoint,
}

impl WeatherResolver {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }

    async fn fetch(&self, city: &str) -> Result<WeatherEnvelope, FetchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::Endpoint)?
            .pop_if_empty()
            .extend(["weather-data", city]);

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let envelope: WeatherEnvelope = serde_json::from_str(&body)?;

        // A success flag with no payload would let renderers observe a
        // "successful" envelope they cannot display.
        if envelope.success && envelope.data.is_none() {
            return Err(FetchError::MissingData);
        }

        Ok(envelope)
    }
}

#[async_trait]
impl WeatherSource for WeatherResolver {
    async fn resolve(&self, city: &str) -> WeatherEnvelope {
        match self.fetch(city).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(city, error = %err, "weather lookup failed");
                WeatherEnvelope::failure(city, TRANSPORT_ERROR, TRANSPORT_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> WeatherResolver {
        let endpoint = Url::parse(&server.uri()).expect("mock server uri");
        WeatherResolver::new(endpoint)
    }

    fn success_body(city: &str) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "city": city,
            "data": {
                "timestamp": 1_758_000_000_i64,
                "data_fetched_at": 1_758_000_060_i64,
                "temperature": 18.4,
                "feels_like": 17.9,
                "humidity": 62,
                "pressure": 1014,
                "description": "clear sky",
                "main": "Clear",
                "wind_speed": 3.6,
                "wind_direction": 240,
                "clouds": 5,
                "visibility": 10_000,
                "country": "JP",
                "sunrise": 1_757_970_000_i64,
                "sunset": 1_758_014_400_i64,
                "coordinates": { "latitude": 35.6762, "longitude": 139.6503 }
            }
        })
    }

    #[tokio::test]
    async fn success_envelope_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/Tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Tokyo")))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("Tokyo").await;

        assert!(envelope.is_success());
        assert_eq!(envelope.city, "Tokyo");
        let data = envelope.data.expect("data on success");
        assert_eq!(data.main_condition, "Clear");
        assert_eq!(data.temperature, 18.4);
    }

    #[tokio::test]
    async fn backend_reported_failure_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/Nowhereville"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "city": "Nowhereville",
                "error": "not_found",
                "message": "City not found"
            })))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("Nowhereville").await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some("not_found"));
        assert_eq!(envelope.display_message(), "City not found");
    }

    #[tokio::test]
    async fn non_2xx_status_synthesizes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/Lagos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("Lagos").await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.city, "Lagos");
        assert_eq!(envelope.error.as_deref(), Some(TRANSPORT_ERROR));
        assert_eq!(envelope.message.as_deref(), Some(TRANSPORT_MESSAGE));
    }

    #[tokio::test]
    async fn malformed_body_synthesizes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/Berlin"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("Berlin").await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some(TRANSPORT_ERROR));
    }

    #[tokio::test]
    async fn success_flag_without_data_synthesizes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/Cairo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "city": "Cairo"
            })))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("Cairo").await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some(TRANSPORT_ERROR));
    }

    #[tokio::test]
    async fn unreachable_backend_synthesizes_failure() {
        // Connection refused: nothing is listening on the reserved port.
        let endpoint = Url::parse("http://127.0.0.1:1/").expect("static url");
        let envelope = WeatherResolver::new(endpoint).resolve("Moscow").await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.city, "Moscow");
        assert_eq!(envelope.error.as_deref(), Some(TRANSPORT_ERROR));
    }

    #[tokio::test]
    async fn city_is_percent_encoded_in_the_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather-data/New%20York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("New York")))
            .mount(&server)
            .await;

        let envelope = resolver_for(&server).resolve("New York").await;
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn endpoint_with_base_path_keeps_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prod/weather-data/Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Paris")))
            .mount(&server)
            .await;

        let endpoint = Url::parse(&format!("{}/prod", server.uri())).expect("mock server uri");
        let envelope = WeatherResolver::new(endpoint).resolve("Paris").await;
        assert!(envelope.is_success());
    }
}
