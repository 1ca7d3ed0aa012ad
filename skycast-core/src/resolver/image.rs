use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::ImageReference;

use super::ImageSource;

/// Fixed qualifier appended to the city name in photo searches.
const SEARCH_QUALIFIER: &str = "city skyline";

/// Resolves a background photo for a city from a keyed photo-search API.
///
/// Image enrichment is cosmetic: every failure mode (no credential, provider
/// unreachable, non-2xx, empty result set) degrades to a deterministic
/// placeholder instead of an error.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    endpoint: Url,
    credential: Option<String>,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ResultUrls,
}

#[derive(Debug, Deserialize)]
struct ResultUrls {
    full: String,
}

impl ImageResolver {
    /// `credential` is the photo API access key; `None` disables lookups
    /// entirely and every resolution yields a placeholder.
    pub fn new(endpoint: Url, credential: Option<String>) -> Self {
        Self {
            endpoint,
            credential,
            http: Client::new(),
        }
    }

    /// Returns the full-resolution URL of the best match, or `None` on any
    /// failure so the caller can fall back.
    async fn search(&self, city: &str, credential: &str) -> Option<String> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["search", "photos"]);

        let query = format!("{city} {SEARCH_QUALIFIER}");
        let response = match self
            .http
            .get(url)
            .query(&[
                ("query", query.as_str()),
                ("client_id", credential),
                ("per_page", "1"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(city, error = %e, "photo search request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(city, status = %response.status(), "photo search returned error status");
            return None;
        }

        let body: SearchResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(city, error = %e, "photo search parse error");
                return None;
            }
        };

        let first = body.results.into_iter().next();
        if first.is_none() {
            debug!(city, "photo search returned no results");
        }
        first.map(|r| r.urls.full)
    }
}

#[async_trait]
impl ImageSource for ImageResolver {
    async fn resolve(&self, city: &str) -> ImageReference {
        let Some(credential) = self.credential.as_deref() else {
            debug!(city, "no photo credential configured, using placeholder");
            return ImageReference::placeholder_for(city);
        };

        match self.search(city, credential).await {
            Some(url) => ImageReference::resolved(url),
            None => ImageReference::placeholder_for(city),
        }
    }
}
