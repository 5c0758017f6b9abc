use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;

use crate::config::Config;
use crate::models::location::Coordinate;

/// Nominatim search result. Coordinates come back as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Client for a Nominatim-compatible geocoding endpoint. Turns a free-text
/// place name into a center coordinate for round generation.
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.geocoder_url.trim_end_matches('/').to_string(),
        })
    }

    /// Geocode a place name. `Ok(None)` means the place was not found, which
    /// aborts game setup without creating any state.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinate>> {
        tracing::info!("🌍 Geocoding \"{}\"", query);

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                let mut error_msg = format!("Geocoding request failed: {}", e);
                let mut source = e.source();
                while let Some(err) = source {
                    error_msg.push_str(&format!("\n  Caused by: {}", err));
                    source = err.source();
                }
                tracing::warn!("{}", error_msg);
                anyhow!(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Geocoder returned HTTP {}", status);
            return Err(anyhow!("Geocoder returned error: {}", status));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse geocoder response: {}", e))?;

        let Some(place) = places.first() else {
            tracing::debug!("No geocoding match for \"{}\"", query);
            return Ok(None);
        };

        let latitude: f64 = place
            .lat
            .parse()
            .map_err(|e| anyhow!("Bad latitude in geocoder response: {}", e))?;
        let longitude: f64 = place
            .lon
            .parse()
            .map_err(|e| anyhow!("Bad longitude in geocoder response: {}", e))?;

        tracing::info!(
            "✅ Geocoded \"{}\" to ({}, {}) [{}]",
            query,
            latitude,
            longitude,
            place.display_name
        );
        Ok(Some(Coordinate::new(latitude, longitude)))
    }
}
