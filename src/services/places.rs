use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::error::Error;
use std::time::Duration;

use crate::config::Config;
use crate::libraries::scoring;
use crate::models::game::Hint;
use crate::models::location::Coordinate;

/// Search radius around the round target, in meters
const HINT_RADIUS_METERS: u32 = 2000;

/// How many candidates to pull from Overpass before picking the nearest
const CANDIDATE_LIMIT: u32 = 20;

/// The three hint categories, looked up concurrently per hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintCategory {
    Supermarket,
    School,
    Bar,
}

impl HintCategory {
    pub const ALL: [HintCategory; 3] = [
        HintCategory::Supermarket,
        HintCategory::School,
        HintCategory::Bar,
    ];

    /// Display label shown next to the hint result
    pub fn label(&self) -> &'static str {
        match self {
            HintCategory::Supermarket => "Supermarket",
            HintCategory::School => "School",
            HintCategory::Bar => "Nearest Pub",
        }
    }

    /// OSM tag selector for this category
    fn selector(&self) -> (&'static str, &'static str) {
        match self {
            HintCategory::Supermarket => ("shop", "supermarket"),
            HintCategory::School => ("amenity", "school"),
            HintCategory::Bar => ("amenity", "bar"),
        }
    }
}

/// Overpass API response structure
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: OverpassTags,
    // Nodes carry lat/lon directly; ways carry a computed center
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OverpassTags {
    name: Option<String>,
}

impl OverpassElement {
    fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinate::new(lat, lon)),
            (_, _, Some(center)) => Some(Coordinate::new(center.lat, center.lon)),
            _ => None,
        }
    }
}

/// Client for nearby-place hint lookups against the Overpass API.
pub struct PlacesService {
    client: reqwest::Client,
    interpreter_url: String,
}

impl PlacesService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            interpreter_url: config.overpass_url.clone(),
        })
    }

    /// Look up all three hint categories for a round target. The lookups run
    /// concurrently; each settles to a `Hint` on its own, so one failing
    /// category never takes the others down.
    pub async fn lookup_hints(&self, target: &Coordinate) -> Vec<Hint> {
        let [supermarket, school, bar] = HintCategory::ALL;
        let (supermarket, school, bar) = tokio::join!(
            self.hint(supermarket, target),
            self.hint(school, target),
            self.hint(bar, target),
        );
        vec![supermarket, school, bar]
    }

    /// Resolve one category to a displayable hint. Failures are swallowed
    /// into placeholder text, never surfaced as errors.
    pub async fn hint(&self, category: HintCategory, target: &Coordinate) -> Hint {
        match self.nearest_named(category, target).await {
            Ok(Some((place, location))) => Hint {
                name: category.label().to_string(),
                place,
                distance_miles: Some(scoring::haversine_miles(target, &location)),
            },
            Ok(None) => Hint {
                name: category.label().to_string(),
                place: "None found nearby".to_string(),
                distance_miles: None,
            },
            Err(e) => {
                tracing::warn!("Hint lookup for {:?} failed: {}", category, e);
                Hint {
                    name: category.label().to_string(),
                    place: "Error searching".to_string(),
                    distance_miles: None,
                }
            }
        }
    }

    /// Query Overpass for the nearest named place of a category within
    /// `HINT_RADIUS_METERS` of the target. Overpass does not order by
    /// distance, so a batch of candidates is fetched and the closest one
    /// picked here.
    async fn nearest_named(
        &self,
        category: HintCategory,
        target: &Coordinate,
    ) -> Result<Option<(String, Coordinate)>> {
        let (key, value) = category.selector();
        let query = format!(
            r#"[out:json][timeout:15];
(
  node["{key}"="{value}"]["name"](around:{radius},{lat},{lon});
  way["{key}"="{value}"]["name"](around:{radius},{lat},{lon});
);
out center {limit};"#,
            radius = HINT_RADIUS_METERS,
            lat = target.latitude,
            lon = target.longitude,
            limit = CANDIDATE_LIMIT,
        );

        tracing::debug!(
            "Querying Overpass for {:?} around ({}, {})",
            category,
            target.latitude,
            target.longitude
        );

        let response = self
            .client
            .post(&self.interpreter_url)
            .body(query)
            .send()
            .await
            .map_err(|e| {
                let mut error_msg = format!("Overpass API request failed: {}", e);
                let mut source = e.source();
                while let Some(err) = source {
                    error_msg.push_str(&format!("\n  Caused by: {}", err));
                    source = err.source();
                }
                anyhow!(error_msg)
            })?;

        if !response.status().is_success() {
            return Err(anyhow!("Overpass API returned error: {}", response.status()));
        }

        let data: OverpassResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse Overpass response: {}", e))?;

        let nearest = data
            .elements
            .iter()
            .filter_map(|element| {
                let name = element.tags.name.clone()?;
                let location = element.coordinate()?;
                Some((scoring::haversine_miles(target, &location), name, location))
            })
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        match nearest {
            Some((distance, name, location)) => {
                tracing::info!(
                    "✅ Nearest {:?}: {} ({:.2} mi)",
                    category,
                    name,
                    distance
                );
                Ok(Some((name, location)))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(HintCategory::Supermarket.label(), "Supermarket");
        assert_eq!(HintCategory::School.label(), "School");
        assert_eq!(HintCategory::Bar.label(), "Nearest Pub");
    }

    #[test]
    fn test_element_coordinate_prefers_node_position() {
        let node = OverpassElement {
            tags: OverpassTags::default(),
            lat: Some(51.5),
            lon: Some(-0.1),
            center: None,
        };
        assert_eq!(node.coordinate(), Some(Coordinate::new(51.5, -0.1)));

        let way = OverpassElement {
            tags: OverpassTags::default(),
            lat: None,
            lon: None,
            center: Some(OverpassCenter { lat: 48.8, lon: 2.3 }),
        };
        assert_eq!(way.coordinate(), Some(Coordinate::new(48.8, 2.3)));

        let empty = OverpassElement {
            tags: OverpassTags::default(),
            lat: None,
            lon: None,
            center: None,
        };
        assert_eq!(empty.coordinate(), None);
    }

    #[tokio::test]
    #[ignore] // Ignore by default as it requires network
    async fn test_lookup_hints_central_london() {
        let service = PlacesService::new(&Config::default()).unwrap();
        let hints = service
            .lookup_hints(&Coordinate::new(51.5074, -0.1278))
            .await;
        assert_eq!(hints.len(), 3);
        for hint in &hints {
            println!("{}: {} ({:?})", hint.name, hint.place, hint.distance_miles);
        }
    }
}
