use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Nominatim-compatible geocoding endpoint (free-text place -> coordinate)
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,

    // Overpass interpreter endpoint for nearby-place hint lookups
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    // User-Agent sent to both upstream APIs; the OSM services require one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    // Timeout applied to every upstream request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            geocoder_url: default_geocoder_url(),
            overpass_url: default_overpass_url(),
            user_agent: default_user_agent(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_user_agent() -> String {
    format!("geoguess-service/{}", env!("CARGO_PKG_VERSION"))
}

fn default_http_timeout_secs() -> u64 {
    15
}
