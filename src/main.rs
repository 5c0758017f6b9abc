use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoguess_service::services::{
    geocoding::GeocodingService, places::PlacesService, session::SessionStore,
};
use geoguess_service::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoguess_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = config::Config::from_env().expect("Failed to load configuration");

    info!("Starting geoguess service");

    let geocoder = GeocodingService::new(&config).expect("Failed to initialize geocoding client");
    let places = PlacesService::new(&config).expect("Failed to initialize places client");

    let state = AppState {
        config: config.clone(),
        store: SessionStore::new(),
        geocoder: Arc::new(geocoder),
        places: Arc::new(places),
    };

    let router = app(state);

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .expect("Invalid listen address");
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, router)
        .await
        .expect("Failed to start HTTP server");
}
