//! Round-based geography guessing game: domain model, scoring, external
//! service clients, and the HTTP API that serves them. Also hosts the small
//! AR placement component in [`ar`].

pub mod ar;
pub mod config;
pub mod handlers;
pub mod libraries;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::{geocoding::GeocodingService, places::PlacesService, session::SessionStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: SessionStore,
    pub geocoder: Arc<GeocodingService>,
    pub places: Arc<PlacesService>,
}

/// Build the API router. Split out of `main` so contract tests can mount the
/// same routes against a seeded store.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .route("/api/game", post(handlers::start_game))
        .route("/api/game/:id/round", get(handlers::current_round))
        .route("/api/game/:id/guess", post(handlers::submit_guess))
        .route("/api/game/:id/next", post(handlers::next_round))
        .route("/api/game/:id/hint", post(handlers::round_hints))
        .route("/api/game/:id/reset", post(handlers::reset_game))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
