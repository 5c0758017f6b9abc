pub mod game;

use axum::{response::IntoResponse, Json};

pub use game::{current_round, next_round, reset_game, round_hints, start_game, submit_guess};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "geoguess-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
