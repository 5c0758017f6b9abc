use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

use geoguess_service::config::Config;
use geoguess_service::models::game::{GameSession, Hint, Round};
use geoguess_service::models::Coordinate;
use geoguess_service::services::{
    geocoding::GeocodingService, places::PlacesService, session::SessionStore,
};
use geoguess_service::{app, AppState};

fn test_state() -> AppState {
    let config = Config::default();
    AppState {
        store: SessionStore::new(),
        geocoder: Arc::new(GeocodingService::new(&config).unwrap()),
        places: Arc::new(PlacesService::new(&config).unwrap()),
        config,
    }
}

/// Seed a started session directly into the store so the round, guess and
/// reset endpoints can be exercised without any upstream calls.
async fn seed_game(state: &AppState, targets: &[(f64, f64)]) -> Uuid {
    let rounds = targets
        .iter()
        .enumerate()
        .map(|(i, (lat, lon))| Round::new(i as u32 + 1, Coordinate::new(*lat, *lon), 180.0))
        .collect();

    let mut session = GameSession::new();
    session.begin(rounds).unwrap();
    state.store.insert(session).await
}

#[tokio::test]
async fn health_reports_service_name() {
    let server = TestServer::new(app(test_state())).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "geoguess-service");
}

#[tokio::test]
async fn start_game_rejects_blank_location() {
    let server = TestServer::new(app(test_state())).unwrap();

    let response = server
        .post("/api/game")
        .json(&json!({ "location": "   ", "radius_miles": 50.0 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Please enter a location");
}

#[tokio::test]
async fn start_game_rejects_nonpositive_radius() {
    let server = TestServer::new(app(test_state())).unwrap();

    let response = server
        .post("/api/game")
        .json(&json!({ "location": "London", "radius_miles": 0.0 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Radius must be a positive number of miles");
}

#[tokio::test]
async fn unknown_session_is_404_everywhere() {
    let server = TestServer::new(app(test_state())).unwrap();
    let id = Uuid::new_v4();

    server.get(&format!("/api/game/{id}/round")).await.assert_status_not_found();
    server
        .post(&format!("/api/game/{id}/guess"))
        .json(&json!({ "latitude": 0.0, "longitude": 0.0 }))
        .await
        .assert_status_not_found();
    server.post(&format!("/api/game/{id}/next")).await.assert_status_not_found();
    server.post(&format!("/api/game/{id}/hint")).await.assert_status_not_found();
    server.post(&format!("/api/game/{id}/reset")).await.assert_status_not_found();
}

#[tokio::test]
async fn full_two_round_game_over_http() {
    let state = test_state();
    let id = seed_game(&state, &[(51.5007, -0.1246), (40.4168, -3.7038)]).await;
    let server = TestServer::new(app(state)).unwrap();

    // Round 1 view
    let response = server.get(&format!("/api/game/{id}/round")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["round"], 1);
    assert_eq!(body["total_rounds"], 2);
    assert_eq!(body["score"], 0);
    assert_eq!(body["hint_used"], false);
    assert_eq!(body["latitude"], 51.5007);

    // Perfect guess on round 1
    let response = server
        .post(&format!("/api/game/{id}/guess"))
        .json(&json!({ "latitude": 51.5007, "longitude": -0.1246 }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["round_points"], 5000);
    assert_eq!(body["total_score"], 5000);

    // Guessing again is rejected, score unchanged
    let response = server
        .post(&format!("/api/game/{id}/guess"))
        .json(&json!({ "latitude": 51.5007, "longitude": -0.1246 }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "This round has already been scored.");

    // Advance to round 2
    let response = server.post(&format!("/api/game/{id}/next")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["round"]["round"], 2);
    assert_eq!(body["round"]["score"], 5000);

    // A guess on the wrong side of the planet scores nothing
    let response = server
        .post(&format!("/api/game/{id}/guess"))
        .json(&json!({ "latitude": -40.0, "longitude": 176.0 }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["round_points"], 0);
    assert_eq!(body["total_score"], 5000);

    // Past the last round: final summary
    let response = server.post(&format!("/api/game/{id}/next")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["summary"]["final_score"], 5000);
    assert_eq!(body["summary"]["max_score"], 10000);
    assert_eq!(body["summary"]["accuracy_percent"], 50);

    // The finished game has no current round
    server.get(&format!("/api/game/{id}/round")).await.assert_status_not_found();

    // Play again discards the session entirely
    let response = server.post(&format!("/api/game/{id}/reset")).await;
    response.assert_status_ok();
    server.get(&format!("/api/game/{id}/round")).await.assert_status_not_found();
}

#[tokio::test]
async fn next_round_without_a_scored_guess_is_rejected() {
    let state = test_state();
    let id = seed_game(&state, &[(10.0, 10.0)]).await;
    let server = TestServer::new(app(state)).unwrap();

    let response = server.post(&format!("/api/game/{id}/next")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "There is no round result to advance from.");
}

#[tokio::test]
async fn hints_replay_from_the_round_once_recorded() {
    let state = test_state();
    let id = seed_game(&state, &[(10.0, 10.0)]).await;

    // Record a hint set as if the first request had already run
    state
        .store
        .modify(&id, |session| {
            session.record_hints(vec![
                Hint {
                    name: "Supermarket".to_string(),
                    place: "Corner Shop".to_string(),
                    distance_miles: Some(0.3),
                },
                Hint {
                    name: "School".to_string(),
                    place: "None found nearby".to_string(),
                    distance_miles: None,
                },
            ])
        })
        .await
        .unwrap()
        .unwrap();

    let server = TestServer::new(app(state)).unwrap();

    // The round view reflects the consumed hint
    let response = server.get(&format!("/api/game/{id}/round")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["hint_used"], true);

    // The hint endpoint replays the stored results without looking up again
    let response = server.post(&format!("/api/game/{id}/hint")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["hints"][0]["place"], "Corner Shop");
    assert_eq!(body["hints"][1]["place"], "None found nearby");
    // "None found nearby" entries carry no distance at all
    assert!(body["hints"][1].get("distance_miles").is_none());
}

#[tokio::test]
async fn hints_unavailable_between_rounds() {
    let state = test_state();
    let id = seed_game(&state, &[(10.0, 10.0)]).await;
    let server = TestServer::new(app(state)).unwrap();

    server
        .post(&format!("/api/game/{id}/guess"))
        .json(&json!({ "latitude": 10.0, "longitude": 10.0 }))
        .await
        .assert_status_ok();

    let response = server.post(&format!("/api/game/{id}/hint")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Hints are only available during a round");
}
