use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    libraries::round_generator,
    models::{
        game::{Advance, GamePhase, GameSession, TOTAL_ROUNDS},
        Coordinate, GuessRequest, GuessResponse, HintResponse, NextRoundResponse, RoundView,
        StartGameRequest, StartGameResponse,
    },
    AppState,
};

/// Start a new game: geocode the requested place, generate the round targets
/// around it, and store a fresh session.
///
/// A geocoding miss or failure aborts setup; nothing is stored.
pub async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<StartGameResponse>, StatusCode> {
    let location = request.location.trim();
    if location.is_empty() {
        return Ok(Json(StartGameResponse::error(
            "Please enter a location".to_string(),
        )));
    }
    if !request.radius_miles.is_finite() || request.radius_miles <= 0.0 {
        return Ok(Json(StartGameResponse::error(
            "Radius must be a positive number of miles".to_string(),
        )));
    }

    let center = match state.geocoder.geocode(location).await {
        Ok(Some(center)) => center,
        Ok(None) => {
            return Ok(Json(StartGameResponse::error(format!(
                "Could not find location: {}",
                location
            ))));
        }
        Err(e) => {
            error!("Game setup failed: {}", e);
            return Ok(Json(StartGameResponse::error(
                "Error setting up game".to_string(),
            )));
        }
    };

    let rounds = {
        let mut rng = rand::thread_rng();
        round_generator::generate_rounds(&mut rng, &center, request.radius_miles, TOTAL_ROUNDS)
    };

    let mut session = GameSession::new();
    if let Err(e) = session.begin(rounds) {
        error!("Could not start session: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let view = session
        .round()
        .map(|round| RoundView::from_session(&session, round))
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let id = state.store.insert(session).await;
    info!(
        "Started game {} around ({}, {}) radius {} mi",
        id, center.latitude, center.longitude, request.radius_miles
    );

    Ok(Json(StartGameResponse::success(id, view)))
}

/// View of the active round. 404 for unknown sessions and for sessions with
/// no active round (finished games).
pub async fn current_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoundView>, StatusCode> {
    let session = state.store.get(&id).await.ok_or(StatusCode::NOT_FOUND)?;
    if session.phase == GamePhase::FinalSummary {
        return Err(StatusCode::NOT_FOUND);
    }

    session
        .round()
        .map(|round| Json(RoundView::from_session(&session, round)))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Score the guess for the active round. Each round is scored exactly once;
/// re-submission and wrong-phase submissions come back as error responses
/// with the session untouched.
pub async fn submit_guess(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessResponse>, StatusCode> {
    let guess = Coordinate::new(request.latitude, request.longitude);

    let result = state
        .store
        .modify(&id, |session| session.submit_guess(guess))
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    match result {
        Ok(outcome) => {
            debug!(
                "Game {} round guess: {:.1} mi -> {} points (total {})",
                id, outcome.distance_miles, outcome.points, outcome.total_score
            );
            Ok(Json(GuessResponse::success(
                outcome.distance_miles,
                outcome.points,
                outcome.total_score,
            )))
        }
        Err(e) => Ok(Json(GuessResponse::error(e.to_string()))),
    }
}

/// Advance past a round result: either the next round's view or, after the
/// last round, the final summary.
pub async fn next_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NextRoundResponse>, StatusCode> {
    let result = state
        .store
        .modify(&id, |session| session.next_round())
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let advance = match result {
        Ok(advance) => advance,
        Err(e) => return Ok(Json(NextRoundResponse::error(e.to_string()))),
    };

    match advance {
        Advance::Finished(summary) => {
            info!(
                "Game {} finished: {} / {} points",
                id, summary.score, summary.max_score
            );
            Ok(Json(NextRoundResponse::finished(summary)))
        }
        Advance::NextRound(_) => {
            let session = state.store.get(&id).await.ok_or(StatusCode::NOT_FOUND)?;
            let view = session
                .round()
                .map(|round| RoundView::from_session(&session, round))
                .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
            Ok(Json(NextRoundResponse::next(view)))
        }
    }
}

/// Nearby-place hints for the active round. The first request runs the three
/// category lookups concurrently and stores the results on the round; every
/// later request in the same round replays the stored results.
pub async fn round_hints(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HintResponse>, StatusCode> {
    let session = state.store.get(&id).await.ok_or(StatusCode::NOT_FOUND)?;
    if session.phase != GamePhase::InRound {
        return Ok(Json(HintResponse::error(
            "Hints are only available during a round".to_string(),
        )));
    }
    let Some(round) = session.round() else {
        return Err(StatusCode::NOT_FOUND);
    };

    if let Some(hints) = &round.hints {
        debug!("Game {} hint replay for round {}", id, round.index);
        return Ok(Json(HintResponse::success(hints.clone())));
    }

    let target = round.target;
    let hints = state.places.lookup_hints(&target).await;

    let stored = state
        .store
        .modify(&id, |session| session.record_hints(hints.clone()))
        .await;

    match stored {
        Some(Ok(())) => Ok(Json(HintResponse::success(hints))),
        // Session vanished or changed phase while the lookups ran
        _ => Ok(Json(HintResponse::error(
            "Error loading hints. Try again later.".to_string(),
        ))),
    }
}

/// Discard the session. Sessions live only in memory, so this is the full
/// "play again" reset.
pub async fn reset_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if state.store.remove(&id).await {
        info!("Game {} reset", id);
        Ok(Json(serde_json::json!({ "success": true })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
