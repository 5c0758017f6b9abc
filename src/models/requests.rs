use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::game::{FinalSummary, GameSession, Hint, Round};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Free-text place name to center the game on
    pub location: String,
    pub radius_miles: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a client needs to render the active round: the panorama target and
/// heading, the round counter, and the running score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub total_rounds: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub score: u32,
    pub hint_used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextRoundResponse {
    pub success: bool,

    // Exactly one of these is present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FinalSummaryView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalSummaryView {
    pub final_score: u32,
    pub max_score: u32,
    pub accuracy_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoundView {
    pub fn from_session(session: &GameSession, round: &Round) -> Self {
        Self {
            round: round.index,
            total_rounds: session.total_rounds(),
            latitude: round.target.latitude,
            longitude: round.target.longitude,
            heading: round.heading,
            score: session.score,
            hint_used: round.hints.is_some(),
        }
    }
}

impl StartGameResponse {
    pub fn success(session_id: Uuid, round: RoundView) -> Self {
        Self {
            success: true,
            session_id: Some(session_id),
            round: Some(round),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            session_id: None,
            round: None,
            error: Some(message),
        }
    }
}

impl GuessResponse {
    pub fn success(distance_miles: f64, round_points: u32, total_score: u32) -> Self {
        Self {
            success: true,
            distance_miles: Some(distance_miles),
            round_points: Some(round_points),
            total_score: Some(total_score),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            distance_miles: None,
            round_points: None,
            total_score: None,
            error: Some(message),
        }
    }
}

impl NextRoundResponse {
    pub fn next(round: RoundView) -> Self {
        Self {
            success: true,
            round: Some(round),
            summary: None,
            error: None,
        }
    }

    pub fn finished(summary: FinalSummary) -> Self {
        Self {
            success: true,
            round: None,
            summary: Some(FinalSummaryView {
                final_score: summary.score,
                max_score: summary.max_score,
                accuracy_percent: summary.accuracy_percent,
            }),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            round: None,
            summary: None,
            error: Some(message),
        }
    }
}

impl HintResponse {
    pub fn success(hints: Vec<Hint>) -> Self {
        Self {
            success: true,
            hints: Some(hints),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            hints: None,
            error: Some(message),
        }
    }
}
