use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::libraries::scoring;
use crate::models::location::Coordinate;

/// Rounds per game, fixed.
pub const TOTAL_ROUNDS: u32 = 10;

/// Points awarded for a perfect guess.
pub const MAX_ROUND_POINTS: u32 = 5000;

/// One nearby-place hint entry. Lookup failures and empty results are carried
/// as placeholder text in `place` with no distance, never as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    pub name: String,
    pub place: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// One target-guess-score cycle. Targets are assigned once at game start;
/// guess, distance and points are written exactly once, when the guess for
/// this round is scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub index: u32,
    pub target: Coordinate,
    /// Initial panorama heading in degrees.
    pub heading: f64,
    pub guess: Option<Coordinate>,
    pub distance_miles: Option<f64>,
    pub points: Option<u32>,
    /// One-shot hint slot; `Some` once hints were requested this round.
    pub hints: Option<Vec<Hint>>,
}

impl Round {
    pub fn new(index: u32, target: Coordinate, heading: f64) -> Self {
        Self {
            index,
            target,
            heading,
            guess: None,
            distance_miles: None,
            points: None,
            hints: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    InRound,
    RoundResult,
    FinalSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub score: u32,
    pub max_score: u32,
    pub accuracy_percent: u32,
}

/// Result of scoring a single guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessOutcome {
    pub distance_miles: f64,
    pub points: u32,
    pub total_score: u32,
}

/// Result of advancing past a round result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    NextRound(u32),
    Finished(FinalSummary),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("The game has not started yet.")]
    NotStarted,

    #[error("The game is already in progress.")]
    AlreadyStarted,

    #[error("A game needs at least one round.")]
    NoRounds,

    #[error("No round is in progress.")]
    NoRoundInProgress,

    #[error("This round has already been scored.")]
    RoundAlreadyScored,

    #[error("Invalid guess coordinates.")]
    InvalidGuess,

    #[error("There is no round result to advance from.")]
    NotBetweenRounds,

    #[error("The game is still in progress.")]
    GameInProgress,
}

/// A full game: the round list, the cursor into it, and the running score.
///
/// All state changes go through the transition methods below; each one checks
/// the current phase first and leaves the session untouched on error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    pub rounds: Vec<Round>,
    /// 1-based index of the active round; 0 while in `Setup`.
    pub current_round: u32,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Setup,
            rounds: Vec::new(),
            current_round: 0,
            score: 0,
            created_at: Utc::now(),
        }
    }

    /// Setup -> InRound, with the rounds generated for this game. Only called
    /// once location generation has succeeded; a geocoding failure never
    /// reaches this point.
    pub fn begin(&mut self, rounds: Vec<Round>) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        if rounds.is_empty() {
            return Err(GameError::NoRounds);
        }

        self.rounds = rounds;
        self.current_round = 1;
        self.score = 0;
        self.phase = GamePhase::InRound;
        Ok(())
    }

    pub fn total_rounds(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn round(&self) -> Option<&Round> {
        if self.current_round == 0 {
            return None;
        }
        self.rounds.get(self.current_round as usize - 1)
    }

    fn round_mut(&mut self) -> Option<&mut Round> {
        if self.current_round == 0 {
            return None;
        }
        self.rounds.get_mut(self.current_round as usize - 1)
    }

    /// InRound -> RoundResult. Computes distance and points for the active
    /// round exactly once and adds the points to the running score.
    pub fn submit_guess(&mut self, guess: Coordinate) -> Result<GuessOutcome, GameError> {
        match self.phase {
            GamePhase::Setup => return Err(GameError::NotStarted),
            GamePhase::RoundResult => return Err(GameError::RoundAlreadyScored),
            GamePhase::FinalSummary => return Err(GameError::NoRoundInProgress),
            GamePhase::InRound => {}
        }
        if !guess.is_valid() {
            return Err(GameError::InvalidGuess);
        }

        let round = self.round_mut().ok_or(GameError::NoRoundInProgress)?;
        let distance = scoring::haversine_miles(&round.target, &guess);
        let points = scoring::score_for_distance(distance);

        round.guess = Some(guess);
        round.distance_miles = Some(distance);
        round.points = Some(points);

        self.score += points;
        self.phase = GamePhase::RoundResult;

        Ok(GuessOutcome {
            distance_miles: distance,
            points,
            total_score: self.score,
        })
    }

    /// RoundResult -> InRound while rounds remain, otherwise -> FinalSummary.
    pub fn next_round(&mut self) -> Result<Advance, GameError> {
        if self.phase != GamePhase::RoundResult {
            return Err(GameError::NotBetweenRounds);
        }

        if self.current_round + 1 <= self.total_rounds() {
            self.current_round += 1;
            self.phase = GamePhase::InRound;
            Ok(Advance::NextRound(self.current_round))
        } else {
            self.phase = GamePhase::FinalSummary;
            Ok(Advance::Finished(self.summary()))
        }
    }

    /// Final score and accuracy percentage against a perfect game.
    pub fn summary(&self) -> FinalSummary {
        let max_score = self.total_rounds() * MAX_ROUND_POINTS;
        FinalSummary {
            score: self.score,
            max_score,
            accuracy_percent: scoring::accuracy_percent(self.score, max_score),
        }
    }

    /// Record the hint results for the active round. The slot is one-shot:
    /// once filled, later requests read the stored results back instead of
    /// looking up again.
    pub fn record_hints(&mut self, hints: Vec<Hint>) -> Result<(), GameError> {
        if self.phase != GamePhase::InRound {
            return Err(GameError::NoRoundInProgress);
        }
        let round = self.round_mut().ok_or(GameError::NoRoundInProgress)?;
        if round.hints.is_none() {
            round.hints = Some(hints);
        }
        Ok(())
    }

    /// FinalSummary -> Setup, clearing all round and score state.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::FinalSummary {
            return Err(GameError::GameInProgress);
        }
        *self = GameSession::new();
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
