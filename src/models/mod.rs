pub mod game;
pub mod location;
pub mod requests;

// Re-export commonly used types
pub use game::{GameError, GamePhase, GameSession, Hint, Round, TOTAL_ROUNDS};
pub use location::Coordinate;
pub use requests::{
    FinalSummaryView, GuessRequest, GuessResponse, HintResponse, NextRoundResponse, RoundView,
    StartGameRequest, StartGameResponse,
};
