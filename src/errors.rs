//! Errors used throughout the rules and search engine.
//!
//! Query paths (piece lookup, king lookup, legal-move enumeration) report
//! missing entities with `Option` and never fail. `ChessErrors` is reserved
//! for the interaction surface (`Game::try_move`), engine configuration, and
//! the search driver, where the caller needs to know *why* nothing happened.

use thiserror::Error;

use crate::game_state::chess_types::Position;

/// Unified error type for the crate.
///
/// - Input-related variants (`InvalidMove`, `NotYourPiece`, `EmptySquare`,
///   `InvalidAlgebraic`, `InvalidOption`) are recoverable and suitable for
///   showing to a user.
/// - `EngineRunning` and `GameOver` mean the board is not accepting moves right
///   now; retry after the engine finishes or a new game starts.
/// - `NoLegalMoves` and `SearchFailed` come from the search driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// The side asked to move has no legal move (checkmate or stalemate).
    #[error("no legal moves are available")]
    NoLegalMoves,

    /// The destination is not a legal target for the piece on `from`.
    #[error("illegal move from {from} to {to}")]
    InvalidMove { from: Position, to: Position },

    /// The piece on the square belongs to the side that is not on move.
    #[error("the piece on {0} does not belong to the active player")]
    NotYourPiece(Position),

    /// Tried to move from a square without a piece (or off the board).
    #[error("there is no piece on {0}")]
    EmptySquare(Position),

    /// An engine search is in flight; the board rejects all move attempts.
    #[error("an engine search is running")]
    EngineRunning,

    /// The game already ended in checkmate or stalemate.
    #[error("the game is over")]
    GameOver,

    /// Every candidate evaluation of a search failed.
    ///
    /// Payload: diagnostic text from the last failed worker.
    #[error("engine search failed: {0}")]
    SearchFailed(String),

    /// An engine option name or value was not understood.
    #[error("invalid engine option {name}={value}")]
    InvalidOption { name: String, value: String },

    /// A square name such as `"e4"` could not be parsed.
    #[error("invalid algebraic square `{0}`")]
    InvalidAlgebraic(String),
}
