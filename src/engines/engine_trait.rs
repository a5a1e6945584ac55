//! Engine abstraction layer used by the game session.
//!
//! Defines the progress and result payloads so different engine strategies
//! can be attached to a player behind a single trait object.

use std::sync::Arc;

use crate::errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::Score;

/// Snapshot reported after each finished root candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    /// Finished candidates over total candidates, in `0.0..=1.0`.
    pub fraction: f64,
    pub moves_evaluated: u64,
    pub cache_hits: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best_move: ChessMove,
    pub best_value: Score,
    pub moves_evaluated: u64,
    pub cache_hits: u64,
    /// Candidates whose evaluation failed and were left out of the choice.
    pub failed_candidates: usize,
}

/// A move-selecting engine. Engines are shared between the game session and
/// the thread running a search, so configuration goes through `&self`.
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;

    /// String options such as `("Depth", "4")`. Applies from the next search.
    fn set_option(&self, _name: &str, _value: &str) -> Result<(), ChessErrors> {
        Ok(())
    }

    /// Picks a move for `color` on `board`. The board is only read; the engine
    /// works on its own copy.
    fn select_move(
        &self,
        board: &Board,
        color: Color,
        progress: &mut dyn FnMut(SearchProgress),
    ) -> Result<SearchOutcome, ChessErrors>;

    fn is_running(&self) -> bool;
}

pub type SharedEngine = Arc<dyn Engine>;
