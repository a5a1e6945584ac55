//! Move execution with undo/redo bookkeeping.
//!
//! Undo and redo work on whole turns (two plies), because a "turn" as a
//! player sees it is one move by each side.

use tracing::debug;

use crate::game_state::board::Board;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default)]
pub struct MoveManager {
    undo_stack: Vec<ChessMove>,
    redo_stack: Vec<ChessMove>,
    history: Vec<ChessMove>,
}

impl MoveManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all history (new game).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.history.clear();
    }

    /// Executes a fresh move with history. Any pending redo branch is
    /// discarded.
    pub fn execute_move(&mut self, board: &mut Board, mv: ChessMove) {
        self.redo_stack.clear();
        self.execute(board, mv, true);
    }

    /// Applies `mv`; when `record` is set, pushes it on the undo stack and
    /// appends it to the history. Does not touch the redo stack.
    pub fn execute(&mut self, board: &mut Board, mv: ChessMove, record: bool) {
        mv.execute(board);
        if record {
            self.undo_stack.push(mv);
            self.history.push(mv);
        }
    }

    /// Reverts `mv`; when `record` is set, pushes it on the redo stack and
    /// drops the tail of the history.
    pub fn undo(&mut self, board: &mut Board, mv: ChessMove, record: bool) {
        mv.undo(board);
        if record {
            self.redo_stack.push(mv);
            self.history.pop();
        }
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        Self::holds_full_turns(&self.undo_stack)
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        Self::holds_full_turns(&self.redo_stack)
    }

    #[inline]
    fn holds_full_turns(stack: &[ChessMove]) -> bool {
        !stack.is_empty() && stack.len() % 2 == 0
    }

    /// Takes back the last full turn. Returns `false` when there is none.
    pub fn undo_turn(&mut self, board: &mut Board) -> bool {
        if !self.can_undo() {
            return false;
        }
        for _ in 0..2 {
            if let Some(mv) = self.undo_stack.pop() {
                debug!(%mv, "undo");
                self.undo(board, mv, true);
            }
        }
        true
    }

    /// Replays the last undone turn. Returns `false` when there is none.
    pub fn redo_turn(&mut self, board: &mut Board) -> bool {
        if !self.can_redo() {
            return false;
        }
        for _ in 0..2 {
            if let Some(mv) = self.redo_stack.pop() {
                debug!(%mv, "redo");
                self.execute(board, mv, true);
            }
        }
        true
    }

    /// Executed moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[ChessMove] {
        &self.history
    }

    #[inline]
    pub fn most_recent_move(&self) -> Option<&ChessMove> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, Position};
    use crate::move_generation::legal_move_generator::legal_moves_for_color;

    fn play(manager: &mut MoveManager, board: &mut Board, color: Color, to: Position) {
        let mv = legal_moves_for_color(board, color)
            .into_iter()
            .find(|m| m.to == to)
            .expect("move should be legal");
        manager.execute_move(board, mv);
    }

    #[test]
    fn undo_needs_a_full_turn() {
        let mut board = Board::standard();
        let mut manager = MoveManager::new();
        assert!(!manager.can_undo());
        assert!(!manager.undo_turn(&mut board));

        play(&mut manager, &mut board, Color::White, Position::new(4, 3));
        assert!(!manager.can_undo());

        play(&mut manager, &mut board, Color::Black, Position::new(4, 4));
        assert!(manager.can_undo());
        assert!(!manager.can_redo());
        assert_eq!(manager.history().len(), 2);
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut board = Board::standard();
        let start = board.clone();
        let mut manager = MoveManager::new();
        play(&mut manager, &mut board, Color::White, Position::new(4, 3));
        play(&mut manager, &mut board, Color::Black, Position::new(4, 4));
        let after_turn = board.clone();
        let last = manager.most_recent_move().copied();

        assert!(manager.undo_turn(&mut board));
        assert_eq!(board, start);
        assert!(manager.history().is_empty());
        assert!(manager.can_redo());
        assert!(!manager.can_undo());

        assert!(manager.redo_turn(&mut board));
        assert_eq!(board, after_turn);
        assert_eq!(manager.most_recent_move().copied(), last);
        assert!(manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn new_move_discards_redo_branch() {
        let mut board = Board::standard();
        let mut manager = MoveManager::new();
        play(&mut manager, &mut board, Color::White, Position::new(4, 3));
        play(&mut manager, &mut board, Color::Black, Position::new(4, 4));
        manager.undo_turn(&mut board);
        assert!(manager.can_redo());

        play(&mut manager, &mut board, Color::White, Position::new(3, 3));
        assert!(!manager.can_redo());
    }

    #[test]
    fn unrecorded_moves_leave_bookkeeping_alone() {
        let mut board = Board::standard();
        let start = board.clone();
        let mut manager = MoveManager::new();
        let mv = legal_moves_for_color(&mut board, Color::White)[0];
        manager.execute(&mut board, mv, false);
        manager.undo(&mut board, mv, false);
        assert_eq!(board, start);
        assert!(manager.history().is_empty());
        assert!(!manager.can_undo() && !manager.can_redo());
    }
}
