//! Sequential alpha-beta minimax over one private board.
//!
//! The root driver (`engines::minimax_engine`) plays a candidate move on a
//! board copy and hands it here; the opponent is then the minimizing side.
//! Values are from the engine's point of view: higher is better for it.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves_for_color;
use crate::search::board_scoring::{BoardScorer, Score, MAX_SCORE, MIN_SCORE};
use crate::search::position_cache::PositionCache;
use crate::search::zobrist::position_hash;

/// One worker's search state.
pub struct MinimaxSearch<'a> {
    board: Board,
    engine_color: Color,
    scorer: &'a dyn BoardScorer,
    cache: &'a PositionCache,
    pruning: bool,
    moves_evaluated: u64,
    cache_hits: u64,
}

impl<'a> MinimaxSearch<'a> {
    pub fn new(
        board: Board,
        engine_color: Color,
        scorer: &'a dyn BoardScorer,
        cache: &'a PositionCache,
        pruning: bool,
    ) -> Self {
        Self {
            board,
            engine_color,
            scorer,
            cache,
            pruning,
            moves_evaluated: 0,
            cache_hits: 0,
        }
    }

    /// Moves executed so far (one per explored edge).
    #[inline]
    pub fn moves_evaluated(&self) -> u64 {
        self.moves_evaluated
    }

    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Minimax value of the current board with `depth` plies left. The side
    /// to move is the engine when `maximizing`, its opponent otherwise.
    pub fn minimax(&mut self, depth: u8, maximizing: bool, mut alpha: Score, mut beta: Score) -> Score {
        let side_to_move = if maximizing {
            self.engine_color
        } else {
            self.engine_color.opposite()
        };

        if depth == 0 {
            return self.leaf_value(side_to_move);
        }

        let moves = legal_moves_for_color(&mut self.board, side_to_move);
        if moves.is_empty() {
            return self.terminal_value(side_to_move, maximizing);
        }

        let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };
        for mv in moves {
            mv.execute(&mut self.board);
            let value = self.minimax(depth - 1, !maximizing, alpha, beta);
            mv.undo(&mut self.board);
            self.moves_evaluated += 1;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best
    }

    /// Static value, memoized across workers. Only leaves are cached, so a
    /// cached value is always an exact evaluation.
    fn leaf_value(&mut self, side_to_move: Color) -> Score {
        let key = position_hash(&self.board, side_to_move);
        if let Some(value) = self.cache.probe(key) {
            self.cache_hits += 1;
            return value;
        }
        let value = -self.scorer.score(&self.board, self.engine_color);
        self.cache.store(key, value);
        value
    }

    /// No legal move: mate if in check, otherwise stalemate.
    fn terminal_value(&self, side_to_move: Color, maximizing: bool) -> Score {
        if !is_king_in_check(&self.board, side_to_move) {
            0
        } else if maximizing {
            MIN_SCORE
        } else {
            MAX_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind, Position};
    use crate::search::board_scoring::PositionalScorer;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn piece(kind: PieceKind, color: Color, x: i32, y: i32) -> Piece {
        Piece::new(kind, color, pos(x, y))
    }

    fn search_value(board: &Board, depth: u8, maximizing: bool, pruning: bool) -> Score {
        let cache = PositionCache::new();
        let mut search = MinimaxSearch::new(board.clone(), Color::White, &PositionalScorer, &cache, pruning);
        search.minimax(depth, maximizing, MIN_SCORE, MAX_SCORE)
    }

    fn middlegame() -> Board {
        let pieces = vec![
            piece(PieceKind::King, Color::White, 6, 0),
            piece(PieceKind::Rook, Color::White, 3, 0),
            piece(PieceKind::Knight, Color::White, 5, 2),
            piece(PieceKind::Pawn, Color::White, 4, 3),
            piece(PieceKind::Pawn, Color::White, 6, 1),
            piece(PieceKind::King, Color::Black, 6, 7),
            piece(PieceKind::Queen, Color::Black, 3, 5),
            piece(PieceKind::Bishop, Color::Black, 2, 4),
            piece(PieceKind::Pawn, Color::Black, 5, 6),
            piece(PieceKind::Pawn, Color::Black, 6, 6),
        ];
        Board::new(8, 8, pieces)
    }

    #[test]
    fn depth_zero_is_negated_static_score() {
        let board = middlegame();
        let expected = -PositionalScorer.score(&board, Color::White);
        assert_eq!(search_value(&board, 0, true, true), expected);
    }

    #[test]
    fn pruning_does_not_change_the_value() {
        let board = middlegame();
        for depth in 1..=3 {
            for maximizing in [true, false] {
                assert_eq!(
                    search_value(&board, depth, maximizing, true),
                    search_value(&board, depth, maximizing, false),
                    "depth {depth}, maximizing {maximizing}"
                );
            }
        }
    }

    #[test]
    fn pruning_explores_fewer_moves() {
        let board = middlegame();
        let cache = PositionCache::new();
        let mut pruned = MinimaxSearch::new(board.clone(), Color::White, &PositionalScorer, &cache, true);
        pruned.minimax(3, true, MIN_SCORE, MAX_SCORE);
        let cache = PositionCache::new();
        let mut full = MinimaxSearch::new(board, Color::White, &PositionalScorer, &cache, false);
        full.minimax(3, true, MIN_SCORE, MAX_SCORE);
        assert!(pruned.moves_evaluated() < full.moves_evaluated());
    }

    #[test]
    fn search_leaves_board_untouched() {
        let board = middlegame();
        let cache = PositionCache::new();
        let mut search = MinimaxSearch::new(board.clone(), Color::White, &PositionalScorer, &cache, true);
        search.minimax(2, false, MIN_SCORE, MAX_SCORE);
        assert_eq!(search.board(), &board);
        assert!(!cache.is_empty());
    }

    #[test]
    fn mated_side_scores_as_mate() {
        // White to move and mated on the back rank.
        let pieces = vec![
            piece(PieceKind::King, Color::White, 7, 0),
            piece(PieceKind::Pawn, Color::White, 6, 1),
            piece(PieceKind::Pawn, Color::White, 7, 1),
            piece(PieceKind::Rook, Color::Black, 0, 0),
            piece(PieceKind::King, Color::Black, 0, 7),
        ];
        let board = Board::new(8, 8, pieces);
        assert_eq!(search_value(&board, 2, true, true), MIN_SCORE);
    }

    #[test]
    fn stalemate_scores_as_draw() {
        // Black to move (minimizing) with no legal move and no check.
        let pieces = vec![
            piece(PieceKind::King, Color::White, 5, 6),
            piece(PieceKind::Queen, Color::White, 6, 5),
            piece(PieceKind::King, Color::Black, 7, 7),
        ];
        let board = Board::new(8, 8, pieces);
        assert_eq!(search_value(&board, 1, false, true), 0);
    }
}
