//! Leaf-node counting over the legal move tree.

use std::thread;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::legal_moves_for_color;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(board: &mut Board, side_to_move: Color, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(board, side_to_move, depth, &mut counts);
    counts
}

/// One thread per root move, each on its own board copy.
pub fn perft_multi_threaded(board: &Board, side_to_move: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut scratch = board.clone();
    let root_moves = legal_moves_for_color(&mut scratch, side_to_move);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                let mut local_board = board.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    if depth == 1 {
                        count_leaf(mv, &mut local);
                    } else {
                        mv.execute(&mut local_board);
                        perft_recurse(&mut local_board, side_to_move.opposite(), depth - 1, &mut local);
                    }
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        total
    })
}

fn perft_recurse(board: &mut Board, side_to_move: Color, depth: u8, counts: &mut PerftCounts) {
    let moves = legal_moves_for_color(board, side_to_move);
    if depth == 1 {
        for mv in &moves {
            count_leaf(mv, counts);
        }
        return;
    }
    for mv in moves {
        mv.execute(board);
        perft_recurse(board, side_to_move.opposite(), depth - 1, counts);
        mv.undo(board);
    }
}

#[inline]
fn count_leaf(mv: &ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_castle() {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }
}
