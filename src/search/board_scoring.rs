//! Static board evaluation.
//!
//! Search delegates leaf scoring to `BoardScorer`, so alternate heuristics can
//! be swapped in without touching the search. All numbers are integers in
//! tenths of a pawn-unit of the classic "simple chess AI" tables: a pawn is
//! worth 100, a half-point positional bonus is 5.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind};

pub type Score = i32;

pub const MIN_SCORE: Score = -1_000_000;
pub const MAX_SCORE: Score = 1_000_000;

pub trait BoardScorer: Send + Sync {
    /// How bad `board` is for `engine_color`: the engine's own material and
    /// placement count negative, the opponent's positive.
    fn score(&self, board: &Board, engine_color: Color) -> Score;
}

/// Tables are indexed `[x][y]` from White's side; Black reads them with the
/// row reversed.
type PieceSquareTable = [[Score; 8]; 8];

const KING_TABLE: PieceSquareTable = [
    [20, 20, -10, -20, -30, -30, -30, -30],
    [20, 20, -20, -30, -40, -40, -40, -40],
    [50, 0, -20, -30, -40, -40, -40, -40],
    [0, 0, -20, -40, -50, -50, -50, -50],
    [0, 0, -20, -40, -50, -50, -50, -50],
    [10, 0, -20, -30, -40, -40, -40, -40],
    [50, 20, -20, -30, -40, -40, -40, -40],
    [20, 20, -10, -20, -30, -30, -30, -30],
];

const QUEEN_TABLE: PieceSquareTable = [
    [-20, -10, -10, 0, -5, -10, -10, -20],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-10, 5, 5, 5, 5, 5, 0, -5],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -5],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, 0, -5, -10, -10, -20],
];

const ROOK_TABLE: PieceSquareTable = [
    [0, -5, -5, -5, -5, -5, 5, 0],
    [0, 0, 0, 0, 0, 0, 10, 0],
    [0, 0, 0, 0, 0, 0, 10, 0],
    [5, 0, 0, 0, 0, 0, 10, 0],
    [5, 0, 0, 0, 0, 0, 10, 0],
    [0, 0, 0, 0, 0, 0, 10, 0],
    [0, 0, 0, 0, 0, 0, 10, 0],
    [0, -5, -5, -5, -5, -5, 5, 0],
];

const BISHOP_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 5, 10, 0, 5, 0, 0, -10],
    [-10, 0, 10, 10, 5, 5, 0, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 0, 10, 10, 5, 5, 0, -10],
    [-10, 5, 10, 0, 5, 0, 0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const KNIGHT_TABLE: PieceSquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 5, 0, 5, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 0, -30],
    [-30, 5, 15, 20, 20, 15, 0, -30],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-40, -20, 5, 0, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const PAWN_TABLE: PieceSquareTable = [
    [0, 5, 5, 0, 5, 10, 50, 0],
    [0, 10, -5, 0, 5, 10, 50, 0],
    [0, 10, -10, 0, 10, 20, 50, 0],
    [0, -20, 0, 20, 25, 30, 50, 0],
    [0, -20, 0, 20, 25, 30, 50, 0],
    [0, 10, -10, 0, 10, 20, 50, 0],
    [0, 10, -5, 0, 5, 10, 50, 0],
    [0, 5, 5, 0, 5, 10, 50, 0],
];

#[inline]
pub const fn piece_value(piece: PieceKind) -> Score {
    match piece {
        PieceKind::King => 9000,
        PieceKind::Queen => 900,
        PieceKind::Rook => 500,
        PieceKind::Bishop => 350,
        PieceKind::Knight => 300,
        PieceKind::Pawn => 100,
    }
}

#[inline]
const fn table_for(piece: PieceKind) -> &'static PieceSquareTable {
    match piece {
        PieceKind::King => &KING_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Pawn => &PAWN_TABLE,
    }
}

/// Maps a coordinate on an `extent`-wide axis onto the 8-entry table axis.
#[inline]
fn table_index(coordinate: i32, extent: i32) -> usize {
    if extent <= 0 {
        return 0;
    }
    (coordinate * 8 / extent).clamp(0, 7) as usize
}

/// Positional bonus of `piece` where it stands.
pub fn square_bonus(piece: &Piece, board: &Board) -> Score {
    let Some(position) = piece.position else {
        return 0;
    };
    let x = table_index(position.x, board.columns());
    let y = match piece.color {
        Color::White => table_index(position.y, board.rows()),
        Color::Black => 7 - table_index(position.y, board.rows()),
    };
    table_for(piece.kind)[x][y]
}

/// Material plus piece-square tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &Board, engine_color: Color) -> Score {
        let mut total = 0;
        for square in board.squares() {
            let Some(piece) = square.piece() else {
                continue;
            };
            let value = piece_value(piece.kind) + square_bonus(piece, board);
            if piece.color == engine_color {
                total -= value;
            } else {
                total += value;
            }
        }
        total
    }
}
