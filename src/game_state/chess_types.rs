//! Core value types shared by the board, move generation, and search.
//!
//! Pieces are plain `Copy` values: the board owns the only "live" copy of each
//! piece, and moves keep snapshots so they can be undone exactly.

use std::fmt;

use crate::game_state::board::Board;
use crate::moves::bishop_moves::generate_bishop_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::king_moves::generate_king_moves;
use crate::moves::knight_moves::generate_knight_moves;
use crate::moves::pawn_moves::generate_pawn_moves;
use crate::moves::queen_moves::generate_queen_moves;
use crate::moves::rook_moves::generate_rook_moves;
use crate::utils::algebraic::position_to_algebraic;

/// Side / piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step (White walks toward higher rows).
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub const fn full_name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    pub const fn short_name(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Piece kind (color is stored separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Pawn => 5,
        }
    }

    pub const fn full_name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        }
    }

    pub const fn short_name(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

/// Board coordinate: `x` is the column (file, 0 = a), `y` the row (rank,
/// 0 = White's home row). Off-board coordinates are representable on purpose
/// so move generation can step outside and let the board reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match position_to_algebraic(*self) {
            Some(name) => f.write_str(&name),
            None => write!(f, "({},{})", self.x, self.y),
        }
    }
}

/// A chess piece as a value object.
///
/// Equality covers `(color, kind, move_count, position)`. `position` is `None`
/// once the piece has been captured (only move snapshots ever see that state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Option<Position>,
    pub move_count: u32,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, position: Position) -> Self {
        Self {
            kind,
            color,
            position: Some(position),
            move_count: 0,
        }
    }

    /// A nonzero move counter blocks castling and the pawn double step.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.move_count != 0
    }

    /// e.g. `"wP"`.
    pub fn short_description(&self) -> String {
        format!("{}{}", self.color.short_name(), self.kind.short_name())
    }

    /// e.g. `"White pawn"`.
    pub fn description(&self) -> String {
        format!(
            "{} {}",
            self.color.full_name(),
            self.kind.full_name().to_lowercase()
        )
    }

    /// Pseudo-legal moves of this piece on `board` (not yet filtered for
    /// self-check). Captured pieces produce nothing.
    pub fn pseudo_legal_moves(&self, board: &Board) -> Vec<ChessMove> {
        let mut moves = Vec::new();
        if self.position.is_none() {
            return moves;
        }
        match self.kind {
            PieceKind::King => generate_king_moves(self, board, &mut moves),
            PieceKind::Queen => generate_queen_moves(self, board, &mut moves),
            PieceKind::Rook => generate_rook_moves(self, board, &mut moves),
            PieceKind::Bishop => generate_bishop_moves(self, board, &mut moves),
            PieceKind::Knight => generate_knight_moves(self, board, &mut moves),
            PieceKind::Pawn => generate_pawn_moves(self, board, &mut moves),
        }
        moves
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.short_name(), self.kind.short_name())
    }
}
