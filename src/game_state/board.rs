//! Board representation.
//!
//! `Board` is a flat, row-major arena of `Square`s. Pieces are stored by value
//! inside their squares, so cloning a board is a plain deep copy and the
//! execute/undo pair of a move only ever rewrites a handful of slots.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::{standard_pieces, STANDARD_COLUMNS, STANDARD_ROWS};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareColor {
    Light,
    Dark,
}

/// One board cell: a fixed `(color, position)` plus the piece on it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    color: SquareColor,
    position: Position,
    piece: Option<Piece>,
}

impl Square {
    fn new(position: Position) -> Self {
        // a1 is dark.
        let color = if (position.x + position.y) % 2 == 1 {
            SquareColor::Light
        } else {
            SquareColor::Dark
        };
        Self {
            color,
            position,
            piece: None,
        }
    }

    #[inline]
    pub fn color(&self) -> SquareColor {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

/// A rectangular chess board of `rows x columns` squares.
///
/// Equality and hashing cover the dimensions, every square, and the king
/// position table; the recorded starting pieces are not part of identity.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    columns: i32,
    squares: Vec<Square>,
    king_positions: [Option<Position>; 2],
    initial_pieces: Vec<Piece>,
}

impl Board {
    /// Builds a board and places `pieces`. Pieces without a position or with
    /// an off-board position are skipped.
    pub fn new(rows: i32, columns: i32, pieces: impl IntoIterator<Item = Piece>) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        let mut squares = Vec::with_capacity((rows * columns) as usize);
        for y in 0..rows {
            for x in 0..columns {
                squares.push(Square::new(Position::new(x, y)));
            }
        }

        let mut board = Self {
            rows,
            columns,
            squares,
            king_positions: [None; 2],
            initial_pieces: Vec::new(),
        };

        for piece in pieces {
            let Some(position) = piece.position else {
                continue;
            };
            if board.is_valid_position(position) {
                board.place_initial(piece);
                board.initial_pieces.push(piece);
            }
        }
        board
    }

    /// The standard 8x8 starting position.
    pub fn standard() -> Self {
        Self::new(STANDARD_ROWS, STANDARD_COLUMNS, standard_pieces())
    }

    /// Fully independent deep copy (squares, pieces, king table, starting set).
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Clears the board and puts the recorded starting pieces back.
    pub fn reset(&mut self) {
        for square in &mut self.squares {
            square.piece = None;
        }
        self.king_positions = [None; 2];
        let initial = std::mem::take(&mut self.initial_pieces);
        for piece in &initial {
            self.place_initial(*piece);
        }
        self.initial_pieces = initial;
    }

    fn place_initial(&mut self, piece: Piece) {
        let Some(position) = piece.position else {
            return;
        };
        if let Some(idx) = self.index(position) {
            self.squares[idx].piece = Some(piece);
            if piece.kind == PieceKind::King {
                self.set_king_position(piece.color, Some(position));
            }
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.columns && position.y >= 0 && position.y < self.rows
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        if self.is_valid_position(position) {
            Some((position.y * self.columns + position.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn square(&self, position: Position) -> Option<&Square> {
        self.index(position).map(|idx| &self.squares[idx])
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.square(position).and_then(Square::piece)
    }

    /// Puts `piece` on `position` (or clears it with `None`), rewriting the
    /// piece's own position field. Returns `false` for off-board positions.
    pub fn set_piece(&mut self, position: Position, piece: Option<Piece>) -> bool {
        let Some(idx) = self.index(position) else {
            return false;
        };
        self.squares[idx].piece = piece.map(|mut p| {
            p.position = Some(position);
            p
        });
        true
    }

    /// Removes and returns the piece on `position`.
    pub fn take_piece(&mut self, position: Position) -> Option<Piece> {
        let idx = self.index(position)?;
        self.squares[idx].piece.take()
    }

    #[inline]
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.king_positions[color.index()]
    }

    #[inline]
    pub fn set_king_position(&mut self, color: Color, position: Option<Position>) {
        self.king_positions[color.index()] = position;
    }

    /// All pieces of `color`, scanned file by file from a1.
    pub fn pieces(&self, color: Color) -> Vec<Piece> {
        let mut pieces = Vec::new();
        for x in 0..self.columns {
            for y in 0..self.rows {
                if let Some(piece) = self.piece_at(Position::new(x, y)) {
                    if piece.color == color {
                        pieces.push(*piece);
                    }
                }
            }
        }
        pieces
    }

    /// Squares in row-major order starting at a1.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    /// The starting pieces `reset` restores.
    pub fn initial_pieces(&self) -> &[Piece] {
        &self.initial_pieces
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.king_positions == other.king_positions
            && self.squares == other.squares
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.columns.hash(state);
        self.king_positions.hash(state);
        self.squares.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}
