//! Reversible move records.
//!
//! A `ChessMove` stores snapshots of the moving piece and of whatever it
//! captures, so `undo` can put the board back exactly as it was, move
//! counters and the king-position table included. Castling and promotion
//! are variants of `MoveKind` that touch a second piece or swap the mover's
//! identity on top of the plain relocation.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    /// `rook` is the unmoved rook snapshot, still carrying its origin square.
    Castle { rook: Piece, rook_to: Position },
    /// The pawn becomes a queen on arrival.
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Position,
    pub to: Position,
    /// The mover as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl ChessMove {
    /// A relocation of `piece` (which must be on the board) to `to`.
    #[inline]
    pub fn new(piece: Piece, to: Position, captured: Option<Piece>) -> Self {
        Self {
            from: piece.position.unwrap_or(to),
            to,
            piece,
            captured,
            kind: MoveKind::Normal,
        }
    }

    /// Castle of `king` with `rook`; the king lands on `king_to`, the rook on
    /// `rook_to`.
    #[inline]
    pub fn castle(king: Piece, king_to: Position, rook: Piece, rook_to: Position) -> Self {
        Self {
            kind: MoveKind::Castle { rook, rook_to },
            ..Self::new(king, king_to, None)
        }
    }

    #[inline]
    pub fn into_promotion(self) -> Self {
        Self {
            kind: MoveKind::Promotion,
            ..self
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    /// The piece that ends up on `to`.
    pub fn placed_piece(&self) -> Piece {
        let mut placed = self.piece;
        placed.move_count += 1;
        placed.position = Some(self.to);
        if self.kind == MoveKind::Promotion {
            placed.kind = PieceKind::Queen;
        }
        placed
    }

    /// Applies the move. The move must have been generated against the
    /// current board state; nothing is validated here.
    pub fn execute(&self, board: &mut Board) {
        board.take_piece(self.from);
        board.set_piece(self.to, Some(self.placed_piece()));
        if self.piece.kind == PieceKind::King {
            board.set_king_position(self.piece.color, Some(self.to));
        }

        if let MoveKind::Castle { rook, rook_to } = self.kind {
            if let Some(rook_from) = rook.position {
                board.take_piece(rook_from);
            }
            let mut moved_rook = rook;
            moved_rook.move_count += 1;
            board.set_piece(rook_to, Some(moved_rook));
        }
    }

    /// Exact inverse of `execute`.
    pub fn undo(&self, board: &mut Board) {
        if let MoveKind::Castle { rook, rook_to } = self.kind {
            board.take_piece(rook_to);
            if let Some(rook_from) = rook.position {
                board.set_piece(rook_from, Some(rook));
            }
        }

        board.set_piece(self.to, self.captured);
        board.set_piece(self.from, Some(self.piece));
        if self.piece.kind == PieceKind::King {
            board.set_king_position(self.piece.color, Some(self.from));
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mover = self.piece.description();
        match (self.kind, self.captured) {
            (MoveKind::Castle { .. }, _) => {
                write!(f, "{mover} castles from {} to {}", self.from, self.to)?
            }
            (_, Some(captured)) => write!(
                f,
                "{mover} takes {} ({} to {})",
                captured.description(),
                self.from,
                self.to
            )?,
            (_, None) => write!(f, "{mover} moves from {} to {}", self.from, self.to)?,
        }
        if self.is_promotion() {
            f.write_str(" (pawn promotion)")?;
        }
        Ok(())
    }
}
