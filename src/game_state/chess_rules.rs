//! Canonical chess-rule constants and the standard starting layout.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

/// Rows on a standard chess board.
pub const STANDARD_ROWS: i32 = 8;

/// Columns on a standard chess board.
pub const STANDARD_COLUMNS: i32 = 8;

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Home row of `color` on a board with `rows` rows.
#[inline]
pub const fn home_row(color: Color, rows: i32) -> i32 {
    match color {
        Color::White => 0,
        Color::Black => rows - 1,
    }
}

/// Row on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_row(color: Color, rows: i32) -> i32 {
    home_row(color.opposite(), rows)
}

/// The 32 pieces of the standard starting position, White first.
pub fn standard_pieces() -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(32);
    for color in Color::ALL {
        let back = home_row(color, STANDARD_ROWS);
        let pawns = back + color.forward();
        for (x, kind) in BACK_RANK.iter().enumerate() {
            pieces.push(Piece::new(*kind, color, Position::new(x as i32, back)));
        }
        for x in 0..STANDARD_COLUMNS {
            pieces.push(Piece::new(PieceKind::Pawn, color, Position::new(x, pawns)));
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_and_promotion_rows_are_opposite() {
        assert_eq!(home_row(Color::White, 8), 0);
        assert_eq!(home_row(Color::Black, 8), 7);
        assert_eq!(promotion_row(Color::White, 6), 5);
        assert_eq!(promotion_row(Color::Black, 6), 0);
    }

    #[test]
    fn standard_setup_has_thirty_two_pieces() {
        let pieces = standard_pieces();
        assert_eq!(pieces.len(), 32);
        let kings = pieces.iter().filter(|p| p.kind == PieceKind::King).count();
        assert_eq!(kings, 2);
        assert!(pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Pawn && p.color == Color::Black)
            .all(|p| p.position.map(|pos| pos.y) == Some(6)));
    }
}
