//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and the
//! self-play binary. Works for any board size up to 26 columns.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

/// Render the board to a Unicode string for terminal output, White at the
/// bottom.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let label_width = board.rows().to_string().len();
    let files = file_labels(board.columns(), label_width);

    out.push_str(&files);
    out.push('\n');

    for y in (0..board.rows()).rev() {
        let rank = (y + 1).to_string();
        out.push_str(&format!("{rank:>label_width$} "));

        for x in 0..board.columns() {
            match board.piece_at(Position::new(x, y)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }
            if x + 1 < board.columns() {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push_str(&rank);
        out.push('\n');
    }

    out.push_str(&files);
    out
}

fn file_labels(columns: i32, label_width: usize) -> String {
    let mut out = " ".repeat(label_width + 1);
    for x in 0..columns.min(26) {
        out.push(char::from(b'a' + x as u8));
        if x + 1 < columns {
            out.push(' ');
        }
    }
    out
}

fn piece_to_unicode(piece: &Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn renders_start_position() {
        let rendered = render_board(&Board::standard());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
