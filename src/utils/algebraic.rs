//! Square-name conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Position`.
//! Files run `a..=z`, ranks are 1-based and may have several digits, so
//! boards up to 26 columns wide get names too.

use crate::errors::ChessErrors;
use crate::game_state::chess_types::Position;

/// Convert algebraic notation (for example: "e4") to a position.
///
/// Only checks the syntax; whether the square lies on a particular board is
/// the board's business.
pub fn algebraic_to_position(square: &str) -> Result<Position, ChessErrors> {
    let invalid = || ChessErrors::InvalidAlgebraic(square.to_owned());
    let mut chars = square.chars();
    let file = chars.next().ok_or_else(invalid)?;
    if !file.is_ascii_lowercase() {
        return Err(invalid());
    }
    let rank_text = chars.as_str();
    if rank_text.is_empty() || !rank_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let rank: i32 = rank_text.parse().map_err(|_| invalid())?;
    if rank < 1 {
        return Err(invalid());
    }
    Ok(Position::new(i32::from(file as u8 - b'a'), rank - 1))
}

/// Convert a position to algebraic notation (for example: "e4").
///
/// Returns `None` when the coordinate has no name (negative, or past `z`).
#[inline]
pub fn position_to_algebraic(position: Position) -> Option<String> {
    if !(0..26).contains(&position.x) || position.y < 0 {
        return None;
    }
    let file_char = char::from(b'a' + position.x as u8);
    Some(format!("{file_char}{}", position.y + 1))
}
