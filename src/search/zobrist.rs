//! Structural position hashing for the search cache.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs. Each occupied square contributes a mix of its coordinates, the
//! piece's color and kind, and its move counter, so the hash works for any
//! board size. Collisions are possible and accepted.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind};

#[derive(Debug)]
struct ZobristTables {
    piece_kind: [[u64; 6]; 2],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_kind = [[0u64; 6]; 2];
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            piece_kind[color.index()][kind.index()] = next_random_u64(&mut seed);
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    ZobristTables {
        piece_kind,
        side_to_move,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    mix(*state)
}

#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key for one placed piece.
#[inline]
pub fn piece_key(piece: &Piece) -> u64 {
    let Some(position) = piece.position else {
        return 0;
    };
    let kind_key = tables().piece_kind[piece.color.index()][piece.kind.index()];
    let square = ((position.x as u32 as u64) << 32) | (position.y as u32 as u64);
    mix(kind_key ^ mix(square) ^ (u64::from(piece.move_count)).rotate_left(17))
}

/// Return the side-to-move toggle key (xor in when Black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Hash of the board layout plus the side to move.
pub fn position_hash(board: &Board, side_to_move: Color) -> u64 {
    let mut key = 0u64;
    for square in board.squares() {
        if let Some(piece) = square.piece() {
            key ^= piece_key(piece);
        }
    }
    if side_to_move == Color::Black {
        key ^= side_to_move_key();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Position;
    use crate::move_generation::legal_move_generator::legal_moves_for_color;

    #[test]
    fn hash_is_deterministic_and_side_sensitive() {
        let board = Board::standard();
        let white = position_hash(&board, Color::White);
        assert_eq!(white, position_hash(&board.clone(), Color::White));
        assert_ne!(white, position_hash(&board, Color::Black));
    }

    #[test]
    fn hash_changes_with_move_and_returns_after_undo() {
        let mut board = Board::standard();
        let before = position_hash(&board, Color::White);
        let mv = legal_moves_for_color(&mut board, Color::White)[0];
        mv.execute(&mut board);
        assert_ne!(position_hash(&board, Color::Black), before);
        mv.undo(&mut board);
        assert_eq!(position_hash(&board, Color::White), before);
    }

    #[test]
    fn move_counter_is_part_of_identity() {
        let rook = Piece::new(PieceKind::Rook, Color::White, Position::new(0, 0));
        let mut moved = rook;
        moved.move_count = 2;
        assert_ne!(piece_key(&rook), piece_key(&moved));
        let mut black = rook;
        black.color = Color::Black;
        assert_ne!(piece_key(&rook), piece_key(&black));
    }

    #[test]
    fn every_color_and_kind_has_its_own_key() {
        let square = Position::new(3, 3);
        let mut keys: Vec<u64> = Color::ALL
            .into_iter()
            .flat_map(|color| {
                PieceKind::ALL
                    .into_iter()
                    .map(move |kind| piece_key(&Piece::new(kind, color, square)))
            })
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }
}
