/*
  Rampart, a UCI-compatible chess engine.
  Copyright (C) 2026 the Rampart developers.

  Rampart is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Rampart is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Zobrist hash keys for positions.
//!
//! A position's hash is the xor of one key per placed piece, a key for the
//! en passant square when one exists, a key for the current castling-rights
//! mask, and a key that is present exactly when Black is to move. Because
//! xor is its own inverse, make and unmake can maintain the hash
//! incrementally by xoring in and out only the keys that change.
//!
//! The keys are drawn from a fixed-seed generator, so hashes are stable
//! across runs.

use super::{Piece, Square};

use once_cell::sync::Lazy;

/// Seed for the key generator. Fixed so that hashes are reproducible.
const KEY_SEED: u64 = 0x9d1c_a1f6_34b1_88c9;

/// The complete set of keys the hash is built from.
struct ZobristKeys {
    /// One key per (piece, square) pair.
    pieces: [[u64; Square::NUM]; Piece::NUM],
    /// One key per possible en passant square.
    en_passant: [u64; Square::NUM],
    /// One key per castling-rights mask.
    castling: [u64; 16],
    /// Xored into the hash exactly when Black is to move.
    black_to_move: u64,
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = fastrand::Rng::with_seed(KEY_SEED);
    let mut keys = ZobristKeys {
        pieces: [[0; Square::NUM]; Piece::NUM],
        en_passant: [0; Square::NUM],
        castling: [0; 16],
        black_to_move: rng.u64(..),
    };
    for piece in &mut keys.pieces {
        for key in piece.iter_mut() {
            *key = rng.u64(..);
        }
    }
    for key in &mut keys.en_passant {
        *key = rng.u64(..);
    }
    for key in &mut keys.castling {
        *key = rng.u64(..);
    }
    keys
});

#[inline]
#[must_use]
/// Get the key for a piece standing on a square.
pub fn piece(piece: Piece, sq: Square) -> u64 {
    KEYS.pieces[piece as usize][sq as usize]
}

#[inline]
#[must_use]
/// Get the key for an en passant capture being available on `sq`.
pub fn en_passant(sq: Square) -> u64 {
    KEYS.en_passant[sq as usize]
}

#[inline]
#[must_use]
/// Get the key for a 4-bit castling-rights mask.
pub fn castling(rights: u8) -> u64 {
    KEYS.castling[usize::from(rights & 0xF)]
}

#[inline]
#[must_use]
/// Get the key that marks Black as the side to move.
pub fn black_to_move() -> u64 {
    KEYS.black_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that keys are deterministic across lookups.
    fn keys_are_stable() {
        assert_eq!(
            piece(Piece::WhiteKnight, Square::G1),
            piece(Piece::WhiteKnight, Square::G1),
        );
        assert_eq!(black_to_move(), black_to_move());
    }

    #[test]
    /// Test that no two piece-square keys collide, which would make
    /// distinct placements hash identically.
    fn piece_keys_distinct() {
        let mut seen = std::collections::HashSet::new();
        for p in Piece::ALL {
            for index in 0..64 {
                assert!(seen.insert(piece(p, Square::from_index(index))));
            }
        }
        assert_eq!(seen.len(), 12 * 64);
    }

    #[test]
    /// Test that castling keys differ across all 16 masks.
    fn castling_keys_distinct() {
        let keys: std::collections::HashSet<u64> = (0..16).map(castling).collect();
        assert_eq!(keys.len(), 16);
    }
}
