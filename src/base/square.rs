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

//! Squares, the 64 cells of the chessboard.

use super::{Bitboard, Color};

use std::{
    fmt::{Display, Formatter},
    mem::transmute,
};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A square: one of the 64 spots on the board that a piece can occupy.
///
/// Squares are numbered rank-major from the top of the board as White sees
/// it: a8 is square 0, h8 is square 7, and h1 is square 63. The low three
/// bits of a square hold its file and the high three bits hold its row (the
/// distance from the eighth rank).
pub enum Square {
    A8 = 0, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

impl Square {
    /// The number of squares on a chessboard.
    pub const NUM: usize = 64;

    #[must_use]
    /// Construct a square from its index.
    /// Indices of 64 or above are wrapped back onto the board.
    pub const fn from_index(index: u8) -> Square {
        unsafe {
            // SAFETY: all values in 0..64 are valid square discriminants, and
            // the mask guarantees the operand is in that range.
            transmute::<u8, Square>(index & 63)
        }
    }

    #[must_use]
    /// Get the integer representing the file (0 -> a, ..., 7 -> h) of this
    /// square.
    pub const fn file(self) -> u8 {
        self as u8 & 7
    }

    #[must_use]
    /// Get the row of this square: its distance from the eighth rank, so
    /// that a8 is on row 0 and a1 is on row 7.
    pub const fn row(self) -> u8 {
        self as u8 >> 3
    }

    #[must_use]
    /// Get the rank of this square counted from the mover's own back rank:
    /// 0 for the rank the player's pieces start on, 7 for the rank where
    /// their pawns promote.
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::White => 7 - self.row(),
            Color::Black => self.row(),
        }
    }

    #[must_use]
    /// Get the square obtained by mirroring this one across the horizontal
    /// centerline of the board, so that a1 and a8 exchange places.
    pub const fn flipped(self) -> Square {
        Square::from_index(self as u8 ^ 56)
    }

    #[must_use]
    /// Get a bitboard whose only element is this square.
    pub const fn bb(self) -> Bitboard {
        Bitboard::new(1 << self as u8)
    }

    #[must_use]
    /// Parse a square from its algebraic name, such as `e4`.
    /// Returns `None` if the name is not a legal square.
    pub fn from_algebraic(name: &str) -> Option<Square> {
        let bytes = name.as_bytes();
        if bytes.len() < 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        if file >= 8 || rank >= 8 {
            return None;
        }
        Some(Square::from_index((7 - rank) * 8 + file))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, 8 - self.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that the corner squares have the numbering the rest of the crate
    /// depends on.
    fn corner_indices() {
        assert_eq!(Square::A8 as u8, 0);
        assert_eq!(Square::H8 as u8, 7);
        assert_eq!(Square::A1 as u8, 56);
        assert_eq!(Square::H1 as u8, 63);
    }

    #[test]
    /// Test file and row extraction.
    fn file_and_row() {
        assert_eq!(Square::E4.file(), 4);
        assert_eq!(Square::E4.row(), 4);
        assert_eq!(Square::H1.file(), 7);
        assert_eq!(Square::H1.row(), 7);
    }

    #[test]
    /// Test that mirroring a square swaps its rank but keeps its file.
    fn flip_swaps_rank() {
        assert_eq!(Square::A1.flipped(), Square::A8);
        assert_eq!(Square::E4.flipped(), Square::E5);
        assert_eq!(Square::E4.flipped().flipped(), Square::E4);
    }

    #[test]
    /// Test round trips through algebraic notation.
    fn algebraic_round_trip() {
        for index in 0..64 {
            let sq = Square::from_index(index);
            assert_eq!(Square::from_algebraic(&sq.to_string()), Some(sq));
        }
    }

    #[test]
    /// Test that malformed names are rejected.
    fn algebraic_rejects_garbage() {
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("4e"), None);
    }

    #[test]
    /// Test the mover-relative rank used by pawn evaluation.
    fn relative_ranks() {
        assert_eq!(Square::A2.relative_rank(Color::White), 1);
        assert_eq!(Square::A7.relative_rank(Color::White), 6);
        assert_eq!(Square::A7.relative_rank(Color::Black), 1);
        assert_eq!(Square::A2.relative_rank(Color::Black), 6);
    }
}
