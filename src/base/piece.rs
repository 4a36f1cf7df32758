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

//! Colors, piece kinds, and colored pieces.

use std::{
    fmt::{Display, Formatter},
    mem::transmute,
    ops::Not,
};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// One of the two players of a chess game.
pub enum Color {
    White = 0,
    Black = 1,
}

impl Not for Color {
    type Output = Color;

    /// Get the opposite of this color.
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The kind of a piece, without regard for who owns it.
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The number of piece kinds.
    pub const NUM: usize = 6;

    /// All piece kinds, in index order.
    pub const ALL: [PieceKind; PieceKind::NUM] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The kinds a pawn may promote to, in the order they are generated.
    pub const PROMOTING: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[must_use]
    /// Get the lowercase character for this kind, as it appears in the
    /// promotion suffix of a coordinate-notation move.
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// A colored piece: the twelve distinct piece codes used to index the
/// board's bitboards. White pieces are codes 0 through 5 and black pieces
/// are codes 6 through 11, so a piece's kind is its code modulo 6.
pub enum Piece {
    WhitePawn = 0,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

impl Piece {
    /// The number of distinct colored pieces.
    pub const NUM: usize = 12;

    /// All pieces, in code order: white pawn through black king.
    pub const ALL: [Piece; Piece::NUM] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[must_use]
    /// Construct a piece from its owner and kind.
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece::from_index(color as u8 * 6 + kind as u8)
    }

    #[must_use]
    /// Construct a piece from its code.
    /// Codes of 12 or above wrap around.
    pub const fn from_index(index: u8) -> Piece {
        unsafe {
            // SAFETY: all values in 0..12 are valid piece discriminants.
            transmute::<u8, Piece>(index % 12)
        }
    }

    #[must_use]
    /// Get the kind of this piece, discarding its color.
    pub const fn kind(self) -> PieceKind {
        unsafe {
            // SAFETY: all values in 0..6 are valid kind discriminants.
            transmute::<u8, PieceKind>(self as u8 % 6)
        }
    }

    #[must_use]
    /// Get the owner of this piece.
    pub const fn color(self) -> Color {
        if (self as u8) < 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    /// Parse a piece from its FEN character: uppercase for White, lowercase
    /// for Black.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    #[must_use]
    /// Get the FEN character for this piece.
    pub const fn as_fen_char(self) -> char {
        let c = self.kind().as_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that piece codes decompose into color and kind as the bitboard
    /// indexing scheme requires.
    fn code_decomposition() {
        for piece in Piece::ALL {
            assert_eq!(Piece::new(piece.color(), piece.kind()), piece);
            assert_eq!(piece.kind() as u8, piece as u8 % 6);
        }
    }

    #[test]
    /// Test FEN character round trips for all twelve pieces.
    fn fen_chars() {
        for piece in Piece::ALL {
            assert_eq!(Piece::from_fen_char(piece.as_fen_char()), Some(piece));
        }
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    /// Test that color negation is an involution.
    fn color_not() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!!Color::Black, Color::Black);
    }
}
