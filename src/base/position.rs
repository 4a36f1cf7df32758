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

//! The complete state of a game of chess, and the transitions between
//! states.
//!
//! [`Position::make`] applies a move with an incremental hash update and
//! filters out moves that leave the mover's own king attacked, returning a
//! value-typed [`Undo`] snapshot that [`Position::unmake`] consumes to roll
//! the move back.

use super::{attacks, zobrist, Bitboard, Color, Move, Piece, PieceKind, Square};

use nohash_hasher::IntMap;
use thiserror::Error;

use std::fmt::{Display, Formatter};

/// The FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Occupancy index for the union of both sides' pieces.
const BOTH: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The set of castling moves still available to both players, as a 4-bit
/// mask.
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights for either side.
    pub const NONE: CastleRights = CastleRights(0);

    /// Full castling rights for both sides.
    pub const ALL: CastleRights = CastleRights(0xF);

    /// White may castle with the h1 rook.
    pub const WHITE_KINGSIDE: CastleRights = CastleRights(1);

    /// White may castle with the a1 rook.
    pub const WHITE_QUEENSIDE: CastleRights = CastleRights(2);

    /// Black may castle with the h8 rook.
    pub const BLACK_KINGSIDE: CastleRights = CastleRights(4);

    /// Black may castle with the a8 rook.
    pub const BLACK_QUEENSIDE: CastleRights = CastleRights(8);

    #[must_use]
    /// Get the raw 4-bit mask, used to index the castling hash keys.
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    /// Determine whether all the rights in `other` are present in `self`.
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Add the rights in `other` to this set.
    pub fn insert(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }

    #[must_use]
    /// Keep only the rights allowed by a raw bit mask.
    const fn masked(self, mask: u8) -> CastleRights {
        CastleRights(self.0 & mask)
    }
}

impl Display for CastleRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (right, c) in [
            (CastleRights::WHITE_KINGSIDE, 'K'),
            (CastleRights::WHITE_QUEENSIDE, 'Q'),
            (CastleRights::BLACK_KINGSIDE, 'k'),
            (CastleRights::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Per-square castling-rights masks. A move touching a square keeps only
/// the rights in that square's entry, so any move disturbing a rook or
/// king origin strips exactly the rights that castling rule invalidates.
#[rustfmt::skip]
const CASTLING_MASKS: [u8; Square::NUM] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// The ways a FEN string can fail to describe a position.
pub enum FenError {
    /// The string ended before all mandatory fields appeared.
    #[error("FEN is missing its {0} field")]
    MissingField(&'static str),
    /// The piece placement field does not describe an 8x8 board.
    #[error("FEN piece placement does not describe an 8x8 board")]
    BadPlacement,
    /// A character in the placement field names no piece.
    #[error("unrecognized piece character `{0}`")]
    BadPiece(char),
    /// The side-to-move field was neither `w` nor `b`.
    #[error("unrecognized side-to-move token `{0}`")]
    BadSide(String),
    /// A character in the castling field names no castling right.
    #[error("unrecognized castling character `{0}`")]
    BadCastling(char),
    /// The en passant field was neither `-` nor a square name.
    #[error("unrecognized en passant token `{0}`")]
    BadEnPassant(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Which moves [`Position::make`] is willing to apply.
pub enum MoveFilter {
    /// Apply any pseudo-legal move.
    All,
    /// Apply only captures; quiet moves are refused without touching the
    /// position. Used by the quiescence search.
    CapturesOnly,
}

#[derive(Copy, Clone, Debug)]
/// A snapshot of the board-level fields of a [`Position`], taken by `make`
/// before it mutates anything and consumed by `unmake` to restore them.
///
/// The repetition history is not part of the snapshot; it is pushed and
/// popped around the snapshot instead.
pub struct Undo {
    pieces: [Bitboard; Piece::NUM],
    occupancy: [Bitboard; 3],
    side_to_move: Color,
    castling: CastleRights,
    ep_square: Option<Square>,
    hash: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The complete state of a chess game: piece placement, side to move,
/// castling rights, en passant square, the Zobrist hash of all of the
/// above, and the hashes of every position passed through since the game
/// started.
pub struct Position {
    /// One bitboard per piece code; bit *s* is set when that piece stands
    /// on square *s*. Pairwise disjoint.
    pieces: [Bitboard; Piece::NUM],
    /// White, black, and combined occupancy. Redundant with `pieces`, and
    /// rebuilt after every mutation.
    occupancy: [Bitboard; 3],
    /// The player whose turn it is.
    side_to_move: Color,
    /// The castling moves still available.
    castling: CastleRights,
    /// The square a pawn may capture onto en passant, produced by an
    /// immediately preceding double push.
    ep_square: Option<Square>,
    /// The incrementally maintained Zobrist hash.
    hash: u64,
    /// Hashes of every position from the game start through the current
    /// one, in order. Extended by `make`, truncated by `unmake`.
    history: Vec<u64>,
    /// Occurrence counts for each hash in `history`, for constant-time
    /// repetition queries.
    repetitions: IntMap<u64, u8>,
}

impl Position {
    #[must_use]
    /// Create a position holding the standard chess starting setup.
    pub fn new() -> Position {
        Position::from_fen(START_FEN).expect("start position FEN is valid")
    }

    /// Load a position from a six-field FEN string. The halfmove clock and
    /// fullmove number are accepted but unused.
    ///
    /// # Errors
    ///
    /// Returns a [`FenError`] describing the first malformed field.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut fields = fen.split_ascii_whitespace();
        let placement = fields
            .next()
            .ok_or(FenError::MissingField("piece placement"))?;
        let side = fields.next().ok_or(FenError::MissingField("side to move"))?;
        let castling = fields
            .next()
            .ok_or(FenError::MissingField("castling rights"))?;
        let ep = fields.next().ok_or(FenError::MissingField("en passant"))?;

        let mut pieces = [Bitboard::EMPTY; Piece::NUM];
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::BadPlacement);
        }
        for (row, row_str) in rows.iter().enumerate() {
            let mut file = 0u32;
            for c in row_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::BadPiece(c))?;
                    if file >= 8 {
                        return Err(FenError::BadPlacement);
                    }
                    #[allow(clippy::cast_possible_truncation)]
                    pieces[piece as usize].insert(Square::from_index(row as u8 * 8 + file as u8));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement);
            }
        }

        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadSide(side.into())),
        };

        let mut rights = CastleRights::NONE;
        if castling != "-" {
            for c in castling.chars() {
                rights.insert(match c {
                    'K' => CastleRights::WHITE_KINGSIDE,
                    'Q' => CastleRights::WHITE_QUEENSIDE,
                    'k' => CastleRights::BLACK_KINGSIDE,
                    'q' => CastleRights::BLACK_QUEENSIDE,
                    _ => return Err(FenError::BadCastling(c)),
                });
            }
        }

        let ep_square = if ep == "-" {
            None
        } else {
            Some(Square::from_algebraic(ep).ok_or_else(|| FenError::BadEnPassant(ep.into()))?)
        };

        let mut position = Position {
            pieces,
            occupancy: [Bitboard::EMPTY; 3],
            side_to_move,
            castling: rights,
            ep_square,
            hash: 0,
            history: Vec::with_capacity(128),
            repetitions: IntMap::default(),
        };
        position.refresh_occupancy();
        position.hash = position.hash_from_scratch();
        position.history.push(position.hash);
        position.repetitions.insert(position.hash, 1);
        Ok(position)
    }

    #[must_use]
    /// Get the bitboard of squares occupied by `piece`.
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece as usize]
    }

    #[must_use]
    /// Get the bitboard of squares occupied by any piece of `color`.
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color as usize]
    }

    #[must_use]
    /// Get the bitboard of all occupied squares.
    pub fn all_pieces(&self) -> Bitboard {
        self.occupancy[BOTH]
    }

    #[must_use]
    /// Get the player whose turn it is.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    /// Get the castling rights still available.
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[must_use]
    /// Get the en passant target square, if the previous move was a double
    /// pawn push.
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[must_use]
    /// Get the incrementally maintained Zobrist hash of this position.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    /// Get the piece standing on `sq`, if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|&p| self.pieces[p as usize].contains(sq))
    }

    #[must_use]
    /// Get the square of the king belonging to `color`.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(Piece::new(color, PieceKind::King)).lsb()
    }

    #[must_use]
    /// Determine whether `attacker` attacks `sq`: whether any pawn, leaper,
    /// or slider of that color could capture a piece standing there.
    pub fn is_attacked(&self, sq: Square, attacker: Color) -> bool {
        // a pawn of ours standing on `sq` would attack exactly the squares
        // from which an enemy pawn attacks `sq`
        if !(attacks::pawn(!attacker, sq) & self.pieces(Piece::new(attacker, PieceKind::Pawn)))
            .is_empty()
        {
            return true;
        }
        if !(attacks::knight(sq) & self.pieces(Piece::new(attacker, PieceKind::Knight))).is_empty()
        {
            return true;
        }
        if !(attacks::king(sq) & self.pieces(Piece::new(attacker, PieceKind::King))).is_empty() {
            return true;
        }
        let occupancy = self.occupancy[BOTH];
        let diagonal = self.pieces(Piece::new(attacker, PieceKind::Bishop))
            | self.pieces(Piece::new(attacker, PieceKind::Queen));
        if !(attacks::bishop(sq, occupancy) & diagonal).is_empty() {
            return true;
        }
        let straight = self.pieces(Piece::new(attacker, PieceKind::Rook))
            | self.pieces(Piece::new(attacker, PieceKind::Queen));
        !(attacks::rook(sq, occupancy) & straight).is_empty()
    }

    #[must_use]
    /// Determine whether the side to move is currently in check.
    pub fn in_check(&self) -> bool {
        self.is_attacked(self.king_square(self.side_to_move), !self.side_to_move)
    }

    #[must_use]
    /// Determine whether the current position has already occurred at least
    /// twice before in the game and search history.
    pub fn is_repetition(&self) -> bool {
        self.repetitions.get(&self.hash).copied().unwrap_or(0) >= 3
    }

    /// Apply `m` to this position, updating the hash incrementally and
    /// extending the repetition history.
    ///
    /// Returns `None` and leaves the position untouched when the move is
    /// refused by `filter` or would leave the mover's king attacked.
    /// Otherwise returns the [`Undo`] snapshot that [`Position::unmake`]
    /// takes to roll the move back.
    pub fn make(&mut self, m: Move, filter: MoveFilter) -> Option<Undo> {
        if filter == MoveFilter::CapturesOnly && !m.is_capture() {
            return None;
        }

        let undo = self.snapshot();
        let from = m.from_square();
        let to = m.to_square();
        let piece = m.piece();
        let us = self.side_to_move;
        let them = !us;

        // lift the moving piece across
        self.pieces[piece as usize].remove(from);
        self.pieces[piece as usize].insert(to);
        self.hash ^= zobrist::piece(piece, from);
        self.hash ^= zobrist::piece(piece, to);

        if m.is_en_passant() {
            // the captured pawn stands one row behind the target square
            let captured_sq = match us {
                Color::White => Square::from_index(to as u8 + 8),
                Color::Black => Square::from_index(to as u8 - 8),
            };
            let captured = Piece::new(them, PieceKind::Pawn);
            self.pieces[captured as usize].remove(captured_sq);
            self.hash ^= zobrist::piece(captured, captured_sq);
        } else if m.is_capture() {
            for kind in PieceKind::ALL {
                let captured = Piece::new(them, kind);
                if self.pieces[captured as usize].contains(to) {
                    self.pieces[captured as usize].remove(to);
                    self.hash ^= zobrist::piece(captured, to);
                    break;
                }
            }
        }

        if let Some(promoted) = m.promotion() {
            // swap the arrived pawn for the promoted piece
            self.pieces[piece as usize].remove(to);
            self.hash ^= zobrist::piece(piece, to);
            self.pieces[promoted as usize].insert(to);
            self.hash ^= zobrist::piece(promoted, to);
        }

        if let Some(ep) = self.ep_square.take() {
            self.hash ^= zobrist::en_passant(ep);
        }
        if m.is_double_push() {
            let ep = match us {
                Color::White => Square::from_index(to as u8 + 8),
                Color::Black => Square::from_index(to as u8 - 8),
            };
            self.ep_square = Some(ep);
            self.hash ^= zobrist::en_passant(ep);
        }

        if m.is_castling() {
            let rook = Piece::new(us, PieceKind::Rook);
            let (rook_from, rook_to) = match to {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                _ => unreachable!("castling moves only target g1, c1, g8, or c8"),
            };
            self.pieces[rook as usize].remove(rook_from);
            self.pieces[rook as usize].insert(rook_to);
            self.hash ^= zobrist::piece(rook, rook_from);
            self.hash ^= zobrist::piece(rook, rook_to);
        }

        self.hash ^= zobrist::castling(self.castling.bits());
        self.castling = self
            .castling
            .masked(CASTLING_MASKS[from as usize] & CASTLING_MASKS[to as usize]);
        self.hash ^= zobrist::castling(self.castling.bits());

        self.refresh_occupancy();

        self.side_to_move = them;
        self.hash ^= zobrist::black_to_move();

        // the mover may not leave their own king attacked
        if self.is_attacked(self.king_square(us), them) {
            self.restore(&undo);
            return None;
        }

        self.history.push(self.hash);
        *self.repetitions.entry(self.hash).or_insert(0) += 1;
        Some(undo)
    }

    /// Roll back the most recent successful [`Position::make`], consuming
    /// its snapshot and truncating the repetition history.
    pub fn unmake(&mut self, undo: Undo) {
        self.history.pop();
        if let Some(count) = self.repetitions.get_mut(&self.hash) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&self.hash);
            }
        }
        self.restore(&undo);
    }

    #[must_use]
    /// Recompute the Zobrist hash of this position from nothing, xoring the
    /// component keys of the piece placement, en passant square, castling
    /// mask, and side to move. `make` maintains the same value
    /// incrementally; the two must always agree.
    pub fn hash_from_scratch(&self) -> u64 {
        let mut hash = 0;
        for piece in Piece::ALL {
            for sq in self.pieces[piece as usize] {
                hash ^= zobrist::piece(piece, sq);
            }
        }
        if let Some(ep) = self.ep_square {
            hash ^= zobrist::en_passant(ep);
        }
        hash ^= zobrist::castling(self.castling.bits());
        if self.side_to_move == Color::Black {
            hash ^= zobrist::black_to_move();
        }
        hash
    }

    /// Capture the board-level fields for a later rollback.
    fn snapshot(&self) -> Undo {
        Undo {
            pieces: self.pieces,
            occupancy: self.occupancy,
            side_to_move: self.side_to_move,
            castling: self.castling,
            ep_square: self.ep_square,
            hash: self.hash,
        }
    }

    /// Overwrite the board-level fields from a snapshot.
    fn restore(&mut self, undo: &Undo) {
        self.pieces = undo.pieces;
        self.occupancy = undo.occupancy;
        self.side_to_move = undo.side_to_move;
        self.castling = undo.castling;
        self.ep_square = undo.ep_square;
        self.hash = undo.hash;
    }

    /// Rebuild the per-side and combined occupancy boards from the piece
    /// boards.
    fn refresh_occupancy(&mut self) {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            white |= self.pieces[Piece::new(Color::White, kind) as usize];
            black |= self.pieces[Piece::new(Color::Black, kind) as usize];
        }
        self.occupancy = [white, black, white | black];
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl Display for Position {
    /// Draw the board as an ASCII diagram from White's point of view,
    /// followed by the game-state fields.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for file in 0..8u8 {
                let sq = Square::from_index(row * 8 + file);
                match self.piece_on(sq) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(
            f,
            "side: {}",
            match self.side_to_move {
                Color::White => "white",
                Color::Black => "black",
            }
        )?;
        writeln!(
            f,
            "en passant: {}",
            self.ep_square
                .map_or_else(|| "none".into(), |sq| sq.to_string()),
        )?;
        writeln!(f, "castling: {}", self.castling)?;
        write!(f, "hash: {:016x}", self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{movegen::generate_moves, MoveList};

    /// A tactically busy middlegame position used widely for move
    /// generation testing.
    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    /// Test that the start position loads with the fields chess says it
    /// should have.
    fn start_position_fields() {
        let position = Position::new();
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling(), CastleRights::ALL);
        assert_eq!(position.ep_square(), None);
        assert_eq!(position.all_pieces().len(), 32);
        assert_eq!(position.pieces(Piece::WhitePawn).len(), 8);
        assert_eq!(position.king_square(Color::White), Square::E1);
        assert_eq!(position.king_square(Color::Black), Square::E8);
        assert_eq!(position.hash(), position.hash_from_scratch());
    }

    #[test]
    /// Test that malformed FENs are rejected with the right error.
    fn fen_rejections() {
        assert_eq!(
            Position::from_fen(""),
            Err(FenError::MissingField("piece placement")),
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/8"),
            Err(FenError::MissingField("side to move")),
        );
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/x7 w - - 0 1"),
            Err(FenError::BadPiece('x')),
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::BadPlacement),
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::BadSide(_)),
        ));
    }

    #[test]
    /// Test that the en passant field is parsed and hashed.
    fn fen_en_passant() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(position.ep_square(), Some(Square::E3));
        assert_eq!(position.hash(), position.hash_from_scratch());
    }

    #[test]
    /// Test that making and unmaking every legal move restores the position
    /// bit for bit, including the hash and the repetition bookkeeping.
    fn make_unmake_round_trip() {
        for fen in [
            START_FEN,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            let before = position.clone();
            let mut list = MoveList::new();
            generate_moves(&position, &mut list);
            for i in 0..list.len() {
                if let Some(undo) = position.make(list[i], MoveFilter::All) {
                    assert_eq!(position.hash(), position.hash_from_scratch());
                    position.unmake(undo);
                }
                assert_eq!(position, before, "mismatch after {} in {fen}", list[i]);
            }
        }
    }

    /// Walk the legal move tree to `depth`, asserting at every node that
    /// the incremental hash agrees with a from-scratch recomputation.
    fn hash_walk(position: &mut Position, depth: u32) {
        assert_eq!(position.hash(), position.hash_from_scratch());
        if depth == 0 {
            return;
        }
        let mut list = MoveList::new();
        generate_moves(position, &mut list);
        for i in 0..list.len() {
            if let Some(undo) = position.make(list[i], MoveFilter::All) {
                hash_walk(position, depth - 1);
                position.unmake(undo);
            }
        }
    }

    #[test]
    /// Test that the incremental hash never drifts from the from-scratch
    /// hash across a bounded walk of the game tree.
    fn incremental_hash_stays_true() {
        for fen in [
            START_FEN,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            hash_walk(&mut position, 2);
        }
    }

    #[test]
    /// Test that the capture filter refuses quiet moves without touching
    /// the position.
    fn capture_filter_refuses_quiet() {
        let mut position = Position::new();
        let quiet = Move::from_uci("e2e4", &position).unwrap();
        assert!(position.make(quiet, MoveFilter::CapturesOnly).is_none());
        assert_eq!(position, Position::new());
    }

    #[test]
    /// Test that a move leaving the king attacked is rolled back and
    /// reported illegal.
    fn legality_filter() {
        // the e2 rook is pinned to the white king by the e7 rook
        let mut position =
            Position::from_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        let before = position.clone();
        let pinned = Move::from_uci("e2d2", &position).unwrap();
        assert!(position.make(pinned, MoveFilter::All).is_none());
        assert_eq!(position, before);
    }

    #[test]
    /// Test that castling moves the rook and strips the right, and that
    /// moving a rook strips only its own side's right.
    fn castling_bookkeeping() {
        let mut position = Position::from_fen(KIWIPETE).unwrap();
        let castle = Move::from_uci("e1g1", &position).unwrap();
        assert!(castle.is_castling());
        position.make(castle, MoveFilter::All).unwrap();
        assert!(position.pieces(Piece::WhiteRook).contains(Square::F1));
        assert!(!position.pieces(Piece::WhiteRook).contains(Square::H1));
        assert!(!position.castling().contains(CastleRights::WHITE_KINGSIDE));
        assert!(!position.castling().contains(CastleRights::WHITE_QUEENSIDE));
        assert!(position.castling().contains(CastleRights::BLACK_KINGSIDE));
        assert_eq!(position.hash(), position.hash_from_scratch());
    }

    #[test]
    /// Test that an en passant capture removes the pawn behind the target
    /// square.
    fn en_passant_capture() {
        let mut position =
            Position::from_fen("8/8/8/3pP3/8/8/8/k6K w - d6 0 1").unwrap();
        let ep = Move::from_uci("e5d6", &position).unwrap();
        assert!(ep.is_en_passant());
        position.make(ep, MoveFilter::All).unwrap();
        assert!(!position.pieces(Piece::BlackPawn).contains(Square::D5));
        assert!(position.pieces(Piece::WhitePawn).contains(Square::D6));
        assert_eq!(position.hash(), position.hash_from_scratch());
    }

    #[test]
    /// Test that repeating a position three times is detected and that
    /// unmaking clears the detection.
    fn repetition_counting() {
        let mut position = Position::new();
        let mut undos = Vec::new();
        // knights out and back, twice over
        for tok in [
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ] {
            let m = Move::from_uci(tok, &position).unwrap();
            undos.push(position.make(m, MoveFilter::All).unwrap());
        }
        // the start position has now occurred three times
        assert!(position.is_repetition());
        while let Some(undo) = undos.pop() {
            position.unmake(undo);
        }
        assert!(!position.is_repetition());
        assert_eq!(position, Position::new());
    }

    #[test]
    /// Test the attack query against hand-checked facts about Kiwipete.
    fn attack_queries() {
        let position = Position::from_fen(KIWIPETE).unwrap();
        // the f3 queen attacks f6 through nothing
        assert!(position.is_attacked(Square::F6, Color::White));
        // the h3 pawn attacks g2
        assert!(position.is_attacked(Square::G2, Color::Black));
        // nobody attacks a5
        assert!(!position.is_attacked(Square::A5, Color::White));
        assert!(!position.in_check());
    }
}
