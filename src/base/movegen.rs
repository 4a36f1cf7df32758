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

//! Pseudo-legal move generation.
//!
//! The generator emits every move a piece could geometrically make,
//! including moves that would leave the mover's own king attacked; those
//! are rejected later by the legality filter inside [`Position::make`].
//! Castling is the one exception where attack queries run here, on the
//! king's origin and transit squares, since those cannot be checked after
//! the fact.

use super::{attacks, CastleRights, Color, Move, MoveList, Piece, PieceKind, Position, Square};

/// The per-color constants that distinguish White's pawn and castling moves
/// from Black's: everything else about move generation is color-blind.
struct SideSpec {
    /// Index delta of a single pawn push.
    push: i8,
    /// The row pawns start on, from which a double push is available.
    start_row: u8,
    /// The row from which a pawn's forward move promotes.
    promotion_row: u8,
    /// The two castling lanes: required right, squares that must be empty,
    /// the king's transit square, and the king's destination.
    castles: [(CastleRights, &'static [Square], Square, Square); 2],
}

/// White's pawns push toward row 0 and the king castles on rank 1.
const WHITE_SPEC: SideSpec = SideSpec {
    push: -8,
    start_row: 6,
    promotion_row: 1,
    castles: [
        (
            CastleRights::WHITE_KINGSIDE,
            &[Square::F1, Square::G1],
            Square::F1,
            Square::G1,
        ),
        (
            CastleRights::WHITE_QUEENSIDE,
            &[Square::D1, Square::C1, Square::B1],
            Square::D1,
            Square::C1,
        ),
    ],
};

/// Black's pawns push toward row 7 and the king castles on rank 8.
const BLACK_SPEC: SideSpec = SideSpec {
    push: 8,
    start_row: 1,
    promotion_row: 6,
    castles: [
        (
            CastleRights::BLACK_KINGSIDE,
            &[Square::F8, Square::G8],
            Square::F8,
            Square::G8,
        ),
        (
            CastleRights::BLACK_QUEENSIDE,
            &[Square::D8, Square::C8, Square::B8],
            Square::D8,
            Square::C8,
        ),
    ],
};

/// Fill `list` with every pseudo-legal move for the side to move in
/// `position`. The list is appended to, not cleared; callers pass a fresh
/// list.
///
/// No duplicate moves are emitted, and every emitted move either fails the
/// legality filter in [`Position::make`] or transitions to a position in
/// which the mover's king is not attacked.
pub fn generate_moves(position: &Position, list: &mut MoveList) {
    let us = position.side_to_move();
    let spec = match us {
        Color::White => &WHITE_SPEC,
        Color::Black => &BLACK_SPEC,
    };

    pawn_moves(position, spec, list);
    castling_moves(position, spec, list);

    let occupancy = position.all_pieces();
    let own = position.occupancy(us);
    let enemy = position.occupancy(!us);
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let piece = Piece::new(us, kind);
        for from in position.pieces(piece) {
            let targets = match kind {
                PieceKind::Knight => attacks::knight(from),
                PieceKind::Bishop => attacks::bishop(from, occupancy),
                PieceKind::Rook => attacks::rook(from, occupancy),
                PieceKind::Queen => attacks::queen(from, occupancy),
                PieceKind::King => attacks::king(from),
                PieceKind::Pawn => unreachable!("pawns are generated separately"),
            } & !own;
            for to in targets {
                let capture = enemy.contains(to);
                list.push(Move::new(
                    from, to, piece, None, capture, false, false, false,
                ));
            }
        }
    }
}

/// Emit pushes, double pushes, captures, promotions, and en passant
/// captures for the pawns of the side to move.
fn pawn_moves(position: &Position, spec: &SideSpec, list: &mut MoveList) {
    let us = position.side_to_move();
    let piece = Piece::new(us, PieceKind::Pawn);
    let occupancy = position.all_pieces();
    let enemy = position.occupancy(!us);

    for from in position.pieces(piece) {
        // a pawn always has a forward square: none survive on the back rank
        let ahead = Square::from_index((from as i8 + spec.push) as u8);
        let promoting = from.row() == spec.promotion_row;

        if !occupancy.contains(ahead) {
            if promoting {
                push_promotions(list, from, ahead, piece, us, false);
            } else {
                list.push(Move::new(
                    from, ahead, piece, None, false, false, false, false,
                ));
                if from.row() == spec.start_row {
                    let double = Square::from_index((ahead as i8 + spec.push) as u8);
                    if !occupancy.contains(double) {
                        list.push(Move::new(
                            from, double, piece, None, false, true, false, false,
                        ));
                    }
                }
            }
        }

        for to in attacks::pawn(us, from) & enemy {
            if promoting {
                push_promotions(list, from, to, piece, us, true);
            } else {
                list.push(Move::new(from, to, piece, None, true, false, false, false));
            }
        }

        if let Some(ep) = position.ep_square() {
            if attacks::pawn(us, from).contains(ep) {
                list.push(Move::new(from, ep, piece, None, true, false, true, false));
            }
        }
    }
}

/// Emit the four promotion choices for a pawn arriving on the last rank.
fn push_promotions(
    list: &mut MoveList,
    from: Square,
    to: Square,
    piece: Piece,
    us: Color,
    capture: bool,
) {
    for kind in PieceKind::PROMOTING {
        list.push(Move::new(
            from,
            to,
            piece,
            Some(Piece::new(us, kind)),
            capture,
            false,
            false,
            false,
        ));
    }
}

/// Emit castling moves for the side to move.
///
/// A lane is offered when its right survives, every square between king
/// and rook is empty, and neither the king's origin nor its transit square
/// is attacked. The destination square is deliberately not tested here: a
/// king castling into check is caught by the legality filter after make.
fn castling_moves(position: &Position, spec: &SideSpec, list: &mut MoveList) {
    let us = position.side_to_move();
    let them = !us;
    let occupancy = position.all_pieces();
    let king = Piece::new(us, PieceKind::King);

    for &(right, empties, transit, to) in &spec.castles {
        if !position.castling().contains(right) {
            continue;
        }
        if empties.iter().any(|&sq| occupancy.contains(sq)) {
            continue;
        }
        let from = position.king_square(us);
        if position.is_attacked(from, them) || position.is_attacked(transit, them) {
            continue;
        }
        list.push(Move::new(from, to, king, None, false, false, false, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::MoveFilter;

    /// Generate the legal moves of a FEN by filtering the pseudo-legal
    /// list through make.
    fn legal_moves(fen: &str) -> Vec<Move> {
        let mut position = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        generate_moves(&position, &mut list);
        let mut legal = Vec::new();
        for i in 0..list.len() {
            if let Some(undo) = position.make(list[i], MoveFilter::All) {
                position.unmake(undo);
                legal.push(list[i]);
            }
        }
        legal
    }

    #[test]
    /// Test that the start position has its famous twenty moves and no
    /// duplicates.
    fn twenty_openers() {
        let moves = legal_moves(crate::base::START_FEN);
        assert_eq!(moves.len(), 20);
        let unique: std::collections::HashSet<String> =
            moves.iter().map(Move::to_string).collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    /// Test that a forward promotion offers all four pieces and nothing
    /// else from that pawn.
    fn promotion_choices() {
        let moves = legal_moves("8/P7/8/8/8/8/8/k6K w - - 0 1");
        let promotions: Vec<&Move> = moves
            .iter()
            .filter(|m| m.from_square() == Square::A7)
            .collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions.iter().all(|m| m.promotion().is_some()));
        assert!(promotions.iter().any(|m| m.to_string() == "a7a8q"));
        assert!(promotions.iter().any(|m| m.to_string() == "a7a8n"));
    }

    #[test]
    /// Test that en passant is offered exactly when the capture square
    /// matches.
    fn en_passant_generation() {
        let moves = legal_moves("8/8/8/3pP3/8/8/8/k6K w - d6 0 1");
        assert!(moves.iter().any(|m| m.is_en_passant()));

        let without = legal_moves("8/8/8/3pP3/8/8/8/k6K w - - 0 1");
        assert!(!without.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    /// Test that both castling lanes are offered from the Kiwipete
    /// position, where all four rights survive.
    fn castling_generation() {
        let moves = legal_moves(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        );
        let castles: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castling())
            .map(Move::to_string)
            .collect();
        assert!(castles.contains(&"e1g1".to_string()));
        assert!(castles.contains(&"e1c1".to_string()));
    }

    #[test]
    /// Test that castling is suppressed through an attacked transit square
    /// but not by an attacked destination, which the legality filter
    /// handles.
    fn castling_attack_rules() {
        // the black rook on f8 covers f1, the white transit square
        let through_attack = legal_moves("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!through_attack.iter().any(|m| m.to_string() == "e1g1"));
        // queenside transit d1 is clear, so long castling survives
        assert!(through_attack.iter().any(|m| m.to_string() == "e1c1"));

        // the g8 rook covers only the destination g1; generation offers the
        // move and make then rejects it
        let mut position = Position::from_fen("6rk/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let mut list = MoveList::new();
        generate_moves(&position, &mut list);
        let short = (0..list.len())
            .map(|i| list[i])
            .find(|m| m.is_castling() && m.to_square() == Square::G1)
            .unwrap();
        assert!(position.make(short, MoveFilter::All).is_none());
    }

    #[test]
    /// Test that blocked pawns generate neither pushes nor double pushes.
    fn blocked_pawns() {
        // a black knight sits directly in front of the e2 pawn
        let moves = legal_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| m.from_square() == Square::E2
            && !m.is_capture()));
    }

    #[test]
    /// Test that every generated capture lands on an enemy piece or is en
    /// passant.
    fn captures_are_real() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let mut list = MoveList::new();
        generate_moves(&position, &mut list);
        for i in 0..list.len() {
            let m = list[i];
            if m.is_capture() && !m.is_en_passant() {
                assert!(position.occupancy(Color::Black).contains(m.to_square()));
            }
        }
    }
}
