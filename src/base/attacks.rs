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

//! Precomputed attack lookup for every piece kind.
//!
//! Leaper attacks (pawns, knights, kings) are plain per-square tables.
//! Slider attacks (bishops, rooks, and queens as their union) go through
//! the magic tables described in [`crate::base::magic`]. Everything is
//! built once, on first use, behind a [`Lazy`] static.

use super::{
    magic::{self, Slider},
    Bitboard, Color, Square,
};

use once_cell::sync::Lazy;

/// Seed for the magic-number search. Any seed works; fixing one makes the
/// tables identical on every run.
const MAGIC_SEED: u64 = 0x51ce_7f2b_9c3d_a6e4;

/// The (row delta, file delta) steps of a knight.
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The (row delta, file delta) steps of a king.
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Every attack table the move generator needs, bundled so they can be
/// initialized together.
struct AttackTables {
    /// Pawn capture attacks, indexed by the pawn's color and square.
    pawn: [[Bitboard; Square::NUM]; 2],
    /// Knight attacks per square.
    knight: [Bitboard; Square::NUM],
    /// King attacks per square.
    king: [Bitboard; Square::NUM],
    /// Relevant-occupancy masks for bishops, per square.
    bishop_masks: [Bitboard; Square::NUM],
    /// Relevant-occupancy masks for rooks, per square.
    rook_masks: [Bitboard; Square::NUM],
    /// Magic multipliers for bishops, per square.
    bishop_magics: [u64; Square::NUM],
    /// Magic multipliers for rooks, per square.
    rook_magics: [u64; Square::NUM],
    /// Mask population counts for bishops, per square.
    bishop_bits: [u8; Square::NUM],
    /// Mask population counts for rooks, per square.
    rook_bits: [u8; Square::NUM],
    /// Flat bishop attack table: 512 slots per square.
    bishop_attacks: Vec<Bitboard>,
    /// Flat rook attack table: 4096 slots per square.
    rook_attacks: Vec<Bitboard>,
}

static TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::build);

impl AttackTables {
    /// Construct every table. Roughly two megabytes of heap, dominated by
    /// the rook table; runs once at startup.
    fn build() -> AttackTables {
        let mut tables = AttackTables {
            pawn: [[Bitboard::EMPTY; Square::NUM]; 2],
            knight: [Bitboard::EMPTY; Square::NUM],
            king: [Bitboard::EMPTY; Square::NUM],
            bishop_masks: [Bitboard::EMPTY; Square::NUM],
            rook_masks: [Bitboard::EMPTY; Square::NUM],
            bishop_magics: [0; Square::NUM],
            rook_magics: [0; Square::NUM],
            bishop_bits: [0; Square::NUM],
            rook_bits: [0; Square::NUM],
            bishop_attacks: vec![Bitboard::EMPTY; Square::NUM * magic::BISHOP_TABLE_SIZE],
            rook_attacks: vec![Bitboard::EMPTY; Square::NUM * magic::ROOK_TABLE_SIZE],
        };

        for index in 0..Square::NUM {
            let sq = Square::from_index(index as u8);
            // white pawns capture toward rank 8 (lower rows), black toward
            // rank 1
            tables.pawn[Color::White as usize][index] = step_attacks(sq, &[(-1, -1), (-1, 1)]);
            tables.pawn[Color::Black as usize][index] = step_attacks(sq, &[(1, -1), (1, 1)]);
            tables.knight[index] = step_attacks(sq, &KNIGHT_STEPS);
            tables.king[index] = step_attacks(sq, &KING_STEPS);
        }

        let mut rng = fastrand::Rng::with_seed(MAGIC_SEED);
        for index in 0..Square::NUM {
            let sq = Square::from_index(index as u8);
            tables.fill_slider(&mut rng, Slider::Bishop, sq);
            tables.fill_slider(&mut rng, Slider::Rook, sq);
        }

        tables
    }

    /// Find a magic for `sq` and fill that square's section of the flat
    /// attack table with the true ray attacks of every blocker subset.
    fn fill_slider(&mut self, rng: &mut fastrand::Rng, slider: Slider, sq: Square) {
        let index = sq as usize;
        let mask = magic::relevant_mask(slider, sq);
        let bits = mask.len();
        let magic_number = magic::find_magic(rng, slider, sq);

        let (masks, magics, bits_table, table) = match slider {
            Slider::Bishop => (
                &mut self.bishop_masks,
                &mut self.bishop_magics,
                &mut self.bishop_bits,
                &mut self.bishop_attacks,
            ),
            Slider::Rook => (
                &mut self.rook_masks,
                &mut self.rook_magics,
                &mut self.rook_bits,
                &mut self.rook_attacks,
            ),
        };
        masks[index] = mask;
        magics[index] = magic_number;
        bits_table[index] = bits;

        let base = index * slider.table_size();
        for subset in 0..(1usize << bits) {
            let occupancy = magic::index_to_occupancy(subset, mask);
            let key = magic::magic_index(occupancy, magic_number, bits);
            table[base + key] = magic::slider_attacks(slider, sq, occupancy);
        }
    }
}

/// Compute a leaper attack set by offsetting `sq` by each step that stays
/// on the board.
fn step_attacks(sq: Square, steps: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let row = i8::try_from(sq.row()).unwrap();
    let file = i8::try_from(sq.file()).unwrap();
    for &(dr, df) in steps {
        let (r, f) = (row + dr, file + df);
        if (0..8).contains(&r) && (0..8).contains(&f) {
            #[allow(clippy::cast_sign_loss)]
            attacks.insert(Square::from_index((r * 8 + f) as u8));
        }
    }
    attacks
}

#[must_use]
/// Get the squares a pawn of the given color on `sq` attacks.
/// Pushes are not attacks and are not included.
pub fn pawn(color: Color, sq: Square) -> Bitboard {
    TABLES.pawn[color as usize][sq as usize]
}

#[must_use]
/// Get the squares a knight on `sq` attacks.
pub fn knight(sq: Square) -> Bitboard {
    TABLES.knight[sq as usize]
}

#[must_use]
/// Get the squares a king on `sq` attacks.
pub fn king(sq: Square) -> Bitboard {
    TABLES.king[sq as usize]
}

#[must_use]
/// Get the squares a bishop on `sq` attacks when the board is occupied by
/// `occupancy`.
pub fn bishop(sq: Square, occupancy: Bitboard) -> Bitboard {
    let tables = &*TABLES;
    let index = sq as usize;
    let blockers = occupancy & tables.bishop_masks[index];
    let key = magic::magic_index(blockers, tables.bishop_magics[index], tables.bishop_bits[index]);
    tables.bishop_attacks[index * magic::BISHOP_TABLE_SIZE + key]
}

#[must_use]
/// Get the squares a rook on `sq` attacks when the board is occupied by
/// `occupancy`.
pub fn rook(sq: Square, occupancy: Bitboard) -> Bitboard {
    let tables = &*TABLES;
    let index = sq as usize;
    let blockers = occupancy & tables.rook_masks[index];
    let key = magic::magic_index(blockers, tables.rook_magics[index], tables.rook_bits[index]);
    tables.rook_attacks[index * magic::ROOK_TABLE_SIZE + key]
}

#[must_use]
/// Get the squares a queen on `sq` attacks when the board is occupied by
/// `occupancy`: the union of the rook and bishop attacks from there.
pub fn queen(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop(sq, occupancy) | rook(sq, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test knight attack counts in the corner and center.
    fn knight_counts() {
        assert_eq!(knight(Square::A1).len(), 2);
        assert_eq!(knight(Square::E4).len(), 8);
        assert!(knight(Square::G1).contains(Square::F3));
    }

    #[test]
    /// Test that king attacks cover the surrounding ring.
    fn king_ring() {
        assert_eq!(king(Square::E4).len(), 8);
        assert_eq!(king(Square::A1).len(), 3);
        assert!(king(Square::E1).contains(Square::D2));
    }

    #[test]
    /// Test pawn attack directions for both colors.
    fn pawn_directions() {
        let white = pawn(Color::White, Square::E4);
        assert!(white.contains(Square::D5));
        assert!(white.contains(Square::F5));
        assert_eq!(white.len(), 2);

        let black = pawn(Color::Black, Square::E4);
        assert!(black.contains(Square::D3));
        assert!(black.contains(Square::F3));

        // rim pawns only attack inward
        assert_eq!(pawn(Color::White, Square::A2).len(), 1);
    }

    #[test]
    /// Test magic-table slider attacks against the slow ray walker on a
    /// spread of random occupancies.
    fn magic_matches_rays() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let occupancy = Bitboard::new(rng.u64(..) & rng.u64(..));
            let sq = Square::from_index(rng.u8(..64));
            assert_eq!(
                bishop(sq, occupancy),
                magic::slider_attacks(Slider::Bishop, sq, occupancy),
            );
            assert_eq!(
                rook(sq, occupancy),
                magic::slider_attacks(Slider::Rook, sq, occupancy),
            );
        }
    }

    #[test]
    /// Test that queen attacks are exactly the rook-bishop union.
    fn queen_union() {
        let occupancy = Square::D4.bb().with_square(Square::F6);
        let sq = Square::D6;
        assert_eq!(
            queen(sq, occupancy),
            rook(sq, occupancy) | bishop(sq, occupancy),
        );
    }
}
