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

//! Magic bitboards: perfect hashing from blocker configurations to sliding
//! piece attack sets.
//!
//! For each square and slider kind, a *mask* selects the squares whose
//! occupancy can affect the slider's attacks (the squares along its rays,
//! excluding the board edge). Multiplying the masked blockers by a magic
//! constant and shifting down yields an index into a per-square table that
//! was filled with the true ray attacks for every blocker subset.
//!
//! The magics themselves are found at startup by random trial: a candidate
//! is accepted once the derived mapping is injective over every subset of
//! the mask. A fixed seed makes the search, and therefore the tables,
//! reproducible.

use super::{Bitboard, Square};

/// The number of table slots allotted to each square for rook attacks.
pub const ROOK_TABLE_SIZE: usize = 4096;

/// The number of table slots allotted to each square for bishop attacks.
pub const BISHOP_TABLE_SIZE: usize = 512;

/// The number of random candidates to try before declaring the magic search
/// failed for a square. A successful candidate is normally found within a
/// few thousand trials; exhausting this budget means the generator is
/// broken, which is unrecoverable.
const MAGIC_TRIAL_BUDGET: u32 = 100_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// The two sliding piece kinds that need magic lookup tables.
/// Queens reuse both.
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    /// The single-step movement directions of this slider, as
    /// (row delta, file delta) pairs.
    const fn directions(self) -> [(i8, i8); 4] {
        match self {
            Slider::Bishop => [(-1, -1), (-1, 1), (1, -1), (1, 1)],
            Slider::Rook => [(-1, 0), (1, 0), (0, -1), (0, 1)],
        }
    }

    /// The number of table slots allotted to each square for this slider.
    pub const fn table_size(self) -> usize {
        match self {
            Slider::Bishop => BISHOP_TABLE_SIZE,
            Slider::Rook => ROOK_TABLE_SIZE,
        }
    }
}

#[must_use]
/// Compute the relevant-occupancy mask for a slider on a square: every
/// square along its rays whose occupancy can change the attack set.
/// Squares on the far edge of each ray are excluded, since a piece there
/// can be attacked but never blocks anything beyond itself.
pub fn relevant_mask(slider: Slider, sq: Square) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for (dr, df) in slider.directions() {
        let mut row = i8::try_from(sq.row()).unwrap() + dr;
        let mut file = i8::try_from(sq.file()).unwrap() + df;
        // stop one square short of the edge in the travel direction
        while (0..8).contains(&(row + dr)) && (0..8).contains(&(file + df)) {
            mask.insert(square_at(row, file));
            row += dr;
            file += df;
        }
    }
    mask
}

#[must_use]
/// Compute the squares attacked by a slider on `sq` when the board is
/// occupied by `blockers`, by walking its rays one square at a time.
///
/// This is slow, and is only used to fill the magic tables at startup and
/// to verify magic candidates; move generation goes through the tables.
pub fn slider_attacks(slider: Slider, sq: Square, blockers: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for (dr, df) in slider.directions() {
        let mut row = i8::try_from(sq.row()).unwrap() + dr;
        let mut file = i8::try_from(sq.file()).unwrap() + df;
        while (0..8).contains(&row) && (0..8).contains(&file) {
            let target = square_at(row, file);
            attacks.insert(target);
            if blockers.contains(target) {
                break;
            }
            row += dr;
            file += df;
        }
    }
    attacks
}

#[must_use]
/// Produce the `index`th subset of `mask`, enumerating the mask's squares
/// from least to most significant.
///
/// `index` must be below 2 to the power of the mask's population count.
/// This is the inverse of the parallel-bits-extract (PEXT) instruction on
/// x86 architectures.
pub fn index_to_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut occupancy = Bitboard::EMPTY;
    for (bit, sq) in mask.enumerate() {
        if index & (1 << bit) != 0 {
            occupancy.insert(sq);
        }
    }
    occupancy
}

#[allow(clippy::cast_possible_truncation)]
#[must_use]
/// Use magic hashing to compute the table index for a set of masked
/// blockers. `bits` is the population count of the relevant mask.
pub const fn magic_index(blockers: Bitboard, magic: u64, bits: u8) -> usize {
    (blockers.as_u64().wrapping_mul(magic) >> (64 - bits)) as usize
}

/// Search for a magic multiplier for the given square and slider by random
/// trial. The returned constant maps every blocker subset of the square's
/// relevant mask to a distinct table index.
///
/// # Panics
///
/// Panics if no injective multiplier is found within the trial budget.
/// This indicates a broken generator and is unrecoverable.
pub fn find_magic(rng: &mut fastrand::Rng, slider: Slider, sq: Square) -> u64 {
    let mask = relevant_mask(slider, sq);
    let bits = mask.len();
    let subsets = 1usize << bits;

    // precompute every blocker subset and its true attack set
    let mut occupancies = vec![Bitboard::EMPTY; subsets];
    let mut attacks = vec![Bitboard::EMPTY; subsets];
    for index in 0..subsets {
        occupancies[index] = index_to_occupancy(index, mask);
        attacks[index] = slider_attacks(slider, sq, occupancies[index]);
    }

    let mut used = vec![Bitboard::EMPTY; slider.table_size()];
    for _ in 0..MAGIC_TRIAL_BUDGET {
        // sparse candidates are far more likely to hash injectively
        let magic = rng.u64(..) & rng.u64(..) & rng.u64(..);

        // discard candidates that cannot spread the mask's bits into the
        // high byte of the product
        if (mask.as_u64().wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(Bitboard::EMPTY);
        let mut collided = false;
        for index in 0..subsets {
            let key = magic_index(occupancies[index], magic, bits);
            if used[key].is_empty() {
                used[key] = attacks[index];
            } else if used[key] != attacks[index] {
                collided = true;
                break;
            }
        }
        if !collided {
            return magic;
        }
    }

    panic!("magic search failed for {slider:?} on {sq}");
}

/// Build a square from separate row and file coordinates, which the ray
/// walkers have already bounds-checked.
#[allow(clippy::cast_sign_loss)]
fn square_at(row: i8, file: i8) -> Square {
    Square::from_index((row * 8 + file) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test the mask population counts at the extremes: a corner rook sees
    /// 12 relevant squares, a central bishop 9, and a corner bishop 6.
    fn mask_sizes() {
        assert_eq!(relevant_mask(Slider::Rook, Square::A1).len(), 12);
        assert_eq!(relevant_mask(Slider::Rook, Square::E4).len(), 10);
        assert_eq!(relevant_mask(Slider::Bishop, Square::E4).len(), 9);
        assert_eq!(relevant_mask(Slider::Bishop, Square::A1).len(), 6);
    }

    #[test]
    /// Test that masks exclude the board edge along each ray.
    fn mask_excludes_edges() {
        let mask = relevant_mask(Slider::Rook, Square::E4);
        assert!(mask.contains(Square::E2));
        assert!(!mask.contains(Square::E1));
        assert!(mask.contains(Square::B4));
        assert!(!mask.contains(Square::A4));
    }

    #[test]
    /// Test ray attacks on an empty board from a rook's point of view.
    fn rook_rays_open_board() {
        let attacks = slider_attacks(Slider::Rook, Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 14);
        assert!(attacks.contains(Square::D8));
        assert!(attacks.contains(Square::D1));
        assert!(attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
        assert!(!attacks.contains(Square::E5));
    }

    #[test]
    /// Test that a blocker stops a ray but is itself attacked.
    fn blocker_terminates_ray() {
        let blockers = Square::D6.bb();
        let attacks = slider_attacks(Slider::Rook, Square::D4, blockers);
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
        assert!(!attacks.contains(Square::D8));
    }

    #[test]
    /// Test that subset enumeration produces each subset exactly once.
    fn occupancy_enumeration() {
        let mask = relevant_mask(Slider::Bishop, Square::A1);
        let subsets = 1 << mask.len();
        let mut seen = std::collections::HashSet::new();
        for index in 0..subsets {
            let occ = index_to_occupancy(index, mask);
            assert_eq!(occ & !mask, Bitboard::EMPTY);
            assert!(seen.insert(occ.as_u64()));
        }
        assert_eq!(seen.len(), subsets);
    }

    #[test]
    /// Test that a found magic is injective over every blocker subset.
    fn found_magic_is_injective() {
        let mut rng = fastrand::Rng::with_seed(99);
        let sq = Square::E4;
        let magic = find_magic(&mut rng, Slider::Bishop, sq);
        let mask = relevant_mask(Slider::Bishop, sq);
        let bits = mask.len();

        let mut table = vec![Bitboard::EMPTY; BISHOP_TABLE_SIZE];
        for index in 0..(1 << bits) {
            let occ = index_to_occupancy(index, mask);
            let want = slider_attacks(Slider::Bishop, sq, occ);
            let key = magic_index(occ, magic, bits);
            assert!(table[key].is_empty() || table[key] == want);
            table[key] = want;
        }
    }
}
