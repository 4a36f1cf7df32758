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

//! The transposition table.
//!
//! A fixed-size, direct-mapped cache from position hashes to search
//! results. Each probe lands on exactly one slot (`hash mod len`), each
//! store overwrites unconditionally, and the stored key is compared on
//! probe so a colliding entry is ignored rather than trusted.

use crate::base::Move;

use std::mem::size_of;

/// The default table size in megabytes.
pub const DEFAULT_SIZE_MB: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// How a stored score bounds the true value of its position.
pub enum Bound {
    /// The slot has never been written.
    None,
    /// The score is exact: the search completed inside the window.
    Exact,
    /// The score is a lower bound: the search failed high.
    Lower,
    /// The score is an upper bound: the search failed low.
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// One slot of the transposition table.
pub struct TTEntry {
    /// The full hash of the stored position, compared on probe.
    pub key: u64,
    /// The remaining depth the stored score was searched to.
    pub depth: i32,
    /// How `score` bounds the position's true value.
    pub bound: Bound,
    /// The score the search returned.
    pub score: i32,
    /// The best move found, supplied to move ordering even when the score
    /// itself is unusable.
    pub best_move: Move,
}

impl TTEntry {
    /// The zeroed slot that fills a fresh table.
    const EMPTY: TTEntry = TTEntry {
        key: 0,
        depth: 0,
        bound: Bound::None,
        score: 0,
        best_move: Move::NONE,
    };
}

#[derive(Clone, Debug)]
/// A direct-mapped, always-replace transposition table.
pub struct TTable {
    entries: Vec<TTEntry>,
}

impl TTable {
    #[must_use]
    /// Create a table occupying roughly `size_mb` megabytes.
    /// At least one slot is always allocated.
    pub fn with_size(size_mb: usize) -> TTable {
        let slots = (size_mb * 1024 * 1024 / size_of::<TTEntry>()).max(1);
        TTable {
            entries: vec![TTEntry::EMPTY; slots],
        }
    }

    /// Throw away every stored entry, keeping the allocation.
    /// Done when a new game or position arrives.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }

    /// Reallocate the table to roughly `size_mb` megabytes, dropping all
    /// stored entries.
    pub fn resize(&mut self, size_mb: usize) {
        *self = TTable::with_size(size_mb);
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    /// Look up the entry for `hash`.
    /// Returns `None` when the slot is unwritten or holds a different
    /// position.
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        let entry = self.entries[(hash % self.entries.len() as u64) as usize];
        (entry.bound != Bound::None && entry.key == hash).then_some(entry)
    }

    #[allow(clippy::cast_possible_truncation)]
    /// Store a search result for `hash`, unconditionally evicting whatever
    /// occupied its slot.
    pub fn store(&mut self, hash: u64, depth: i32, bound: Bound, score: i32, best_move: Move) {
        let index = (hash % self.entries.len() as u64) as usize;
        self.entries[index] = TTEntry {
            key: hash,
            depth,
            bound,
            score,
            best_move,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Piece, Square};

    /// A throwaway move for filling entries.
    fn some_move() -> Move {
        Move::new(
            Square::E2,
            Square::E4,
            Piece::WhitePawn,
            None,
            false,
            true,
            false,
            false,
        )
    }

    #[test]
    /// Test that a stored entry is found again with all its fields.
    fn store_probe_round_trip() {
        let mut table = TTable::with_size(1);
        table.store(12345, 7, Bound::Exact, 42, some_move());
        let entry = table.probe(12345).unwrap();
        assert_eq!(entry.depth, 7);
        assert_eq!(entry.bound, Bound::Exact);
        assert_eq!(entry.score, 42);
        assert_eq!(entry.best_move, some_move());
    }

    #[test]
    /// Test that probing an unwritten slot misses.
    fn empty_probe_misses() {
        let table = TTable::with_size(1);
        assert_eq!(table.probe(999), None);
    }

    #[test]
    /// Test that two hashes mapping to the same slot do not answer for one
    /// another: the newcomer evicts, and the key comparison rejects the
    /// old hash.
    fn collision_evicts_and_rejects() {
        let mut table = TTable::with_size(1);
        let slots = table.entries.len() as u64;
        let first = 5;
        let second = 5 + slots;
        table.store(first, 3, Bound::Lower, 10, some_move());
        table.store(second, 1, Bound::Upper, -10, Move::NONE);
        assert_eq!(table.probe(first), None);
        assert_eq!(table.probe(second).unwrap().score, -10);
    }

    #[test]
    /// Test that clearing removes every entry.
    fn clear_empties() {
        let mut table = TTable::with_size(1);
        table.store(77, 2, Bound::Exact, 5, Move::NONE);
        table.clear();
        assert_eq!(table.probe(77), None);
    }

    #[test]
    /// Test that a hash equal to zero is still retrievable, despite the
    /// zeroed empty slots.
    fn zero_hash_is_storable() {
        let mut table = TTable::with_size(1);
        assert_eq!(table.probe(0), None);
        table.store(0, 4, Bound::Exact, 1, Move::NONE);
        assert_eq!(table.probe(0).unwrap().score, 1);
    }
}
