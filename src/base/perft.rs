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

//! Perft, the move-generation integrity check.
//!
//! `perft(position, d)` counts the leaf nodes of the legal game tree `d`
//! plies deep. The counts for well-known positions are published to many
//! depths, so any divergence pinpoints a generation or make/unmake bug
//! almost immediately.

use super::{movegen::generate_moves, MoveFilter, MoveList, Position};

#[must_use]
/// Count the leaf nodes of the legal move tree of `position` at `depth`.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut list = MoveList::new();
    generate_moves(position, &mut list);
    let mut total = 0;
    for i in 0..list.len() {
        if let Some(undo) = position.make(list[i], MoveFilter::All) {
            total += perft(position, depth - 1);
            position.unmake(undo);
        }
    }
    total
}
