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

//! Time management: converting a clock situation into a per-move budget.

use std::time::Duration;

/// The number of moves assumed to remain when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Safety margin subtracted from comfortable allocations, in milliseconds,
/// so the engine answers before its flag falls.
const SAFETY_MARGIN_MS: u64 = 50;

/// Allocations above this threshold can afford the safety margin.
const MARGIN_THRESHOLD_MS: u64 = 1500;

#[must_use]
/// Decide how long to search, given the `go` arguments that apply to the
/// side to move.
///
/// A fixed `movetime` is allocated exactly. Otherwise the remaining time
/// is split evenly across the moves still to go, a small safety margin is
/// taken off comfortable budgets, and the per-move increment is added
/// back. With no clock at all, the search is untimed and `None` is
/// returned.
pub fn allocate_search_time(
    movetime: Option<u64>,
    remaining: Option<u64>,
    increment: u64,
    movestogo: Option<u64>,
) -> Option<Duration> {
    if let Some(fixed) = movetime {
        return Some(Duration::from_millis(fixed));
    }
    let remaining = remaining?;
    let mut budget = remaining / movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
    if budget > MARGIN_THRESHOLD_MS {
        budget -= SAFETY_MARGIN_MS;
    }
    Some(Duration::from_millis(budget + increment))
}
