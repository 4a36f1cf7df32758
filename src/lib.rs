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

#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

//! Rampart is a classical chess engine: a bitboard board representation with
//! magic-multiplier attack lookup, a pseudo-legal move generator with
//! make/unmake and incremental Zobrist hashing, a principal-variation
//! searcher backed by a transposition table, and a tapered piece-square
//! evaluation.
//!
//! The crate is split in two:
//!
//! - [`base`] contains everything needed to play chess correctly: board
//!   state, attack tables, move generation, hashing, FEN, and perft.
//! - [`engine`] contains everything needed to play chess *well*: evaluation,
//!   the transposition table, search, and time management, along with the
//!   UCI message types used to talk to a front end.

pub mod base;
pub mod engine;
