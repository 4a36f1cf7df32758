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

//! Code which defines the engine's behavior: evaluating positions,
//! searching trees, storing what the search learns, and talking to a UCI
//! front end.

pub mod evaluate;
pub mod limit;
pub mod pst;
pub mod search;
pub mod time;
pub mod transposition;
pub mod uci;

pub use search::{Engine, SearchReport};
