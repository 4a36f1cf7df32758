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

//! Search limiting.
//!
//! A search ends either because its clock runs out or because the front
//! end says so. Both arrive through a [`SearchLimit`] shared between the
//! search and the protocol loop: the search polls it every couple of
//! thousand nodes, and a `stop` command trips it from outside without
//! interrupting anything.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

#[derive(Debug)]
/// A limit on how long a search may run.
pub struct SearchLimit {
    /// Whether the search is over, either by deadline or by command.
    over: AtomicBool,
    /// When the current search began.
    start: Mutex<Instant>,
    /// When the current search must end, if it is timed at all.
    deadline: Mutex<Option<Instant>>,
}

impl SearchLimit {
    #[must_use]
    /// Create a limit that never expires on its own.
    pub fn new() -> SearchLimit {
        SearchLimit {
            over: AtomicBool::new(false),
            start: Mutex::new(Instant::now()),
            deadline: Mutex::new(None),
        }
    }

    /// Begin a new search now, allotting it `duration` if one is given and
    /// unlimited time otherwise.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn start(&self, duration: Option<Duration>) {
        let now = Instant::now();
        self.over.store(false, Ordering::Relaxed);
        *self.start.lock().unwrap() = now;
        *self.deadline.lock().unwrap() = duration.map(|d| now + d);
    }

    /// Immediately mark the current search as over.
    pub fn stop(&self) {
        self.over.store(true, Ordering::Relaxed);
    }

    #[must_use]
    /// Poll whether the search is over.
    pub fn is_over(&self) -> bool {
        self.over.load(Ordering::Relaxed)
    }

    /// Check the clock against the deadline, marking the search over if it
    /// has passed. Called periodically from inside the search.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn update_time(&self) {
        if let Some(deadline) = *self.deadline.lock().unwrap() {
            if Instant::now() >= deadline {
                self.over.store(true, Ordering::Relaxed);
            }
        }
    }

    #[must_use]
    /// Get the time elapsed since the current search began.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn elapsed(&self) -> Duration {
        self.start.lock().unwrap().elapsed()
    }
}

impl Default for SearchLimit {
    fn default() -> SearchLimit {
        SearchLimit::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that an untimed limit never expires by itself.
    fn untimed_never_expires() {
        let limit = SearchLimit::new();
        limit.start(None);
        limit.update_time();
        assert!(!limit.is_over());
    }

    #[test]
    /// Test that a stop sticks until the next start.
    fn stop_sticks() {
        let limit = SearchLimit::new();
        limit.start(None);
        limit.stop();
        assert!(limit.is_over());
        limit.start(None);
        assert!(!limit.is_over());
    }

    #[test]
    /// Test that an already-passed deadline trips on the next poll.
    fn deadline_trips() {
        let limit = SearchLimit::new();
        limit.start(Some(Duration::ZERO));
        limit.update_time();
        assert!(limit.is_over());
    }
}
