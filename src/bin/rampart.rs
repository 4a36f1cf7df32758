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

//! The UCI front end.
//!
//! The main thread owns stdin and dispatches commands; each `go` runs the
//! search on a scoped worker thread so that `stop` and `quit` stay
//! responsive. Those two commands only touch the shared [`SearchLimit`],
//! never the engine itself, so they go through without waiting for the
//! search to notice.

use rampart::base::{Color, Move, MoveFilter, Position};
use rampart::engine::{
    limit::SearchLimit,
    time::allocate_search_time,
    transposition::DEFAULT_SIZE_MB,
    uci::{Command, GoOption, Message},
    Engine,
};

use std::{
    io::stdin,
    sync::{Arc, Mutex},
    thread::{scope, ScopedJoinHandle},
};

/// The engine name reported in the UCI handshake.
const NAME: &str = concat!("Rampart v", env!("CARGO_PKG_VERSION"));

/// The author reported in the UCI handshake.
const AUTHOR: &str = "the Rampart developers";

/// Run the Rampart UCI engine until `quit` or end of input.
fn main() {
    let limit = Arc::new(SearchLimit::new());
    let engine = Mutex::new(Engine::new(Arc::clone(&limit)));

    scope(|s| {
        let mut search_handle: Option<ScopedJoinHandle<()>> = None;

        loop {
            let mut line = String::new();
            match stdin().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(_) => continue,
            }
            let Ok(command) = Command::parse_line(&line) else {
                // unrecognized lines are ignored, per the protocol
                continue;
            };

            match command {
                Command::Uci => {
                    println!(
                        "{}",
                        Message::Id {
                            name: NAME,
                            author: AUTHOR,
                        },
                    );
                    #[allow(clippy::cast_possible_wrap)]
                    let default = DEFAULT_SIZE_MB as i64;
                    println!(
                        "{}",
                        Message::SpinOption {
                            name: "Hash",
                            default,
                            min: 1,
                            max: 4096,
                        },
                    );
                    println!("{}", Message::UciOk);
                }
                Command::IsReady => {
                    println!("{}", Message::ReadyOk);
                }
                Command::SetOption { name, value } => {
                    if name == "Hash" {
                        match value.as_deref().map(str::parse::<usize>) {
                            Some(Ok(size_mb)) => {
                                stop_search(&limit, &mut search_handle);
                                engine.lock().unwrap().ttable.resize(size_mb.clamp(1, 4096));
                            }
                            _ => {
                                // a bad or missing value is ignored
                            }
                        }
                    }
                }
                Command::NewGame => {
                    stop_search(&limit, &mut search_handle);
                    engine.lock().unwrap().new_game();
                }
                Command::Position { fen, moves } => {
                    stop_search(&limit, &mut search_handle);
                    let position = match fen {
                        None => Position::new(),
                        Some(fen) => match Position::from_fen(&fen) {
                            Ok(position) => position,
                            Err(_) => continue,
                        },
                    };
                    let mut guard = engine.lock().unwrap();
                    guard.set_position(position);
                    for token in &moves {
                        // an unmatched token abandons the rest of the list
                        let Some(m) = Move::from_uci(token, &guard.position) else {
                            break;
                        };
                        if guard.position.make(m, MoveFilter::All).is_none() {
                            break;
                        }
                    }
                }
                Command::Go(options) => {
                    stop_search(&limit, &mut search_handle);

                    let side = engine.lock().unwrap().position.side_to_move();
                    let mut depth = None;
                    let mut movetime = None;
                    let mut remaining = None;
                    let mut increment = 0;
                    let mut movestogo = None;
                    let mut infinite = false;
                    for option in options {
                        match option {
                            GoOption::WhiteTime(ms) if side == Color::White => {
                                remaining = Some(ms);
                            }
                            GoOption::BlackTime(ms) if side == Color::Black => {
                                remaining = Some(ms);
                            }
                            GoOption::WhiteInc(ms) if side == Color::White => increment = ms,
                            GoOption::BlackInc(ms) if side == Color::Black => increment = ms,
                            GoOption::MovesToGo(n) => movestogo = Some(n),
                            GoOption::Depth(d) => depth = Some(d),
                            GoOption::MoveTime(ms) => movetime = Some(ms),
                            GoOption::Infinite => infinite = true,
                            GoOption::WhiteTime(_)
                            | GoOption::BlackTime(_)
                            | GoOption::WhiteInc(_)
                            | GoOption::BlackInc(_) => {}
                        }
                    }

                    let duration = if infinite {
                        None
                    } else {
                        allocate_search_time(movetime, remaining, increment, movestogo)
                    };
                    limit.start(duration);

                    // without a depth or a clock, search as deep as the
                    // tables allow
                    let depth = depth.unwrap_or(64);
                    let engine_ref = &engine;
                    search_handle = Some(s.spawn(move || {
                        let report = engine_ref.lock().unwrap().search(depth);
                        println!("{}", Message::BestMove(report.best_move));
                    }));
                }
                Command::Stop => {
                    stop_search(&limit, &mut search_handle);
                }
                Command::Quit => {
                    stop_search(&limit, &mut search_handle);
                    break;
                }
            }
        }
    });
}

/// Trip the limit and wait for any running search to come home.
fn stop_search(limit: &SearchLimit, handle: &mut Option<ScopedJoinHandle<()>>) {
    limit.stop();
    if let Some(running) = handle.take() {
        let _ = running.join();
    }
}
