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

//! Parsing and constructing Universal Chess Interface (UCI) messages.
//!
//! [`Command`] covers the inbound vocabulary the engine understands;
//! [`Message`] covers everything it sends back, so all protocol output
//! flows through one set of `Display` impls. Unrecognized lines parse to
//! an `Err` that the front end is free to ignore, as the protocol
//! recommends.

use crate::base::Move;

use super::search::{MATE_SCORE, MATE_VALUE};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The set of commands the engine understands from the GUI.
pub enum Command {
    /// Begin the UCI handshake; the engine must identify itself and reply
    /// `uciok`.
    Uci,
    /// Ask whether the engine is ready for more commands; always answered
    /// with `readyok`.
    IsReady,
    /// Set an engine parameter.
    SetOption {
        /// The name of the option to set.
        name: String,
        /// The value to set it to, if one was given.
        value: Option<String>,
    },
    /// The next position will come from a fresh game; forget everything.
    NewGame,
    /// Set up a position to search.
    Position {
        /// The FEN to start from, or `None` for the standard starting
        /// position.
        fen: Option<String>,
        /// Coordinate-notation moves to apply from there, still raw: they
        /// are resolved against the position as it evolves.
        moves: Vec<String>,
    },
    /// Start searching the current position.
    Go(Vec<GoOption>),
    /// Abort the running search and report its best move.
    Stop,
    /// Exit the program.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The arguments of a `go` command.
pub enum GoOption {
    /// White's remaining clock time, in milliseconds.
    WhiteTime(u64),
    /// Black's remaining clock time, in milliseconds.
    BlackTime(u64),
    /// White's per-move increment, in milliseconds.
    WhiteInc(u64),
    /// Black's per-move increment, in milliseconds.
    BlackInc(u64),
    /// Moves remaining until the next time control.
    MovesToGo(u64),
    /// Search to exactly this depth, in plies.
    Depth(u32),
    /// Spend exactly this long on the move, in milliseconds.
    MoveTime(u64),
    /// Search until stopped.
    Infinite,
}

/// The result of parsing one line of protocol input.
///
/// Per the UCI convention, errors should generally be logged or ignored
/// rather than answered.
pub type ParseResult = Result<Command, String>;

impl Command {
    /// Parse a single line of UCI input.
    ///
    /// # Errors
    ///
    /// Returns an `Err` describing the problem when the line is not a
    /// recognized UCI command.
    pub fn parse_line(line: &str) -> ParseResult {
        let mut tokens = line.split_ascii_whitespace();
        let first = tokens.next().ok_or("line contains no tokens")?;
        match first {
            "uci" => Ok(Command::Uci),
            "isready" => Ok(Command::IsReady),
            "setoption" => Command::parse_set_option(&mut tokens),
            "ucinewgame" => Ok(Command::NewGame),
            "position" => Command::parse_position(&mut tokens),
            "go" => Command::parse_go(&mut tokens),
            "stop" => Ok(Command::Stop),
            "quit" => Ok(Command::Quit),
            _ => Err(format!("unrecognized UCI command `{first}`")),
        }
    }

    /// Parse a `setoption` line, whose `name` and `value` fields may both
    /// span multiple tokens. Assumes the `setoption` token is consumed.
    fn parse_set_option(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
        match tokens.next() {
            Some("name") => {}
            _ => return Err("expected `name` after `setoption`".into()),
        }

        let mut name = String::new();
        loop {
            match tokens.next() {
                None => {
                    return Ok(Command::SetOption { name, value: None });
                }
                Some("value") => break,
                Some(part) => {
                    if !name.is_empty() {
                        name.push(' ');
                    }
                    name.push_str(part);
                }
            }
        }

        let mut value = String::new();
        for part in tokens {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(part);
        }
        Ok(Command::SetOption {
            name,
            value: Some(value),
        })
    }

    /// Parse a `position` line. Assumes the `position` token is consumed,
    /// so the next token is `startpos` or `fen`.
    fn parse_position(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
        let fen = match tokens.next() {
            Some("startpos") => {
                // an optional `moves` token follows
                None
            }
            Some("fen") => {
                let mut fen = String::new();
                let mut moves = Vec::new();
                let mut in_moves = false;
                for part in tokens {
                    if in_moves {
                        moves.push(part.to_string());
                    } else if part == "moves" {
                        in_moves = true;
                    } else {
                        if !fen.is_empty() {
                            fen.push(' ');
                        }
                        fen.push_str(part);
                    }
                }
                return Ok(Command::Position {
                    fen: Some(fen),
                    moves,
                });
            }
            _ => return Err("expected `startpos` or `fen` after `position`".into()),
        };

        let moves = match tokens.next() {
            Some("moves") => tokens.map(String::from).collect(),
            Some(other) => return Err(format!("unexpected token `{other}` after `startpos`")),
            None => Vec::new(),
        };
        Ok(Command::Position { fen, moves })
    }

    /// Parse a `go` line. Assumes the `go` token is consumed.
    fn parse_go(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
        /// Parse the numeric argument of the option named `key`.
        fn parse_int<T: std::str::FromStr>(key: &str, tok: Option<&str>) -> Result<T, String> {
            tok.ok_or_else(|| format!("`{key}` is missing its argument"))?
                .parse()
                .map_err(|_| format!("`{key}` has a malformed argument"))
        }

        let mut options = Vec::new();
        while let Some(key) = tokens.next() {
            options.push(match key {
                "wtime" => GoOption::WhiteTime(parse_int(key, tokens.next())?),
                "btime" => GoOption::BlackTime(parse_int(key, tokens.next())?),
                "winc" => GoOption::WhiteInc(parse_int(key, tokens.next())?),
                "binc" => GoOption::BlackInc(parse_int(key, tokens.next())?),
                "movestogo" => GoOption::MovesToGo(parse_int(key, tokens.next())?),
                "depth" => GoOption::Depth(parse_int(key, tokens.next())?),
                "movetime" => GoOption::MoveTime(parse_int(key, tokens.next())?),
                "infinite" => GoOption::Infinite,
                _ => return Err(format!("unrecognized option `{key}` for `go`")),
            });
        }
        Ok(Command::Go(options))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A search score as reported on the wire.
pub enum Score {
    /// An ordinary evaluation, in centipawns.
    Cp(i32),
    /// A forced mate in the given number of moves, negative when the
    /// engine is the one being mated.
    Mate(i32),
}

#[must_use]
/// Convert an internal search score into its wire form, translating
/// mate-distance scores into move counts.
pub fn score_from_internal(score: i32) -> Score {
    if score > -MATE_VALUE && score < -MATE_SCORE {
        Score::Mate(-(score + MATE_VALUE) / 2 - 1)
    } else if score > MATE_SCORE && score < MATE_VALUE {
        Score::Mate((MATE_VALUE - score) / 2 + 1)
    } else {
        Score::Cp(score)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Cp(cp) => write!(f, "cp {cp}"),
            Score::Mate(moves) => write!(f, "mate {moves}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The messages the engine sends to the GUI.
pub enum Message<'a> {
    /// Identify the engine at the start of the handshake.
    Id {
        /// The engine's name and version.
        name: &'a str,
        /// The engine's author.
        author: &'a str,
    },
    /// The handshake is complete.
    UciOk,
    /// The engine is ready for more commands.
    ReadyOk,
    /// Announce a configurable integer option during the handshake.
    SpinOption {
        /// The option's name.
        name: &'a str,
        /// Its default value.
        default: i64,
        /// The smallest accepted value.
        min: i64,
        /// The largest accepted value.
        max: i64,
    },
    /// Progress from a completed search iteration.
    Info {
        /// The score of the iteration's best line.
        score: Score,
        /// The iteration's depth, in plies.
        depth: u32,
        /// Legal moves made so far in this search.
        nodes: u64,
        /// Milliseconds elapsed since the search began.
        time: u128,
        /// The principal variation.
        pv: &'a [Move],
    },
    /// The search is finished and this move is the answer.
    BestMove(Move),
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Id { name, author } => {
                writeln!(f, "id name {name}")?;
                write!(f, "id author {author}")
            }
            Message::UciOk => write!(f, "uciok"),
            Message::ReadyOk => write!(f, "readyok"),
            Message::SpinOption {
                name,
                default,
                min,
                max,
            } => write!(
                f,
                "option name {name} type spin default {default} min {min} max {max}",
            ),
            Message::Info {
                score,
                depth,
                nodes,
                time,
                pv,
            } => {
                write!(
                    f,
                    "info score {score} depth {depth} nodes {nodes} time {time} pv",
                )?;
                for m in *pv {
                    write!(f, " {m}")?;
                }
                Ok(())
            }
            Message::BestMove(m) => write!(f, "bestmove {m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Piece, Square};

    #[test]
    /// Test that a plain `startpos` position command parses with and
    /// without a `moves` token.
    fn position_startpos() {
        assert_eq!(
            Command::parse_line("position startpos\n"),
            Ok(Command::Position {
                fen: None,
                moves: Vec::new(),
            }),
        );
        assert_eq!(
            Command::parse_line("position startpos moves e2e4 e7e5\n"),
            Ok(Command::Position {
                fen: None,
                moves: vec!["e2e4".into(), "e7e5".into()],
            }),
        );
    }

    #[test]
    /// Test that a FEN position command keeps all six FEN fields together.
    fn position_fen() {
        assert_eq!(
            Command::parse_line(
                "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1 moves c7c5\n",
            ),
            Ok(Command::Position {
                fen: Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".into()),
                moves: vec!["c7c5".into()],
            }),
        );
    }

    #[test]
    /// Test `go` argument parsing with a full clock description.
    fn go_with_clocks() {
        assert_eq!(
            Command::parse_line("go wtime 300000 btime 300000 winc 2000 binc 2000 movestogo 40\n"),
            Ok(Command::Go(vec![
                GoOption::WhiteTime(300_000),
                GoOption::BlackTime(300_000),
                GoOption::WhiteInc(2000),
                GoOption::BlackInc(2000),
                GoOption::MovesToGo(40),
            ])),
        );
        assert_eq!(
            Command::parse_line("go depth 6\n"),
            Ok(Command::Go(vec![GoOption::Depth(6)])),
        );
        assert_eq!(
            Command::parse_line("go infinite\n"),
            Ok(Command::Go(vec![GoOption::Infinite])),
        );
    }

    #[test]
    /// Test that a multi-word setoption parses its name and value.
    fn setoption_fields() {
        assert_eq!(
            Command::parse_line("setoption name Hash value 64\n"),
            Ok(Command::SetOption {
                name: "Hash".into(),
                value: Some("64".into()),
            }),
        );
    }

    #[test]
    /// Test that junk lines and malformed arguments are rejected, not
    /// mangled.
    fn rejects_garbage() {
        assert!(Command::parse_line("flibbertigibbet\n").is_err());
        assert!(Command::parse_line("go depth banana\n").is_err());
        assert!(Command::parse_line("position e2e4\n").is_err());
        assert!(Command::parse_line("\n").is_err());
    }

    #[test]
    /// Test the mate-score arithmetic in both directions.
    fn mate_conversion() {
        assert_eq!(score_from_internal(MATE_VALUE - 1), Score::Mate(1));
        assert_eq!(score_from_internal(MATE_VALUE - 3), Score::Mate(2));
        assert_eq!(score_from_internal(-(MATE_VALUE - 2)), Score::Mate(-2));
        assert_eq!(score_from_internal(25), Score::Cp(25));
        assert_eq!(score_from_internal(-25), Score::Cp(-25));
    }

    #[test]
    /// Test the wire format of an info line.
    fn info_format() {
        let pv = [
            Move::new(
                Square::E2,
                Square::E4,
                Piece::WhitePawn,
                None,
                false,
                true,
                false,
                false,
            ),
            Move::new(
                Square::E7,
                Square::E5,
                Piece::BlackPawn,
                None,
                false,
                true,
                false,
                false,
            ),
        ];
        let message = Message::Info {
            score: Score::Cp(13),
            depth: 3,
            nodes: 4521,
            time: 12,
            pv: &pv,
        };
        assert_eq!(
            message.to_string(),
            "info score cp 13 depth 3 nodes 4521 time 12 pv e2e4 e7e5",
        );
        assert_eq!(
            Message::BestMove(pv[0]).to_string(),
            "bestmove e2e4",
        );
    }
}
