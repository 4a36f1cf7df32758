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

//! The search: iterative deepening around a principal-variation negamax
//! with alpha-beta pruning, check extension, and a capture-only quiescence
//! search at the leaves.
//!
//! Move ordering works hard so that the alpha-beta windows stay tight: the
//! transposition-table move first, then the previous iteration's principal
//! variation, then captures by most-valuable-victim least-valuable-attacker,
//! then the killer moves of the current ply, and finally quiet moves by
//! their history counters.

use crate::base::{
    movegen::generate_moves, Move, MoveFilter, MoveList, Piece, PieceKind, Position,
};

use super::{
    evaluate::evaluate,
    limit::SearchLimit,
    transposition::{Bound, TTable, DEFAULT_SIZE_MB},
    uci::{score_from_internal, Message},
};

use std::sync::Arc;

/// A score no real evaluation can reach; the widest search window.
pub const INFINITY: i32 = 50_000;

/// The magnitude of a mate-in-zero. Actual mate scores are offset by the
/// ply at which the mate occurs, so that shorter mates score higher.
pub const MATE_VALUE: i32 = 49_000;

/// Scores beyond this threshold are mate-distance scores, not centipawns.
pub const MATE_SCORE: i32 = 48_000;

/// The deepest ply the search will visit; also bounds the PV tables.
pub const MAX_PLY: usize = 64;

/// Ordering score for the transposition-table move.
const HASH_MOVE_SCORE: i32 = 100_000;

/// Ordering score for the principal-variation move of the previous
/// iteration.
const PV_MOVE_SCORE: i32 = 20_000;

/// Base ordering score for captures, under the MVV-LVA offset.
const CAPTURE_SCORE: i32 = 10_000;

/// Ordering scores for the two killer slots.
const KILLER_SCORES: [i32; 2] = [9_000, 8_000];

/// Most-valuable-victim, least-valuable-attacker offsets, indexed by
/// attacker kind then victim kind: capturing a queen with a pawn scores
/// highest, a queen taking a pawn lowest.
#[rustfmt::skip]
const MVV_LVA: [[i32; PieceKind::NUM]; PieceKind::NUM] = [
    [105, 205, 305, 405, 505, 605],
    [104, 204, 304, 404, 504, 604],
    [103, 203, 303, 403, 503, 603],
    [102, 202, 302, 402, 502, 602],
    [101, 201, 301, 401, 501, 601],
    [100, 200, 300, 400, 500, 600],
];

#[derive(Clone, Debug)]
/// What a finished search hands back: the outcome of the deepest completed
/// iteration.
pub struct SearchReport {
    /// The move to play.
    pub best_move: Move,
    /// The score of `best_move`, from the mover's perspective.
    pub score: i32,
    /// The depth of the deepest completed iteration.
    pub depth: u32,
    /// Legal moves made across the whole search.
    pub nodes: u64,
    /// The principal variation, starting with `best_move`.
    pub pv: Vec<Move>,
}

/// The full engine context: the position under search plus every table
/// the search reads or writes. Protocol handlers hold one of these and
/// pass it to the search by mutable reference; nothing lives in statics.
pub struct Engine {
    /// The position being searched, mutated and restored by make/unmake.
    pub position: Position,
    /// The transposition table, kept across searches until a new game or
    /// position clears it.
    pub ttable: TTable,
    /// The shared stop/deadline flag, also visible to the protocol loop.
    pub limit: Arc<SearchLimit>,
    /// The two most recent quiet moves that caused a beta cutoff, reset at
    /// each iterative-deepening root.
    killers: [Move; 2],
    /// Quiet-move history counters, indexed by side, origin, and target.
    /// Accumulates across iterations within one search.
    history: [[[i32; 64]; 64]; 2],
    /// The triangular principal-variation table.
    pv_table: [[Move; MAX_PLY]; MAX_PLY + 1],
    /// The length of the stored variation at each ply.
    pv_length: [usize; MAX_PLY + 1],
    /// Whether the search is still walking the previous iteration's PV.
    follow_pv: bool,
    /// Whether the PV move at the current ply should be ordered first.
    score_pv: bool,
    /// Legal moves made during the current search.
    nodes: u64,
}

impl Engine {
    #[must_use]
    /// Create an engine at the starting position with a default-sized
    /// transposition table.
    pub fn new(limit: Arc<SearchLimit>) -> Engine {
        Engine {
            position: Position::new(),
            ttable: TTable::with_size(DEFAULT_SIZE_MB),
            limit,
            killers: [Move::NONE; 2],
            history: [[[0; 64]; 64]; 2],
            pv_table: [[Move::NONE; MAX_PLY]; MAX_PLY + 1],
            pv_length: [0; MAX_PLY + 1],
            follow_pv: false,
            score_pv: false,
            nodes: 0,
        }
    }

    /// Replace the position under search and clear the transposition
    /// table, whose entries describe lines of the old game.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.ttable.clear();
    }

    /// Reset to the starting position for a fresh game.
    pub fn new_game(&mut self) {
        self.set_position(Position::new());
    }

    #[allow(clippy::cast_possible_wrap)]
    /// Search the current position by iterative deepening up to
    /// `max_depth`, printing an `info` line for each completed iteration,
    /// and return the outcome of the deepest completed one.
    ///
    /// On time-out or an external stop the current iteration is abandoned
    /// and the previous iteration's best move stands. The search honors
    /// whatever deadline [`SearchLimit::start`] was last given.
    pub fn search(&mut self, max_depth: u32) -> SearchReport {
        self.nodes = 0;
        self.follow_pv = false;
        self.score_pv = false;
        self.history = [[[0; 64]; 64]; 2];
        self.pv_table = [[Move::NONE; MAX_PLY]; MAX_PLY + 1];
        self.pv_length = [0; MAX_PLY + 1];

        let mut report = SearchReport {
            best_move: Move::NONE,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: Vec::new(),
        };

        for depth in 1..=max_depth.min(MAX_PLY as u32) {
            self.follow_pv = true;
            self.killers = [Move::NONE; 2];

            let score = self.negamax(-INFINITY, INFINITY, depth as i32, 0, true);

            if self.limit.is_over() {
                if report.best_move.is_none() && !self.pv_table[0][0].is_none() {
                    // nothing completed yet; the interrupted iteration's
                    // best guess beats resigning
                    report.best_move = self.pv_table[0][0];
                    report.score = score;
                    report.depth = depth;
                    report.nodes = self.nodes;
                }
                break;
            }

            report = SearchReport {
                best_move: self.pv_table[0][0],
                score,
                depth,
                nodes: self.nodes,
                pv: self.pv_table[0][..self.pv_length[0]].to_vec(),
            };
            println!(
                "{}",
                Message::Info {
                    score: score_from_internal(score),
                    depth,
                    nodes: self.nodes,
                    time: self.limit.elapsed().as_millis(),
                    pv: &report.pv,
                },
            );
        }

        report
    }

    #[allow(clippy::cast_possible_wrap)]
    /// The principal-variation negamax.
    ///
    /// Returns the score of the position from the side to move's
    /// perspective, bounded by the `(alpha, beta)` window. A return of 0
    /// from a non-root frame after the limit has tripped is a discarded
    /// sentinel, not a real score.
    fn negamax(&mut self, mut alpha: i32, mut beta: i32, mut depth: i32, ply: usize, is_root: bool) -> i32 {
        if self.nodes & 2047 == 0 {
            self.limit.update_time();
        }

        if ply >= MAX_PLY {
            return evaluate(&self.position);
        }

        self.pv_length[ply] = ply;

        // an interior position reached a third time is a draw
        if !is_root && self.position.is_repetition() {
            return 0;
        }

        if depth == 0 {
            return self.quiescence(alpha, beta, ply);
        }

        let pv_node = beta - alpha > 1;
        let alpha_orig = alpha;

        let mut tt_move = Move::NONE;
        if let Some(entry) = self.ttable.probe(self.position.hash()) {
            // the stored move seeds ordering even when the score is too
            // shallow to trust
            tt_move = entry.best_move;
            if !is_root && entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                    Bound::None => {}
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let in_check = self.position.in_check();
        if in_check {
            depth += 1;
        }

        let mut list = MoveList::new();
        generate_moves(&self.position, &mut list);
        if self.follow_pv {
            self.enable_pv_scoring(&list, ply);
        }
        self.sort_moves(&mut list, tt_move, ply);

        let us = self.position.side_to_move() as usize;
        let mut legal_moves = 0u32;
        let mut moves_searched = 0u32;
        let mut best = -INFINITY;

        for i in 0..list.len() {
            let m = list[i];
            let Some(undo) = self.position.make(m, MoveFilter::All) else {
                continue;
            };
            self.nodes += 1;
            legal_moves += 1;

            let mut score = -INFINITY;
            if !pv_node || moves_searched > 0 {
                // a null window proves the move is worse than alpha, or
                // fails high cheaply
                score = -self.negamax(-alpha - 1, -alpha, depth - 1, ply + 1, false);
            }
            if pv_node && (moves_searched == 0 || (score > alpha && score < beta)) {
                // first move of a PV node, or a null-window surprise:
                // search again with the full window
                score = -self.negamax(-beta, -alpha, depth - 1, ply + 1, false);
            }

            self.position.unmake(undo);

            if !is_root && self.limit.is_over() {
                return 0;
            }
            moves_searched += 1;

            if score > best {
                best = score;

                self.pv_table[ply][ply] = m;
                for next in (ply + 1)..self.pv_length[ply + 1] {
                    self.pv_table[ply][next] = self.pv_table[ply + 1][next];
                }
                self.pv_length[ply] = self.pv_length[ply + 1];

                if score > alpha {
                    alpha = score;
                    if score >= beta {
                        if !m.is_capture() {
                            self.killers[1] = self.killers[0];
                            self.killers[0] = m;
                            self.history[us][m.from_square() as usize]
                                [m.to_square() as usize] += depth * depth;
                        }
                        break;
                    }
                }
            } else {
                // moves that fail to improve lose standing for later
                // ordering
                self.history[us][m.from_square() as usize][m.to_square() as usize] -=
                    depth * depth;
            }

            if is_root && self.limit.is_over() {
                break;
            }
        }

        if legal_moves == 0 {
            // mate-distance scoring prefers the shortest mate
            return if in_check { -MATE_VALUE + ply as i32 } else { 0 };
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.ttable
            .store(self.position.hash(), depth, bound, best, self.pv_table[ply][ply]);

        alpha
    }

    /// Quiescence search: keep resolving captures until the position is
    /// quiet enough for the static evaluation to be trusted.
    fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.nodes & 2047 == 0 {
            self.limit.update_time();
        }

        if self.position.is_repetition() {
            return 0;
        }

        if ply >= MAX_PLY {
            return evaluate(&self.position);
        }

        // stand pat: capturing is never forced
        let eval = evaluate(&self.position);
        if eval >= beta {
            return beta;
        }
        if eval > alpha {
            alpha = eval;
        }

        let mut list = MoveList::new();
        generate_moves(&self.position, &mut list);
        self.sort_moves(&mut list, Move::NONE, ply);

        for i in 0..list.len() {
            let m = list[i];
            // the capture filter makes quiet moves fail here
            let Some(undo) = self.position.make(m, MoveFilter::CapturesOnly) else {
                continue;
            };
            self.nodes += 1;

            let score = -self.quiescence(-beta, -alpha, ply + 1);

            self.position.unmake(undo);

            if self.limit.is_over() {
                return 0;
            }

            if score > alpha {
                alpha = score;
                if score >= beta {
                    return beta;
                }
            }
        }

        alpha
    }

    /// When the search is still on the previous iteration's principal
    /// variation, check whether that variation's move at this ply is even
    /// available; if so, flag it for priority ordering, otherwise stop
    /// following the PV.
    fn enable_pv_scoring(&mut self, list: &MoveList, ply: usize) {
        self.follow_pv = false;
        for i in 0..list.len() {
            if list[i] == self.pv_table[0][ply] {
                self.score_pv = true;
                self.follow_pv = true;
            }
        }
    }

    /// Compute the ordering score of a single move.
    fn score_move(&mut self, m: Move, tt_move: Move, ply: usize) -> i32 {
        if !tt_move.is_none() && m == tt_move {
            return HASH_MOVE_SCORE;
        }
        if self.score_pv && self.pv_table[0][ply] == m {
            // scored once per ply, then disabled
            self.score_pv = false;
            return PV_MOVE_SCORE;
        }
        if m.is_capture() {
            let attacker = m.piece().kind() as usize;
            let victim = self.victim_kind(m) as usize;
            return CAPTURE_SCORE + MVV_LVA[attacker][victim];
        }
        if m == self.killers[0] {
            return KILLER_SCORES[0];
        }
        if m == self.killers[1] {
            return KILLER_SCORES[1];
        }
        self.history[m.piece().color() as usize][m.from_square() as usize]
            [m.to_square() as usize]
    }

    /// Identify the kind of the piece a capture removes. En passant
    /// captures land on an empty square; the victim is a pawn.
    fn victim_kind(&self, m: Move) -> PieceKind {
        let them = !self.position.side_to_move();
        for kind in PieceKind::ALL {
            if self
                .position
                .pieces(Piece::new(them, kind))
                .contains(m.to_square())
            {
                return kind;
            }
        }
        PieceKind::Pawn
    }

    /// Sort the move list by descending ordering score.
    /// A selection sort is plenty for a list this small.
    fn sort_moves(&mut self, list: &mut MoveList, tt_move: Move, ply: usize) {
        let mut scores = [0i32; MoveList::CAPACITY];
        for i in 0..list.len() {
            scores[i] = self.score_move(list[i], tt_move, ply);
        }
        for current in 0..list.len() {
            for next in (current + 1)..list.len() {
                if scores[current] < scores[next] {
                    scores.swap(current, next);
                    list.swap(current, next);
                }
            }
        }
    }
}
