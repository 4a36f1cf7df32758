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

//! Static position evaluation.
//!
//! Two scores are accumulated per side, one weighted for the middlegame
//! and one for the endgame, then blended by a game-phase counter derived
//! from the material left on the board. On top of the piece-square tables
//! come pawn-structure terms (doubled, isolated, passed), rook and king
//! file-openness terms, bishop and queen mobility, and a small king
//! shield.

use crate::base::{attacks, Bitboard, Color, Piece, PieceKind, Position, Square};

use super::pst::{self, GAME_PHASE_INC};

use once_cell::sync::Lazy;

/// Penalty per pawn for each doubled pawn on a file, middlegame.
const DOUBLED_PAWN_MG: i32 = -5;
/// Penalty per pawn for each doubled pawn on a file, endgame.
const DOUBLED_PAWN_EG: i32 = -10;

/// Penalty for a pawn with no friendly pawn on an adjacent file,
/// middlegame.
const ISOLATED_PAWN_MG: i32 = -5;
/// Penalty for a pawn with no friendly pawn on an adjacent file, endgame.
const ISOLATED_PAWN_EG: i32 = -10;

/// Bonus for a passed pawn, indexed by its rank counted from the owner's
/// side of the board.
const PASSED_PAWN_BONUS: [i32; 8] = [0, 10, 30, 50, 75, 100, 150, 200];

/// Bonus for a rook on a file with no friendly pawns; the same amount is
/// charged to a king standing on one.
const SEMI_OPEN_FILE: i32 = 10;

/// Additional bonus for a rook on a file with no pawns at all; likewise
/// charged to an exposed king.
const OPEN_FILE: i32 = 15;

/// Mobility is counted relative to these baselines (values from Fruit
/// Reloaded).
const BISHOP_MOBILITY_UNIT: i32 = 4;
const QUEEN_MOBILITY_UNIT: i32 = 9;

/// Mobility weights per reachable square (values from Fruit Reloaded).
const BISHOP_MOBILITY_MG: i32 = 5;
const BISHOP_MOBILITY_EG: i32 = 5;
const QUEEN_MOBILITY_MG: i32 = 1;
const QUEEN_MOBILITY_EG: i32 = 2;

/// Bonus per friendly piece adjacent to the king.
const KING_SHIELD: i32 = 5;

/// File and span masks used by the pawn-structure and file-openness terms.
struct EvalMasks {
    /// The full file through each square.
    file: [Bitboard; Square::NUM],
    /// The files adjacent to each square's file.
    adjacent: [Bitboard; Square::NUM],
    /// For each color and square, the squares a pawn there must pass:
    /// same and adjacent files, strictly ahead from the owner's point of
    /// view.
    front_span: [[Bitboard; Square::NUM]; 2],
}

static MASKS: Lazy<EvalMasks> = Lazy::new(|| {
    let mut masks = EvalMasks {
        file: [Bitboard::EMPTY; Square::NUM],
        adjacent: [Bitboard::EMPTY; Square::NUM],
        front_span: [[Bitboard::EMPTY; Square::NUM]; 2],
    };
    for index in 0..Square::NUM {
        let sq = Square::from_index(index as u8);
        let (row, file) = (sq.row(), sq.file());
        for other_index in 0..Square::NUM {
            let other = Square::from_index(other_index as u8);
            let same_file = other.file() == file;
            let near_file = other.file().abs_diff(file) <= 1;
            if same_file {
                masks.file[index].insert(other);
            }
            if near_file && !same_file {
                masks.adjacent[index].insert(other);
            }
            if near_file && other.row() < row {
                masks.front_span[Color::White as usize][index].insert(other);
            }
            if near_file && other.row() > row {
                masks.front_span[Color::Black as usize][index].insert(other);
            }
        }
    }
    masks
});

#[allow(clippy::cast_possible_wrap)]
#[must_use]
/// Evaluate `position` statically, in centipawns from the side to move's
/// perspective.
pub fn evaluate(position: &Position) -> i32 {
    let tables = &*pst::TABLES;
    let masks = &*MASKS;
    let occupancy = position.all_pieces();

    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];
    let mut phase = 0i32;

    for piece in Piece::ALL {
        let color = piece.color();
        let side = color as usize;
        let kind = piece.kind();
        let own_pawns = position.pieces(Piece::new(color, PieceKind::Pawn));
        let enemy_pawns = position.pieces(Piece::new(!color, PieceKind::Pawn));
        let all_pawns = own_pawns | enemy_pawns;

        for sq in position.pieces(piece) {
            let index = sq as usize;
            mg[side] += tables.mg[piece as usize][index];
            eg[side] += tables.eg[piece as usize][index];
            phase += GAME_PHASE_INC[kind as usize];

            match kind {
                PieceKind::Pawn => {
                    let on_file = i32::from((own_pawns & masks.file[index]).len());
                    if on_file > 1 {
                        mg[side] += on_file * DOUBLED_PAWN_MG;
                        eg[side] += on_file * DOUBLED_PAWN_EG;
                    }
                    if (own_pawns & masks.adjacent[index]).is_empty() {
                        mg[side] += ISOLATED_PAWN_MG;
                        eg[side] += ISOLATED_PAWN_EG;
                    }
                    if (enemy_pawns & masks.front_span[side][index]).is_empty() {
                        let bonus = PASSED_PAWN_BONUS[sq.relative_rank(color) as usize];
                        mg[side] += bonus;
                        eg[side] += bonus;
                    }
                }
                PieceKind::Bishop => {
                    let reach = i32::from(attacks::bishop(sq, occupancy).len());
                    mg[side] += (reach - BISHOP_MOBILITY_UNIT) * BISHOP_MOBILITY_MG;
                    eg[side] += (reach - BISHOP_MOBILITY_UNIT) * BISHOP_MOBILITY_EG;
                }
                PieceKind::Rook => {
                    if (own_pawns & masks.file[index]).is_empty() {
                        mg[side] += SEMI_OPEN_FILE;
                        eg[side] += SEMI_OPEN_FILE;
                    }
                    if (all_pawns & masks.file[index]).is_empty() {
                        mg[side] += OPEN_FILE;
                        eg[side] += OPEN_FILE;
                    }
                }
                PieceKind::Queen => {
                    let reach = i32::from(attacks::queen(sq, occupancy).len());
                    mg[side] += (reach - QUEEN_MOBILITY_UNIT) * QUEEN_MOBILITY_MG;
                    eg[side] += (reach - QUEEN_MOBILITY_UNIT) * QUEEN_MOBILITY_EG;
                }
                PieceKind::King => {
                    // a king on a half-open file pays what a rook there
                    // would earn
                    if (own_pawns & masks.file[index]).is_empty() {
                        mg[side] -= SEMI_OPEN_FILE;
                        eg[side] -= SEMI_OPEN_FILE;
                    }
                    if (all_pawns & masks.file[index]).is_empty() {
                        mg[side] -= OPEN_FILE;
                        eg[side] -= OPEN_FILE;
                    }
                    let shield =
                        i32::from((attacks::king(sq) & position.occupancy(color)).len());
                    mg[side] += shield * KING_SHIELD;
                    eg[side] += shield * KING_SHIELD;
                }
                PieceKind::Knight => {}
            }
        }
    }

    let us = position.side_to_move() as usize;
    let them = 1 - us;
    let mg_score = mg[us] - mg[them];
    let eg_score = eg[us] - eg[them];
    // clamp in case of early promotions
    let mg_phase = phase.min(24);
    let eg_phase = 24 - mg_phase;
    (mg_score * mg_phase + eg_score * eg_phase) / 24
}
