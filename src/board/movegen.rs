/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, Move, MoveKind, MoveList, PieceKind, Position, Square};

/// King movement: one square in any of the eight directions.
const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Horse movement: the standard knight leap.
const HORSE_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Boat movement: exactly two squares diagonally, jumping the square between.
const BOAT_DELTAS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// Elephant movement: the four orthogonal ray directions.
const ELEPHANT_DELTAS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// The direction each army's pawns advance, as `(file delta, rank delta)`.
///
/// Indexed by [`Color`]: Red marches north, Blue east, Yellow south, Green west.
const PAWN_DIRECTIONS: [(i8, i8); Color::COUNT] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Builds a per-square attack table for a leaping piece at compile time.
const fn leaper_table<const N: usize>(deltas: [(i8, i8); N]) -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < N {
            let (df, dr) = deltas[j];
            if let Some(to) = from.offset(df, dr) {
                table[i] = table[i].or(to.bitboard());
            }
            j += 1;
        }
        i += 1;
    }

    table
}

const KING_MOVES: [Bitboard; Square::COUNT] = leaper_table(KING_DELTAS);
const HORSE_MOVES: [Bitboard; Square::COUNT] = leaper_table(HORSE_DELTAS);
const BOAT_MOVES: [Bitboard; Square::COUNT] = leaper_table(BOAT_DELTAS);

/// Computes the squares an elephant on `from` attacks, given `occupied`.
///
/// Walks each orthogonal ray until it leaves the board or meets a piece; the
/// first occupied square is included, so captures fall out of the same mask.
fn elephant_attacks(from: Square, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for (df, dr) in ELEPHANT_DELTAS {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            attacks.set(to);
            if occupied.contains(to) {
                break;
            }
            current = to;
        }
    }

    attacks
}

impl Position {
    /// Produces every legal move for `color` in this position.
    ///
    /// The variant has no notion of check, so pseudo-legal and legal
    /// coincide: any relocation onto a square not occupied by a friendly
    /// piece is playable. An empty list is a legal outcome (the colour may
    /// have lost every piece, or have every pawn blocked) and the caller is
    /// expected to treat it as a skipped turn, not an error.
    ///
    /// Generation order is deterministic: piece kinds in declaration order,
    /// source squares ascending, leaper targets ascending. No capture-first
    /// or other heuristic ordering is applied; the search consumes this order
    /// as-is.
    pub fn generate_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        let friendly = self.color_occupancy(color);
        let occupied = self.occupancy();

        for kind in PieceKind::all() {
            for from in self.bitboard(color, kind) {
                if kind == PieceKind::Pawn {
                    self.pawn_moves(color, from, occupied, friendly, &mut moves);
                    continue;
                }

                let targets = match kind {
                    PieceKind::King => KING_MOVES[from.index()],
                    PieceKind::Horse => HORSE_MOVES[from.index()],
                    PieceKind::Boat => BOAT_MOVES[from.index()],
                    PieceKind::Elephant => elephant_attacks(from, occupied),
                    PieceKind::Pawn => unreachable!(),
                };

                for to in targets & !friendly {
                    let move_kind = if occupied.contains(to) {
                        MoveKind::Capture
                    } else {
                        MoveKind::Quiet
                    };
                    moves.push(Move::new(from, to, color, move_kind));
                }
            }
        }

        moves
    }

    /// Appends the moves of the pawn of `color` on `from`.
    ///
    /// One straight step toward the army's far edge if that square is empty,
    /// and a capture onto each of the two diagonal squares toward that edge
    /// that holds another army's piece.
    fn pawn_moves(
        &self,
        color: Color,
        from: Square,
        occupied: Bitboard,
        friendly: Bitboard,
        moves: &mut MoveList,
    ) {
        let (df, dr) = PAWN_DIRECTIONS[color.index()];

        if let Some(to) = from.offset(df, dr) {
            if !occupied.contains(to) {
                moves.push(Move::new(from, to, color, MoveKind::Quiet));
            }
        }

        // The two capture diagonals flank the advance direction
        let diagonals = if df == 0 {
            [(-1, dr), (1, dr)]
        } else {
            [(df, -1), (df, 1)]
        };

        for (cdf, cdr) in diagonals {
            if let Some(to) = from.offset(cdf, cdr) {
                if occupied.contains(to) && !friendly.contains(to) {
                    moves.push(Move::new(from, to, color, MoveKind::Capture));
                }
            }
        }
    }
}
