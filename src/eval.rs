/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, PieceKind, Position, Score, Square};

/// Chebyshev distance of a square from the center of the board.
///
/// Fetched from <https://www.chessprogramming.org/Center_Distance>
#[rustfmt::skip]
const CENTER_DIST_CHEBYSHEV: [u8; Square::COUNT] = [
  3, 3, 3, 3, 3, 3, 3, 3,
  3, 2, 2, 2, 2, 2, 2, 3,
  3, 2, 1, 1, 1, 1, 2, 3,
  3, 2, 1, 0, 0, 1, 2, 3,
  3, 2, 1, 0, 0, 1, 2, 3,
  3, 2, 1, 1, 1, 1, 2, 3,
  3, 2, 2, 2, 2, 2, 2, 3,
  3, 3, 3, 3, 3, 3, 3, 3
];

/// Bonus per step of centralization, applied to every piece kind.
const CENTER_BONUS: i32 = 5;

/// Bonus per square a pawn has advanced toward its promotion edge.
const PAWN_ADVANCE_BONUS: i32 = 8;

/// Returns the material value of the provided [`PieceKind`], in hundredths
/// of a pawn.
///
/// The traditional stakes of the variant (pawn 1, boat 2, horse 3,
/// elephant 4, king 5) scaled by 100. The king carries real material value
/// here because it can be captured like any other piece; there is no mate.
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Boat => 200,
        PieceKind::Horse => 300,
        PieceKind::Elephant => 400,
        PieceKind::King => 500,
    }
}

/// Encapsulates the logic of scoring a position.
///
/// There is no "the opponent" in a four-army game, so a score is always
/// anchored to one colour: everything that colour owns counts positively,
/// everything the other three armies own counts negatively. Evaluation is a
/// pure function of the position (same board, same perspective, same score,
/// always), which the transposition table depends on.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    /// The position to evaluate.
    position: &'a Position,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for the provided position.
    #[inline(always)]
    pub const fn new(position: &'a Position) -> Self {
        Self { position }
    }

    /// Evaluate this position from the side-to-move's perspective.
    #[inline(always)]
    pub fn eval(self) -> Score {
        let stm = self.position.side_to_move();
        self.eval_for(stm)
    }

    /// Evaluate this position from `color`'s perspective.
    ///
    /// A positive/high number is good for `color`, a negative number means
    /// the rest of the board collectively outweighs it. Early positions are
    /// strongly negative for everyone: each army starts outnumbered three
    /// to one.
    pub fn eval_for(&self, color: Color) -> Score {
        let mut total = 0;

        for owner in Color::all() {
            let sign = if owner == color { 1 } else { -1 };

            for kind in PieceKind::all() {
                for square in self.position.bitboard(owner, kind) {
                    total += sign * (value_of(kind) + positional(owner, kind, square));
                }
            }
        }

        Score::new(total)
    }
}

/// Returns the positional component of one piece's worth: a centralization
/// bonus, plus an advancement bonus for pawns.
#[inline(always)]
fn positional(color: Color, kind: PieceKind, square: Square) -> i32 {
    let centralization = (3 - CENTER_DIST_CHEBYSHEV[square.index()] as i32) * CENTER_BONUS;

    if kind == PieceKind::Pawn {
        centralization + advancement(color, square) * PAWN_ADVANCE_BONUS
    } else {
        centralization
    }
}

/// Returns how many squares the pawn of `color` on `square` has advanced
/// from its home line toward its promotion edge.
#[inline(always)]
const fn advancement(color: Color, square: Square) -> i32 {
    match color {
        Color::Red => square.rank().index() as i32 - 1,
        Color::Blue => square.file().index() as i32 - 1,
        Color::Yellow => 6 - square.rank().index() as i32,
        Color::Green => 6 - square.file().index() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, MoveKind, Piece};

    #[test]
    fn test_initial_position_is_symmetric() {
        let position = Position::new();
        let evaluator = Evaluator::new(&position);

        let red = evaluator.eval_for(Color::Red);
        for color in [Color::Blue, Color::Yellow, Color::Green] {
            assert_eq!(
                red,
                evaluator.eval_for(color),
                "The rotationally-symmetric start must score the same for every colour"
            );
        }

        // Three armies against one
        assert!(red < Score::DRAW);
    }

    #[test]
    fn test_captures_raise_the_capturer() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::Elephant), Square::A1);
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        position.place(Piece::new(Color::Yellow, PieceKind::Horse), Square::A5);
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);

        let before = Evaluator::new(&position).eval_for(Color::Red);

        let capture = Move::new(Square::A1, Square::A5, Color::Red, MoveKind::Capture);
        let after_board = position.with_move_applied(capture);
        let after = Evaluator::new(&after_board).eval_for(Color::Red);

        assert!(after > before);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let position = Position::new();
        let first = Evaluator::new(&position).eval_for(Color::Yellow);
        let second = Evaluator::new(&position).eval_for(Color::Yellow);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pawn_advancement_counts_from_home() {
        assert_eq!(advancement(Color::Red, Square::A2), 0);
        assert_eq!(advancement(Color::Red, Square::A7), 5);
        assert_eq!(advancement(Color::Yellow, Square::E7), 0);
        assert_eq!(advancement(Color::Green, Square::G4), 0);
    }
}
