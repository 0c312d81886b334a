/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Score, Square};

/// Maximum number of moves a single colour can have in any position.
///
/// A full army tops out well below this: one elephant (14), boat (4),
/// horse (8), king (8), and four pawns (3 each) come to 46. Promotions do not
/// multiply moves, since the promotion piece is determined by the arrival
/// square. 64 leaves comfortable headroom.
pub const MAX_NUM_MOVES: usize = 64;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// The kinds of turn a colour can take.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveKind {
    /// A piece relocates to an empty square.
    Quiet,

    /// A piece relocates onto a square occupied by another army's piece,
    /// removing it from the board.
    Capture,

    /// The colour has no legal move and forfeits its turn.
    ///
    /// Never produced by move generation; constructed via [`Move::pass`] so
    /// that an immobile colour can still hand a turn object to whatever is
    /// orchestrating the game.
    Pass,
}

/// A single turn: one piece of one colour moving from one square to another,
/// or a pass.
///
/// The `score` field is filled in by the search when this move is chosen at
/// the root; move generation always produces moves with a zero score.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    color: Color,
    kind: MoveKind,
    score: Score,
}

impl Move {
    /// Constructs a new [`Move`] of the provided kind.
    #[inline(always)]
    pub const fn new(from: Square, to: Square, color: Color, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            color,
            kind,
            score: Score::DRAW,
        }
    }

    /// Constructs the distinguished pass turn for `color`.
    ///
    /// # Example
    /// ```
    /// # use chaturaji::{Color, Move};
    /// let pass = Move::pass(Color::Yellow);
    /// assert!(pass.is_pass());
    /// assert_eq!(pass.color(), Color::Yellow);
    /// ```
    #[inline(always)]
    pub const fn pass(color: Color) -> Self {
        Self::new(Square::A1, Square::A1, color, MoveKind::Pass)
    }

    /// Returns the square this move starts from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Returns the square this move ends on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Returns the colour making this move.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns this move's [`MoveKind`].
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the score attached to this move by the search.
    #[inline(always)]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns `true` if this move captures a piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }

    /// Returns `true` if this move is a pass.
    #[inline(always)]
    pub fn is_pass(&self) -> bool {
        self.kind == MoveKind::Pass
    }

    /// Returns a copy of this move carrying the provided score.
    #[inline(always)]
    pub const fn with_score(self, score: Score) -> Self {
        Self {
            from: self.from,
            to: self.to,
            color: self.color,
            kind: self.kind,
            score,
        }
    }
}

impl fmt::Display for Move {
    /// A move displays as its coordinates, like `a2a3`; a pass displays as `pass`.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            write!(f, "pass")
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mv = Move::new(Square::A2, Square::A1, Color::Red, MoveKind::Quiet);
        assert_eq!(mv.to_string(), "a2a1");
        assert_eq!(Move::pass(Color::Blue).to_string(), "pass");
    }

    #[test]
    fn test_with_score() {
        let mv = Move::new(Square::A2, Square::A1, Color::Red, MoveKind::Quiet);
        let scored = mv.with_score(Score::new(42));
        assert_eq!(scored.score(), Score::new(42));
        assert_eq!(scored.from(), mv.from());
        assert_eq!(scored.to(), mv.to());
    }
}
