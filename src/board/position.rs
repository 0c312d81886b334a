/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Bitboard, Color, File, Move, Piece, PieceKind, Rank, Square, ZobristKey};

/// Whether the game has concluded.
///
/// This doubles as the search's "stop descending" signal: a position that is
/// [`GameStatus::Over`] is terminal regardless of remaining depth.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameStatus {
    /// At least two armies still have pieces on the board.
    InProgress,

    /// Fewer than two armies remain; no further play is possible.
    Over,
}

/// A snapshot of the game: piece placement for all four armies, the colour to
/// move, and an incrementally-maintained fingerprint.
///
/// Positions are value-like. Applying a move goes through
/// [`Position::with_move_applied`], which copies the receiver and mutates the
/// copy, so sibling search branches never observe each other's changes. The
/// whole struct is a handful of fixed-size arrays and is cheap to copy; that
/// copy is the only per-node allocation cost the search pays.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One occupancy bitboard per (colour, piece kind).
    pieces: [[Bitboard; PieceKind::COUNT]; Color::COUNT],

    /// The colour whose turn it is.
    side_to_move: Color,

    /// Fingerprint of placement plus side-to-move, kept in sync by
    /// [`Position::place`] and [`Position::take`].
    key: ZobristKey,
}

impl Position {
    /// Constructs an empty [`Position`] with Red to move and no pieces.
    ///
    /// Useful for setting up bespoke positions in tests and analysis.
    #[inline(always)]
    pub fn empty() -> Self {
        let mut key = ZobristKey::default();
        key.hash_side_to_move(Color::Red);

        Self {
            pieces: [[Bitboard::EMPTY_BOARD; PieceKind::COUNT]; Color::COUNT],
            side_to_move: Color::Red,
            key,
        }
    }

    /// Constructs the starting [`Position`]: each army on its own edge of the
    /// board, rotationally symmetric, Red to move.
    ///
    /// Red sits on the south edge and marches north, Blue on the west edge
    /// marching east, Yellow on the north edge marching south, and Green on
    /// the east edge marching west.
    pub fn new() -> Self {
        let mut position = Self::empty();

        for (color, kind, square) in INITIAL_SETUP {
            position.place(Piece::new(color, kind), square);
        }

        position
    }

    /// Returns the colour whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns this position's fingerprint.
    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.key
    }

    /// Returns the occupancy of one (colour, kind) pair.
    #[inline(always)]
    pub const fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Returns the occupancy of all of `color`'s pieces.
    #[inline(always)]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY_BOARD, |acc, bb| acc | *bb)
    }

    /// Returns the occupancy of every piece on the board.
    #[inline(always)]
    pub fn occupancy(&self) -> Bitboard {
        Color::all()
            .into_iter()
            .fold(Bitboard::EMPTY_BOARD, |acc, color| {
                acc | self.color_occupancy(color)
            })
    }

    /// Returns the piece at `square`, if one exists.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        for color in Color::all() {
            for kind in PieceKind::all() {
                if self.bitboard(color, kind).contains(square) {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// Returns `true` if `color` still has at least one piece on the board.
    #[inline(always)]
    pub fn is_active(&self, color: Color) -> bool {
        !self.color_occupancy(color).is_empty()
    }

    /// Returns the number of armies that still have pieces.
    #[inline(always)]
    pub fn active_colors(&self) -> usize {
        Color::all()
            .into_iter()
            .filter(|color| self.is_active(*color))
            .count()
    }

    /// Reports whether the game has concluded.
    ///
    /// The game is over once fewer than two armies remain. Captures only ever
    /// remove pieces, so a position that is over stays over.
    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        if self.active_colors() < 2 {
            GameStatus::Over
        } else {
            GameStatus::InProgress
        }
    }

    /// Returns the last army standing, if the game is over and one remains.
    #[inline(always)]
    pub fn winner(&self) -> Option<Color> {
        match self.status() {
            GameStatus::Over => Color::all().into_iter().find(|c| self.is_active(*c)),
            GameStatus::InProgress => None,
        }
    }

    /// Places `piece` on `square`, updating the fingerprint.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.pieces[piece.color().index()][piece.kind().index()].set(square);
        self.key.hash_piece(square, piece);
    }

    /// Removes and returns the piece on `square`, if any, updating the fingerprint.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.pieces[piece.color().index()][piece.kind().index()].clear(square);
        self.key.hash_piece(square, piece);
        Some(piece)
    }

    /// Sets the colour to move, updating the fingerprint.
    ///
    /// The fingerprint covers the side-to-move, so the same placement under a
    /// different mover never aliases in the transposition table.
    #[inline(always)]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.key.hash_side_to_move(self.side_to_move);
        self.side_to_move = color;
        self.key.hash_side_to_move(color);
    }

    /// Applies the provided [`Move`]: capture removal, piece relocation, any
    /// promotion, and the turn advancing to the mover's successor.
    ///
    /// No enforcement of legality; moves from [`Position::generate_moves`]
    /// are always sound here. A move whose source square is empty leaves the
    /// placement untouched but still advances the turn.
    pub fn make_move(&mut self, mv: Move) {
        if !mv.is_pass() {
            if let Some(piece) = self.take(mv.from()) {
                // Capture by displacement
                self.take(mv.to());

                self.place(promoted(piece, mv.to()), mv.to());
            }
        }

        self.set_side_to_move(mv.color().next());
    }

    /// Copies `self` and returns a [`Position`] after having applied the
    /// provided [`Move`].
    ///
    /// # Example
    /// ```
    /// # use chaturaji::{Color, Position};
    /// let position = Position::new();
    /// let mv = position.generate_moves(Color::Red)[0];
    /// let next = position.with_move_applied(mv);
    /// assert_eq!(next.side_to_move(), Color::Blue);
    /// // The original is untouched
    /// assert_eq!(position, Position::new());
    /// ```
    #[inline(always)]
    pub fn with_move_applied(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }

    /// Copies `self` and returns a [`Position`] with the turn forfeited to
    /// the next colour in the rotation.
    ///
    /// Piece placement is untouched; only the side-to-move (and therefore the
    /// fingerprint) changes.
    #[inline(always)]
    pub fn with_turn_passed(&self) -> Self {
        let mut copied = *self;
        copied.set_side_to_move(self.side_to_move.next());
        copied
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    /// Renders the position as a grid of two-character cells, rank 8 at the
    /// top, followed by the colour to move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " ..")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "---")?;
        }
        writeln!(f)?;

        write!(f, "  ")?;
        for file in File::iter() {
            write!(f, " {file} ")?;
        }
        writeln!(f)?;

        write!(f, "{} to move", self.side_to_move)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        write!(f, "Key: {}", self.key)
    }
}

/// Returns the piece `piece` becomes upon arriving at `to`.
///
/// Pawns reaching their army's far edge promote to the kind that began the
/// game on the arrival square; squares that started empty or held a pawn or
/// king yield a boat. Every other piece (and every non-edge pawn move) is
/// returned unchanged.
#[inline(always)]
fn promoted(piece: Piece, to: Square) -> Piece {
    if piece.kind() == PieceKind::Pawn && is_promotion_square(piece.color(), to) {
        Piece::new(piece.color(), promotion_kind(to))
    } else {
        piece
    }
}

/// Returns `true` if `square` lies on `color`'s far edge.
#[inline(always)]
const fn is_promotion_square(color: Color, square: Square) -> bool {
    match color {
        Color::Red => square.rank().0 == Rank::EIGHT.0,
        Color::Blue => square.file().0 == File::H.0,
        Color::Yellow => square.rank().0 == Rank::ONE.0,
        Color::Green => square.file().0 == File::A.0,
    }
}

/// Returns the [`PieceKind`] a pawn promotes to on `square`: the kind that
/// began the game there, with a boat as the fallback.
#[inline(always)]
const fn promotion_kind(square: Square) -> PieceKind {
    match square {
        Square::B1 | Square::A7 | Square::G8 | Square::H2 => PieceKind::Horse,
        Square::C1 | Square::A6 | Square::F8 | Square::H3 => PieceKind::Elephant,
        _ => PieceKind::Boat,
    }
}

/// Every piece of the starting position, army by army.
const INITIAL_SETUP: [(Color, PieceKind, Square); 32] = {
    use Color::*;
    use PieceKind::*;

    [
        // Red: south edge, marching north
        (Red, Boat, Square::A1),
        (Red, Horse, Square::B1),
        (Red, Elephant, Square::C1),
        (Red, King, Square::D1),
        (Red, Pawn, Square::A2),
        (Red, Pawn, Square::new(File::B, Rank::TWO)),
        (Red, Pawn, Square::new(File::C, Rank::TWO)),
        (Red, Pawn, Square::new(File::D, Rank::TWO)),
        // Blue: west edge, marching east
        (Blue, Boat, Square::A8),
        (Blue, Horse, Square::A7),
        (Blue, Elephant, Square::A6),
        (Blue, King, Square::A5),
        (Blue, Pawn, Square::new(File::B, Rank::FIVE)),
        (Blue, Pawn, Square::new(File::B, Rank::SIX)),
        (Blue, Pawn, Square::new(File::B, Rank::SEVEN)),
        (Blue, Pawn, Square::new(File::B, Rank::EIGHT)),
        // Yellow: north edge, marching south
        (Yellow, Boat, Square::H8),
        (Yellow, Horse, Square::G8),
        (Yellow, Elephant, Square::F8),
        (Yellow, King, Square::E8),
        (Yellow, Pawn, Square::E7),
        (Yellow, Pawn, Square::new(File::F, Rank::SEVEN)),
        (Yellow, Pawn, Square::new(File::G, Rank::SEVEN)),
        (Yellow, Pawn, Square::new(File::H, Rank::SEVEN)),
        // Green: east edge, marching west
        (Green, Boat, Square::H1),
        (Green, Horse, Square::H2),
        (Green, Elephant, Square::H3),
        (Green, King, Square::H4),
        (Green, Pawn, Square::G1),
        (Green, Pawn, Square::new(File::G, Rank::TWO)),
        (Green, Pawn, Square::new(File::G, Rank::THREE)),
        (Green, Pawn, Square::G4),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveKind;

    #[test]
    fn test_initial_setup() {
        let position = Position::new();

        for color in Color::all() {
            assert_eq!(position.color_occupancy(color).population(), 8);
            assert_eq!(position.bitboard(color, PieceKind::Pawn).population(), 4);
            assert_eq!(position.bitboard(color, PieceKind::King).population(), 1);
        }

        assert_eq!(position.occupancy().population(), 32);
        assert_eq!(position.side_to_move(), Color::Red);
        assert_eq!(position.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_apply_does_not_mutate_receiver() {
        let position = Position::new();
        let original = position;

        let mv = Move::new(Square::A2, "a3".parse().unwrap(), Color::Red, MoveKind::Quiet);
        let next = position.with_move_applied(mv);

        assert_eq!(position, original);
        assert_ne!(next, original);
        assert_ne!(next.key(), original.key());
    }

    #[test]
    fn test_capture_removes_exactly_one_piece() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::Elephant), Square::A1);
        position.place(Piece::new(Color::Yellow, PieceKind::Pawn), Square::A5);
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);

        let capture = Move::new(Square::A1, Square::A5, Color::Red, MoveKind::Capture);
        let next = position.with_move_applied(capture);

        assert_eq!(next.color_occupancy(Color::Red).population(), 2);
        assert_eq!(next.color_occupancy(Color::Yellow).population(), 1);
        assert_eq!(
            next.piece_at(Square::A5),
            Some(Piece::new(Color::Red, PieceKind::Elephant))
        );
    }

    #[test]
    fn test_pawn_promotes_on_far_edge() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::Pawn), Square::A7);
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        position.place(Piece::new(Color::Green, PieceKind::King), Square::H4);

        let push = Move::new(Square::A7, Square::A8, Color::Red, MoveKind::Quiet);
        let next = position.with_move_applied(push);

        // a8 began the game holding a boat
        assert_eq!(
            next.piece_at(Square::A8),
            Some(Piece::new(Color::Red, PieceKind::Boat))
        );
        assert!(next.bitboard(Color::Red, PieceKind::Pawn).is_empty());
    }

    #[test]
    fn test_turn_pass_changes_only_the_mover() {
        let position = Position::new();
        let passed = position.with_turn_passed();

        assert_eq!(passed.side_to_move(), Color::Blue);
        assert_eq!(passed.occupancy(), position.occupancy());
        assert_ne!(passed.key(), position.key());
    }

    #[test]
    fn test_status_tracks_active_colors() {
        let mut position = Position::empty();
        assert_eq!(position.status(), GameStatus::Over);

        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        assert_eq!(position.status(), GameStatus::Over);
        assert_eq!(position.winner(), Some(Color::Red));

        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);
        assert_eq!(position.status(), GameStatus::InProgress);
        assert_eq!(position.winner(), None);
    }
}
