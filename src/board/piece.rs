/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Represents one of the four armies.
///
/// Turn order is fixed and cyclic: Red, then Blue, then Yellow, then Green,
/// then Red again. A colour is never removed from the rotation, even after it
/// has lost every piece; such a colour simply has no moves to make.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// Number of colour variants.
    pub const COUNT: usize = 4;

    /// An array of all four colours, in turn order starting with Red.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Red, Self::Blue, Self::Yellow, Self::Green]
    }

    /// Creates a new [`Color`] from a set of bits.
    ///
    /// `bits` must be `[0,3]`.
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits > 3 {
            bail!("Invalid bits for Color: Bits must be between [0,3]. Got {bits}.");
        }
        Ok(Self::from_bits_unchecked(bits))
    }

    /// Creates a new [`Color`] from a set of bits, ignoring safety checks.
    ///
    /// # Panics
    /// If `bits` is greater than `3` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_bits_unchecked(bits: u8) -> Self {
        debug_assert!(
            bits <= 3,
            "Invalid bits for Color: Bits must be between [0,3]"
        );

        // Safety: Since `Color` is a `repr(u8)` enum, we can cast safely here.
        unsafe { std::mem::transmute(bits) }
    }

    /// Returns the colour that moves after this one in the rotation.
    ///
    /// # Example
    /// ```
    /// # use chaturaji::Color;
    /// assert_eq!(Color::Red.next(), Color::Blue);
    /// assert_eq!(Color::Green.next(), Color::Red);
    /// ```
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::from_bits_unchecked((*self as u8 + 1) % Self::COUNT as u8)
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns this colour's lowercase character: `r`, `b`, `y`, or `g`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Red => 'r',
            Self::Blue => 'b',
            Self::Yellow => 'y',
            Self::Green => 'g',
        }
    }

    /// Returns this colour's human-readable name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "b" | "blue" => Ok(Self::Blue),
            "y" | "yellow" => Ok(Self::Yellow),
            "g" | "green" => Ok(Self::Green),
            _ => bail!("Invalid Color {s:?}: expected red, blue, yellow, or green"),
        }
    }
}

impl fmt::Display for Color {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind of a piece, independent of its army.
///
/// The boat is the variant's oddity: it leaps exactly two squares diagonally,
/// so it is not a standard chess mover. The elephant slides like a rook and
/// the horse leaps like a knight.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    King,
    Elephant,
    Horse,
    Boat,
    Pawn,
}

impl PieceKind {
    /// Number of piece kind variants.
    pub const COUNT: usize = 5;

    /// An array of all piece kinds.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::King,
            Self::Elephant,
            Self::Horse,
            Self::Boat,
            Self::Pawn,
        ]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns this kind's uppercase character: `K`, `E`, `H`, `B`, or `P`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::King => 'K',
            Self::Elephant => 'E',
            Self::Horse => 'H',
            Self::Boat => 'B',
            Self::Pawn => 'P',
        }
    }

    /// Returns this kind's human-readable name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::King => "King",
            Self::Elephant => "Elephant",
            Self::Horse => "Horse",
            Self::Boat => "Boat",
            Self::Pawn => "Pawn",
        }
    }
}

impl fmt::Display for PieceKind {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A piece on the board: one [`PieceKind`] owned by one [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Number of distinct (colour, kind) pairs.
    pub const COUNT: usize = Color::COUNT * PieceKind::COUNT;

    /// Constructs a new [`Piece`] of the provided colour and kind.
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Returns this piece's [`Color`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns this piece's [`PieceKind`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns a unique index in `[0, Piece::COUNT)`, for hashing tables.
    ///
    /// # Example
    /// ```
    /// # use chaturaji::{Color, Piece, PieceKind};
    /// let first = Piece::new(Color::Red, PieceKind::King);
    /// let last = Piece::new(Color::Green, PieceKind::Pawn);
    /// assert_eq!(first.index(), 0);
    /// assert_eq!(last.index(), Piece::COUNT - 1);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.color.index() * PieceKind::COUNT + self.kind.index()
    }
}

impl fmt::Display for Piece {
    /// A piece displays as its colour char followed by its kind char, like `rK`.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.kind.char())
    }
}
