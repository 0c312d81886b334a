/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use crate::Bitboard;

/// Represents a single square on the `8x8` board shared by all four armies.
///
/// Encoded as `square = file + rank * 8`, so `a1 = 0` and `h8 = 63`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);
    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);
    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);
    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    /// Constructs a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use chaturaji::{Square, File, Rank};
    /// assert_eq!(Square::new(File::D, Rank::ONE).to_string(), "d1");
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 + rank.0 * 8)
    }

    /// Constructs a new [`Square`] from the provided index, if it lies on the board.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!("Invalid index for Square: Must be between [0,63]. Got {index}.");
        }
        Ok(Self::from_index_unchecked(index))
    }

    /// Constructs a new [`Square`] from the provided index, without bounds checking.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        Self(index as u8)
    }

    /// Returns this [`Square`]'s index, for use in table lookups.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the [`File`] this square lies on.
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 % 8)
    }

    /// Returns the [`Rank`] this square lies on.
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 / 8)
    }

    /// Returns a [`Bitboard`] with only this square's bit set.
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Offsets this square by `df` files and `dr` ranks, yielding `None` if the
    /// result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use chaturaji::Square;
    /// assert_eq!(Square::A1.offset(1, 1), Some("b2".parse().unwrap()));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file().0 as i8 + df;
        let rank = self.rank().0 as i8 + dr;

        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Self::new(File(file as u8), Rank(rank as u8)))
        }
    }

    /// Iterator over all 64 squares, in index order.
    #[inline(always)]
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index_unchecked)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    /// Parses coordinate notation like `a1` or `h8` (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let file = chars
            .next()
            .ok_or_else(|| anyhow!("Invalid Square {s:?}: no file char"))?;
        let rank = chars
            .next()
            .ok_or_else(|| anyhow!("Invalid Square {s:?}: no rank char"))?;

        if chars.next().is_some() {
            bail!("Invalid Square {s:?}: must be exactly 2 characters");
        }

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }
}

impl fmt::Display for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

/// A column of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    /// Number of files on the board.
    pub const COUNT: usize = 8;

    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    /// Parses a file from its character, `a` through `h` (case-insensitive).
    #[inline(always)]
    pub fn from_char(c: char) -> Result<Self> {
        let index = c.to_ascii_lowercase() as i16 - 'a' as i16;
        if !(0..8).contains(&index) {
            bail!("Invalid char for File: Must be between [a,h]. Got {c:?}.");
        }
        Ok(Self(index as u8))
    }

    /// Returns this [`File`]'s index, for use in table lookups.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterator over all files, `a` through `h`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for File {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + self.0) as char)
    }
}

impl fmt::Debug for File {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

/// A row of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    /// Number of ranks on the board.
    pub const COUNT: usize = 8;

    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    /// Parses a rank from its character, `1` through `8`.
    #[inline(always)]
    pub fn from_char(c: char) -> Result<Self> {
        let index = c as i16 - '1' as i16;
        if !(0..8).contains(&index) {
            bail!("Invalid char for Rank: Must be between [1,8]. Got {c:?}.");
        }
        Ok(Self(index as u8))
    }

    /// Returns this [`Rank`]'s index, for use in table lookups.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterator over all ranks, `1` through `8`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for Rank {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl fmt::Debug for Rank {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::A1);
        assert_eq!("H8".parse::<Square>().unwrap(), Square::H8);
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Square::A1.offset(7, 7), Some(Square::H8));
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H8.offset(1, 0), None);
        assert_eq!(Square::D1.offset(0, -1), None);
    }
}
