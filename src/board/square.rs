/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Represents a single cell on the `8x8` game board.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     00 000 000
///      |  |   |
///      |  |   +- Represents the column.
///      |  +- Represents the row.
///      +- Unused.
/// ```
///
/// so `square = col + row * 8`. Row `0` is the top of the board, where Black starts.
/// White advances towards row `0`, Black towards row `7`.
///
/// In text, a square is written as a file letter followed by a 1-based row number:
/// ```text
///   a  b  c  d  e  f  g  h
/// 1|  0  1  2  3  4  5  6  7
/// 2|  8  9 10 11 12 13 14 15
/// 3| 16 17 18 19 20 21 22 23
/// 4| 24 25 26 27 28 29 30 31
/// 5| 32 33 34 35 36 37 38 39
/// 6| 40 41 42 43 44 45 46 47
/// 7| 48 49 50 51 52 53 54 55
/// 8| 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Number of rows on the board, which is also the number of columns.
    pub const SIDE: u8 = 8;

    const COL_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all squares, row by row.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::new_unchecked(0, 0));
    /// assert_eq!(iter.last().unwrap(), Square::new_unchecked(7, 7));
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from a row and a column.
    ///
    /// Both must be `[0, 7]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// let e7 = Square::new(6, 4);
    /// assert!(e7.is_ok());
    /// assert_eq!(e7.unwrap().to_string(), "e7");
    ///
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if row >= Self::SIDE || col >= Self::SIDE {
            bail!(
                "Invalid coordinates for Square: row and col must be between [0, {}]. Got ({row}, {col})",
                Self::SIDE - 1
            );
        }
        Ok(Self::new_unchecked(row, col))
    }

    /// Creates a new [`Square`] from a row and a column, without error checking.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is greater than `7` and debug assertions are enabled.
    #[inline(always)]
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "Row and col must be between [0,8)");
        Self(row << 3 | col)
    }

    /// Creates a new [`Square`] from signed coordinates, yielding `None` if they fall off the board.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// assert_eq!(Square::from_coords(2, 3), Some(Square::new_unchecked(2, 3)));
    /// assert_eq!(Square::from_coords(-1, 3), None);
    /// assert_eq!(Square::from_coords(2, 8), None);
    /// ```
    #[inline(always)]
    pub const fn from_coords(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < Self::SIDE as i8 && col >= 0 && col < Self::SIDE as i8 {
            Some(Self::new_unchecked(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `63` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < 64, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Parses a [`Square`] from a file letter and a row digit, such as `"e7"`.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// let e7 = Square::from_notation("e7").unwrap();
    /// assert_eq!((e7.row(), e7.col()), (6, 4));
    ///
    /// assert!(Square::from_notation("i1").is_err());
    /// assert!(Square::from_notation("a9").is_err());
    /// ```
    pub fn from_notation(notation: &str) -> Result<Self> {
        let mut chars = notation.trim().chars();
        let (Some(file), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be a file letter followed by a row digit, such as \"e7\". Got {notation:?}");
        };

        let col = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => bail!("Square file must be between [a, h]. Got {file:?}"),
        };

        let row = match row.to_digit(10) {
            Some(digit @ 1..=8) => digit as u8 - 1,
            _ => bail!("Square row must be between [1, 8]. Got {row:?}"),
        };

        Ok(Self::new_unchecked(row, col))
    }

    /// Converts this [`Square`] into its file letter and row digit.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// assert_eq!(Square::new_unchecked(0, 0).to_notation(), "a1");
    /// assert_eq!(Square::new_unchecked(7, 7).to_notation(), "h8");
    /// ```
    pub fn to_notation(&self) -> String {
        format!("{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }

    /// Fetches the row of this [`Square`], `[0, 7]`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 >> 3 // Same as / 8
    }

    /// Fetches the column of this [`Square`], `[0, 7]`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 & Self::COL_MASK // Same as % 8
    }

    /// Fetches the inner index value of the [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts this [`Square`] by the provided row and column deltas.
    ///
    /// Returns `None` if the shift would leave the board.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// let b2 = Square::new_unchecked(1, 1);
    /// assert_eq!(b2.offset(1, 1), Some(Square::new_unchecked(2, 2)));
    /// assert_eq!(b2.offset(-2, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_coords(self.row() as i8 + d_row, self.col() as i8 + d_col)
    }

    /// Computes the number of rows between `self` and `other`.
    #[inline(always)]
    pub const fn distance_rows(&self, other: Self) -> u8 {
        self.row().abs_diff(other.row())
    }

    /// Computes the number of columns between `self` and `other`.
    #[inline(always)]
    pub const fn distance_cols(&self, other: Self) -> u8 {
        self.col().abs_diff(other.col())
    }

    /// Computes the [Chebyshev distance](https://www.chessprogramming.org/Distance) between `self` and `other`.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Square;
    /// let a1 = Square::new_unchecked(0, 0);
    /// assert_eq!(a1.distance_chebyshev(Square::new_unchecked(2, 1)), 2);
    /// assert_eq!(a1.distance_chebyshev(Square::new_unchecked(7, 7)), 7);
    /// ```
    #[inline(always)]
    pub const fn distance_chebyshev(&self, other: Self) -> u8 {
        let rows = self.distance_rows(other);
        let cols = self.distance_cols(other);
        if rows > cols {
            rows
        } else {
            cols
        }
    }

    /// Returns `true` if `other` lies on one of the diagonals through `self`.
    ///
    /// A square is not diagonal to itself.
    #[inline(always)]
    pub const fn is_diagonal_to(&self, other: Self) -> bool {
        let rows = self.distance_rows(other);
        rows != 0 && rows == self.distance_cols(other)
    }

    /// Returns `true` if `other` shares a row, column, or diagonal with `self`.
    #[inline(always)]
    pub const fn is_aligned_with(&self, other: Self) -> bool {
        self.0 != other.0
            && (self.row() == other.row() || self.col() == other.col() || self.is_diagonal_to(other))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_notation`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Square {
    /// Calls [`Square::to_notation`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_notation().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Displays the notation of the square along with its `(row, col)` coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.to_notation(), self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // The four corners
        assert_eq!(Square::new_unchecked(0, 0).to_string(), "a1");
        assert_eq!(Square::new_unchecked(0, 7).to_string(), "h1");
        assert_eq!(Square::new_unchecked(7, 0).to_string(), "a8");
        assert_eq!(Square::new_unchecked(7, 7).to_string(), "h8");

        // And some arbitrary location near the middle
        let d4 = Square::new_unchecked(3, 3);
        assert_eq!(d4.to_string(), "d4");
        assert_eq!(d4.index(), 27);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::new_unchecked(0, 0));
        assert_eq!("H8".parse::<Square>().unwrap(), Square::new_unchecked(7, 7));
        assert_eq!(" e5 ".parse::<Square>().unwrap(), Square::new_unchecked(4, 4));

        assert!("".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e10".parse::<Square>().is_err());
        assert!("e0".parse::<Square>().is_err());
        assert!("z4".parse::<Square>().is_err());
    }

    #[test]
    fn test_offsets_stay_on_board() {
        for square in Square::iter() {
            for d_row in -8..=8 {
                for d_col in -8..=8 {
                    if let Some(shifted) = square.offset(d_row, d_col) {
                        assert!(shifted.row() < 8 && shifted.col() < 8);
                        assert_eq!(shifted.row() as i8, square.row() as i8 + d_row);
                        assert_eq!(shifted.col() as i8, square.col() as i8 + d_col);
                    }
                }
            }
        }
    }

    #[test]
    fn test_alignment() {
        let c3 = Square::new_unchecked(2, 2);
        assert!(c3.is_diagonal_to(Square::new_unchecked(5, 5)));
        assert!(c3.is_diagonal_to(Square::new_unchecked(0, 4)));
        assert!(!c3.is_diagonal_to(c3));
        assert!(!c3.is_diagonal_to(Square::new_unchecked(3, 5)));

        assert!(c3.is_aligned_with(Square::new_unchecked(2, 7)));
        assert!(c3.is_aligned_with(Square::new_unchecked(6, 2)));
        assert!(!c3.is_aligned_with(Square::new_unchecked(3, 4)));
    }
}
