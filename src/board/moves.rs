/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::{Piece, PieceKind, Square};

/// The destinations a single piece can reach.
pub type MoveList = Vec<Square>;

/// How a validated move rearranges the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveKind {
    /// The mover leaves its origin and replaces whatever stood on the destination.
    #[default]
    Relocate,

    /// The mover and the destination's occupant trade squares.
    Swap,
}

/// A request to move whatever stands on `from` to `to`.
///
/// # Example
/// ```
/// # use dualboard::{Move, Square};
/// let mv: Move = "e7e5".parse().unwrap();
/// assert_eq!(mv.from(), Square::new_unchecked(6, 4));
/// assert_eq!(mv.to(), Square::new_unchecked(4, 4));
/// assert_eq!(mv.to_string(), "e7e5");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] between two squares.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Fetches the origin of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Signed number of rows travelled.
    #[inline(always)]
    pub const fn d_row(&self) -> i8 {
        self.to.row() as i8 - self.from.row() as i8
    }

    /// Signed number of columns travelled.
    #[inline(always)]
    pub const fn d_col(&self) -> i8 {
        self.to.col() as i8 - self.from.col() as i8
    }

    /// Returns `true` if this move travels exactly two cells along a diagonal.
    #[inline(always)]
    pub const fn is_diagonal_jump(&self) -> bool {
        self.d_row().abs() == 2 && self.d_col().abs() == 2
    }

    /// Returns the square halfway between the endpoints, if the move covers an even number of cells along a line.
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Move, Square};
    /// let jump: Move = "c6e4".parse().unwrap();
    /// assert_eq!(jump.midpoint(), Some(Square::new_unchecked(4, 3)));
    ///
    /// let step: Move = "c6d5".parse().unwrap();
    /// assert_eq!(step.midpoint(), None);
    /// ```
    #[inline(always)]
    pub const fn midpoint(&self) -> Option<Square> {
        let (d_row, d_col) = (self.d_row(), self.d_col());
        if !self.from.is_aligned_with(self.to) || d_row % 2 != 0 || d_col % 2 != 0 {
            return None;
        }
        self.from.offset(d_row / 2, d_col / 2)
    }

    /// Iterates over the squares strictly between the endpoints of a straight or diagonal move.
    ///
    /// Yields nothing if the endpoints do not share a line.
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Move, Square};
    /// let mv: Move = "a8d5".parse().unwrap();
    /// let between: Vec<Square> = mv.between().collect();
    /// assert_eq!(between, [Square::new_unchecked(6, 1), Square::new_unchecked(5, 2)]);
    /// ```
    pub fn between(&self) -> impl Iterator<Item = Square> {
        let from = self.from;
        let (d_row, d_col) = (self.d_row().signum(), self.d_col().signum());
        let steps = if from.is_aligned_with(self.to) {
            from.distance_chebyshev(self.to) as i8
        } else {
            0
        };

        (1..steps).filter_map(move |i| from.offset(d_row * i, d_col * i))
    }

    /// Parses a [`Move`] from two squares, such as `"e7e5"` or `"e7 e5"`.
    pub fn from_notation(notation: &str) -> Result<Self> {
        let squares: String = notation.chars().filter(|c| !c.is_whitespace()).collect();
        if squares.len() != 4 || !squares.is_ascii() {
            bail!("Move must be two squares, such as \"e7e5\". Got {notation:?}");
        }

        let (from, to) = squares.split_at(2);
        let from = from
            .parse()
            .with_context(|| format!("Invalid origin in move {notation:?}"))?;
        let to = to
            .parse()
            .with_context(|| format!("Invalid destination in move {notation:?}"))?;

        Ok(Self::new(from, to))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?} -> {:?})", self, self.from, self.to)
    }
}

/// Everything that changed on the board when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move that was applied.
    pub mv: Move,

    /// The mover as it stands after the move, promotion included.
    pub piece: Piece,

    /// The enemy piece removed from the board, if any.
    pub captured: Option<Piece>,

    /// The friendly piece that traded places with the mover, if any.
    pub swapped: Option<Piece>,

    /// The kind the mover had before it was promoted, if it was.
    pub promoted_from: Option<PieceKind>,
}

impl fmt::Display for MoveOutcome {
    /// Describes the move, such as `"c6e4: white draughts man captures black draughts man on d5"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mover = self.promoted_from.unwrap_or(self.piece.kind());
        write!(f, "{}: {} {}", self.mv, self.piece.color(), mover)?;

        if let Some(captured) = self.captured {
            write!(f, " captures {} on {}", captured.name(), captured.square())?;
        } else if let Some(swapped) = self.swapped {
            write!(f, " swaps with {} on {}", swapped.name(), swapped.square())?;
        } else {
            write!(f, " moves to {}", self.mv.to())?;
        }

        if self.promoted_from.is_some() {
            write!(f, " and promotes to {}", self.piece.kind())?;
        }

        Ok(())
    }
}
