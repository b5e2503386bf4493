/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index},
};

use anyhow::{bail, Context, Result};

use super::{Color, MoveKind, Piece, PieceKind, Square, Table};

/// An `8x8` grid where every cell holds at most one [`Piece`].
///
/// Every piece on the board records the [`Square`] it stands on, and [`Board::place`] keeps that in sync.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: Table<Option<Piece>>,
}

impl Board {
    /// Creates a new, empty [`Board`].
    ///
    /// # Example
    /// ```
    /// # use dualboard::Board;
    /// let board = Board::new();
    /// assert_eq!(board.iter().count(), 0);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: Table::splat(None),
        }
    }

    /// Builds a [`Board`] from a placement string.
    ///
    /// Rows are separated by `/` and listed from row `0` to row `7`. Within a row, a letter is a
    /// piece (uppercase for White) and a digit skips that many empty cells.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let board = Board::from_placements("4k3/8/8/8/8/8/8/4K3").unwrap();
    /// let white_king = board.piece_at(Square::new_unchecked(7, 4)).unwrap();
    /// assert_eq!(white_king.kind(), PieceKind::King);
    /// assert_eq!(white_king.color(), Color::White);
    ///
    /// assert!(Board::from_placements("4k3/8/8").is_err());
    /// ```
    pub fn from_placements(placements: &str) -> Result<Self> {
        let placements = placements.trim();
        let rows = placements.split('/').collect::<Vec<_>>();
        if rows.len() != Square::SIDE as usize {
            bail!(
                "Placements must describe all {} rows. Got {} in {placements:?}",
                Square::SIDE,
                rows.len()
            );
        }

        let mut board = Self::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let mut col: u8 = 0;

            for c in cells.chars() {
                // Digits skip empty cells
                if let Some(empty) = c.to_digit(10) {
                    col = col
                        .checked_add(empty as u8)
                        .filter(|&n| n <= Square::SIDE)
                        .with_context(|| format!("Row {} of {placements:?} is too long", row + 1))?;
                    continue;
                }

                let square = Square::new(row as u8, col)
                    .with_context(|| format!("Row {} of {placements:?} is too long", row + 1))?;
                board.place(Piece::from_char(c, square)?, square);
                col += 1;
            }

            if col != Square::SIDE {
                bail!(
                    "Row {} of {placements:?} must cover {} cells. Got {col}",
                    row + 1,
                    Square::SIDE
                );
            }
        }

        Ok(board)
    }

    /// Generates the placement string of this [`Board`], the inverse of [`Board::from_placements`].
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let placements = "1m1m1m1m/8/8/8/8/8/8/M1M1M1M1";
    /// let board = Board::from_placements(placements).unwrap();
    /// assert_eq!(board.to_placements(), placements);
    /// ```
    pub fn to_placements(&self) -> String {
        let mut placements = String::with_capacity(Square::COUNT + 8);

        for row in 0..Square::SIDE {
            let mut empty = 0;

            for col in 0..Square::SIDE {
                match self.piece_at(Square::new_unchecked(row, col)) {
                    Some(piece) => {
                        if empty != 0 {
                            placements += &empty.to_string();
                            empty = 0;
                        }
                        placements.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                placements += &empty.to_string();
            }

            if row != Square::SIDE - 1 {
                placements.push('/');
            }
        }

        placements
    }

    /// Fetches the occupant at signed coordinates, yielding `None` for empty or off-board cells.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let board = Board::from_placements("8/8/8/8/8/8/8/K7").unwrap();
    /// assert!(board.get(7, 0).is_some());
    /// assert!(board.get(7, 1).is_none());
    /// assert!(board.get(-1, 0).is_none());
    /// assert!(board.get(8, 8).is_none());
    /// ```
    #[inline(always)]
    pub fn get(&self, row: i8, col: i8) -> Option<Piece> {
        Square::from_coords(row, col).and_then(|square| self.piece_at(square))
    }

    /// Writes `occupant` to signed coordinates. Off-board coordinates are ignored.
    #[inline(always)]
    pub fn set(&mut self, row: i8, col: i8, occupant: Option<Piece>) {
        if let Some(square) = Square::from_coords(row, col) {
            self.put(square, occupant);
        }
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        *self.mailbox.get(square)
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox.get(square).is_some()
    }

    /// Places `piece` on `square`, replacing any previous occupant.
    ///
    /// The piece's recorded square is updated to `square`. Its move history is untouched.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let mut board = Board::new();
    /// let knight = Piece::new(Color::Black, PieceKind::Knight, Square::default());
    /// let c4 = Square::new_unchecked(3, 2);
    /// board.place(knight, c4);
    /// assert_eq!(board.piece_at(c4).unwrap().square(), c4);
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square] = Some(piece.on(square));
    }

    /// Writes `occupant` to `square`: places it if it is a piece, clears the cell otherwise.
    #[inline(always)]
    pub fn put(&mut self, square: Square, occupant: Option<Piece>) {
        match occupant {
            Some(piece) => self.place(piece, square),
            None => self.clear(square),
        }
    }

    /// Removes and returns the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Empties the cell at `square`.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.mailbox[square] = None;
    }

    /// Exchanges the occupants of `a` and `b`, either of which may be empty.
    #[inline(always)]
    pub fn swap(&mut self, a: Square, b: Square) {
        let (first, second) = (self.take(a), self.take(b));
        self.put(a, second);
        self.put(b, first);
    }

    /// Iterates over every [`Piece`] on the board, row by row.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.mailbox.iter().filter_map(|(_, occupant)| *occupant)
    }

    /// Iterates over every [`Piece`] of `color`, row by row.
    #[inline(always)]
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |piece| piece.color() == color)
    }

    /// Finds the [`Square`] of the first King of `color`, if it has one.
    #[inline(always)]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|piece| piece.kind() == PieceKind::King)
            .map(|king| king.square())
    }

    /// Applies a move to this board for as long as the returned [`ScopedMove`] lives.
    ///
    /// When the guard is dropped, both touched cells are restored exactly, including whatever was
    /// captured and every piece's move history.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let mut board = Board::from_placements("8/8/8/8/8/8/4P3/8").unwrap();
    /// let before = board;
    /// let (e7, e5) = (Square::new_unchecked(6, 4), Square::new_unchecked(4, 4));
    /// {
    ///     let simulated = board.scoped_move(e7, e5, MoveKind::Relocate);
    ///     assert!(simulated.has(e5));
    ///     assert!(!simulated.has(e7));
    /// }
    /// assert_eq!(board, before);
    /// ```
    pub fn scoped_move(&mut self, from: Square, to: Square, kind: MoveKind) -> ScopedMove<'_> {
        let saved = [(from, self.piece_at(from)), (to, self.piece_at(to))];

        match kind {
            MoveKind::Relocate => {
                if let Some(piece) = self.take(from) {
                    self.place(piece, to);
                }
            }
            MoveKind::Swap => self.swap(from, to),
        }

        ScopedMove { board: self, saved }
    }
}

/// A tentatively applied move, undone when dropped.
///
/// Dereferences to the [`Board`] with the move applied.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    saved: [(Square, Option<Piece>); 2],
}

impl Deref for ScopedMove<'_> {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        for (square, occupant) in self.saved {
            self.board.put(square, occupant);
        }
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl fmt::Display for Board {
    /// Draws the board with row numbers on the left and file letters underneath.
    ///
    /// Empty cells are shown as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for row in 0..Square::SIDE {
            board += &format!("{}| ", row + 1);

            for col in 0..Square::SIDE {
                let occupant = match self.piece_at(Square::new_unchecked(row, col)) {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };

                board.push(occupant);
                board.push(' ');
            }

            board += "\n";
        }

        board += " +";
        for _ in 0..Square::SIDE {
            board += "--";
        }
        board += "\n   ";
        for col in 0..Square::SIDE {
            board.push((b'a' + col) as char);
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_placements())
    }
}
