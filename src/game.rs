/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, marker::PhantomData};

use anyhow::Result;

use crate::{
    Board, Chess, Color, Draughts, GameVariant, Move, MoveList, MoveOutcome, MoveRejection,
    MoveResult, Piece, Square, Variant,
};

/// A game in progress.
///
/// This type owns a [`Board`], tracks whose turn it is, and enforces the rules of `V` on every move.
/// White moves first.
///
/// The basic methods you're probably looking for are [`Game::attempt_move`] and [`Game::legal_moves_from`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Game<V: Variant> {
    /// Current layout of the pieces.
    board: Board,

    /// The side whose move is next.
    side_to_move: Color,

    /// Number of moves made so far.
    turns: usize,

    variant: PhantomData<V>,
}

/// Implementation details specific to chess.
impl Game<Chess> {
    /// Returns `true` if the side to move is in check.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let game = Game::<Chess>::from_placements("4k3/8/8/8/8/8/8/4R2K", Color::Black).unwrap();
    /// assert!(game.in_check());
    /// ```
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.is_check(self.side_to_move)
    }
}

/// Implementation details specific to draughts.
impl Game<Draughts> {
    /// Counts the men and kings of each side, indexed by [`Color`].
    #[inline(always)]
    pub fn material(&self) -> [usize; Color::COUNT] {
        Color::all().map(|color| self.board.pieces(color).count())
    }
}

impl<V: Variant> Game<V> {
    /// Creates a new [`Game`] from the starting layout of `V`, with White to move.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let game = Game::<Draughts>::new();
    /// assert_eq!(game.side_to_move(), Color::White);
    /// assert_eq!(game.board().iter().count(), 24);
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Game`] with nothing on the board.
    #[inline(always)]
    pub fn empty() -> Self {
        Self::with_board(Board::new(), Color::White)
    }

    /// Creates a new [`Game`] from a placement string, with `side_to_move` to play.
    ///
    /// See [`Board::from_placements`] for the format.
    #[inline(always)]
    pub fn from_placements(placements: &str, side_to_move: Color) -> Result<Self> {
        Ok(Self::with_board(
            Board::from_placements(placements)?,
            side_to_move,
        ))
    }

    /// Creates a new [`Game`] around an existing [`Board`].
    #[inline(always)]
    pub const fn with_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            turns: 0,
            variant: PhantomData,
        }
    }

    /// Fetch the [`GameVariant`] being played.
    #[inline(always)]
    pub fn variant(&self) -> GameVariant {
        V::variant()
    }

    /// Fetch the current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side whose move is next.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the number of moves made so far.
    #[inline(always)]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    /// Fetches the piece at signed coordinates, yielding `None` for empty or off-board cells.
    #[inline(always)]
    pub fn occupant_at(&self, row: i8, col: i8) -> Option<Piece> {
        self.board.get(row, col)
    }

    /// Places `piece` on `square`, replacing any previous occupant.
    ///
    /// This bypasses the rules entirely, and is meant for setting up positions.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.board.place(piece, square);
    }

    /// Removes and returns the piece on `square`, bypassing the rules.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.board.take(square)
    }

    /// Attempts to move the piece at `(start_row, start_col)` to `(end_row, end_col)`.
    ///
    /// Returns `true` if the move was legal and has been made, at which point the other side is
    /// to move. Otherwise, returns `false` and nothing changes.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let mut game = Game::<Chess>::new();
    /// assert!(game.attempt_move(6, 4, 4, 4));
    /// assert_eq!(game.side_to_move(), Color::Black);
    ///
    /// // White cannot move twice in a row
    /// assert!(!game.attempt_move(6, 3, 4, 3));
    /// assert!(!game.attempt_move(1, 4, 1, 9));
    /// ```
    pub fn attempt_move(&mut self, start_row: i8, start_col: i8, end_row: i8, end_col: i8) -> bool {
        let endpoints = (
            Square::from_coords(start_row, start_col),
            Square::from_coords(end_row, end_col),
        );

        let (Some(from), Some(to)) = endpoints else {
            let rejection = MoveRejection::OutOfBounds {
                start_row,
                start_col,
                end_row,
                end_col,
            };
            tracing::debug!(%rejection, "move rejected");
            return false;
        };

        self.try_move(Move::new(from, to)).is_ok()
    }

    /// Attempts to make `mv` for the side to move.
    ///
    /// On success, the turn passes to the other side and the [`MoveOutcome`] describes what changed.
    /// On failure, the [`MoveRejection`] says why and nothing changes.
    pub fn try_move(&mut self, mv: Move) -> MoveResult<MoveOutcome> {
        let color = self.side_to_move;
        let result = V::validate(&mut self.board, color, mv)
            .and_then(|kind| V::apply(&mut self.board, mv, kind));

        match &result {
            Ok(outcome) => {
                self.side_to_move = color.opponent();
                self.turns += 1;
                tracing::info!(turn = self.turns, %outcome, "move made");

                let threatened = self.threatened_pieces(self.side_to_move);
                if !threatened.is_empty() {
                    tracing::debug!(side = %self.side_to_move, ?threatened, "pieces under threat");
                }
                if self.is_check(self.side_to_move) {
                    tracing::info!(side = %self.side_to_move, "in check");
                }
            }
            Err(rejection) => tracing::debug!(%mv, %rejection, "move rejected"),
        }

        result
    }

    /// Lists every destination the piece on `square` could legally move to, were it its side's turn.
    ///
    /// The board is left untouched.
    ///
    /// # Example
    /// ```
    /// # use dualboard::*;
    /// let game = Game::<Chess>::new();
    /// let pawn = Square::new_unchecked(6, 4);
    /// assert_eq!(game.legal_moves_from(pawn).len(), 2);
    /// ```
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        let Some(piece) = self.board.piece_at(square) else {
            return MoveList::new();
        };

        // Validation may simulate moves, so work on a scratch copy
        let mut scratch = self.board;
        piece
            .pseudo_moves(&self.board)
            .into_iter()
            .filter(|&to| V::validate(&mut scratch, piece.color(), Move::new(square, to)).is_ok())
            .collect()
    }

    /// Returns `true` if the King of `color` is attacked.
    #[inline(always)]
    pub fn is_check(&self, color: Color) -> bool {
        V::is_check(&self.board, color)
    }

    /// Lists the pieces of `color` that an enemy piece could currently move onto.
    #[inline(always)]
    pub fn threatened_pieces(&self, color: Color) -> Vec<Piece> {
        V::threatened_pieces(&self.board, color)
    }
}

impl<V: Variant> Default for Game<V> {
    /// Starting layout of `V`.
    #[inline(always)]
    fn default() -> Self {
        // Starting placements are constants that always parse
        let board = Board::from_placements(V::startpos()).unwrap_or_default();
        Self::with_board(board, Color::White)
    }
}

impl<V: Variant> fmt::Display for Game<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::SIDE {
            write!(f, "{}|", row + 1)?;
            for col in 0..Square::SIDE {
                let piece = self.board.piece_at(Square::new_unchecked(row, col));
                let piece_char = piece.map(|p| p.to_char()).unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            match row {
                0 => write!(f, "    Variant: {}", V::variant())?,
                1 => write!(f, "       Side: {}", self.side_to_move)?,
                2 => write!(f, "      Turns: {}", self.turns)?,
                3 if V::HAS_CHECK => write!(
                    f,
                    "      Check: {}",
                    if self.is_check(self.side_to_move) { "yes" } else { "no" }
                )?,
                4 => write!(f, " Placements: {}", self.board.to_placements())?,
                _ => {}
            }

            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..Square::SIDE {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for col in 0..Square::SIDE {
            write!(f, " {}", (b'a' + col) as char)?;
        }

        Ok(())
    }
}

impl<V: Variant> fmt::Debug for Game<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("variant", &V::variant())
            .field("board", &self.board)
            .field("side_to_move", &self.side_to_move)
            .field("turns", &self.turns)
            .finish()
    }
}
