/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Move, Square};

/// Why a move was refused.
///
/// A rejected move never changes the board, the side to move, or the turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    /// One of the endpoints lies off the board.
    #[error("({start_row}, {start_col}) -> ({end_row}, {end_col}) leaves the board")]
    OutOfBounds {
        start_row: i8,
        start_col: i8,
        end_row: i8,
        end_col: i8,
    },

    /// There is nothing to move on the origin.
    #[error("there is no piece on {0}")]
    EmptyOrigin(Square),

    /// The piece on the origin belongs to the side not moving.
    #[error("the piece on {square} belongs to {owner}")]
    WrongSide { square: Square, owner: Color },

    /// The destination holds a piece of the mover's own side.
    #[error("{0} is occupied by a friendly piece")]
    SelfCapture(Square),

    /// The destination is not among the piece's pseudo-moves.
    #[error("the piece on {from} cannot reach {to}")]
    Unreachable { from: Square, to: Square },

    /// Making the move would leave the mover's King attacked.
    #[error("{0} would leave the king in check")]
    LeavesKingInCheck(Move),
}

/// Result type alias for move validation and application.
pub type MoveResult<T> = Result<T, MoveRejection>;
