/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Color, Move, MoveKind, MoveOutcome, MoveRejection, MoveResult, Piece};

/// Chess with Lite Rooks, Jumpmen, and WereWolves.
mod chess;

/// Draughts with flying kings.
mod draughts;

pub use chess::*;
pub use draughts::*;

/// Variant of game being played.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum GameVariant {
    /// Chess with three extra piece kinds per side.
    #[default]
    Chess,

    /// Draughts on the dark cells, where kings fly along diagonals.
    Draughts,
}

impl GameVariant {
    /// Fetches a human-readable name for this [`GameVariant`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Chess => "chess",
            Self::Draughts => "draughts",
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Abstraction over the rules of the variant being played.
///
/// Each variant decides which moves are legal and how a legal move changes the board.
/// Both hooks are stateless; everything they need lives on the [`Board`].
pub trait Variant
where
    Self: Copy + Default + fmt::Debug + Send + 'static,
{
    /// Whether this variant has a King that can be put in check.
    const HAS_CHECK: bool = false;

    /// Fetch the [`GameVariant`] value of this variant.
    fn variant() -> GameVariant;

    /// Fetch the placements of the starting layout of this variant.
    fn startpos() -> &'static str;

    /// Decides whether `color` may play `mv` on `board`, and how it would rearrange the board.
    ///
    /// `board` may be modified while deciding, but is always left exactly as it was given.
    fn validate(board: &mut Board, color: Color, mv: Move) -> MoveResult<MoveKind>;

    /// Applies a move previously accepted by [`Variant::validate`].
    fn apply(board: &mut Board, mv: Move, kind: MoveKind) -> MoveResult<MoveOutcome>;

    /// Returns `true` if the King of `color` is attacked.
    ///
    /// Variants without check never report it.
    #[inline(always)]
    fn is_check(_board: &Board, _color: Color) -> bool {
        false
    }

    /// Lists the pieces of `color` that some enemy piece could move onto.
    ///
    /// This is advisory only, and never affects legality.
    #[inline(always)]
    fn threatened_pieces(_board: &Board, _color: Color) -> Vec<Piece> {
        Vec::new()
    }
}

/// Fetches the piece on the origin of `mv`, if it exists and belongs to `color`.
fn mover(board: &Board, color: Color, mv: Move) -> MoveResult<Piece> {
    let piece = board
        .piece_at(mv.from())
        .ok_or(MoveRejection::EmptyOrigin(mv.from()))?;

    if piece.color() != color {
        return Err(MoveRejection::WrongSide {
            square: mv.from(),
            owner: piece.color(),
        });
    }

    Ok(piece)
}

/// Moves the piece on the origin of `mv` to its destination, spending its first move and promoting it
/// if it lands on its far row.
///
/// `captured` is whatever was removed from the board along the way, the destination's occupant
/// included.
fn relocate(board: &mut Board, mv: Move, captured: Option<Piece>) -> MoveResult<MoveOutcome> {
    let piece = board
        .take(mv.from())
        .ok_or(MoveRejection::EmptyOrigin(mv.from()))?
        .moved_to(mv.to());
    let captured = board.take(mv.to()).or(captured);

    let (piece, promoted_from) = match piece.promoted() {
        Some(promoted) => (promoted, Some(piece.kind())),
        None => (piece, None),
    };
    board.place(piece, mv.to());

    Ok(MoveOutcome {
        mv,
        piece,
        captured,
        swapped: None,
        promoted_from,
    })
}
