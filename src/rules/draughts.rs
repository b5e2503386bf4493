/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{mover, relocate, GameVariant, Variant};
use crate::{
    Board, Color, Move, MoveKind, MoveOutcome, MoveRejection, MoveResult, Piece, PieceKind, Square,
    DRAUGHTS_STARTPOS,
};

/// Marker type for draughts.
///
/// Men step diagonally forward and jump adjacent enemies in any diagonal direction. Kings fly
/// along diagonals and may pass over one enemy. Each move captures at most one piece, captures are
/// optional, and the turn always passes after a move.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Draughts;

impl Draughts {
    /// Finds the square of the enemy that `piece` passes over when playing `mv`, if any.
    ///
    /// Kings capture the first enemy between the endpoints. Men capture the midpoint of a jump.
    fn victim(board: &Board, piece: &Piece, mv: Move) -> Option<Square> {
        let is_enemy = |square: &Square| board.piece_at(*square).is_some_and(|p| p.is_enemy_of(piece));

        match piece.kind() {
            PieceKind::DraughtsKing => mv.between().find(is_enemy),
            _ if mv.is_diagonal_jump() => mv.midpoint().filter(is_enemy),
            _ => None,
        }
    }
}

impl Variant for Draughts {
    #[inline(always)]
    fn variant() -> GameVariant {
        GameVariant::Draughts
    }

    #[inline(always)]
    fn startpos() -> &'static str {
        DRAUGHTS_STARTPOS
    }

    fn validate(board: &mut Board, color: Color, mv: Move) -> MoveResult<MoveKind> {
        let piece = mover(board, color, mv)?;

        if board.piece_at(mv.to()).is_some_and(|t| t.color() == color) {
            return Err(MoveRejection::SelfCapture(mv.to()));
        }

        if !piece.can_reach(board, mv.to()) {
            return Err(MoveRejection::Unreachable {
                from: mv.from(),
                to: mv.to(),
            });
        }

        Ok(MoveKind::Relocate)
    }

    fn apply(board: &mut Board, mv: Move, _kind: MoveKind) -> MoveResult<MoveOutcome> {
        let piece = board
            .piece_at(mv.from())
            .ok_or(MoveRejection::EmptyOrigin(mv.from()))?;

        let captured = Self::victim(board, &piece, mv).and_then(|square| board.take(square));
        relocate(board, mv, captured)
    }

    /// Draughts pieces reached by an enemy jump.
    ///
    /// Plain steps never capture, so only the cells an enemy passes over count.
    fn threatened_pieces(board: &Board, color: Color) -> Vec<Piece> {
        let mut threatened = Vec::new();

        for enemy in board.pieces(color.opponent()) {
            for landing in enemy.pseudo_moves(board) {
                let jump = Move::new(enemy.square(), landing);
                if let Some(square) = Self::victim(board, &enemy, jump) {
                    if let Some(victim) = board.piece_at(square) {
                        if !threatened.contains(&victim) {
                            threatened.push(victim);
                        }
                    }
                }
            }
        }

        threatened
    }
}
