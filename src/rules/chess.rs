/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{mover, relocate, GameVariant, Variant};
use crate::{
    Board, Color, Move, MoveKind, MoveOutcome, MoveRejection, MoveResult, Piece, PieceKind, Table,
    CHESS_STARTPOS,
};

/// Marker type for the chess variant.
///
/// A move is legal when the mover belongs to the side to move, the destination is among its
/// pseudo-moves, it does not land on a friendly piece (WereWolves excepted), and it does not leave
/// the mover's own King attacked. There is no castling, en passant, or checkmate detection.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Chess;

impl Variant for Chess {
    const HAS_CHECK: bool = true;

    #[inline(always)]
    fn variant() -> GameVariant {
        GameVariant::Chess
    }

    #[inline(always)]
    fn startpos() -> &'static str {
        CHESS_STARTPOS
    }

    fn validate(board: &mut Board, color: Color, mv: Move) -> MoveResult<MoveKind> {
        let piece = mover(board, color, mv)?;
        let is_werewolf = piece.kind() == PieceKind::WereWolf;

        if !is_werewolf && board.piece_at(mv.to()).is_some_and(|t| t.color() == color) {
            return Err(MoveRejection::SelfCapture(mv.to()));
        }

        if !piece.can_reach(board, mv.to()) {
            return Err(MoveRejection::Unreachable {
                from: mv.from(),
                to: mv.to(),
            });
        }

        // WereWolves trade places with the friend they land on
        let kind = if is_werewolf {
            MoveKind::Swap
        } else {
            MoveKind::Relocate
        };

        let simulated = board.scoped_move(mv.from(), mv.to(), kind);
        if Self::is_check(&simulated, color) {
            return Err(MoveRejection::LeavesKingInCheck(mv));
        }

        Ok(kind)
    }

    fn apply(board: &mut Board, mv: Move, kind: MoveKind) -> MoveResult<MoveOutcome> {
        match kind {
            MoveKind::Relocate => relocate(board, mv, None),

            MoveKind::Swap => {
                let piece = board
                    .piece_at(mv.from())
                    .ok_or(MoveRejection::EmptyOrigin(mv.from()))?;
                let partner = board.piece_at(mv.to());
                board.swap(mv.from(), mv.to());

                Ok(MoveOutcome {
                    mv,
                    piece: piece.on(mv.to()),
                    captured: None,
                    swapped: partner,
                    promoted_from: None,
                })
            }
        }
    }

    /// The King of `color` is in check if any enemy piece has it among its pseudo-moves.
    ///
    /// A side without a King is never in check.
    fn is_check(board: &Board, color: Color) -> bool {
        let Some(king) = board.king(color) else {
            return false;
        };

        board
            .pieces(color.opponent())
            .any(|enemy| enemy.can_reach(board, king))
    }

    fn threatened_pieces(board: &Board, color: Color) -> Vec<Piece> {
        let mut attacked = Table::splat(false);
        for enemy in board.pieces(color.opponent()) {
            for target in enemy.pseudo_moves(board) {
                attacked[target] = true;
            }
        }

        board
            .pieces(color)
            .filter(|piece| attacked[piece.square()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn sq(row: u8, col: u8) -> Square {
        Square::new_unchecked(row, col)
    }

    fn mv(from: Square, to: Square) -> Move {
        Move::new(from, to)
    }

    #[test]
    fn test_opening_push() {
        let mut board = Board::from_placements(CHESS_STARTPOS).unwrap();
        let kind = Chess::validate(&mut board, Color::White, mv(sq(6, 4), sq(4, 4))).unwrap();
        assert_eq!(kind, MoveKind::Relocate);

        let outcome = Chess::apply(&mut board, mv(sq(6, 4), sq(4, 4)), kind).unwrap();
        assert_eq!(outcome.captured, None);
        assert!(!outcome.piece.is_first_move());
        assert_eq!(board.piece_at(sq(4, 4)), Some(outcome.piece));
        assert!(!board.has(sq(6, 4)));
    }

    #[test]
    fn test_wrong_side_and_empty_origin() {
        let mut board = Board::from_placements(CHESS_STARTPOS).unwrap();
        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(1, 4), sq(2, 4))),
            Err(MoveRejection::WrongSide {
                square: sq(1, 4),
                owner: Color::Black
            })
        );
        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(4, 4), sq(3, 4))),
            Err(MoveRejection::EmptyOrigin(sq(4, 4)))
        );
    }

    #[test]
    fn test_friendly_capture_is_rejected() {
        let mut board = Board::from_placements(CHESS_STARTPOS).unwrap();
        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(7, 0), sq(6, 0))),
            Err(MoveRejection::SelfCapture(sq(6, 0)))
        );

        // The King generates friendly targets, but they are still refused
        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(7, 4), sq(6, 4))),
            Err(MoveRejection::SelfCapture(sq(6, 4)))
        );
    }

    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let mut board = Board::from_placements("k3r3/8/8/8/8/4B3/8/4K3").unwrap();
        let before = board;

        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(5, 4), sq(4, 3))),
            Err(MoveRejection::LeavesKingInCheck(mv(sq(5, 4), sq(4, 3))))
        );
        assert_eq!(board, before);

        // The King itself may step out of the file
        assert!(Chess::validate(&mut board, Color::White, mv(sq(7, 4), sq(7, 3))).is_ok());
        assert_eq!(board, before);
    }

    #[test]
    fn test_werewolf_swaps() {
        let mut board = Board::from_placements(CHESS_STARTPOS).unwrap();
        let swap = mv(sq(4, 7), sq(5, 6));

        let kind = Chess::validate(&mut board, Color::White, swap).unwrap();
        assert_eq!(kind, MoveKind::Swap);

        let outcome = Chess::apply(&mut board, swap, kind).unwrap();
        assert_eq!(outcome.swapped.unwrap().kind(), PieceKind::LiteRook);
        assert!(board.piece_at(sq(4, 7)).unwrap().is(Color::White, PieceKind::LiteRook));
        assert!(board.piece_at(sq(5, 6)).unwrap().is(Color::White, PieceKind::WereWolf));
    }

    #[test]
    fn test_werewolf_needs_a_friend() {
        let mut board = Board::from_placements(CHESS_STARTPOS).unwrap();

        // Enemy WereWolf directly ahead
        assert_eq!(
            Chess::validate(&mut board, Color::White, mv(sq(4, 7), sq(3, 7))),
            Err(MoveRejection::Unreachable {
                from: sq(4, 7),
                to: sq(3, 7)
            })
        );

        // Empty cell
        assert!(Chess::validate(&mut board, Color::White, mv(sq(4, 7), sq(4, 6))).is_err());
    }

    #[test]
    fn test_promotions() {
        let mut board = Board::from_placements("8/3P4/8/8/8/8/1l6/8").unwrap();

        let push = mv(sq(1, 3), sq(0, 3));
        let kind = Chess::validate(&mut board, Color::White, push).unwrap();
        let outcome = Chess::apply(&mut board, push, kind).unwrap();
        assert_eq!(outcome.promoted_from, Some(PieceKind::Pawn));
        assert!(board.piece_at(sq(0, 3)).unwrap().is(Color::White, PieceKind::Queen));

        let slide = mv(sq(6, 1), sq(7, 1));
        let kind = Chess::validate(&mut board, Color::Black, slide).unwrap();
        Chess::apply(&mut board, slide, kind).unwrap();
        assert!(board.piece_at(sq(7, 1)).unwrap().is(Color::Black, PieceKind::Rook));
    }

    #[test]
    fn test_check_detection() {
        let board = Board::from_placements("4k3/8/8/8/8/8/8/4R2K").unwrap();
        assert!(Chess::is_check(&board, Color::Black));
        assert!(!Chess::is_check(&board, Color::White));

        let kingless = Board::from_placements("8/8/8/8/8/8/8/4R3").unwrap();
        assert!(!Chess::is_check(&kingless, Color::Black));
    }

    #[test]
    fn test_threatened_pieces() {
        // The black rook attacks the white knight, and nothing attacks the black pieces
        let board = Board::from_placements("k7/8/8/r2N4/8/8/8/7K").unwrap();
        let threatened = Chess::threatened_pieces(&board, Color::White);
        assert_eq!(threatened.len(), 1);
        assert_eq!(threatened[0].kind(), PieceKind::Knight);

        assert!(Chess::threatened_pieces(&board, Color::Black).is_empty());
    }
}
