/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use dualboard::*;

/// Layouts with a healthy mix of open lines, blockers, and both sides' pieces.
const LAYOUTS: &[&str] = &[
    CHESS_STARTPOS,
    DRAUGHTS_STARTPOS,
    "k3r3/8/8/8/8/4B3/8/4K3",
    "8/8/5m2/8/8/2m5/8/D7",
    "r3k2r/pjlwWLJp/8/3q4/3Q4/8/PJLWwljP/R3K2R",
    "1l4L1/8/2b2B2/3nN3/3Jj3/2R2r2/8/1W4w1",
    "d6D/1m4M1/8/3mM3/8/8/1M4m1/D6d",
];

fn boards() -> impl Iterator<Item = Board> {
    LAYOUTS
        .iter()
        .map(|layout| Board::from_placements(layout).unwrap())
}

/// Returns `true` if `to` lies along one of `kind`'s sliding lines from `from`, within its range.
fn on_slider_line(kind: PieceKind, from: Square, to: Square) -> bool {
    let straight = from != to && (from.row() == to.row() || from.col() == to.col());
    let diagonal = from.is_diagonal_to(to);

    match kind {
        PieceKind::Queen => straight || diagonal,
        PieceKind::Rook => straight,
        PieceKind::Bishop => diagonal,
        PieceKind::LiteRook => straight && from.distance_chebyshev(to) <= LITE_ROOK_RANGE,
        _ => false,
    }
}

#[test]
fn test_candidates_are_distinct_and_on_board() {
    for board in boards() {
        for piece in board.iter() {
            let moves = piece.pseudo_moves(&board);

            for (i, to) in moves.iter().enumerate() {
                assert!(to.row() < 8 && to.col() < 8, "{piece:?} -> {to:?}");
                assert_ne!(*to, piece.square(), "{piece:?} may not stay put");
                assert!(!moves[..i].contains(to), "{piece:?} lists {to:?} twice");
            }
        }
    }
}

#[test]
fn test_slider_rays_stop_at_first_occupant() {
    let sliders = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::LiteRook,
    ];

    for board in boards() {
        for piece in board.iter().filter(|p| sliders.contains(&p.kind())) {
            let from = piece.square();
            let moves = piece.pseudo_moves(&board);

            for to in &moves {
                assert!(on_slider_line(piece.kind(), from, *to), "{piece:?} -> {to:?}");

                let path = Move::new(from, *to);
                assert!(
                    path.between().all(|square| !board.has(square)),
                    "{piece:?} passed an occupied cell on its way to {to:?}"
                );
            }

            // Every reachable occupant is included, whichever side it is on
            for occupant in board.iter() {
                let to = occupant.square();
                let clear = Move::new(from, to).between().all(|square| !board.has(square));
                if on_slider_line(piece.kind(), from, to) && clear {
                    assert!(moves.contains(&to), "{piece:?} should reach {occupant:?}");
                }
            }
        }
    }
}

#[test]
fn test_lite_rook_stays_close() {
    let board = Board::from_placements("8/8/8/8/8/8/8/L7").unwrap();
    let rook = board.piece_at(Square::new_unchecked(7, 0)).unwrap();
    let moves = rook.pseudo_moves(&board);

    assert_eq!(moves.len(), 4);
    for to in moves {
        assert!(rook.square().distance_chebyshev(to) <= 2);
    }
}

#[test]
fn test_leaper_geometry() {
    for board in boards() {
        for piece in board.iter() {
            let from = piece.square();
            for to in piece.pseudo_moves(&board) {
                let shape = (from.distance_rows(to), from.distance_cols(to));
                match piece.kind() {
                    PieceKind::Knight => assert!(matches!(shape, (1, 2) | (2, 1))),
                    PieceKind::Jumpman => {
                        assert!(matches!(shape, (0, 2) | (2, 0) | (2, 2)));
                        assert_ne!(
                            (to.row() as i8 - from.row() as i8, to.col() as i8 - from.col() as i8),
                            (2, 2)
                        );
                    }
                    PieceKind::King | PieceKind::WereWolf => {
                        assert_eq!(from.distance_chebyshev(to), 1)
                    }
                    _ => {}
                }
            }
        }
    }
}

#[test]
fn test_jumpman_exact_leaps() {
    let board = Board::from_placements("8/8/8/8/4J3/8/8/8").unwrap();
    let jumpman = board.piece_at(Square::new_unchecked(4, 4)).unwrap();

    let expected = [(4, 6), (2, 6), (2, 4), (2, 2), (4, 2), (6, 2), (6, 4)]
        .map(|(row, col)| Square::new_unchecked(row, col));
    assert_eq!(jumpman.pseudo_moves(&board), expected);
}

#[test]
fn test_friendly_filters() {
    for board in boards() {
        for piece in board.iter() {
            for to in piece.pseudo_moves(&board) {
                let target = board.piece_at(to);
                let friendly = target.is_some_and(|t| t.color() == piece.color());

                match piece.kind() {
                    PieceKind::WereWolf => assert!(friendly, "{piece:?} -> {to:?}"),
                    PieceKind::Knight | PieceKind::Jumpman => assert!(!friendly),
                    PieceKind::Pawn | PieceKind::DraughtsMan | PieceKind::DraughtsKing => {
                        assert!(!friendly)
                    }
                    _ => {}
                }
            }
        }
    }
}

#[test]
fn test_draughts_landings_are_empty() {
    for board in boards() {
        for piece in board.iter().filter(|p| p.kind().is_draughts()) {
            for to in piece.pseudo_moves(&board) {
                assert!(!board.has(to), "{piece:?} -> {to:?}");
                assert!(piece.square().is_diagonal_to(to));
            }
        }
    }
}

#[test]
fn test_validation_restores_board() {
    for mut board in boards() {
        let before = board;

        for piece in before.iter() {
            for to in piece.pseudo_moves(&before) {
                let mv = Move::new(piece.square(), to);
                let _ = Chess::validate(&mut board, piece.color(), mv);
                assert_eq!(board, before, "validating {mv:?} changed the board");

                let _ = Draughts::validate(&mut board, piece.color(), mv);
                assert_eq!(board, before);
            }
        }
    }
}

#[test]
fn test_draughts_opening_moves() {
    let game = Game::<Draughts>::new();
    let total: usize = game
        .board()
        .pieces(Color::White)
        .map(|man| game.legal_moves_from(man.square()).len())
        .sum();

    assert_eq!(total, 7);
}
