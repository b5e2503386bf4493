/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, MoveList, Piece, PieceKind, Square};

/// Deltas for the movement of the King, as `(d_row, d_col)`.
pub const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// Deltas for the movement of the Queen.
pub const QUEEN_DELTAS: [(i8, i8); 8] = KING_DELTAS;

/// Deltas for the movement of the Rook and the Lite Rook.
pub const ROOK_DELTAS: [(i8, i8); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Deltas for the movement of the Bishop.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Deltas for the movement of the Knight.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
];

/// Deltas for the movement of the Jumpman.
///
/// There is no `(2, 2)` leap, so the Jumpman reaches seven cells at most.
pub const JUMPMAN_DELTAS: [(i8, i8); 7] = [
    (0, 2),
    (-2, 2),
    (-2, 0),
    (-2, -2),
    (0, -2),
    (2, -2),
    (2, 0),
];

/// Deltas for the movement of the WereWolf.
pub const WEREWOLF_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal directions shared by both draughts pieces.
pub const DRAUGHTS_DELTAS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Farthest a Lite Rook may slide in one direction.
pub const LITE_ROOK_RANGE: u8 = 2;

/// Range of a rider that is only stopped by the edge of the board or a blocker.
const UNBOUNDED: u8 = Square::SIDE;

/// Generates every destination `piece` could reach on `board`, ignoring king safety.
///
/// Destinations are always on the board, never include the piece's own square, and are listed in
/// the order the piece's deltas are declared.
///
/// # Example
/// ```
/// # use dualboard::*;
/// let board = Board::from_placements("8/8/8/8/4j3/8/8/8").unwrap();
/// let jumpman = board.piece_at(Square::new_unchecked(4, 4)).unwrap();
/// assert_eq!(pseudo_moves(&jumpman, &board).len(), 7);
/// ```
pub fn pseudo_moves(piece: &Piece, board: &Board) -> MoveList {
    let from = piece.square();
    let not_friendly = |target: Option<Piece>| !target.is_some_and(|t| !t.is_enemy_of(piece));

    match piece.kind() {
        // The King is not filtered by side; friendly targets are rejected by the rules instead.
        PieceKind::King => leaper_moves(board, from, &KING_DELTAS, |_| true),
        PieceKind::Knight => leaper_moves(board, from, &KNIGHT_DELTAS, not_friendly),
        PieceKind::Jumpman => leaper_moves(board, from, &JUMPMAN_DELTAS, not_friendly),
        PieceKind::WereWolf => leaper_moves(board, from, &WEREWOLF_DELTAS, |target| {
            target.is_some_and(|t| !t.is_enemy_of(piece))
        }),
        PieceKind::Queen => rider_moves(board, from, &QUEEN_DELTAS, UNBOUNDED),
        PieceKind::Rook => rider_moves(board, from, &ROOK_DELTAS, UNBOUNDED),
        PieceKind::Bishop => rider_moves(board, from, &BISHOP_DELTAS, UNBOUNDED),
        PieceKind::LiteRook => rider_moves(board, from, &ROOK_DELTAS, LITE_ROOK_RANGE),
        PieceKind::Pawn => pawn_moves(board, piece),
        PieceKind::DraughtsMan => draughts_man_moves(board, piece),
        PieceKind::DraughtsKing => draughts_king_moves(board, piece),
    }
}

/// Generates the moves for "Leaper" pieces, which jump straight to a cell a fixed distance away.
///
/// Only cells whose occupant satisfies `keep` are included.
fn leaper_moves(
    board: &Board,
    from: Square,
    deltas: &[(i8, i8)],
    keep: impl Fn(Option<Piece>) -> bool,
) -> MoveList {
    deltas
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| keep(board.piece_at(to)))
        .collect()
}

/// Generates the moves for "Rider" pieces, which slide up to `range` cells in a direction.
///
/// A ray includes the first occupied cell it meets, whatever its side, and stops there.
fn rider_moves(board: &Board, from: Square, deltas: &[(i8, i8)], range: u8) -> MoveList {
    let mut moves = MoveList::with_capacity(Square::COUNT / 2);

    for &(d_row, d_col) in deltas {
        let mut ray = from;
        let mut distance = 0;

        while distance < range {
            let Some(shifted) = ray.offset(d_row, d_col) else {
                break;
            };
            moves.push(shifted);

            if board.has(shifted) {
                break;
            }

            ray = shifted;
            distance += 1;
        }
    }

    moves
}

/// Pawns push one cell forward onto an empty cell, or two from an unmoved Pawn if both cells are empty.
/// They capture one cell diagonally forward.
fn pawn_moves(board: &Board, pawn: &Piece) -> MoveList {
    let mut moves = MoveList::with_capacity(4);
    let from = pawn.square();
    let forward = pawn.color().forward();

    if let Some(push) = from.offset(forward, 0).filter(|&to| !board.has(to)) {
        moves.push(push);

        if pawn.is_first_move() {
            if let Some(double) = push.offset(forward, 0).filter(|&to| !board.has(to)) {
                moves.push(double);
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(forward, d_col) {
            if board.piece_at(target).is_some_and(|t| t.is_enemy_of(pawn)) {
                moves.push(target);
            }
        }
    }

    moves
}

/// Draughts men step diagonally forward onto an empty cell, and jump an adjacent diagonal enemy
/// in any direction when the cell beyond it is empty.
///
/// Steps are listed first, then forward jumps, then backward jumps.
fn draughts_man_moves(board: &Board, man: &Piece) -> MoveList {
    let mut moves = MoveList::with_capacity(6);
    let from = man.square();
    let forward = man.color().forward();

    for d_col in [-1, 1] {
        if let Some(step) = from.offset(forward, d_col).filter(|&to| !board.has(to)) {
            moves.push(step);
        }
    }

    for d_row in [forward, -forward] {
        for d_col in [-1, 1] {
            let over = from.offset(d_row, d_col);
            let landing = from.offset(2 * d_row, 2 * d_col);

            if let (Some(over), Some(landing)) = (over, landing) {
                let jumps_enemy = board.piece_at(over).is_some_and(|t| t.is_enemy_of(man));
                if jumps_enemy && !board.has(landing) {
                    moves.push(landing);
                }
            }
        }
    }

    moves
}

/// Draughts kings fly along diagonals.
///
/// A ray passes over empty cells and over the first enemy it meets, landing on any empty cell
/// beyond it. A friendly piece, or a second enemy, ends the ray.
fn draughts_king_moves(board: &Board, king: &Piece) -> MoveList {
    let mut moves = MoveList::with_capacity(Square::COUNT / 4);

    for (d_row, d_col) in DRAUGHTS_DELTAS {
        let mut ray = king.square();
        let mut found_enemy = false;

        while let Some(shifted) = ray.offset(d_row, d_col) {
            match board.piece_at(shifted) {
                None => moves.push(shifted),
                Some(other) if other.is_enemy_of(king) && !found_enemy => found_enemy = true,
                Some(_) => break,
            }

            ray = shifted;
        }
    }

    moves
}

#[cfg(test)]
mod test {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new_unchecked(row, col)
    }

    /// Checks if `moves` and `expected` contain all the same elements, ignoring order
    fn lists_match(moves: &[Square], expected: &[Square]) {
        assert_eq!(
            moves.len(),
            expected.len(),
            "\nMoves:    {moves:?}\nExpected: {expected:?}"
        );

        for mv in moves {
            assert!(
                expected.contains(mv),
                "{mv} not found in {expected:?}"
            );
        }
    }

    fn moves_at(placements: &str, row: u8, col: u8) -> MoveList {
        let board = Board::from_placements(placements).unwrap();
        let piece = board.piece_at(sq(row, col)).unwrap();
        pseudo_moves(&piece, &board)
    }

    #[test]
    fn rook_blockers() {
        // . . . . . . . .
        // . . . . . . . .
        // . . . p . . . .
        // . . . . . . . .
        // . R . r . . . .
        // . . . . . . . .
        // . . . P . . . .
        // . . . . . . . .
        let moves = moves_at("8/8/3p4/8/1R1r4/8/3P4/8", 4, 3);
        let expected = [
            sq(3, 3),
            sq(2, 3),
            sq(5, 3),
            sq(6, 3),
            sq(4, 2),
            sq(4, 1),
            sq(4, 4),
            sq(4, 5),
            sq(4, 6),
            sq(4, 7),
        ];

        // Blockers of both sides are included as the last cell of their ray
        lists_match(&moves, &expected);
    }

    #[test]
    fn lite_rook_range() {
        let moves = moves_at("8/8/8/8/3l4/8/8/8", 4, 3);
        let expected = [
            sq(5, 3),
            sq(6, 3),
            sq(3, 3),
            sq(2, 3),
            sq(4, 2),
            sq(4, 1),
            sq(4, 4),
            sq(4, 5),
        ];
        lists_match(&moves, &expected);

        let cornered = moves_at("L7/N7/8/8/8/8/8/8", 0, 0);
        lists_match(&cornered, &[sq(1, 0), sq(0, 1), sq(0, 2)]);
    }

    #[test]
    fn bishop_and_queen_rays() {
        let bishop = moves_at("8/8/8/8/8/8/8/B7", 7, 0);
        assert_eq!(bishop.len(), 7);
        assert!(bishop.iter().all(|to| to.row() + to.col() == 7));

        let queen = moves_at("8/8/8/3q4/8/8/8/8", 3, 3);
        assert_eq!(queen.len(), 27);
    }

    #[test]
    fn jumpman_has_seven_leaps() {
        let moves = moves_at("8/8/8/8/4j3/8/8/8", 4, 4);
        assert_eq!(
            moves,
            [
                sq(4, 6),
                sq(2, 6),
                sq(2, 4),
                sq(2, 2),
                sq(4, 2),
                sq(6, 2),
                sq(6, 4),
            ]
        );
        assert!(!moves.contains(&sq(6, 6)));
    }

    #[test]
    fn jumpman_and_knight_skip_friends() {
        let moves = moves_at("8/8/2P1p3/8/4J3/8/8/8", 4, 4);
        assert!(moves.contains(&sq(2, 4)));
        assert!(!moves.contains(&sq(2, 2)));

        let moves = moves_at("8/8/8/8/8/8/2P5/N7", 7, 0);
        lists_match(&moves, &[sq(5, 1)]);
    }

    #[test]
    fn king_is_not_filtered_by_side() {
        let moves = moves_at("8/8/8/8/8/8/PP6/K7", 7, 0);
        lists_match(&moves, &[sq(7, 1), sq(6, 1), sq(6, 0)]);
    }

    #[test]
    fn werewolf_only_reaches_friends() {
        let moves = moves_at("8/8/8/6P1/7W/6lL/8/8", 4, 7);
        lists_match(&moves, &[sq(3, 6), sq(5, 7)]);

        let alone = moves_at("8/8/8/8/3w4/8/8/8", 4, 3);
        assert!(alone.is_empty());
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let moves = moves_at("8/8/8/8/8/3b4/4P3/8", 6, 4);
        lists_match(&moves, &[sq(5, 4), sq(4, 4), sq(5, 3)]);

        // A blocked first push also blocks the double push
        let moves = moves_at("8/8/8/8/8/4n3/4P3/8", 6, 4);
        assert!(moves.is_empty());

        // Black advances towards row 7
        let moves = moves_at("8/3p4/8/3Q4/8/8/8/8", 1, 3);
        lists_match(&moves, &[sq(2, 3)]);
    }

    #[test]
    fn draughts_man_steps_and_jumps() {
        let moves = moves_at("8/8/8/8/3m4/2M5/8/8", 5, 2);
        lists_match(&moves, &[sq(4, 1), sq(3, 4)]);

        // Backward jumps are allowed, backward steps are not
        let moves = moves_at("8/8/8/8/8/2M5/3m4/8", 5, 2);
        lists_match(&moves, &[sq(4, 1), sq(4, 3), sq(7, 4)]);

        // Jumps need an empty landing cell
        let moves = moves_at("8/8/8/4m3/3m4/2M5/8/8", 5, 2);
        lists_match(&moves, &[sq(4, 1)]);
    }

    #[test]
    fn draughts_king_flies_over_one_enemy() {
        // Enemies at (5,2) and (2,5) on the same diagonal as the king at (7,0)
        let moves = moves_at("8/8/5m2/8/8/2m5/8/D7", 7, 0);
        lists_match(&moves, &[sq(6, 1), sq(4, 3), sq(3, 4)]);
    }

    #[test]
    fn draughts_king_stops_at_friends() {
        let moves = moves_at("8/8/8/8/8/2M5/8/D7", 7, 0);
        lists_match(&moves, &[sq(6, 1)]);
    }

    #[test]
    fn moves_stay_on_board() {
        for kind in PieceKind::all() {
            let placements = format!("7{}/8/8/8/8/8/8/8", kind.to_char());
            let moves = moves_at(&placements, 0, 7);
            assert!(moves.iter().all(|to| *to != sq(0, 7)), "{kind:?}");
            assert!(moves.iter().all(|to| to.index() < Square::COUNT));
        }
    }
}
