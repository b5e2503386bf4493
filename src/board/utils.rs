/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Placements for the starting layout of the chess variant.
///
/// Besides the usual back rows and pawns, each side fields two Lite Rooks and a Jumpman on its third
/// row and a WereWolf on the h-file.
pub const CHESS_STARTPOS: &str = "rnbqkbnr/pppppppp/1l1j2l1/7w/7W/1L1J2L1/PPPPPPPP/RNBQKBNR";

/// Placements for the starting layout of draughts.
///
/// Each side has twelve men on the dark cells of its three nearest rows.
pub const DRAUGHTS_STARTPOS: &str = "1m1m1m1m/m1m1m1m1/1m1m1m1m/8/8/M1M1M1M1/1M1M1M1M/M1M1M1M1";
