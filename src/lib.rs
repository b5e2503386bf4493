/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, pieces, and move generation.
mod board;

/// Command-line arguments and shell commands.
mod cli;

/// Code related to the interactive shell, such as user input handling.
mod engine;

/// Reasons a move can be rejected.
mod error;

/// A game in progress: board, side to move, and turn count.
mod game;

/// The move-legality rules of each variant.
mod rules;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use rules::*;
