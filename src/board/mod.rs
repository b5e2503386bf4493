/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The `8x8` grid of optional pieces, and scoped move simulation.
mod grid;

/// Pseudo-move generation for every piece kind.
mod movegen;

/// Move requests, move kinds, and applied-move outcomes.
mod moves;

/// Colors, piece kinds, and pieces.
mod piece;

/// Board coordinates.
mod square;

/// A container indexed by [`Square`].
mod table;

/// Starting layouts and other constants.
mod utils;

pub use grid::*;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
pub use square::*;
pub use table::*;
pub use utils::*;
