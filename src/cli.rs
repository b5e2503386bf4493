/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use crate::{GameVariant, Square};
use clap::{builder::PossibleValue, Parser, ValueEnum};

/// Command-line arguments given at startup.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// The variant to start playing.
    #[arg(short, long, default_value = "chess", ignore_case = true)]
    pub variant: GameVariant,
}

/// A command to be sent to the shell, one per line of input.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(multicall = true, about, rename_all = "lower")]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Quit the shell.
    #[command(alias = "quit")]
    Exit,

    /// Attempt to move the piece on `from` to `to`, following the rules of the current variant.
    #[command(alias = "m")]
    Move { from: Square, to: Square },

    /// Shows all legal destinations of the piece on a square.
    Moves { square: Square },

    /// Restart the current variant from its starting layout.
    New,

    /// Place a piece on the provided square, replacing anything there.
    ///
    /// Pieces are given by letter, uppercase for White: k q r b n p l j w m d.
    Place { piece: char, square: Square },

    /// Print the placement string of the current board.
    #[command(alias = "fen")]
    Placements,

    /// Remove the piece at the provided square.
    Take { square: Square },

    /// List the pieces of the side to move that an enemy piece could move onto.
    Threats,

    /// Change the variant being played, or display the current variant.
    ///
    /// Switching variants starts a new game.
    #[command(alias = "v")]
    Variant {
        /// The variant to switch to.
        #[arg(ignore_case = true)]
        variant: Option<GameVariant>,
    },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

impl ValueEnum for GameVariant {
    fn value_variants<'a>() -> &'a [Self] {
        &[GameVariant::Chess, GameVariant::Draughts]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Possible values are the variant's name, and some variants have additional aliases
        let value = match self {
            GameVariant::Chess => PossibleValue::new("chess"),
            GameVariant::Draughts => PossibleValue::new("draughts").alias("checkers"),
        };

        Some(value)
    }
}
