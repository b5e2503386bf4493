/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};

use crate::{Chess, Draughts, EngineCommand, Game, GameVariant, Move, MoveList, Piece, Square};

/// A game of either variant, as held by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Chess(Game<Chess>),
    Draughts(Game<Draughts>),
}

/// Runs `$body` with `$game` bound to the game inside `$session`, whichever variant it is.
macro_rules! with_game {
    ($session:expr, $game:ident => $body:expr) => {
        match $session {
            Session::Chess($game) => $body,
            Session::Draughts($game) => $body,
        }
    };
}

impl Session {
    /// Starts a new game of `variant` from its starting layout.
    fn new(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Chess => Self::Chess(Game::new()),
            GameVariant::Draughts => Self::Draughts(Game::new()),
        }
    }

    fn variant(&self) -> GameVariant {
        with_game!(self, game => game.variant())
    }

    fn legal_moves_from(&self, square: Square) -> MoveList {
        with_game!(self, game => game.legal_moves_from(square))
    }

    fn threatened_pieces(&self) -> Vec<Piece> {
        with_game!(self, game => game.threatened_pieces(game.side_to_move()))
    }

    fn placements(&self) -> String {
        with_game!(self, game => game.board().to_placements())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_game!(self, game => fmt::Display::fmt(game, f))
    }
}

/// The interactive shell.
///
/// Reads one [`EngineCommand`] per line and runs it against the current game.
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    ///
    /// This is modified whenever moves are played or the board is edited,
    /// and is reset whenever a new game is started.
    session: Session,
}

impl Engine {
    /// Constructs a new [`Engine`] playing `variant`, to be executed with [`Engine::run`].
    pub fn new(variant: GameVariant) -> Self {
        Self {
            session: Session::new(variant),
        }
    }

    /// Returns a string of the shell's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Fetch the [`GameVariant`] currently being played.
    pub fn variant(&self) -> GameVariant {
        self.session.variant()
    }

    /// Execute the main loop of the shell, reading commands from `stdin` and printing to `stdout`.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();
        self.run_with(stdin, stdout)
    }

    /// Execute the main loop of the shell over any line-based input and output.
    ///
    /// Returns once an `exit` command is read or the input runs out.
    pub fn run_with<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        let mut buffer = String::with_capacity(256);
        writeln!(output, "{}", self.name())?;

        loop {
            // Clear the buffer, read input, and trim the trailing newline
            buffer.clear();
            let bytes = input
                .read_line(&mut buffer)
                .context("Failed to read line when parsing commands")?;

            // For ctrl + d
            if 0 == bytes {
                tracing::debug!("input closed");
                break;
            }

            // Ignore empty lines
            let line = buffer.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<EngineCommand>() {
                Ok(EngineCommand::Exit) => break,

                Ok(cmd) => {
                    // Keep running, even on error
                    if let Err(e) = self.execute(cmd, &mut output) {
                        writeln!(output, "Error: {e:#}")?;
                    }
                }

                // Covers `help` as well as genuine mistakes
                Err(err) => writeln!(output, "{err}")?,
            }

            output.flush()?;
        }

        Ok(())
    }

    /// Runs a single [`EngineCommand`], writing any response to `output`.
    ///
    /// [`EngineCommand::Exit`] does nothing here; ending the loop is up to the caller.
    pub fn execute<W: Write>(&mut self, cmd: EngineCommand, output: &mut W) -> Result<()> {
        match cmd {
            EngineCommand::Display => writeln!(output, "{}", self.session)?,

            EngineCommand::Exit => {}

            EngineCommand::Move { from, to } => {
                let mv = Move::new(from, to);
                let result = with_game!(&mut self.session, game => game.try_move(mv));

                match result {
                    Ok(outcome) => writeln!(output, "{outcome}")?,
                    Err(rejection) => writeln!(output, "Illegal move {mv}: {rejection}")?,
                }
            }

            EngineCommand::Moves { square } => {
                let moves = self.session.legal_moves_from(square);
                writeln!(output, "{}", join_or_none(moves))?;
            }

            EngineCommand::New => self.session = Session::new(self.variant()),

            EngineCommand::Place { piece, square } => {
                let piece = Piece::from_char(piece, square)
                    .with_context(|| format!("Cannot place {piece:?} on {square}"))?;
                with_game!(&mut self.session, game => game.place(piece, square));
            }

            EngineCommand::Placements => writeln!(output, "{}", self.session.placements())?,

            EngineCommand::Take { square } => {
                match with_game!(&mut self.session, game => game.take(square)) {
                    Some(piece) => writeln!(output, "Took {} from {square}", piece.name())?,
                    None => writeln!(output, "There is nothing on {square}")?,
                }
            }

            EngineCommand::Threats => {
                let threatened = self
                    .session
                    .threatened_pieces()
                    .into_iter()
                    .map(|piece| format!("{} on {}", piece.name(), piece.square()));
                writeln!(output, "{}", join_or_none(threatened))?;
            }

            EngineCommand::Variant { variant } => match variant {
                Some(variant) => {
                    tracing::info!(%variant, "starting a new game");
                    self.session = Session::new(variant);
                }
                None => writeln!(output, "{}", self.variant())?,
            },
        }

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GameVariant::default())
    }
}

/// Joins `items` by comma-space, or yields `"(none)"` if there are none.
fn join_or_none<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        String::from("(none)")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `script` to a fresh shell and returns everything it printed.
    fn run_script(variant: GameVariant, script: &str) -> String {
        let mut engine = Engine::new(variant);
        let mut output = Vec::new();
        engine.run_with(script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_moves_and_placements() {
        let output = run_script(GameVariant::Chess, "moves e7\nmove e7 e5\nplacements\n");
        assert!(output.contains("e6, e5"));
        assert!(output.contains("e7e5: white pawn moves to e5"));
        assert!(output.contains("rnbqkbnr/pppppppp/1l1j2l1/7w/4P2W/1L1J2L1/PPPP1PPP/RNBQKBNR"));
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let output = run_script(GameVariant::Chess, "m e2 e3\n");
        assert!(output.contains("Illegal move e2e3: the piece on e2 belongs to black"));
    }

    #[test]
    fn test_exit_stops_reading() {
        let output = run_script(GameVariant::Chess, "exit\nplacements\n");
        assert!(!output.contains("rnbqkbnr"));
    }

    #[test]
    fn test_switch_variant_and_edit() {
        let mut engine = Engine::default();
        let mut output = Vec::new();

        let commands = ["variant draughts", "take a6", "place D a6", "placements", "v"];
        for cmd in commands {
            engine.execute(cmd.parse().unwrap(), &mut output).unwrap();
        }

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Took white draughts man from a6"));
        assert!(output.contains("1m1m1m1m/m1m1m1m1/1m1m1m1m/8/8/D1M1M1M1/1M1M1M1M/M1M1M1M1"));
        assert!(output.ends_with("draughts\n"));
    }

    #[test]
    fn test_bad_piece_letter_is_an_error() {
        let mut engine = Engine::default();
        let cmd = "place x e4".parse().unwrap();
        assert!(engine.execute(cmd, &mut io::sink()).is_err());
    }

    #[test]
    fn test_threats_and_new() {
        let output = run_script(GameVariant::Chess, "threats\nmove e7 e5\nnew\nplacements\n");
        assert!(output.contains("(none)"));
        assert!(output.contains(crate::CHESS_STARTPOS));
    }
}
