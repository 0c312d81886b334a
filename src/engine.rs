/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::{
    Cli, Color, GameStatus, Move, MoveList, Position, Search, SearchConfig, SearchResult, Seat,
    Square, TTable, MAX_DEPTH,
};

/// The persistent half of the search: the transposition table and the game
/// timer, reused across every top-level search of one game.
///
/// The timer increments once per search invocation, not per node, and is
/// stamped into every table entry written, recording how far through the
/// game each entry was produced.
#[derive(Debug)]
pub struct Engine {
    /// Cache of resolved positions, kept warm between searches.
    ttable: TTable,

    /// Monotonically increasing tick, one per search.
    game_timer: u32,
}

impl Engine {
    /// Constructs a new [`Engine`] with the default table capacity.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_capacity(TTable::DEFAULT_CAPACITY)
    }

    /// Constructs a new [`Engine`] whose table holds at least `capacity` entries.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ttable: TTable::from_capacity(capacity),
            game_timer: 0,
        }
    }

    /// Searches `position` for the best move `color` can make at `depth`.
    ///
    /// This is the engine's whole public contract: a position and a colour
    /// in, a scored move (or `None` for "no legal move, pass") out. The
    /// call blocks until the fixed-depth search completes; callers that need
    /// responsiveness should run it on a worker thread.
    ///
    /// # Errors
    /// Rejects `depth` greater than [`MAX_DEPTH`] before any recursion begins.
    pub fn search(&mut self, position: &Position, color: Color, depth: u8) -> Result<SearchResult> {
        if depth > MAX_DEPTH {
            bail!("Invalid search depth: Must be between [0,{MAX_DEPTH}]. Got {depth}.");
        }

        self.game_timer += 1;

        let config = SearchConfig {
            depth,
            ..Default::default()
        };

        Ok(Search::new(&mut self.ttable, config, self.game_timer).start(position, color))
    }

    /// Like [`Engine::search`], reduced to just the move.
    #[inline(always)]
    pub fn best_move(
        &mut self,
        position: &Position,
        color: Color,
        depth: u8,
    ) -> Result<Option<Move>> {
        Ok(self.search(position, color, depth)?.bestmove)
    }

    /// Resets the engine for a fresh game: clears the table and the timer.
    #[inline(always)]
    pub fn new_game(&mut self) {
        self.ttable.clear();
        self.game_timer = 0;
    }

    /// Returns a reference to the engine's transposition table.
    #[inline(always)]
    pub fn ttable(&self) -> &TTable {
        &self.ttable
    }

    /// Returns the current game-timer tick.
    #[inline(always)]
    pub fn game_timer(&self) -> u32 {
        self.game_timer
    }
}

impl Default for Engine {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

/// Hosts a four-seat console game: any mix of human seats (moves typed as
/// coordinate pairs) and engine seats (moves found by [`Engine::search`]).
///
/// The console is orchestration only. It feeds positions to the engine,
/// applies whatever move comes back, and handles the pass rule: a colour
/// with no legal move (or no pieces at all) forfeits its turn and the
/// rotation continues.
pub struct Console {
    engine: Engine,
    position: Position,
    seats: [Seat; Color::COUNT],
    depth: u8,
}

impl Console {
    /// Constructs a new [`Console`] game from the parsed command line.
    pub fn new(cli: &Cli) -> Self {
        Self {
            engine: Engine::with_capacity(cli.hash),
            position: Position::new(),
            seats: cli.seats(),
            depth: cli.depth,
        }
    }

    /// Runs the game until it is over or a human quits.
    pub fn run(&mut self) -> Result<()> {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        println!("{}", self.position);
        println!();

        let mut consecutive_passes = 0;

        while self.position.status() == GameStatus::InProgress {
            let color = self.position.side_to_move();

            let mv = match self.seats[color.index()] {
                Seat::Engine => Some(self.engine_turn(color)?),
                Seat::Human => self.human_turn(color)?,
            };

            // A human asked to quit
            let Some(mv) = mv else {
                return Ok(());
            };

            self.position = self.position.with_move_applied(mv);

            if mv.is_pass() {
                consecutive_passes += 1;
                // A full rotation of passes means nobody can move at all
                if consecutive_passes >= Color::COUNT {
                    println!("No army can move; the game is drawn.");
                    return Ok(());
                }
            } else {
                consecutive_passes = 0;
                println!("{}", self.position);
                println!();
            }
        }

        match self.position.winner() {
            Some(winner) => println!("Game over! {winner} wins."),
            None => println!("Game over!"),
        }

        Ok(())
    }

    /// Asks the engine for `color`'s move, falling back to a pass when the
    /// colour has none.
    fn engine_turn(&mut self, color: Color) -> Result<Move> {
        match self.engine.best_move(&self.position, color, self.depth)? {
            Some(mv) => {
                println!("{color} plays {mv} (score {})", mv.score());
                Ok(mv)
            }
            None => {
                println!("{color} has no legal move and passes");
                Ok(Move::pass(color))
            }
        }
    }

    /// Prompts the human controlling `color` until they enter a legal move.
    ///
    /// Returns `None` if they quit or input is exhausted.
    fn human_turn(&mut self, color: Color) -> Result<Option<Move>> {
        let moves = self.position.generate_moves(color);
        if moves.is_empty() {
            println!("{color} has no legal move and passes");
            return Ok(Some(Move::pass(color)));
        }

        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("{color} to move (e.g. a2 a3, or quit): ");
            io::stdout().flush().context("Failed to flush stdout")?;

            line.clear();
            let bytes = stdin
                .lock()
                .read_line(&mut line)
                .context("Failed to read from stdin")?;

            // End of input counts as quitting
            if bytes == 0 {
                return Ok(None);
            }

            let input = line.trim();
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
                return Ok(None);
            }

            match parse_human_move(input, &moves) {
                Ok(mv) => return Ok(Some(mv)),
                Err(e) => println!("{e}"),
            }
        }
    }
}

/// Parses `input` as a source/destination square pair and matches it against
/// the legal moves.
///
/// Accepts `a2 a3` and `a2a3`.
fn parse_human_move(input: &str, moves: &MoveList) -> Result<Move> {
    let (from_str, to_str) = match input.split_once(char::is_whitespace) {
        Some((from, to)) => (from.trim(), to.trim()),
        None if input.len() == 4 && input.is_ascii() => input.split_at(2),
        None => bail!("Invalid move {input:?}: expected two squares, like a2 a3"),
    };

    let from: Square = from_str.parse()?;
    let to: Square = to_str.parse()?;

    moves
        .iter()
        .find(|mv| mv.from() == from && mv.to() == to)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("{from}{to} is not a legal move here"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceKind};

    #[test]
    fn test_depth_validation() {
        let mut engine = Engine::with_capacity(1 << 10);
        let position = Position::new();

        assert!(engine.search(&position, Color::Red, MAX_DEPTH + 1).is_err());
        assert!(engine.search(&position, Color::Red, 2).is_ok());
    }

    #[test]
    fn test_timer_ticks_once_per_search() {
        let mut engine = Engine::with_capacity(1 << 10);
        let position = Position::new();

        engine.search(&position, Color::Red, 2).unwrap();
        assert_eq!(engine.game_timer(), 1);
        engine.search(&position, Color::Blue, 2).unwrap();
        assert_eq!(engine.game_timer(), 2);

        engine.new_game();
        assert_eq!(engine.game_timer(), 0);
        assert_eq!(engine.ttable().num_entries(), 0);
    }

    #[test]
    fn test_parse_human_move() {
        let position = Position::new();
        let moves = position.generate_moves(Color::Red);

        assert!(parse_human_move("a2 a3", &moves).is_ok());
        assert!(parse_human_move("a2a3", &moves).is_ok());
        assert!(parse_human_move("a2 a5", &moves).is_err());
        assert!(parse_human_move("nonsense", &moves).is_err());
    }

    #[test]
    fn test_pass_keeps_the_rotation_turning() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);

        let passed = position.with_move_applied(Move::pass(Color::Red));
        assert_eq!(passed.side_to_move(), Color::Blue);
        assert_eq!(passed.occupancy(), position.occupancy());
    }
}
