/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// All board-related types: squares, bitboards, pieces, moves, positions,
/// move generation, and position hashing.
mod board;

/// Command-line interface of the console binary.
mod cli;

/// The persistent engine and the console game driver.
mod engine;

/// Evaluation of positions.
mod eval;

/// Score representation.
mod score;

/// Main engine logic; all search related code.
mod search;

/// The transposition table.
mod ttable;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use score::*;
pub use search::*;
pub use ttable::*;
