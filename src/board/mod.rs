/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares as 64-bit numbers.
mod bitboard;

/// Legal move generation for each army.
mod movegen;

/// Moves, move kinds, and move lists.
mod moves;

/// The four colours, piece kinds, and pieces.
mod piece;

/// The board snapshot: placement, turn, status, and move application.
mod position;

/// Squares, files, and ranks.
mod square;

/// Position fingerprinting for the transposition table.
mod zobrist;

pub use bitboard::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use zobrist::*;
