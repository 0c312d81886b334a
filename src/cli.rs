/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{Parser, ValueEnum};

use crate::{Color, TTable, DEFAULT_DEPTH};

/// Who controls one of the four armies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Seat {
    /// Moves are typed at the console.
    Human,

    /// Moves are chosen by the search engine.
    Engine,
}

/// A four-player chess variant engine.
#[derive(Debug, Clone, Parser)]
#[command(about, version)]
pub struct Cli {
    /// Search depth for engine seats, in plies (one ply per colour's turn).
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u8,

    /// Who controls Red.
    #[arg(long, value_enum, default_value_t = Seat::Engine)]
    pub red: Seat,

    /// Who controls Blue.
    #[arg(long, value_enum, default_value_t = Seat::Engine)]
    pub blue: Seat,

    /// Who controls Yellow.
    #[arg(long, value_enum, default_value_t = Seat::Engine)]
    pub yellow: Seat,

    /// Who controls Green.
    #[arg(long, value_enum, default_value_t = Seat::Engine)]
    pub green: Seat,

    /// Number of transposition table entries (rounded up to a power of two).
    #[arg(long, default_value_t = TTable::DEFAULT_CAPACITY)]
    pub hash: usize,
}

impl Cli {
    /// Returns the seat assignments indexed by [`Color`].
    #[inline(always)]
    pub fn seats(&self) -> [Seat; Color::COUNT] {
        [self.red, self.blue, self.yellow, self.green]
    }
}
