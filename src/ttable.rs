/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Score, SearchBounds, ZobristKey};

/// How a stored score relates to the true search value of its position.
///
/// This tag is what lets the table prune instead of only memoizing exact
/// results: a bound entry can still prove a cutoff against the current
/// window.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Bound {
    /// The score is the node's exact resolved value.
    Exact,

    /// The true value is at least this score (a fail-high).
    Lower,

    /// The true value is at most this score (a fail-low).
    Upper,
}

impl Bound {
    /// Classifies `score` against the window it was searched with:
    ///
    /// ```text
    /// if score >= beta:
    ///     LOWER
    /// else if score <= alpha:
    ///     UPPER
    /// else:
    ///     EXACT
    /// ```
    #[inline(always)]
    pub fn classify(score: Score, bounds: SearchBounds) -> Self {
        if score >= bounds.beta {
            Self::Lower
        } else if score <= bounds.alpha {
            Self::Upper
        } else {
            Self::Exact
        }
    }
}

/// An entry into the transposition table: the resolved summary of one
/// position, keyed by its fingerprint.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TTableEntry {
    /// Fingerprint of the position this entry summarizes.
    pub key: ZobristKey,

    /// Score of the position when it was resolved.
    pub score: Score,

    /// How `score` relates to the position's true value.
    pub bound: Bound,

    /// Depth at which the data for this entry was found.
    pub depth: u8,

    /// Game-timer tick at which this entry was written. Newer entries at the
    /// same slot displace older ones; the tick records recency.
    pub timer: u32,
}

impl TTableEntry {
    /// Creates a new [`TTableEntry`] from the provided parameters.
    #[inline(always)]
    pub const fn new(key: ZobristKey, score: Score, bound: Bound, depth: u8, timer: u32) -> Self {
        Self {
            key,
            score,
            bound,
            depth,
            timer,
        }
    }

    /// Determine whether this entry proves a cutoff against `bounds` and, if
    /// so, return the value the node should yield.
    ///
    /// An entry is usable if and only if:
    ///     1. It is [`Bound::Exact`]: its score is returned as-is.
    ///     2. It is [`Bound::Upper`] and its score is `<= alpha`: the node
    ///        fails low, yielding `alpha`.
    ///     3. It is [`Bound::Lower`] and its score is `>= beta`: the node
    ///        fails high, yielding `beta`.
    ///
    /// Depth trust (`entry.depth >= probe depth`) is the caller's check, not
    /// the table's; deeper knowledge generalizes to shallower queries, never
    /// the reverse.
    #[inline(always)]
    pub fn try_cutoff(&self, bounds: SearchBounds) -> Option<Score> {
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Upper => (self.score <= bounds.alpha).then_some(bounds.alpha),
            Bound::Lower => (self.score >= bounds.beta).then_some(bounds.beta),
        }
    }
}

/// Transposition table.
///
/// A hash-keyed cache of previously resolved positions, used during search
/// to short-circuit subtrees that have already been explored via a different
/// move order. One slot per index; a store over an occupied slot simply
/// displaces it, so newer writes win and there is no separate eviction
/// policy.
#[derive(Debug)]
pub struct TTable {
    /// Internal cache of the table.
    cache: Vec<Option<TTableEntry>>,
}

impl TTable {
    /// Default number of entries the table can hold.
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Create a new [`TTable`] that can hold at least `capacity` entries.
    ///
    /// The capacity is rounded up to a power of two so that indexing is a
    /// single mask of the fingerprint.
    #[inline(always)]
    pub fn from_capacity(capacity: usize) -> Self {
        Self {
            cache: vec![None; capacity.next_power_of_two()],
        }
    }

    /// Clears the entries of this [`TTable`].
    #[inline(always)]
    pub fn clear(&mut self) {
        self.cache.iter_mut().for_each(|entry| *entry = None);
    }

    /// Returns the number of entries that can fit within this [`TTable`].
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cache.len()
    }

    /// Returns the number of `Some` entries in this [`TTable`].
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.cache.iter().filter(|entry| entry.is_some()).count()
    }

    /// Map `key` to an index into this [`TTable`].
    #[inline(always)]
    fn index(&self, key: &ZobristKey) -> usize {
        key.inner() as usize & (self.capacity() - 1)
    }

    /// Get the entry if and only if it matches the provided key.
    ///
    /// A slot occupied by a different position (an index collision) reads as
    /// a miss.
    #[inline(always)]
    pub fn get(&self, key: &ZobristKey) -> Option<&TTableEntry> {
        self.cache[self.index(key)]
            .as_ref()
            .filter(|entry| &entry.key == key)
    }

    /// Store `entry` in the table at `entry.key`, overriding and returning
    /// whatever was there.
    #[inline(always)]
    pub fn store(&mut self, entry: TTableEntry) -> Option<TTableEntry> {
        let index = self.index(&entry.key);
        self.cache[index].replace(entry)
    }
}

impl Default for TTable {
    #[inline(always)]
    fn default() -> Self {
        Self::from_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_classification() {
        let bounds = SearchBounds::new(Score::new(-10), Score::new(10));

        assert_eq!(Bound::classify(Score::new(0), bounds), Bound::Exact);
        assert_eq!(Bound::classify(Score::new(10), bounds), Bound::Lower);
        assert_eq!(Bound::classify(Score::new(50), bounds), Bound::Lower);
        assert_eq!(Bound::classify(Score::new(-10), bounds), Bound::Upper);
        assert_eq!(Bound::classify(Score::new(-50), bounds), Bound::Upper);
    }

    #[test]
    fn test_cutoff_rules() {
        let bounds = SearchBounds::new(Score::new(-10), Score::new(10));
        let key = Position::new().key();

        // Exact entries short-circuit with their own score
        let exact = TTableEntry::new(key, Score::new(3), Bound::Exact, 2, 1);
        assert_eq!(exact.try_cutoff(bounds), Some(Score::new(3)));

        // A lower bound only helps when it sits at or above beta, and yields beta
        let cut = TTableEntry::new(key, Score::new(25), Bound::Lower, 2, 1);
        assert_eq!(cut.try_cutoff(bounds), Some(Score::new(10)));
        let weak = TTableEntry::new(key, Score::new(5), Bound::Lower, 2, 1);
        assert_eq!(weak.try_cutoff(bounds), None);

        // An upper bound only helps when it sits at or below alpha, and yields alpha
        let all = TTableEntry::new(key, Score::new(-25), Bound::Upper, 2, 1);
        assert_eq!(all.try_cutoff(bounds), Some(Score::new(-10)));
        let weak = TTableEntry::new(key, Score::new(-5), Bound::Upper, 2, 1);
        assert_eq!(weak.try_cutoff(bounds), None);
    }

    #[test]
    fn test_store_and_overwrite() {
        // Two positions that differ only by the colour to move, in a table
        // small enough that slots are contended
        let pos1 = Position::new();
        let pos2 = pos1.with_turn_passed();

        let entry1 = TTableEntry::new(pos1.key(), Score::new(1), Bound::Exact, 3, 1);
        let entry2 = TTableEntry::new(pos2.key(), Score::new(2), Bound::Exact, 3, 1);

        let mut tt = TTable::from_capacity(2);
        assert_eq!(tt.capacity(), 2);
        assert_eq!(tt.num_entries(), 0);

        tt.store(entry1);
        assert_eq!(tt.get(&pos1.key()), Some(&entry1));

        // A same-key store displaces the old entry
        let newer = TTableEntry::new(pos1.key(), Score::new(9), Bound::Lower, 5, 2);
        tt.store(newer);
        assert_eq!(tt.get(&pos1.key()), Some(&newer));

        // A colliding key reads as a miss for the other position
        tt.store(entry2);
        if tt.get(&pos2.key()).is_some() {
            assert_eq!(tt.get(&pos2.key()), Some(&entry2));
        }
    }

    #[test]
    fn test_capacity_rounds_to_power_of_two() {
        assert_eq!(TTable::from_capacity(3).capacity(), 4);
        assert_eq!(TTable::from_capacity(1000).capacity(), 1024);
    }

    #[test]
    fn test_clear() {
        let mut tt = TTable::from_capacity(8);
        let key = Position::new().key();
        tt.store(TTableEntry::new(key, Score::DRAW, Bound::Exact, 1, 1));
        assert_eq!(tt.num_entries(), 1);

        tt.clear();
        assert_eq!(tt.num_entries(), 0);
        assert!(tt.get(&key).is_none());
    }

    #[test]
    fn test_distinct_movers_never_alias() {
        // The fingerprint covers side-to-move, so the same placement with a
        // different colour to move is a different key
        let pos = Position::new();
        assert_ne!(pos.key(), pos.with_turn_passed().key());
    }
}
