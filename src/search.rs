/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{
    Bound, Color, Evaluator, GameStatus, Move, Position, Score, TTable, TTableEntry, ZobristKey,
};

/// Maximum depth that can be searched.
///
/// Fixed-depth search is the only runtime bound there is (no time limit,
/// no cancellation hook), so the ceiling doubles as the caller-level
/// validation limit.
pub const MAX_DEPTH: u8 = 10;

/// Default search depth when the caller does not supply one.
pub const DEFAULT_DEPTH: u8 = 4;

/// Default half-width of the aspiration window, in score units.
pub const DEFAULT_ASPIRATION_WINDOW: Score = Score::new(10);

/// Bounds within an alpha-beta search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    /// Lower bound.
    ///
    /// The maximizing colour is guaranteed a score that is AT LEAST `alpha`.
    pub alpha: Score,

    /// Upper bound.
    ///
    /// The maximizing colour will be held to a score that is AT MOST `beta`.
    pub beta: Score,
}

impl SearchBounds {
    /// Create a new [`SearchBounds`] from the provided `alpha` and `beta` values.
    #[inline(always)]
    pub const fn new(alpha: Score, beta: Score) -> Self {
        Self { alpha, beta }
    }
}

impl Default for SearchBounds {
    /// Default [`SearchBounds`] are `(-infinity, infinity)`.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Score::ALPHA, Score::BETA)
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth to execute the search at, in plies.
    ///
    /// One ply is one colour's turn, so four plies make a full rotation.
    pub depth: u8,

    /// Half-width of the aspiration window applied between root candidates.
    pub window: Score,
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            window: DEFAULT_ASPIRATION_WINDOW,
        }
    }
}

/// The result of a search, containing the best move found, score, and total
/// nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found during the search, carrying its score.
    ///
    /// `None` means the searched colour had no legal move at all; the caller
    /// should treat that as an automatic pass, not an error.
    pub bestmove: Option<Move>,

    /// Score of the best move, from the searched colour's perspective.
    pub score: Score,

    /// The depth of the search that produced this result.
    pub depth: u8,

    /// Number of nodes visited below the root.
    pub nodes: u64,

    /// Number of nodes resolved by a transposition-table cutoff.
    pub tt_hits: u64,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            bestmove: None,
            score: Score::ALPHA,
            depth: 0,
            nodes: 0,
            tt_hits: 0,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bestmove {
            Some(mv) => write!(
                f,
                "{mv} (score {}, depth {}, {} nodes, {} tt hits)",
                self.score, self.depth, self.nodes, self.tt_hits
            ),
            None => write!(f, "no legal move"),
        }
    }
}

/// Executes one fixed-depth search over the four-colour rotation.
///
/// The tree is explored with alpha-beta pruning on a single axis: every node
/// is scored by how good it is for the *root* colour, and the other three
/// colours are assumed to play against that colour's interest. This
/// "paranoid" collapse of a four-player game onto a two-sided search is a
/// deliberate simplification (in the live game the other armies are
/// independent agents) and it is threaded explicitly through the recursion
/// as the `maximizing` parameter, so an alternative N-player strategy (max-n,
/// say) could be swapped in behind the same interface.
///
/// Node and hit counters are owned by this one invocation; nothing about a
/// search is process-global.
pub struct Search<'a> {
    /// Cache of previously-resolved positions, shared across invocations by
    /// the owning engine.
    ttable: &'a mut TTable,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Tick of the owning engine's game timer, stamped into every table
    /// entry this search writes.
    timer: u32,

    /// Number of nodes searched so far.
    nodes: u64,

    /// Number of transposition-table cutoffs so far.
    tt_hits: u64,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] instance writing table entries at `timer`.
    #[inline(always)]
    pub fn new(ttable: &'a mut TTable, config: SearchConfig, timer: u32) -> Self {
        Self {
            ttable,
            config,
            timer,
            nodes: 0,
            tt_hits: 0,
        }
    }

    /// Start the search, returning the best move for `color` on `position`.
    ///
    /// Root candidates are explored in generation order, each through a full
    /// clone-and-apply of the position. Between candidates the window is
    /// managed by aspiration: a score that lands strictly inside the current
    /// window tightens the window to `score ± window` on the assumption that
    /// sibling moves score similarly; a score outside it re-opens the full
    /// window for the remaining candidates. A failing candidate is *not*
    /// re-searched.
    pub fn start(mut self, position: &Position, color: Color) -> SearchResult {
        let moves = position.generate_moves(color);

        let mut result = SearchResult {
            depth: self.config.depth,
            ..Default::default()
        };

        // No legal moves is not an error; it is the caller's pass signal.
        let Some(first) = moves.first().copied() else {
            return result;
        };

        // A depth-0 search degenerates to a static evaluation of the root
        // itself, before any move is made.
        if self.config.depth == 0 {
            let score = Evaluator::new(position).eval_for(color);
            result.bestmove = Some(first.with_score(score));
            result.score = score;
            return result;
        }

        let mut bounds = SearchBounds::default();
        let mut record = Score::ALPHA;
        let mut bestmove = first.with_score(record);

        for mv in moves {
            let next = position.with_move_applied(mv);
            let score = self.alphabeta(next, self.config.depth - 1, bounds, color.next(), color);

            // If the score fell outside the window, subsequent candidates see
            // the full window again; otherwise tighten around it.
            if score <= bounds.alpha || score >= bounds.beta {
                bounds = SearchBounds::default();
            } else {
                bounds = SearchBounds::new(score - self.config.window, score + self.config.window);
            }

            if score > record {
                record = score;
                bestmove = mv.with_score(score);
            }
        }

        result.bestmove = Some(bestmove);
        result.score = record;
        result.nodes = self.nodes;
        result.tt_hits = self.tt_hits;
        result
    }

    /// Primary location of search logic: bounded alpha-beta over the colour
    /// rotation, maximizing for `maximizing` regardless of whose turn it is.
    ///
    /// Returns a score that respects the supplied window's clamp semantics:
    /// a fail-high returns exactly `bounds.beta`, a fail-low returns exactly
    /// `bounds.alpha`, and anything in between is an exact value.
    fn alphabeta(
        &mut self,
        position: Position,
        depth: u8,
        mut bounds: SearchBounds,
        color: Color,
        maximizing: Color,
    ) -> Score {
        self.nodes += 1;

        // Probe the table first; a usable entry means the whole subtree is
        // skipped, moves and all. Only entries resolved at this depth or
        // deeper are trusted.
        if let Some(entry) = self.ttable.get(&position.key()) {
            if entry.depth >= depth {
                if let Some(score) = entry.try_cutoff(bounds) {
                    self.tt_hits += 1;
                    return score;
                }
            }
        }

        // Terminal: out of depth, or the game is already decided. Evaluate
        // statically for the maximizing colour and remember how the score
        // relates to the window it was found in.
        if depth == 0 || position.status() != GameStatus::InProgress {
            let score = Evaluator::new(&position).eval_for(maximizing);
            self.save(position.key(), score, Bound::classify(score, bounds), depth);
            return score;
        }

        let moves = position.generate_moves(color);

        // An immobile colour is skipped for this ply: the rotation advances
        // and one depth unit is spent, nothing else.
        if moves.is_empty() {
            return self.alphabeta(
                position.with_turn_passed(),
                depth - 1,
                bounds,
                color.next(),
                maximizing,
            );
        }

        for mv in moves {
            let next = position.with_move_applied(mv);
            let score = self.alphabeta(next, depth - 1, bounds, color.next(), maximizing);

            if color == maximizing {
                // This node maximizes: raise alpha.
                let previous_alpha = bounds.alpha;
                bounds.alpha = bounds.alpha.max(score);

                if bounds.alpha >= bounds.beta {
                    // Fail high: the remaining siblings are pruned.
                    self.save(position.key(), bounds.beta, Bound::Lower, depth);
                    return bounds.beta;
                }
                if score > previous_alpha {
                    self.save(position.key(), score, Bound::Exact, depth);
                }
            } else {
                // Every other colour minimizes the maximizing colour's
                // outcome: lower beta.
                let previous_beta = bounds.beta;
                bounds.beta = bounds.beta.min(score);

                if bounds.beta <= bounds.alpha {
                    // Fail low: the remaining siblings are pruned.
                    self.save(position.key(), bounds.alpha, Bound::Upper, depth);
                    return bounds.alpha;
                }
                if score < previous_beta {
                    self.save(position.key(), score, Bound::Exact, depth);
                }
            }
        }

        // Every move searched without a cutoff: the window edge is the value.
        if color == maximizing {
            bounds.alpha
        } else {
            bounds.beta
        }
    }

    /// Store a resolved position summary, stamped with this search's timer tick.
    #[inline(always)]
    fn save(&mut self, key: ZobristKey, score: Score, bound: Bound, depth: u8) {
        self.ttable
            .store(TTableEntry::new(key, score, bound, depth, self.timer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceKind, Square};

    fn search(position: &Position, color: Color, depth: u8) -> SearchResult {
        let mut ttable = TTable::from_capacity(1 << 12);
        let config = SearchConfig {
            depth,
            ..Default::default()
        };
        Search::new(&mut ttable, config, 1).start(position, color)
    }

    #[test]
    fn test_depth_zero_degenerates_to_static_eval() {
        let position = Position::new();
        let res = search(&position, Color::Red, 0);

        let expected = Evaluator::new(&position).eval_for(Color::Red);
        assert_eq!(res.score, expected);
        assert_eq!(res.bestmove.unwrap().score(), expected);
    }

    #[test]
    fn test_depth_one_prefers_the_better_capture() {
        // Red's pawn on c3 has exactly two moves: a quiet push to c4 and a
        // capture of Yellow's elephant on d4.
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::Pawn), "c3".parse().unwrap());
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        position.place(Piece::new(Color::Yellow, PieceKind::Elephant), "d4".parse().unwrap());
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);
        // Box the king in so the pawn's choice decides the search
        position.place(Piece::new(Color::Red, PieceKind::Boat), "c1".parse().unwrap());
        position.place(Piece::new(Color::Red, PieceKind::Pawn), "c2".parse().unwrap());
        position.place(Piece::new(Color::Red, PieceKind::Pawn), "d2".parse().unwrap());
        position.place(Piece::new(Color::Red, PieceKind::Pawn), "e2".parse().unwrap());
        position.place(Piece::new(Color::Red, PieceKind::Pawn), "e1".parse().unwrap());

        let res = search(&position, Color::Red, 1);
        let best = res.bestmove.unwrap();

        assert!(best.is_capture(), "expected the capture, got {best}");
        assert_eq!(best.to(), "d4".parse().unwrap());

        // At depth 1 the score is exactly the static evaluation of the board
        // after the capture.
        let after = position.with_move_applied(best);
        assert_eq!(res.score, Evaluator::new(&after).eval_for(Color::Red));
    }

    #[test]
    fn test_immobile_colors_cost_one_ply_each() {
        // Only Red and Yellow have pieces; Blue and Green are skipped.
        let mut position = Position::empty();
        position.place(Piece::new(Color::Red, PieceKind::King), Square::D1);
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);

        let root_moves = position.generate_moves(Color::Red).len() as u64;
        let res = search(&position, Color::Red, 2);

        // Each root candidate descends Blue (skip) -> Yellow (terminal at
        // depth 0): exactly two node visits per candidate. Any other count
        // means a skip consumed the wrong number of plies.
        assert_eq!(res.nodes, root_moves * 2);
        assert!(res.bestmove.is_some());
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Yellow, PieceKind::King), Square::E8);
        position.place(Piece::new(Color::Green, PieceKind::King), Square::H4);

        let res = search(&position, Color::Red, 3);
        assert!(res.bestmove.is_none());
    }

    #[test]
    fn test_returned_scores_respect_the_window_clamp() {
        let position = Position::new();
        let mut ttable = TTable::from_capacity(1 << 12);
        let config = SearchConfig::default();

        // A deliberately absurd narrow window around zero: the start position
        // evaluates far below it for every colour, so the recursion must come
        // back exactly clamped.
        let bounds = SearchBounds::new(Score::new(-10), Score::new(10));
        let mut search = Search::new(&mut ttable, config, 1);
        let score = search.alphabeta(position, 2, bounds, Color::Blue, Color::Red);

        assert!(
            score == bounds.alpha || score == bounds.beta || (score > bounds.alpha && score < bounds.beta),
            "score {score} violates clamp semantics for {bounds:?}"
        );
    }

    #[test]
    fn test_best_move_is_always_legal() {
        let position = Position::new();
        for depth in 0..=3 {
            let res = search(&position, Color::Red, depth);
            let best = res.bestmove.unwrap();
            let legal = position.generate_moves(Color::Red);
            assert!(
                legal.iter().any(|mv| mv.from() == best.from() && mv.to() == best.to()),
                "depth {depth} returned non-legal move {best}"
            );
        }
    }
}
