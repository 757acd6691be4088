//! Knobs for the alpha-beta search.
//!
//! The defaults reproduce the classic behavior: depth 4, a shuffled root so
//! repeated games differ, checkers-first and endangered-piece ordering near
//! the root, and a per-search transposition memo.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Remaining plies explored below the root.
    pub depth: u8,
    /// Shuffle the move list near the root before the deterministic passes.
    pub randomize_root: bool,
    /// Seed for the root shuffle. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Plies from the root that are shuffled.
    pub shuffle_plies: u8,
    /// Plies from the root where checking moves are tried first.
    pub checkers_first_plies: u8,
    /// Plies from the root where quiet moves of attacked pieces are promoted.
    pub danger_plies: u8,
    pub use_memo: bool,
    pub memo_size_mb: usize,
    /// Plies of the scored move tree kept in the outcome. The root level is
    /// always kept.
    pub tree_plies: u8,
    /// Wall-clock budget. When it runs out the best move found so far wins.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            randomize_root: true,
            seed: None,
            shuffle_plies: 2,
            checkers_first_plies: 4,
            danger_plies: 4,
            use_memo: true,
            memo_size_mb: 8,
            tree_plies: 2,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disable the root shuffle so identical positions give identical trees.
    pub fn deterministic(mut self) -> Self {
        self.randomize_root = false;
        self
    }

    pub fn with_memo(mut self, enabled: bool) -> Self {
        self.use_memo = enabled;
        self
    }

    pub fn with_tree_plies(mut self, plies: u8) -> Self {
        self.tree_plies = plies;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
