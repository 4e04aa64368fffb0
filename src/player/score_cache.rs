//! Fixed-capacity, direct-mapped score memo keyed by `(Zobrist hash, depth)`.
//!
//! A store always overwrites slot `key % capacity`, evicting whatever was
//! there; there is no chaining, ageing or depth preference. A probe only
//! returns a value when the slot's full key matches, which filters unrelated
//! positions that map to the same slot. Two different boards with the same
//! hash and depth are indistinguishable; this is an accepted, vanishingly
//! rare approximation of the hashing scheme, not a correctness guarantee.
//!
//! Each score also records whether it is exact or only a bound, since
//! alpha-beta nodes that were cut off do not know their true value.

use tracing::trace;

use crate::board::board::Board;
use crate::board::zobrist::ZobHash;
use crate::player::board_scoring::BoardScore;

/// Default slot count for a computer player's cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000_000;

const DEPTH_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The true score is at least `value`.
    Lower,
    /// The true score is at most `value`.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedScore {
    pub value: BoardScore,
    pub bound: Bound,
}

impl CachedScore {
    pub const fn exact(value: BoardScore) -> Self {
        Self {
            value,
            bound: Bound::Exact,
        }
    }
}

/// Composite cache key of a board hash and the remaining search depth.
#[inline]
pub fn cache_key(hash: ZobHash, depth: usize) -> u64 {
    hash ^ (depth as u64).wrapping_mul(DEPTH_MIX)
}

pub trait ScoreCache {
    fn find(&mut self, board: &Board, depth: usize) -> Option<CachedScore>;
    fn set(&mut self, board: &Board, depth: usize, score: CachedScore);
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    key: u64,
    score: CachedScore,
}

#[derive(Debug, Clone)]
pub struct FixedScoreCache {
    slots: Vec<Option<CacheEntry>>,
    stats: CacheStats,
}

impl FixedScoreCache {
    /// `capacity` must be positive.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "score cache needs at least one slot");
        Self {
            slots: vec![None; capacity],
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    fn slot_index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }
}

impl Default for FixedScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ScoreCache for FixedScoreCache {
    fn find(&mut self, board: &Board, depth: usize) -> Option<CachedScore> {
        self.stats.probes += 1;
        let key = cache_key(board.zob_hash(), depth);
        let hit = self.slots[self.slot_index(key)]
            .filter(|entry| entry.key == key)
            .map(|entry| entry.score);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    fn set(&mut self, board: &Board, depth: usize, score: CachedScore) {
        self.stats.stores += 1;
        let key = cache_key(board.zob_hash(), depth);
        let index = self.slot_index(key);
        if let Some(previous) = self.slots[index] {
            if previous.key != key {
                self.stats.evictions += 1;
                trace!(slot = index, evicted = previous.key, key, "score cache eviction");
            }
        }
        self.slots[index] = Some(CacheEntry { key, score });
    }

    fn clear(&mut self) {
        self.slots.fill(None);
        self.stats = CacheStats::default();
    }
}

/// Cache that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScoreCache;

impl ScoreCache for NoScoreCache {
    fn find(&mut self, _board: &Board, _depth: usize) -> Option<CachedScore> {
        None
    }

    fn set(&mut self, _board: &Board, _depth: usize, _score: CachedScore) {}

    fn clear(&mut self) {}
}
