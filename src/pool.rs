//! The sampling cache engine.
//!
//! [`LinePool`] is an in-memory multiset of text lines supporting bulk
//! insertion, atomic "remove and return `n` uniformly-random distinct
//! instances", and a full reset. Duplicate values are distinct instances:
//! removing one occurrence of `"a"` never touches another occurrence.
//!
//! Selection works by position, not value. Each draw picks a uniform random
//! index into the remaining pool and `swap_remove`s it, so a sample of `n` is
//! a uniform `n`-subset of the instances (every `C(size, n)` subset equally
//! likely), each removal is O(1), and a repeated value can never be removed
//! twice by a single draw. A failing `sample` removes nothing.
//!
//! [`SharedPool`] wraps the engine in one exclusive lock for concurrent
//! callers: every operation holds the lock for its full duration, so the
//! observable history is linearizable and two samples can never overlap.
//!
//! Notes:
//! - This module provides `*_with_rng` entrypoints for deterministic testing/benchmarking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::prelude::*;

/// Errors reported by [`LinePool::sample`].
///
/// All three are caller-input errors: the pool is left unmodified and stays
/// usable. `Empty` and `Insufficient` are deliberately distinct even though
/// an empty pool is a special case of a shortage; callers rely on telling
/// them apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// Requested count is zero or negative.
    #[error("sample size must be a positive integer (got {0})")]
    NonPositiveCount(i64),
    /// The pool has no elements at all.
    #[error("pool is empty")]
    Empty,
    /// The pool has elements, but fewer than requested.
    #[error("not enough lines in pool (requested {requested}, available {available})")]
    Insufficient {
        /// How many lines the caller asked for.
        requested: u64,
        /// How many lines the pool currently holds.
        available: u64,
    },
}

/// An unordered multiset of text lines with uniform without-replacement
/// sampling.
///
/// Insertion order is not preserved or exposed. Empty strings are valid,
/// removable elements. The pool also tracks monotonic insert/sample totals so
/// `len() == total_inserted() - total_sampled()` holds at any quiescent point
/// since the last [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct LinePool {
    lines: Vec<String>,
    total_inserted: u64,
    total_sampled: u64,
}

impl LinePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every element of `lines` to the pool as individual instances.
    ///
    /// Duplicates are preserved; an empty input is a legal no-op. Returns the
    /// number of lines inserted.
    pub fn insert<I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.lines.len();
        self.lines.extend(lines);
        let added = self.lines.len() - before;
        self.total_inserted += added as u64;
        added
    }

    /// Remove and return `n` instances chosen uniformly at random without
    /// replacement.
    #[inline]
    pub fn sample(&mut self, n: i64) -> Result<Vec<String>, SampleError> {
        let mut rng = rand::rng();
        self.sample_with_rng(n, &mut rng)
    }

    /// Remove and return `n` instances, using a caller-supplied RNG.
    ///
    /// This exists primarily for deterministic testing/benchmarking.
    ///
    /// Error order: non-positive `n`, then empty pool, then shortage. On any
    /// error the pool is untouched. The order of the returned lines is
    /// arbitrary; only the selected *set* is uniform.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &mut self,
        n: i64,
        rng: &mut R,
    ) -> Result<Vec<String>, SampleError> {
        if n <= 0 {
            return Err(SampleError::NonPositiveCount(n));
        }
        if self.lines.is_empty() {
            return Err(SampleError::Empty);
        }
        let requested = n as u64;
        let available = self.lines.len() as u64;
        if requested > available {
            return Err(SampleError::Insufficient {
                requested,
                available,
            });
        }

        // Safe: requested <= available <= usize::MAX.
        let k = requested as usize;
        let mut out = Vec::with_capacity(k);
        for _ in 0..k {
            let idx = rng.random_range(0..self.lines.len());
            out.push(self.lines.swap_remove(idx));
        }
        self.total_sampled += requested;
        Ok(out)
    }

    /// Discard all pool contents and zero both lifetime counters.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.total_inserted = 0;
        self.total_sampled = 0;
    }

    /// Number of instances currently in the pool.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the pool currently holds no instances.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total instances inserted since creation or the last reset.
    pub fn total_inserted(&self) -> u64 {
        self.total_inserted
    }

    /// Total instances handed out since creation or the last reset.
    pub fn total_sampled(&self) -> u64 {
        self.total_sampled
    }
}

/// A cloneable handle to a [`LinePool`] shared between concurrent callers.
///
/// One mutex guards the whole pool; `insert`, `sample`, and `reset` each run
/// under it for their full duration. There are no pure readers (`sample`
/// always mutates), so no reader/writer split is needed, and no operation
/// awaits or does I/O while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedPool {
    inner: Arc<Mutex<LinePool>>,
}

impl SharedPool {
    /// Create a handle to a fresh, empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LinePool> {
        // No operation leaves the pool mid-mutation, so the pool behind a
        // poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bulk-append lines; see [`LinePool::insert`].
    pub fn insert<I>(&self, lines: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        self.lock().insert(lines)
    }

    /// Atomically sample `n` lines; see [`LinePool::sample`].
    pub fn sample(&self, n: i64) -> Result<Vec<String>, SampleError> {
        self.lock().sample(n)
    }

    /// Atomically sample `n` lines with a caller-supplied RNG.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        n: i64,
        rng: &mut R,
    ) -> Result<Vec<String>, SampleError> {
        self.lock().sample_with_rng(n, rng)
    }

    /// Clear the pool; see [`LinePool::reset`].
    pub fn reset(&self) {
        self.lock().reset()
    }

    /// Current pool size.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the pool is currently empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total instances inserted since creation or the last reset.
    pub fn total_inserted(&self) -> u64 {
        self.lock().total_inserted()
    }

    /// Total instances handed out since creation or the last reset.
    pub fn total_sampled(&self) -> u64 {
        self.lock().total_sampled()
    }
}
