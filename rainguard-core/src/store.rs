//! Sample Storage Backends
//!
//! A history only ever touches its samples at the two ends: it appends at the
//! back and evicts from the front. [`SampleStore`] captures exactly that
//! surface so the same window logic runs on:
//!
//! - `VecDeque<Sample>`: grows as needed. The default on hosts with an allocator.
//! - [`FixedStore<N>`]: a `heapless::Deque` with capacity fixed at compile
//!   time. When full, the oldest sample is dropped to make room, the same
//!   overwrite behaviour as a ring buffer.
//!
//! ```text
//! front (oldest)                         back (newest)
//!   ┌────────┬────────┬────────┬────────┐
//!   │ t-180  │ t-120  │ t-60   │   t    │
//!   └────────┴────────┴────────┴────────┘
//!   ↑ pop_front (eviction)          push_back (ingestion) ↑
//! ```
//!
//! Size a `FixedStore` for the window: at one report per minute a 24 hour
//! window needs 1440 slots (see
//! [`DAILY_FIXED_CAPACITY`](crate::constants::DAILY_FIXED_CAPACITY)). An
//! undersized store silently shortens the effective window.

use alloc::collections::VecDeque;

use crate::history::Sample;

/// Double-ended sample storage used by histories
pub trait SampleStore {
    /// Number of stored samples
    fn len(&self) -> usize;

    /// Check if the store holds no samples
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Oldest sample
    fn front(&self) -> Option<&Sample>;

    /// Newest sample
    fn back(&self) -> Option<&Sample>;

    /// Append a sample. Must not fail: bounded stores drop their oldest
    /// sample to make room.
    fn push_back(&mut self, sample: Sample);

    /// Remove and return the oldest sample
    fn pop_front(&mut self) -> Option<Sample>;

    /// Remove all samples
    fn clear(&mut self);

    /// Iterate from oldest to newest
    fn iter(&self) -> impl Iterator<Item = &Sample> + '_;
}

impl SampleStore for VecDeque<Sample> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn front(&self) -> Option<&Sample> {
        VecDeque::front(self)
    }

    fn back(&self) -> Option<&Sample> {
        VecDeque::back(self)
    }

    fn push_back(&mut self, sample: Sample) {
        VecDeque::push_back(self, sample);
    }

    fn pop_front(&mut self) -> Option<Sample> {
        VecDeque::pop_front(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        VecDeque::iter(self)
    }
}

/// Fixed-capacity sample store backed by `heapless::Deque`
///
/// No allocation after construction, and usable in `static` context:
/// ```rust
/// use rainguard_core::store::FixedStore;
/// static EMPTY: FixedStore<64> = FixedStore::new();
/// ```
#[derive(Clone)]
pub struct FixedStore<const N: usize> {
    samples: heapless::Deque<Sample, N>,
    /// Samples pushed out by capacity rather than by age
    overwritten: u32,
}

impl<const N: usize> FixedStore<N> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            samples: heapless::Deque::new(),
            overwritten: 0,
        }
    }

    /// Maximum number of samples held
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Check if the next push will drop the oldest sample
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Number of samples dropped because the store was full
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }
}

impl<const N: usize> Default for FixedStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for FixedStore<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedStore")
            .field("len", &self.samples.len())
            .field("capacity", &N)
            .field("overwritten", &self.overwritten)
            .finish()
    }
}

impl<const N: usize> SampleStore for FixedStore<N> {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn front(&self) -> Option<&Sample> {
        self.samples.front()
    }

    fn back(&self) -> Option<&Sample> {
        self.samples.back()
    }

    fn push_back(&mut self, sample: Sample) {
        if self.samples.is_full() && self.samples.pop_front().is_some() {
            self.overwritten = self.overwritten.saturating_add(1);
            log_warn!("sample store full ({} slots), dropping oldest sample", N);
        }

        // Cannot fail: a slot was freed above.
        let _ = self.samples.push_back(sample);
    }

    fn pop_front(&mut self) -> Option<Sample> {
        self.samples.pop_front()
    }

    fn clear(&mut self) {
        self.samples.clear();
    }

    fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }
}
