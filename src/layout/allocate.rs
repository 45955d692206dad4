//! Article bucket allocation
//!
//! Splits an ordered article list into the primary and secondary layout
//! buckets plus an overflow remainder for "more stories" sidebars.
//! Allocation is total: any list and any sizes produce a valid result,
//! with no article dropped, duplicated, or reordered within a bucket.

use std::collections::VecDeque;

/// The three ordered buckets produced by [`allocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation<T> {
    /// Articles for the primary layout, at most the requested size
    pub primary: Vec<T>,

    /// Articles for the secondary layout, at most the requested size
    pub secondary: Vec<T>,

    /// Remainder, in input order
    pub overflow: Vec<T>,
}

impl<T> Allocation<T> {
    /// Total item count across all three buckets
    ///
    /// Always equals the input length.
    pub fn total(&self) -> usize {
        self.primary.len() + self.secondary.len() + self.overflow.len()
    }

    /// True when both layout buckets reached their requested sizes
    pub fn is_filled(&self, primary_size: usize, secondary_size: usize) -> bool {
        self.primary.len() == primary_size && self.secondary.len() == secondary_size
    }
}

impl<T> Default for Allocation<T> {
    fn default() -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
            overflow: Vec::new(),
        }
    }
}

/// Partition `items` into primary/secondary/overflow buckets
///
/// The front of the list fills primary up to `primary_size`, the next
/// stretch fills secondary up to `secondary_size`, and the rest lands
/// in overflow. A final borrowing pass moves items from the front of
/// overflow so that primary fills completely before secondary whenever
/// the input runs short of `primary_size + secondary_size`.
///
/// Never panics; relative order within each bucket matches the input.
pub fn allocate<T>(items: Vec<T>, primary_size: usize, secondary_size: usize) -> Allocation<T> {
    let mut buffer: VecDeque<T> = items.into();
    let mut out = Allocation::default();

    if buffer.is_empty() {
        return out;
    }

    let take = primary_size.min(buffer.len());
    out.primary = buffer.drain(..take).collect();

    let take = secondary_size.min(buffer.len());
    out.secondary = buffer.drain(..take).collect();

    // Borrow forward from the remainder, primary first
    while out.primary.len() < primary_size {
        match buffer.pop_front() {
            Some(item) => out.primary.push(item),
            None => break,
        }
    }
    while out.secondary.len() < secondary_size {
        match buffer.pop_front() {
            Some(item) => out.secondary.push(item),
            None => break,
        }
    }

    out.overflow = buffer.into();
    out
}
