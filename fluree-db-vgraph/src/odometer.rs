//! Mixed-radix counter
//!
//! An [`Odometer`] holds N digits, each with its own exclusive upper bound.
//! Digit 0 is the lowest-order digit. Stepping it through a full cycle visits
//! every combination of digit values exactly once, which is how composite
//! identifiers enumerate the identifiers reachable from per-column values.

use crate::error::{VgraphError, VgraphResult};

/// Mixed-radix counter over independently bounded digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Odometer {
    ranges: Vec<usize>,
    counters: Vec<usize>,
    /// Highest digit changed by the last step, or `len()` after a full wrap
    last_changed: usize,
}

impl Odometer {
    /// Create an odometer positioned at all zeros
    ///
    /// Rejects an empty digit list and any zero-width digit: such a counter
    /// has no state to step through.
    pub fn new(ranges: Vec<usize>) -> VgraphResult<Self> {
        if ranges.is_empty() {
            return Err(VgraphError::InvalidOdometer(
                "at least one digit is required".to_string(),
            ));
        }
        if let Some(pos) = ranges.iter().position(|&r| r == 0) {
            return Err(VgraphError::InvalidOdometer(format!(
                "digit {} has an empty range",
                pos
            )));
        }
        let counters = vec![0; ranges.len()];
        Ok(Self {
            ranges,
            counters,
            last_changed: 0,
        })
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false; an odometer has at least one digit
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Exclusive upper bound of every digit
    pub fn ranges(&self) -> &[usize] {
        &self.ranges
    }

    /// Current digit values, lowest-order first
    pub fn counters(&self) -> &[usize] {
        &self.counters
    }

    /// Highest digit changed by the last `next()`/`prev()`, or `len()` after a wrap
    pub fn last_index_changed(&self) -> usize {
        self.last_changed
    }

    /// Number of distinct states in one full cycle
    pub fn combinations(&self) -> usize {
        self.ranges.iter().product()
    }

    /// Whether `next()` would reach a state not yet seen in this cycle
    pub fn has_next(&self) -> bool {
        self.counters
            .iter()
            .zip(&self.ranges)
            .any(|(&c, &r)| c + 1 < r)
    }

    /// Whether `prev()` would reach a state not yet seen in this cycle
    pub fn has_prev(&self) -> bool {
        self.counters.iter().any(|&c| c > 0)
    }

    /// Increment with carry
    ///
    /// Returns the index of the highest digit that changed, or `len()` if every
    /// digit overflowed and the counter is back at all zeros.
    pub fn next(&mut self) -> usize {
        for idx in 0..self.ranges.len() {
            self.counters[idx] += 1;
            if self.counters[idx] < self.ranges[idx] {
                self.last_changed = idx;
                return idx;
            }
            self.counters[idx] = 0;
        }
        self.last_changed = self.ranges.len();
        self.last_changed
    }

    /// Decrement with borrow
    ///
    /// Returns the index of the highest digit that changed, or `len()` if every
    /// digit underflowed and the counter is back at its maximum state.
    pub fn prev(&mut self) -> usize {
        for idx in 0..self.ranges.len() {
            if self.counters[idx] > 0 {
                self.counters[idx] -= 1;
                self.last_changed = idx;
                return idx;
            }
            self.counters[idx] = self.ranges[idx] - 1;
        }
        self.last_changed = self.ranges.len();
        self.last_changed
    }
}
