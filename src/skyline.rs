//! The discrete-time resource accumulator.
//!
//! `can_add`/`can_remove` compute a feasibility flag directly rather than
//! using exceptions for control flow, and `add_job`/`remove_job` return a
//! `Result` rather than leaving the tracker in an undefined state when the
//! precondition doesn't hold.

use crate::domain::Skyline;
use crate::error::{DomainError, DomainResult};
use crate::quantities::Duration;
use std::collections::BTreeMap;

/// A single placement's effect on the tracker: bin-start (seconds) to the
/// size that bin would carry if this placement lands.
type Placement = BTreeMap<u64, f64>;

/// Discrete-time resource accumulator keyed by bins of `granularity` width.
///
/// Owned by exactly one per-pool scheduling pass; never shared across tasks
/// or threads.
#[derive(Debug, Clone)]
pub struct SkylineTracker {
    granularity: Duration,
    max_size: f64,
    state: BTreeMap<u64, f64>,
}

impl SkylineTracker {
    /// Construct an empty tracker. `granularity` must be positive; `max_size`
    /// must be non-negative.
    pub fn new(granularity: Duration, max_size: f64) -> DomainResult<Self> {
        if granularity.as_secs() == 0 {
            return Err(DomainError::NonPositiveBlockDuration(0));
        }
        if max_size < 0.0 {
            return Err(DomainError::NegativeBlockSize(max_size));
        }
        Ok(Self {
            granularity,
            max_size,
            state: BTreeMap::new(),
        })
    }

    /// Map a raw second count onto the start of its enclosing bin.
    fn bin(&self, seconds: u64) -> u64 {
        (seconds / self.granularity.as_secs()) * self.granularity.as_secs()
    }

    /// Build the bin -> size map a placement of `skyline` starting at `start`
    /// would occupy, taking the maximum where multiple blocks of the same
    /// placement touch the same bin.
    fn placement(&self, start: Duration, skyline: &Skyline) -> Placement {
        let mut out = Placement::new();
        let mut cursor = start.as_secs();
        for block in skyline.blocks() {
            let block_end_inclusive = cursor + block.duration().as_secs() - 1;
            let first_bin = self.bin(cursor);
            let last_bin = self.bin(block_end_inclusive);
            let mut bin = first_bin;
            loop {
                out.entry(bin)
                    .and_modify(|existing| {
                        if block.size() > *existing {
                            *existing = block.size();
                        }
                    })
                    .or_insert(block.size());
                if bin >= last_bin {
                    break;
                }
                bin += self.granularity.as_secs();
            }
            cursor += block.duration().as_secs();
        }
        out
    }

    /// Pointwise `state (op) placement` over the union of keys, absent keys
    /// treated as zero. `Err` carries the first out-of-bounds `(bin, value)`
    /// found if any resulting bin would leave `[0, max_size]`.
    fn merged(&self, placement: &Placement, sign: f64) -> Result<BTreeMap<u64, f64>, (u64, f64)> {
        let mut merged = self.state.clone();
        for (bin, size) in placement {
            let entry = merged.entry(*bin).or_insert(0.0);
            *entry += sign * size;
        }
        for (bin, value) in &merged {
            if *value < 0.0 || *value > self.max_size {
                return Err((*bin, *value));
            }
        }
        Ok(merged)
    }

    /// `true` iff adding `skyline` starting at `start` would keep every bin
    /// within `[0, max_size]`. Never mutates.
    pub fn can_add(&self, start: Duration, skyline: &Skyline) -> bool {
        let placement = self.placement(start, skyline);
        self.merged(&placement, 1.0).is_ok()
    }

    /// `true` iff removing `skyline` from `start` would keep every bin within
    /// `[0, max_size]`. Never mutates.
    pub fn can_remove(&self, start: Duration, skyline: &Skyline) -> bool {
        let placement = self.placement(start, skyline);
        self.merged(&placement, -1.0).is_ok()
    }

    /// Commit the addition. Fails if the precondition (`can_add`) does not
    /// hold, rather than leaving the tracker in an undefined state.
    pub fn add_job(&mut self, start: Duration, skyline: &Skyline) -> DomainResult<()> {
        let placement = self.placement(start, skyline);
        match self.merged(&placement, 1.0) {
            Ok(merged) => {
                self.state = merged;
                Ok(())
            }
            Err((bin, value)) => Err(DomainError::BoundsExceeded {
                bin,
                value,
                max_size: self.max_size,
            }),
        }
    }

    /// Commit the removal. Fails if the precondition (`can_remove`) does not
    /// hold.
    pub fn remove_job(&mut self, start: Duration, skyline: &Skyline) -> DomainResult<()> {
        let placement = self.placement(start, skyline);
        match self.merged(&placement, -1.0) {
            Ok(merged) => {
                self.state = merged;
                Ok(())
            }
            Err((bin, value)) => Err(DomainError::BoundsExceeded {
                bin,
                value,
                max_size: self.max_size,
            }),
        }
    }

    /// The current state, with zero-valued bins filtered out, for tests that
    /// want to assert equivalence "up to zero bins" after a round trip of
    /// adds and removes.
    pub fn nonzero_state(&self) -> BTreeMap<u64, f64> {
        self.state
            .iter()
            .filter(|(_, v)| **v != 0.0)
            .map(|(k, v)| (*k, *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkylineBlock;

    fn sky(blocks: &[(u64, f64)]) -> Skyline {
        Skyline::new(
            blocks
                .iter()
                .map(|(d, s)| SkylineBlock::new(Duration::seconds(*d), *s).unwrap())
                .collect(),
        )
    }

    #[test]
    fn single_bin_block_occupies_exactly_one_bin() {
        let tracker = SkylineTracker::new(Duration::seconds(1), 1.0).unwrap();
        let s = sky(&[(1, 1.0)]);
        let placement = tracker.placement(Duration::seconds(5), &s);
        assert_eq!(placement.len(), 1);
        assert_eq!(placement.get(&5), Some(&1.0));
    }

    #[test]
    fn seam_takes_max_not_sum() {
        let tracker = SkylineTracker::new(Duration::seconds(2), 5.0).unwrap();
        let s = sky(&[(1, 1.0), (1, 2.0)]);
        let placement = tracker.placement(Duration::seconds(0), &s);
        assert_eq!(placement.len(), 1);
        assert_eq!(placement.get(&0), Some(&2.0));
    }

    #[test]
    fn add_then_remove_round_trips_to_empty() {
        let mut tracker = SkylineTracker::new(Duration::seconds(1), 3.0).unwrap();
        let s = sky(&[(1, 1.0), (1, 2.0)]);
        assert!(tracker.can_add(Duration::seconds(0), &s));
        tracker.add_job(Duration::seconds(0), &s).unwrap();
        assert!(!tracker.nonzero_state().is_empty());
        assert!(tracker.can_remove(Duration::seconds(0), &s));
        tracker.remove_job(Duration::seconds(0), &s).unwrap();
        assert!(tracker.nonzero_state().is_empty());
    }

    #[test]
    fn add_job_fails_when_bounds_would_be_exceeded() {
        let mut tracker = SkylineTracker::new(Duration::seconds(1), 1.0).unwrap();
        let s = sky(&[(1, 2.0)]);
        assert!(!tracker.can_add(Duration::seconds(0), &s));
        assert!(tracker.add_job(Duration::seconds(0), &s).is_err());
    }

    #[test]
    fn cursor_advances_by_exact_duration_not_bin_rounded() {
        let tracker = SkylineTracker::new(Duration::seconds(2), 5.0).unwrap();
        let s = sky(&[(1, 1.0), (1, 2.0)]);
        let placement = tracker.placement(Duration::seconds(0), &s);
        assert_eq!(placement.len(), 1);
        assert_eq!(placement.get(&0), Some(&2.0));
    }
}
