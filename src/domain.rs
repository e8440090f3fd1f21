//! Core scheduling entities: tasks, skylines, and the metadata that drives
//! the right-based ordering.
//!
//! Each entity is a small validated newtype: construction checks the
//! invariant up front so invalid values never enter the scheduler.

use crate::error::{DomainError, DomainResult};
use crate::quantities::{Duration, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One occurrence of a task within a specific period, e.g. "today's run of
/// the daily report job". Two instances are equal iff both fields match.
///
/// # Examples
///
/// ```
/// use clockwork_rs::domain::TaskInstance;
/// use clockwork_rs::quantities::Timestamp;
///
/// let a = TaskInstance::new("daily_report", Timestamp::new(86_400).unwrap());
/// let b = TaskInstance::new("daily_report", Timestamp::new(86_400).unwrap());
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskInstance {
    pub task_id: String,
    pub period_id: Timestamp,
}

impl TaskInstance {
    pub fn new(task_id: impl Into<String>, period_id: Timestamp) -> Self {
        Self {
            task_id: task_id.into(),
            period_id,
        }
    }
}

/// A task identity as seen by the scheduler: the task's id together with its
/// offset within the day, measured from `period_id`'s midnight. Two
/// `TaskInstance`s in different periods collapse onto the same `UniqueTask`
/// whenever they share an id and time-of-day offset, by design (the
/// scheduler reasons about "this job, run at this time of day", not about
/// which calendar day it happens to be).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueTask {
    pub task_id: String,
    pub offset: Duration,
}

impl UniqueTask {
    /// Construct a `UniqueTask`, enforcing `offset < 1 day`.
    pub fn new(task_id: impl Into<String>, offset: Duration) -> DomainResult<Self> {
        let one_day = Duration::days(1);
        if offset.as_secs() >= one_day.as_secs() {
            return Err(DomainError::OffsetNotWithinDay {
                offset: offset.as_secs(),
                day: one_day.as_secs(),
            });
        }
        Ok(Self {
            task_id: task_id.into(),
            offset,
        })
    }

    /// Derive a `UniqueTask` from a `TaskInstance` given the period's
    /// midnight: `offset = period_id - midnight(period_id)`.
    pub fn from_instance(
        instance: &TaskInstance,
        midnight: Timestamp,
    ) -> DomainResult<Self> {
        let offset = instance.period_id.checked_sub_timestamp(midnight)?;
        Self::new(instance.task_id.clone(), offset)
    }
}

/// A contiguous horizontal segment of constant resource usage.
///
/// ```
/// use clockwork_rs::domain::SkylineBlock;
/// use clockwork_rs::quantities::Duration;
///
/// let block = SkylineBlock::new(Duration::seconds(60), 1.5).unwrap();
/// assert_eq!(block.size(), 1.5);
/// assert!(SkylineBlock::new(Duration::ZERO, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkylineBlock {
    duration: Duration,
    size: f64,
}

impl SkylineBlock {
    /// Construct a block, rejecting non-positive duration or negative size.
    pub fn new(duration: Duration, size: f64) -> DomainResult<Self> {
        if duration.as_secs() == 0 {
            return Err(DomainError::NonPositiveBlockDuration(duration.as_secs()));
        }
        if size < 0.0 {
            return Err(DomainError::NegativeBlockSize(size));
        }
        Ok(Self { duration, size })
    }

    pub const fn duration(self) -> Duration {
        self.duration
    }

    pub const fn size(self) -> f64 {
        self.size
    }
}

/// An ordered sequence of [`SkylineBlock`]s describing a task's resource
/// footprint over time, relative to its own start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skyline {
    blocks: Vec<SkylineBlock>,
}

impl Skyline {
    pub fn new(blocks: Vec<SkylineBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[SkylineBlock] {
        &self.blocks
    }

    /// Sum of all block durations.
    pub fn total_duration(&self) -> Duration {
        self.blocks
            .iter()
            .fold(Duration::ZERO, |acc, b| acc.add(b.duration()))
    }

    /// The usage at `elapsed` seconds past the skyline's own start, or
    /// `None` if `elapsed` falls beyond the last block.
    pub fn size_at(&self, elapsed: Duration) -> Option<f64> {
        let mut cursor = 0u64;
        for block in &self.blocks {
            let end = cursor + block.duration().as_secs();
            if elapsed.as_secs() < end {
                return Some(block.size());
            }
            cursor = end;
        }
        None
    }
}

/// The right-based scheduler's per-task input: its feasibility window and
/// resource footprint.
///
/// Induces a total order via `(min_start, max_start)` ascending; the
/// scheduler visits tasks in **descending** order of this key (see
/// [`RightBasedMetadata::order_key`] and its `Ord` impl).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightBasedMetadata {
    pub min_start: Duration,
    pub max_start: Duration,
    pub skyline: Skyline,
}

impl RightBasedMetadata {
    /// Construct metadata, enforcing `max_start >= min_start`.
    pub fn new(min_start: Duration, max_start: Duration, skyline: Skyline) -> DomainResult<Self> {
        if max_start < min_start {
            return Err(DomainError::MaxStartBeforeMinStart {
                min_start: min_start.as_secs(),
                max_start: max_start.as_secs(),
            });
        }
        Ok(Self {
            min_start,
            max_start,
            skyline,
        })
    }

    /// The `(min_start, max_start)` pair used for ordering.
    pub const fn order_key(&self) -> (Duration, Duration) {
        (self.min_start, self.max_start)
    }
}

/// Sort key for a `(task_id, metadata)` pair under the scheduler's
/// descending visit order: primarily by `(min_start, max_start)` descending,
/// with `task_id` ascending as a deterministic tie-break.
pub fn scheduling_order(
    a: &(UniqueTask, RightBasedMetadata),
    b: &(UniqueTask, RightBasedMetadata),
) -> Ordering {
    b.1.order_key()
        .cmp(&a.1.order_key())
        .then_with(|| a.0.task_id.cmp(&b.0.task_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_task_rejects_offset_beyond_a_day() {
        assert!(UniqueTask::new("job", Duration::days(1)).is_err());
        assert!(UniqueTask::new("job", Duration::hours(23)).is_ok());
    }

    #[test]
    fn skyline_block_rejects_zero_duration_and_negative_size() {
        assert!(SkylineBlock::new(Duration::ZERO, 0.0).is_err());
        assert!(SkylineBlock::new(Duration::seconds(1), -1.0).is_err());
    }

    #[test]
    fn skyline_size_at_walks_blocks_in_order() {
        let sky = Skyline::new(vec![
            SkylineBlock::new(Duration::seconds(1), 1.0).unwrap(),
            SkylineBlock::new(Duration::seconds(1), 2.0).unwrap(),
        ]);
        assert_eq!(sky.size_at(Duration::seconds(0)), Some(1.0));
        assert_eq!(sky.size_at(Duration::seconds(1)), Some(2.0));
        assert_eq!(sky.size_at(Duration::seconds(2)), None);
        assert_eq!(sky.total_duration().as_secs(), 2);
    }

    #[test]
    fn metadata_rejects_max_before_min() {
        let sky = Skyline::new(vec![SkylineBlock::new(Duration::seconds(1), 1.0).unwrap()]);
        assert!(RightBasedMetadata::new(Duration::seconds(5), Duration::seconds(1), sky).is_err());
    }

    #[test]
    fn scheduling_order_breaks_ties_by_task_id() {
        let sky = Skyline::new(vec![SkylineBlock::new(Duration::seconds(1), 1.0).unwrap()]);
        let meta = RightBasedMetadata::new(Duration::seconds(0), Duration::seconds(1), sky).unwrap();
        let a = (UniqueTask::new("a", Duration::ZERO).unwrap(), meta.clone());
        let b = (UniqueTask::new("b", Duration::ZERO).unwrap(), meta);
        assert_eq!(scheduling_order(&a, &b), Ordering::Less);
    }
}
