//! The task-fetching seam: where pending task instances come from.

use crate::domain::TaskInstance;
use crate::error::SeamResult;
use crate::quantities::Timestamp;
use async_trait::async_trait;
use std::collections::HashSet;

/// Returns the finite, immutable set of currently pending task instances.
/// Implementations own their own notion of "pending" (a queue, a fixed
/// fixture, a filtered table scan); the core only consumes the result.
#[async_trait]
pub trait TaskFetcher: Send + Sync {
    async fn fetch(&self) -> SeamResult<HashSet<TaskInstance>>;
}

/// A fixed fixture of six tasks across two periods, used as the default
/// fetcher and in integration tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardCodedTaskFetcher;

#[async_trait]
impl TaskFetcher for HardCodedTaskFetcher {
    async fn fetch(&self) -> SeamResult<HashSet<TaskInstance>> {
        let period_a = Timestamp::new(0).expect("0 is a valid timestamp");
        let period_b = Timestamp::new(10).expect("10 is a valid timestamp");
        Ok(HashSet::from([
            TaskInstance::new("task1", period_a),
            TaskInstance::new("task2", period_a),
            TaskInstance::new("task3", period_a),
            TaskInstance::new("task4", period_b),
            TaskInstance::new("task5", period_b),
            TaskInstance::new("task6", period_b),
        ]))
    }
}
