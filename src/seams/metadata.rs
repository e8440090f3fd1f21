//! The per-pool metadata seam: feasibility windows, skylines, and capacity.

use crate::domain::{RightBasedMetadata, Skyline, SkylineBlock, TaskInstance, UniqueTask};
use crate::error::SeamResult;
use crate::quantities::Duration;
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies feasibility metadata and pool capacity for one execution pool.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Build `RightBasedMetadata` for every `UniqueTask` derived from
    /// `tasks` that this pool knows about. Tasks this pool has no opinion on
    /// are simply absent from the result.
    async fn metadata(
        &self,
        tasks: &std::collections::HashSet<TaskInstance>,
    ) -> SeamResult<HashMap<UniqueTask, RightBasedMetadata>>;

    /// This pool's capacity, in the same scalar units as every skyline's
    /// block sizes.
    async fn max_size(&self) -> SeamResult<f64>;
}

fn block(duration_secs: u64, size: f64) -> SkylineBlock {
    SkylineBlock::new(Duration::seconds(duration_secs), size).expect("fixture block is valid")
}

fn meta(min: u64, max: u64, blocks: Vec<SkylineBlock>) -> RightBasedMetadata {
    RightBasedMetadata::new(Duration::seconds(min), Duration::seconds(max), Skyline::new(blocks))
        .expect("fixture metadata satisfies max_start >= min_start")
}

fn unique(task_id: &str, offset_secs: u64) -> UniqueTask {
    UniqueTask::new(task_id, Duration::seconds(offset_secs)).expect("fixture offset is within a day")
}

/// A fixed Spark fixture: three tasks, `max_size = 3`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SparkMetadataProvider;

#[async_trait]
impl MetadataProvider for SparkMetadataProvider {
    async fn metadata(
        &self,
        _tasks: &std::collections::HashSet<TaskInstance>,
    ) -> SeamResult<HashMap<UniqueTask, RightBasedMetadata>> {
        Ok(HashMap::from([
            (
                unique("task2", 0),
                meta(0, 100, vec![block(1, 1.0), block(2, 2.0)]),
            ),
            (unique("task3", 0), meta(100, 100, vec![block(5, 2.0)])),
            (unique("task4", 10), meta(19, 59, vec![block(4, 4.0)])),
        ]))
    }

    async fn max_size(&self) -> SeamResult<f64> {
        Ok(3.0)
    }
}

/// A fixed Presto fixture: three tasks, `max_size = 3`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrestoMetadataProvider;

#[async_trait]
impl MetadataProvider for PrestoMetadataProvider {
    async fn metadata(
        &self,
        _tasks: &std::collections::HashSet<TaskInstance>,
    ) -> SeamResult<HashMap<UniqueTask, RightBasedMetadata>> {
        Ok(HashMap::from([
            (unique("task1", 0), meta(10, 20, vec![block(1, 1.0)])),
            (unique("task5", 10), meta(15, 35, vec![block(5, 1.0)])),
            (unique("task6", 10), meta(50, 60, vec![block(5, 1.0)])),
        ]))
    }

    async fn max_size(&self) -> SeamResult<f64> {
        Ok(3.0)
    }
}
