//! The plan-writer seam: where the final assignment goes. Persistence
//! format is opaque to the core; it only hands off the finished plan.

use crate::domain::TaskInstance;
use crate::error::SeamResult;
use crate::quantities::Timestamp;
use async_trait::async_trait;
use std::collections::HashMap;

/// Consumes the final `TaskInstance -> Timestamp` assignment.
#[async_trait]
pub trait PlanWriter: Send + Sync {
    async fn overwrite(&self, plan: &HashMap<TaskInstance, Timestamp>) -> SeamResult<()>;
}

/// The default writer: logs the plan at debug verbosity and discards it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPlanWriter;

#[async_trait]
impl PlanWriter for LoggingPlanWriter {
    async fn overwrite(&self, plan: &HashMap<TaskInstance, Timestamp>) -> SeamResult<()> {
        log::debug!("final plan ({} entries):", plan.len());
        for (task, at) in plan {
            log::debug!("  {}@{} -> {}", task.task_id, task.period_id.unixtime(), at.unixtime());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_writer_accepts_an_empty_plan() {
        let writer = LoggingPlanWriter;
        assert!(writer.overwrite(&HashMap::new()).await.is_ok());
    }
}
