//! The right-based greedy: latest-legal-start-first, walk left until a fit.

use crate::domain::{scheduling_order, RightBasedMetadata, UniqueTask};
use crate::quantities::Duration;
use crate::skyline::SkylineTracker;
use std::collections::HashMap;

/// Schedule one pool's tasks against a fresh tracker, returning the chosen
/// start offset for every task that could be placed. Tasks whose window is
/// fully contended are simply absent from the result, not an error.
pub fn schedule_tasks(
    metadata: &HashMap<UniqueTask, RightBasedMetadata>,
    granularity: Duration,
    max_size: f64,
) -> crate::error::DomainResult<HashMap<UniqueTask, Duration>> {
    let mut ordered: Vec<(UniqueTask, RightBasedMetadata)> = metadata
        .iter()
        .map(|(task, meta)| (task.clone(), meta.clone()))
        .collect();
    ordered.sort_by(scheduling_order);

    let mut tracker = SkylineTracker::new(granularity, max_size)?;
    let mut assignment = HashMap::with_capacity(ordered.len());

    for (task, meta) in ordered {
        let mut s = meta.max_start;
        loop {
            if tracker.can_add(s, &meta.skyline) {
                tracker.add_job(s, &meta.skyline)?;
                assignment.insert(task, s);
                break;
            }
            if s.as_secs() <= meta.min_start.as_secs() {
                log::debug!(
                    "task {} rejected: window [{}, {}] fully contended",
                    task.task_id,
                    meta.min_start.as_secs(),
                    meta.max_start.as_secs()
                );
                break;
            }
            match s.checked_sub(granularity) {
                Ok(next) if next.as_secs() >= meta.min_start.as_secs() => s = next,
                _ => {
                    log::debug!(
                        "task {} rejected: exhausted candidates above min_start {}",
                        task.task_id,
                        meta.min_start.as_secs()
                    );
                    break;
                }
            }
        }
    }

    Ok(assignment)
}
