//! Property-based coverage of the invariants and round-trip law from the
//! scheduler's testable-properties section: every assignment lands inside
//! its task's window on a granularity-aligned offset, the tracker never
//! leaves a bin out of bounds, and add/remove is its own inverse.

use clockwork_rs::domain::{RightBasedMetadata, Skyline, SkylineBlock, UniqueTask};
use clockwork_rs::quantities::Duration;
use clockwork_rs::skyline::SkylineTracker;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_block() -> impl Strategy<Value = SkylineBlock> {
    (1u64..5, 0.0f64..4.0).prop_map(|(d, s)| SkylineBlock::new(Duration::seconds(d), s).unwrap())
}

fn arb_metadata() -> impl Strategy<Value = RightBasedMetadata> {
    (0u64..20, 0u64..10, proptest::collection::vec(arb_block(), 1..3)).prop_map(
        |(min, extra, blocks)| {
            let max = min + extra;
            RightBasedMetadata::new(Duration::seconds(min), Duration::seconds(max), Skyline::new(blocks))
                .unwrap()
        },
    )
}

proptest! {
    #[test]
    fn add_job_then_remove_job_returns_to_empty(
        start in 0u64..20,
        meta in arb_metadata(),
    ) {
        let mut tracker = SkylineTracker::new(Duration::seconds(1), 10.0).unwrap();
        let start = Duration::seconds(start);
        if tracker.can_add(start, &meta.skyline) {
            tracker.add_job(start, &meta.skyline).unwrap();
            prop_assert!(tracker.can_remove(start, &meta.skyline));
            tracker.remove_job(start, &meta.skyline).unwrap();
            prop_assert!(tracker.nonzero_state().is_empty());
        }
    }

    #[test]
    fn scheduled_tasks_land_within_their_window_on_a_granularity_boundary(
        metas in proptest::collection::vec((0u64..1000, arb_metadata()), 1..8),
    ) {
        let granularity = Duration::seconds(1);
        let mut metadata: HashMap<UniqueTask, RightBasedMetadata> = HashMap::new();
        for (i, (_, meta)) in metas.into_iter().enumerate() {
            let task = UniqueTask::new(format!("t{i}"), Duration::ZERO).unwrap();
            metadata.insert(task, meta);
        }
        let assignment = clockwork_rs::algorithms::schedule_tasks(&metadata, granularity, 5.0).unwrap();
        for (task, start) in &assignment {
            let meta = &metadata[task];
            prop_assert!(start.as_secs() >= meta.min_start.as_secs());
            prop_assert!(start.as_secs() <= meta.max_start.as_secs());
            let delta = meta.max_start.as_secs() - start.as_secs();
            prop_assert_eq!(delta % granularity.as_secs(), 0);
        }
    }
}
