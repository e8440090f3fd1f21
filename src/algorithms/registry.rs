//! Selects a scheduling algorithm by name.
//!
//! A tagged enum with one match arm per variant, rather than a runtime
//! dict/callable table, so every registered strategy is known at compile
//! time and unresolvable names fail fast.

use crate::domain::{RightBasedMetadata, UniqueTask};
use crate::error::{DomainResult, SeamError, SeamResult};
use crate::quantities::Duration;
use std::collections::HashMap;

use super::right_based;

/// The set of selectable scheduling strategies. `RightBased` is the only one
/// used in production; `NullAlgorithm` and `ReturnZero` are kept as registry
/// completeness and as baselines for tests and benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Latest-legal-start-first greedy packing.
    RightBased,
    /// Assigns nothing; every task is rejected.
    NullAlgorithm,
    /// Assigns every task to offset zero, ignoring capacity and feasibility
    /// windows entirely.
    ReturnZero,
}

impl Algorithm {
    /// Resolve a CLI/config selector name to an [`Algorithm`] variant.
    pub fn by_name(name: &str) -> SeamResult<Self> {
        match name {
            "right_based" => Ok(Self::RightBased),
            "null" => Ok(Self::NullAlgorithm),
            "return_zero" => Ok(Self::ReturnZero),
            other => Err(SeamError::UnknownName(other.to_string())),
        }
    }

    /// Run this algorithm against one pool's metadata.
    pub fn schedule(
        self,
        metadata: &HashMap<UniqueTask, RightBasedMetadata>,
        granularity: Duration,
        max_size: f64,
    ) -> DomainResult<HashMap<UniqueTask, Duration>> {
        match self {
            Self::RightBased => right_based::schedule_tasks(metadata, granularity, max_size),
            Self::NullAlgorithm => Ok(HashMap::new()),
            Self::ReturnZero => Ok(metadata
                .keys()
                .cloned()
                .map(|task| (task, Duration::ZERO))
                .collect()),
        }
    }
}
