//! Selects a task fetcher by name.

use super::fetcher::{HardCodedTaskFetcher, TaskFetcher};
use super::metadata::{MetadataProvider, PrestoMetadataProvider, SparkMetadataProvider};
use crate::error::{SeamError, SeamResult};
use std::sync::Arc;

/// Resolve a CLI/config selector name to a [`TaskFetcher`] implementation.
pub fn get_task_fetcher(name: &str) -> SeamResult<Arc<dyn TaskFetcher>> {
    match name {
        "hard_coded" => Ok(Arc::new(HardCodedTaskFetcher)),
        other => Err(SeamError::UnknownName(other.to_string())),
    }
}

/// Resolve a pool name to its [`MetadataProvider`]. The set of pools is a
/// configuration parameter, not a hard-coded pair: the core never needs to
/// know which pools exist, only how to look one up by name.
pub fn get_metadata_provider(name: &str) -> SeamResult<Arc<dyn MetadataProvider>> {
    match name {
        "spark" => Ok(Arc::new(SparkMetadataProvider)),
        "presto" => Ok(Arc::new(PrestoMetadataProvider)),
        other => Err(SeamError::UnknownName(other.to_string())),
    }
}
