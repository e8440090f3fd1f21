//! Runs the right-based scheduler once per configured pool and merges the
//! results into a single plan.
//!
//! Pool metadata is fetched concurrently for I/O overlap, then each pool is
//! scheduled serially against its own tracker (scheduling is CPU-bound), and
//! finally the per-pool assignments are merged by fixed pool-priority order.
//! The set of pools is a configuration parameter, not a hard-coded pair.

use crate::algorithms::Algorithm;
use crate::config::PlannerConfig;
use crate::domain::{TaskInstance, UniqueTask};
use crate::error::{SeamError, SeamResult};
use crate::quantities::{Duration, PeriodClock, ReferenceMidnight, Timestamp};
use crate::seams::writer::LoggingPlanWriter;
use crate::seams::{registry, MetadataProvider, PlanWriter, TaskFetcher};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;

/// One execution pool's configuration: where its metadata comes from and
/// which algorithm schedules against it. Pool capacity (`max_size`) is
/// fetched at run time from `provider`.
pub struct PoolConfig {
    pub name: String,
    pub provider: Arc<dyn MetadataProvider>,
    pub algorithm: Algorithm,
}

/// Drives one planning cycle: fetch -> per-pool metadata fan-out -> per-pool
/// schedule -> merge -> write.
pub struct Orchestrator {
    pub fetcher: Arc<dyn TaskFetcher>,
    pub pools: Vec<PoolConfig>,
    pub writer: Arc<dyn PlanWriter>,
    pub granularity: Duration,
    pub clock: Arc<dyn PeriodClock>,
}

impl Orchestrator {
    pub fn new(
        fetcher: Arc<dyn TaskFetcher>,
        pools: Vec<PoolConfig>,
        writer: Arc<dyn PlanWriter>,
        granularity: Duration,
    ) -> Self {
        Self {
            fetcher,
            pools,
            writer,
            granularity,
            clock: Arc::new(ReferenceMidnight),
        }
    }

    /// Run one planning cycle to completion. No partial plan is ever handed
    /// to the writer: if metadata fetch, scheduling, or writing fails, the
    /// whole run fails and nothing is persisted.
    pub async fn run(&self) -> anyhow::Result<()> {
        let tasks = self.fetcher.fetch().await?;
        log::debug!("fetched {} pending task instances", tasks.len());

        let pool_assignments = self.schedule_all_pools(&tasks).await?;

        let mut plan: HashMap<TaskInstance, Timestamp> = HashMap::with_capacity(tasks.len());
        for instance in &tasks {
            let midnight = self.clock.midnight(instance.period_id);
            let unique = match UniqueTask::from_instance(instance, midnight) {
                Ok(u) => u,
                Err(e) => {
                    log::warn!("skipping {}: {}", instance.task_id, e);
                    continue;
                }
            };
            for (pool_name, assignments) in &pool_assignments {
                if let Some(offset) = assignments.get(&unique) {
                    if let Ok(dispatch) = midnight.checked_add(*offset) {
                        plan.insert(instance.clone(), dispatch);
                        log::debug!("{} placed by pool {}", instance.task_id, pool_name);
                    }
                    break;
                }
            }
        }

        let missing = tasks.len() - plan.len();
        log::debug!(
            "planning finished | in plan: {} | missing from plan: {}",
            plan.len(),
            missing
        );

        self.writer.overwrite(&plan).await?;
        Ok(())
    }

    /// Fetch every pool's metadata and capacity concurrently, then schedule
    /// each pool serially (scheduling is CPU-bound and single-threaded;
    /// only the I/O fan-out overlaps).
    async fn schedule_all_pools(
        &self,
        tasks: &HashSet<TaskInstance>,
    ) -> anyhow::Result<Vec<(String, HashMap<UniqueTask, Duration>)>> {
        let mut fetches = JoinSet::new();
        for (index, pool) in self.pools.iter().enumerate() {
            let provider = Arc::clone(&pool.provider);
            let tasks = tasks.clone();
            fetches.spawn(async move {
                let metadata = provider.metadata(&tasks).await?;
                let max_size = provider.max_size().await?;
                Ok::<_, SeamError>((index, metadata, max_size))
            });
        }

        let mut fetched = vec![None; self.pools.len()];
        while let Some(joined) = fetches.join_next().await {
            let (index, metadata, max_size) = joined??;
            log::debug!("pool {} metadata size {}", self.pools[index].name, metadata.len());
            fetched[index] = Some((metadata, max_size));
        }

        let mut results = Vec::with_capacity(self.pools.len());
        for (pool, slot) in self.pools.iter().zip(fetched.into_iter()) {
            let (metadata, max_size) = slot.expect("every pool index was populated by the fan-out");
            let assignment = pool.algorithm.schedule(&metadata, self.granularity, max_size)?;
            log::debug!("pool {} plan size {}", pool.name, assignment.len());
            results.push((pool.name.clone(), assignment));
        }
        Ok(results)
    }
}

/// Resolve an [`Orchestrator`] from a [`PlannerConfig`], looking every
/// selector name up against the algorithm/fetcher/pool registries.
pub fn build_orchestrator(config: &PlannerConfig) -> SeamResult<Orchestrator> {
    let fetcher = registry::get_task_fetcher(&config.task_fetcher)?;
    let algorithm = Algorithm::by_name(&config.algorithm)?;
    let pools = config
        .pools
        .iter()
        .map(|name| {
            registry::get_metadata_provider(name).map(|provider| PoolConfig {
                name: name.clone(),
                provider,
                algorithm,
            })
        })
        .collect::<SeamResult<Vec<_>>>()?;
    Ok(Orchestrator::new(
        fetcher,
        pools,
        Arc::new(LoggingPlanWriter),
        Duration::seconds(config.granularity_seconds),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seams::fetcher::HardCodedTaskFetcher;
    use crate::seams::metadata::{PrestoMetadataProvider, SparkMetadataProvider};
    use crate::seams::writer::LoggingPlanWriter;

    #[tokio::test]
    async fn full_cycle_runs_to_completion_against_the_fixture_seams() {
        let orchestrator = Orchestrator::new(
            Arc::new(HardCodedTaskFetcher),
            vec![
                PoolConfig {
                    name: "spark".to_string(),
                    provider: Arc::new(SparkMetadataProvider),
                    algorithm: Algorithm::RightBased,
                },
                PoolConfig {
                    name: "presto".to_string(),
                    provider: Arc::new(PrestoMetadataProvider),
                    algorithm: Algorithm::RightBased,
                },
            ],
            Arc::new(LoggingPlanWriter),
            Duration::minutes(1),
        );
        assert!(orchestrator.run().await.is_ok());
    }

    #[tokio::test]
    async fn spark_wins_pool_priority_ties() {
        let orchestrator = Orchestrator::new(
            Arc::new(HardCodedTaskFetcher),
            vec![
                PoolConfig {
                    name: "spark".to_string(),
                    provider: Arc::new(SparkMetadataProvider),
                    algorithm: Algorithm::RightBased,
                },
                PoolConfig {
                    name: "presto".to_string(),
                    provider: Arc::new(PrestoMetadataProvider),
                    algorithm: Algorithm::RightBased,
                },
            ],
            Arc::new(LoggingPlanWriter),
            Duration::minutes(1),
        );
        let tasks = orchestrator.fetcher.fetch().await.unwrap();
        let assignments = orchestrator.schedule_all_pools(&tasks).await.unwrap();
        assert_eq!(assignments[0].0, "spark");
    }

    #[tokio::test]
    async fn build_orchestrator_resolves_the_default_config() {
        let orchestrator = build_orchestrator(&PlannerConfig::default()).unwrap();
        assert_eq!(orchestrator.pools.len(), 2);
        assert!(orchestrator.run().await.is_ok());
    }

    #[test]
    fn build_orchestrator_rejects_unknown_selectors() {
        let mut config = PlannerConfig::default();
        config.algorithm = "bogus".to_string();
        assert!(build_orchestrator(&config).is_err());
    }
}
