use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::{PlatformError, PlatformResult};

#[async_trait]
pub trait Job: Send + Sync {
    async fn run(&self) -> PlatformResult<()>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs a set of jobs concurrently. A failing job never cancels the others.
#[derive(Default)]
pub struct JobManager {
    jobs: Vec<Arc<dyn Job>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn add_job(mut self, job: Arc<dyn Job>) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub async fn run_all(&self) -> JobSummary {
        let mut tasks = JoinSet::new();

        for job in &self.jobs {
            let job = Arc::clone(job);
            tasks.spawn(async move {
                let name = job.name();
                match job.run().await {
                    Ok(()) => {
                        info!("{} completed successfully", name);
                        Ok(())
                    }
                    Err(e) => {
                        warn!("{} failed: {}", name, e);
                        Err(e)
                    }
                }
            });
        }

        let mut summary = JobSummary { succeeded: 0, failed: 0 };
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => summary.succeeded += 1,
                Ok(Err(_)) => summary.failed += 1,
                Err(e) => {
                    warn!("Job task panicked or was cancelled: {}", e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "All jobs finished. Successful: {}, Failed: {}",
            summary.succeeded, summary.failed
        );
        summary
    }

    /// Like `run_all`, but turns any failure into an error.
    pub async fn run_all_strict(&self) -> PlatformResult<()> {
        let summary = self.run_all().await;
        if summary.failed > 0 {
            return Err(PlatformError::Config(anyhow::anyhow!(
                "Some jobs failed: {} failed, {} succeeded",
                summary.failed,
                summary.succeeded
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        name: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl Job for Fixed {
        async fn run(&self) -> PlatformResult<()> {
            if self.fail {
                Err(PlatformError::Api { status: 500, body: "boom".into() })
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_other_jobs() {
        let manager = JobManager::new()
            .add_job(Arc::new(Fixed { name: "ok", fail: false }))
            .add_job(Arc::new(Fixed { name: "bad", fail: true }))
            .add_job(Arc::new(Fixed { name: "ok2", fail: false }));

        let summary = manager.run_all().await;
        assert_eq!(summary, JobSummary { succeeded: 2, failed: 1 });
        assert!(manager.run_all_strict().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_manager_succeeds() {
        let manager = JobManager::new();
        assert!(manager.is_empty());
        assert!(manager.run_all_strict().await.is_ok());
    }
}
