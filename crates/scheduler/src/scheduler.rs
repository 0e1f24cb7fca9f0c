use std::sync::Arc;

use anyhow::Result;
use common::Job as PlatformJob;
use time::OffsetDateTime;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

pub struct JobScheduleRunner {
    scheduler: JobScheduler,
}

impl JobScheduleRunner {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { scheduler })
    }

    pub async fn add_job(&mut self, cron_expression: &str, job: Arc<dyn PlatformJob>) -> Result<()> {
        info!("Scheduling {} with cron: {}", job.name(), cron_expression);

        let scheduled = Job::new_async(cron_expression, move |_uuid, _l| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                info!("Executing {} at {}", job.name(), OffsetDateTime::now_utc());
                match job.run().await {
                    Ok(()) => info!("{} completed successfully", job.name()),
                    Err(e) => error!("{} failed: {}", job.name(), e),
                }
            })
        })?;

        self.scheduler.add(scheduled).await?;
        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        info!("Starting scheduler...");
        self.scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down scheduler...");
        self.scheduler.shutdown().await?;
        Ok(())
    }

    pub async fn run_forever(&self) -> Result<()> {
        self.start().await?;

        // Keep the scheduler running
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
        }
    }
}
