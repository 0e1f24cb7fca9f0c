use std::sync::Arc;

use anyhow::Result;
use common::Config;
use scheduler::JobScheduleRunner;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    // Configure tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    info!("Starting scheduler for boost expiry and trending topics");

    let mut runner = JobScheduleRunner::new().await?;

    runner
        .add_job(
            &config.schedule.boost_expiry_cron,
            Arc::new(boost_expiry::boost_expiry_job_from_config(&config)),
        )
        .await?;
    runner
        .add_job(
            &config.schedule.trending_cron,
            Arc::new(trending::trending_job_from_config(&config)),
        )
        .await?;

    info!(
        "Boost expiry runs on '{}', trending topics on '{}'",
        config.schedule.boost_expiry_cron, config.schedule.trending_cron
    );
    info!("Press Ctrl+C to stop the scheduler");

    // Handle graceful shutdown
    tokio::select! {
        result = runner.run_forever() => {
            result?;
            info!("Scheduler stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt signal, shutting down...");
        }
    }
    runner.shutdown().await?;

    Ok(())
}
