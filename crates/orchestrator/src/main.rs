use std::sync::Arc;

use anyhow::Result;
use common::{Config, JobManager};
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

    // Boost expiry and the trending snapshot share nothing, so run them together
    let manager = JobManager::new()
        .add_job(Arc::new(boost_expiry::boost_expiry_job_from_config(&config)))
        .add_job(Arc::new(trending::trending_job_from_config(&config)));

    info!("Running {} jobs", manager.len());
    manager.run_all_strict().await?;

    Ok(())
}
