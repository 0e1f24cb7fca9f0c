use std::sync::Arc;

use async_trait::async_trait;
use common::{Config, Job, PlatformGateway, PlatformResult, SupabaseGateway};
use time::OffsetDateTime;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryOutcome {
    pub expired_ids: Vec<String>,
}

impl ExpiryOutcome {
    pub fn count(&self) -> usize {
        self.expired_ids.len()
    }
}

/// Flips active boosts whose window has ended to `expired`.
pub struct BoostExpiryJob<G> {
    gateway: G,
}

impl<G: PlatformGateway> BoostExpiryJob<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn expire(&self, now: OffsetDateTime) -> PlatformResult<ExpiryOutcome> {
        let expired = self.gateway.expire_boosts(now).await?;
        let expired_ids: Vec<String> = expired.into_iter().map(|boost| boost.id).collect();

        if expired_ids.is_empty() {
            info!("No boosts to expire as of {}", now);
        } else {
            info!("Expired {} boosts: {}", expired_ids.len(), expired_ids.join(", "));
        }

        Ok(ExpiryOutcome { expired_ids })
    }
}

#[async_trait]
impl<G: PlatformGateway> Job for BoostExpiryJob<G> {
    async fn run(&self) -> PlatformResult<()> {
        info!("Boost expiry job starting up");
        self.expire(OffsetDateTime::now_utc()).await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "Boost Expiry"
    }
}

pub fn boost_expiry_job_from_config(config: &Config) -> BoostExpiryJob<Arc<SupabaseGateway>> {
    BoostExpiryJob::new(Arc::new(SupabaseGateway::new(config)))
}

pub async fn run_boost_expiry() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let config = Config::from_env()?;
    let job = boost_expiry_job_from_config(&config);
    job.run().await.map_err(|e| anyhow::anyhow!(e))
}
