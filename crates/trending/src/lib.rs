pub mod aggregator;
pub mod hashtag;
pub mod models;
pub mod period;
pub mod ranker;
pub mod score;

use std::sync::Arc;

use async_trait::async_trait;
use common::{
    Config, Job, PlatformEvent, PlatformGateway, PlatformResult, PostRecord, SupabaseGateway,
    SupabaseStorageClient, TrendingConfig,
};
use time::OffsetDateTime;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

pub use aggregator::aggregate;
pub use hashtag::extract_hashtags;
pub use models::{RankedEntry, TagTally, TrendingReport};
pub use period::Period;
pub use ranker::rank;
pub use score::engagement_score;

/// Ranks hashtags for every period from one snapshot of posts.
pub fn build_report(posts: &[PostRecord], now: OffsetDateTime, config: &TrendingConfig) -> TrendingReport {
    let mut report = TrendingReport::empty(now);
    for period in Period::ALL {
        let since = period.start(now, config.utc_offset);
        let tallies = aggregate(posts, since);
        debug!("{} distinct tags in '{}' since {}", tallies.len(), period.label(), since);
        report.set(period, rank(&tallies, config.top_n));
    }
    report
}

pub struct TrendingService<G> {
    gateway: G,
    config: TrendingConfig,
}

impl<G: PlatformGateway> TrendingService<G> {
    pub fn new(gateway: G, config: TrendingConfig) -> Self {
        Self { gateway, config }
    }

    /// Fetches posts once and ranks every period. A failed fetch is logged
    /// and yields an empty report.
    pub async fn snapshot(&self, now: OffsetDateTime) -> TrendingReport {
        match self.gateway.fetch_posts().await {
            Ok(posts) => {
                info!("Aggregating trending topics over {} posts", posts.len());
                build_report(&posts, now, &self.config)
            }
            Err(e) => {
                warn!("Failed to fetch posts for trending topics, reporting no trends: {}", e);
                TrendingReport::empty(now)
            }
        }
    }

    /// Recomputes a snapshot for every `PostCreated` event and hands it to
    /// `on_report`. Returns the number of refreshes once the channel closes.
    pub async fn watch_refreshes<F>(
        &self,
        mut events: broadcast::Receiver<PlatformEvent>,
        mut on_report: F,
    ) -> usize
    where
        F: FnMut(TrendingReport) + Send,
    {
        let mut refreshes = 0;
        loop {
            match events.recv().await {
                Ok(PlatformEvent::PostCreated { post_id }) => {
                    debug!("Post {} created, refreshing trending topics", post_id);
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Trending refresh listener lagged by {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
            on_report(self.snapshot(OffsetDateTime::now_utc()).await);
            refreshes += 1;
        }
        refreshes
    }
}

/// Computes the daily trending snapshot and publishes it to storage when a
/// bucket is configured.
pub struct TrendingJob<G> {
    service: TrendingService<G>,
    storage_client: Option<SupabaseStorageClient>,
}

impl<G: PlatformGateway> TrendingJob<G> {
    pub fn new(service: TrendingService<G>, storage_client: Option<SupabaseStorageClient>) -> Self {
        Self {
            service,
            storage_client,
        }
    }

    async fn publish(&self, report: &TrendingReport) -> PlatformResult<()> {
        let Some(storage_client) = &self.storage_client else {
            info!(
                "No storage bucket configured; trending snapshot: {}",
                serde_json::to_string(report)?
            );
            return Ok(());
        };

        let date_str = report.generated_at.date().to_string();
        storage_client
            .upload_file(
                &format!("{}/trending-topics.json", date_str),
                serde_json::to_string_pretty(report)?,
                "application/json",
            )
            .await?;
        storage_client
            .upload_file(
                &format!("{}/trending-topics.md", date_str),
                report.to_markdown(),
                "text/markdown",
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<G: PlatformGateway> Job for TrendingJob<G> {
    async fn run(&self) -> PlatformResult<()> {
        info!("Trending topics job starting up");
        let report = self.service.snapshot(OffsetDateTime::now_utc()).await;
        if report.is_empty() {
            info!("No trends yet.");
        }
        self.publish(&report).await
    }

    fn name(&self) -> &'static str {
        "Trending Topics"
    }
}

pub fn trending_job_from_config(config: &Config) -> TrendingJob<Arc<SupabaseGateway>> {
    let gateway = Arc::new(SupabaseGateway::new(config));
    let storage_client = config.supabase.bucket.as_ref().map(|bucket| {
        SupabaseStorageClient::new(&config.supabase.storage_url, &config.supabase.key, bucket)
    });
    TrendingJob::new(TrendingService::new(gateway, config.trending.clone()), storage_client)
}

pub async fn run_trending_job() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let config = Config::from_env()?;
    let job = trending_job_from_config(&config);
    job.run().await.map_err(|e| anyhow::anyhow!(e))
}
