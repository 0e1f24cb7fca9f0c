use std::env;
use anyhow::{Result, Context};
use time::UtcOffset;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub rest_url: String,
    pub storage_url: String,
    pub key: String,
    pub bucket: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TableConfig {
    pub posts: String,
    pub boosts: String,
    pub post_likes: String,
    pub listing_favorites: String,
    pub post_comments: String,
    pub post_shares: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            posts: "posts".to_string(),
            boosts: "listing_boosts".to_string(),
            post_likes: "post_likes".to_string(),
            listing_favorites: "listing_favorites".to_string(),
            post_comments: "post_comments".to_string(),
            post_shares: "post_shares".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendingConfig {
    pub top_n: usize,
    pub utc_offset: UtcOffset,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            utc_offset: UtcOffset::UTC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub boost_expiry_cron: String,
    pub trending_cron: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            boost_expiry_cron: "0 0 * * * *".to_string(),
            trending_cron: "0 0 9 * * *".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase: SupabaseConfig,
    pub tables: TableConfig,
    pub trending: TrendingConfig,
    pub schedule: ScheduleConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase_url = lookup("SUPABASE_URL")
            .context("SUPABASE_URL must be set")?;
        let supabase_key = lookup("SUPABASE_SERVICE_ROLE_KEY")
            .context("SUPABASE_SERVICE_ROLE_KEY must be set")?;
        let supabase_bucket = lookup("SUPABASE_BUCKET_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let base = supabase_url.trim_end_matches('/');
        let rest_url = format!("{}/rest/v1", base);
        let storage_url = format!("{}/storage/v1", base);

        let defaults = TableConfig::default();
        let tables = TableConfig {
            posts: lookup("POSTS_TABLE").unwrap_or(defaults.posts),
            boosts: lookup("BOOSTS_TABLE").unwrap_or(defaults.boosts),
            ..TableConfig::default()
        };

        let top_n = match lookup("TRENDING_TOP_N") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("TRENDING_TOP_N must be a positive integer, got '{}'", raw))?,
            None => 5,
        };
        if top_n == 0 {
            anyhow::bail!("TRENDING_TOP_N must be greater than zero");
        }

        let utc_offset = match lookup("TRENDING_UTC_OFFSET_HOURS") {
            Some(raw) => {
                let hours = raw
                    .trim()
                    .parse::<i8>()
                    .with_context(|| format!("TRENDING_UTC_OFFSET_HOURS must be an integer, got '{}'", raw))?;
                UtcOffset::from_hms(hours, 0, 0)
                    .with_context(|| format!("TRENDING_UTC_OFFSET_HOURS out of range: {}", hours))?
            }
            None => UtcOffset::UTC,
        };

        let schedule_defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            boost_expiry_cron: lookup("BOOST_EXPIRY_CRON")
                .unwrap_or(schedule_defaults.boost_expiry_cron),
            trending_cron: lookup("TRENDING_CRON")
                .unwrap_or(schedule_defaults.trending_cron),
        };

        Ok(Config {
            supabase: SupabaseConfig {
                rest_url,
                storage_url,
                key: supabase_key,
                bucket: supabase_bucket,
            },
            tables,
            trending: TrendingConfig { top_n, utc_offset },
            schedule,
        })
    }
}
