use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use crate::config::{Config, TableConfig};
use crate::error::{PlatformError, PlatformResult};
use crate::models::{Boost, Comment, PostRecord, ReactionKind};
use crate::supabase_client::SupabaseRestClient;

const POST_COLUMNS: &str = "id,content,created_at,likes_count,comments_count";
const POST_PAGE_SIZE: usize = 1000;

/// Every backend operation the platform core needs, one typed method each.
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// All posts with a non-null body.
    async fn fetch_posts(&self) -> PlatformResult<Vec<PostRecord>>;

    /// Flips active boosts whose `ends_at` is before `now` to expired and
    /// returns the rows that changed.
    async fn expire_boosts(&self, now: OffsetDateTime) -> PlatformResult<Vec<Boost>>;

    async fn set_reaction(
        &self,
        kind: ReactionKind,
        target_id: &str,
        user_id: &str,
        active: bool,
    ) -> PlatformResult<()>;

    async fn add_comment(&self, post_id: &str, user_id: &str, content: &str) -> PlatformResult<Comment>;

    async fn record_share(&self, post_id: &str, user_id: &str) -> PlatformResult<()>;
}

#[async_trait]
impl<G: PlatformGateway + ?Sized> PlatformGateway for Arc<G> {
    async fn fetch_posts(&self) -> PlatformResult<Vec<PostRecord>> {
        (**self).fetch_posts().await
    }

    async fn expire_boosts(&self, now: OffsetDateTime) -> PlatformResult<Vec<Boost>> {
        (**self).expire_boosts(now).await
    }

    async fn set_reaction(
        &self,
        kind: ReactionKind,
        target_id: &str,
        user_id: &str,
        active: bool,
    ) -> PlatformResult<()> {
        (**self).set_reaction(kind, target_id, user_id, active).await
    }

    async fn add_comment(&self, post_id: &str, user_id: &str, content: &str) -> PlatformResult<Comment> {
        (**self).add_comment(post_id, user_id, content).await
    }

    async fn record_share(&self, post_id: &str, user_id: &str) -> PlatformResult<()> {
        (**self).record_share(post_id, user_id).await
    }
}

/// `PlatformGateway` backed by the project's PostgREST API.
#[derive(Clone)]
pub struct SupabaseGateway {
    rest: SupabaseRestClient,
    tables: TableConfig,
}

impl SupabaseGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            rest: SupabaseRestClient::new(&config.supabase.rest_url, &config.supabase.key),
            tables: config.tables.clone(),
        }
    }
}

pub(crate) fn post_page_query(offset: usize, limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("select", POST_COLUMNS.to_string()),
        ("content", "not.is.null".to_string()),
        ("order", "created_at.desc,id.asc".to_string()),
        ("offset", offset.to_string()),
        ("limit", limit.to_string()),
    ]
}

pub(crate) fn expiry_filters(now: OffsetDateTime) -> PlatformResult<Vec<(&'static str, String)>> {
    let cutoff = now
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PlatformError::Decode(format!("cannot format expiry cutoff: {}", e)))?;
    Ok(vec![
        ("status", "eq.active".to_string()),
        ("ends_at", format!("lt.{}", cutoff)),
    ])
}

/// Requests pages of `page_size` until one comes back empty. The server may
/// cap a page below `page_size` (`db-max-rows`), so a short page does not
/// mean the end.
pub(crate) async fn collect_pages<T, F, Fut>(page_size: usize, mut fetch_page: F) -> PlatformResult<Vec<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = PlatformResult<Vec<T>>>,
{
    let mut rows = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch_page(offset, page_size).await?;
        if page.is_empty() {
            break;
        }
        offset += page.len();
        rows.extend(page);
    }
    Ok(rows)
}

#[async_trait]
impl PlatformGateway for SupabaseGateway {
    async fn fetch_posts(&self) -> PlatformResult<Vec<PostRecord>> {
        let posts: Vec<PostRecord> = collect_pages(POST_PAGE_SIZE, |offset, limit| {
            let query = post_page_query(offset, limit);
            async move { self.rest.select(&self.tables.posts, &query).await }
        })
        .await?;
        info!("Fetched {} posts from {}", posts.len(), self.tables.posts);
        Ok(posts)
    }

    async fn expire_boosts(&self, now: OffsetDateTime) -> PlatformResult<Vec<Boost>> {
        let filters = expiry_filters(now)?;
        self.rest
            .update(&self.tables.boosts, &filters, &json!({ "status": "expired" }))
            .await
    }

    async fn set_reaction(
        &self,
        kind: ReactionKind,
        target_id: &str,
        user_id: &str,
        active: bool,
    ) -> PlatformResult<()> {
        let table = kind.table(&self.tables);
        let column = kind.target_column();
        if active {
            let row = json!({ column: target_id, "user_id": user_id });
            self.rest.insert_ignoring_duplicates(table, &row).await
        } else {
            let filters = [
                (column, format!("eq.{}", target_id)),
                ("user_id", format!("eq.{}", user_id)),
            ];
            self.rest.delete(table, &filters).await
        }
    }

    async fn add_comment(&self, post_id: &str, user_id: &str, content: &str) -> PlatformResult<Comment> {
        let row = json!({ "post_id": post_id, "user_id": user_id, "content": content });
        let mut inserted: Vec<Comment> = self.rest.insert(&self.tables.post_comments, &row).await?;
        inserted
            .pop()
            .ok_or_else(|| PlatformError::Decode("comment insert returned no row".to_string()))
    }

    async fn record_share(&self, post_id: &str, user_id: &str) -> PlatformResult<()> {
        let row = json!({ "post_id": post_id, "user_id": user_id });
        let _: Vec<serde_json::Value> = self.rest.insert(&self.tables.post_shares, &row).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_post_page_query_filters_null_bodies() {
        let query = post_page_query(2000, 1000);
        assert!(query.contains(&("content", "not.is.null".to_string())));
        assert!(query.contains(&("offset", "2000".to_string())));
        assert!(query.contains(&("limit", "1000".to_string())));
    }

    #[tokio::test]
    async fn test_capped_pages_keep_paging_until_empty() {
        let rows: Vec<u32> = (0..7).collect();
        let mut requests = Vec::new();

        // server caps every page at 3 rows even though 1000 were asked for
        let fetched = collect_pages(1000, |offset, limit| {
            requests.push((offset, limit));
            let page: Vec<u32> = rows.iter().skip(offset).take(limit.min(3)).copied().collect();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(fetched, rows);
        assert_eq!(requests, vec![(0, 1000), (3, 1000), (6, 1000), (7, 1000)]);
    }

    #[tokio::test]
    async fn test_page_error_aborts_collection() {
        let result: PlatformResult<Vec<u32>> = collect_pages(10, |offset, _| async move {
            if offset == 0 {
                Ok(vec![1, 2])
            } else {
                Err(PlatformError::Api { status: 500, body: "down".into() })
            }
        })
        .await;
        assert!(matches!(result, Err(PlatformError::Api { status: 500, .. })));
    }

    #[test]
    fn test_expiry_filters_use_utc_cutoff() {
        let filters = expiry_filters(datetime!(2026-10-19 12:00:00 +2)).unwrap();
        assert_eq!(filters[0], ("status", "eq.active".to_string()));
        assert_eq!(filters[1], ("ends_at", "lt.2026-10-19T10:00:00Z".to_string()));
    }
}
