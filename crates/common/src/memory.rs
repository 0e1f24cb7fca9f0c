use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::{PlatformError, PlatformResult};
use crate::gateway::PlatformGateway;
use crate::models::{Boost, BoostStatus, Comment, PostRecord, ReactionKind};

#[derive(Default)]
struct MemoryState {
    posts: Vec<PostRecord>,
    boosts: Vec<Boost>,
    reactions: HashSet<(ReactionKind, String, String)>,
    comments: Vec<Comment>,
    shares: Vec<(String, String)>,
}

/// In-process `PlatformGateway`. Reads and writes can be made to fail to
/// exercise degraded paths.
#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<PostRecord>) -> Self {
        let gateway = Self::new();
        gateway.state().posts = posts;
        gateway
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_post(&self, post: PostRecord) {
        self.state().posts.push(post);
    }

    pub fn push_boost(&self, boost: Boost) {
        self.state().boosts.push(boost);
    }

    pub fn boosts(&self) -> Vec<Boost> {
        self.state().boosts.clone()
    }

    pub fn has_reaction(&self, kind: ReactionKind, target_id: &str, user_id: &str) -> bool {
        self.state()
            .reactions
            .contains(&(kind, target_id.to_string(), user_id.to_string()))
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state().comments.clone()
    }

    pub fn share_count(&self, post_id: &str) -> usize {
        self.state().shares.iter().filter(|(p, _)| p == post_id).count()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> PlatformResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn check_writes(&self) -> PlatformResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn unavailable() -> PlatformError {
    PlatformError::Api {
        status: 503,
        body: "memory gateway unavailable".to_string(),
    }
}

#[async_trait]
impl PlatformGateway for MemoryGateway {
    async fn fetch_posts(&self) -> PlatformResult<Vec<PostRecord>> {
        self.check_reads()?;
        Ok(self
            .state()
            .posts
            .iter()
            .filter(|post| post.body.is_some())
            .cloned()
            .collect())
    }

    async fn expire_boosts(&self, now: OffsetDateTime) -> PlatformResult<Vec<Boost>> {
        self.check_writes()?;
        let mut state = self.state();
        let mut expired = Vec::new();
        for boost in state.boosts.iter_mut() {
            if boost.status == BoostStatus::Active && boost.ends_at < now {
                boost.status = BoostStatus::Expired;
                expired.push(boost.clone());
            }
        }
        Ok(expired)
    }

    async fn set_reaction(
        &self,
        kind: ReactionKind,
        target_id: &str,
        user_id: &str,
        active: bool,
    ) -> PlatformResult<()> {
        self.check_writes()?;
        let key = (kind, target_id.to_string(), user_id.to_string());
        let mut state = self.state();
        if active {
            state.reactions.insert(key);
        } else {
            state.reactions.remove(&key);
        }
        Ok(())
    }

    async fn add_comment(&self, post_id: &str, user_id: &str, content: &str) -> PlatformResult<Comment> {
        self.check_writes()?;
        let mut state = self.state();
        let comment = Comment {
            id: Some(format!("comment-{}", state.comments.len() + 1)),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: Some(OffsetDateTime::now_utc()),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn record_share(&self, post_id: &str, user_id: &str) -> PlatformResult<()> {
        self.check_writes()?;
        self.state()
            .shares
            .push((post_id.to_string(), user_id.to_string()));
        Ok(())
    }
}
