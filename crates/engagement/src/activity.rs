use common::{Comment, PlatformEvent, PlatformGateway, RefreshHub};
use tracing::info;

use crate::error::{EngagementError, EngagementResult};

/// Writes comments and shares, then tells subscribed views to refresh.
pub struct ActivityService<G> {
    gateway: G,
    hub: RefreshHub,
}

impl<G: PlatformGateway> ActivityService<G> {
    pub fn new(gateway: G, hub: RefreshHub) -> Self {
        Self { gateway, hub }
    }

    pub async fn add_comment(&self, post_id: &str, user_id: &str, content: &str) -> EngagementResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EngagementError::EmptyComment);
        }
        let comment = self.gateway.add_comment(post_id, user_id, content).await?;
        info!("Comment added to post {}", post_id);
        self.hub.publish(PlatformEvent::CommentAdded {
            post_id: post_id.to_string(),
        });
        Ok(comment)
    }

    pub async fn share(&self, post_id: &str, user_id: &str) -> EngagementResult<()> {
        self.gateway.record_share(post_id, user_id).await?;
        self.hub.publish(PlatformEvent::PostShared {
            post_id: post_id.to_string(),
        });
        Ok(())
    }

    /// Announces a post created elsewhere so trending views can refresh.
    pub fn post_created(&self, post_id: &str) -> usize {
        self.hub.publish(PlatformEvent::PostCreated {
            post_id: post_id.to_string(),
        })
    }
}
