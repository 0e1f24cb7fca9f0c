use common::{PlatformGateway, ReactionKind};
use tracing::{debug, warn};

use crate::error::EngagementResult;
use crate::toggle::{OptimisticToggle, Snapshot};

/// Drives an `OptimisticToggle` through a backend reaction write.
pub struct ReactionController<G> {
    gateway: G,
}

impl<G: PlatformGateway> ReactionController<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Flips the reaction, writes it, and settles the toggle. On a backend
    /// failure the toggle is rolled back and the error returned.
    pub async fn toggle(
        &self,
        toggle: &mut OptimisticToggle,
        kind: ReactionKind,
        target_id: &str,
        user_id: &str,
    ) -> EngagementResult<Snapshot> {
        let target = toggle.begin()?;
        debug!("{:?} on {} by {} -> {}", kind, target_id, user_id, target.active);

        match self
            .gateway
            .set_reaction(kind, target_id, user_id, target.active)
            .await
        {
            Ok(()) => {
                toggle.confirm();
                Ok(toggle.displayed())
            }
            Err(e) => {
                warn!("Rolling back {:?} on {}: {}", kind, target_id, e);
                toggle.rollback();
                Err(e.into())
            }
        }
    }
}
