use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    PostCreated { post_id: String },
    CommentAdded { post_id: String },
    PostShared { post_id: String },
}

/// Owner of the refresh channel. Views that need to refetch after writes
/// subscribe here; writers publish through a clone of the hub.
#[derive(Debug, Clone)]
pub struct RefreshHub {
    sender: broadcast::Sender<PlatformEvent>,
}

impl Default for RefreshHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RefreshHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    /// Returns how many subscribers received the event. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!("No subscribers for {:?}", event);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let hub = RefreshHub::default();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        let delivered = hub.publish(PlatformEvent::PostCreated { post_id: "p1".into() });
        assert_eq!(delivered, 2);

        assert_eq!(first.recv().await.unwrap(), PlatformEvent::PostCreated { post_id: "p1".into() });
        assert_eq!(second.recv().await.unwrap(), PlatformEvent::PostCreated { post_id: "p1".into() });
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let hub = RefreshHub::new(4);
        assert_eq!(hub.publish(PlatformEvent::PostShared { post_id: "p1".into() }), 0);
    }
}
