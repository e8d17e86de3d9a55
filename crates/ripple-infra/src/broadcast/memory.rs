//! In-process subscriber registry for feed events.
//!
//! Works within a single process only. Subscribers connected at publish
//! time each receive the event at most once; there is no retry and no
//! replay for subscribers that connect later.

use tokio::sync::broadcast;

use ripple_core::domain::FeedEvent;
use ripple_core::ports::FeedPublisher;

/// In-memory feed broadcaster backed by a `tokio::sync::broadcast`
/// channel. The channel's receiver set is the subscriber registry:
/// [`InMemoryFeedBroadcaster::subscribe`] adds a subscriber, dropping the
/// receiver removes it, and `publish` snapshots the set at send time.
pub struct InMemoryFeedBroadcaster {
    sender: broadcast::Sender<FeedEvent>,
    buffer_size: usize,
}

impl InMemoryFeedBroadcaster {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self {
            sender,
            buffer_size,
        }
    }

    /// Register a new subscriber. It sees only events published after this
    /// call.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for InMemoryFeedBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

impl FeedPublisher for InMemoryFeedBroadcaster {
    fn publish(&self, event: FeedEvent) {
        match self.sender.send(event) {
            Ok(delivered) => {
                tracing::debug!(subscribers = delivered, "feed event published");
            }
            Err(_) => {
                // No subscribers connected - fine for fire-and-forget.
                tracing::debug!("feed event dropped, no subscribers");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::domain::Post;
    use uuid::Uuid;

    fn sample_post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "Hello world".into(),
            "Some content".into(),
            None,
        )
    }

    #[tokio::test]
    async fn connected_subscribers_receive_published_events() {
        let broadcaster = InMemoryFeedBroadcaster::default();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        let post = sample_post();
        broadcaster.publish(FeedEvent::Create(post.clone()));

        for receiver in [&mut first, &mut second] {
            match receiver.recv().await.unwrap() {
                FeedEvent::Create(received) => assert_eq!(received.id, post.id),
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let broadcaster = InMemoryFeedBroadcaster::default();
        broadcaster.publish(FeedEvent::Delete(Uuid::new_v4()));

        let mut late = broadcaster.subscribe();
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn publishing_without_subscribers_does_not_panic() {
        let broadcaster = InMemoryFeedBroadcaster::default();
        broadcaster.publish(FeedEvent::Update(sample_post()));
    }
}
