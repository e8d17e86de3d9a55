//! Fan-out port - abstraction over the publish channel for feed events.

use crate::domain::FeedEvent;

/// Publish side of the mutation fan-out.
///
/// Called after the causing mutation has committed. Delivery is
/// fire-and-forget, at-most-once per subscriber connected at publish time;
/// implementations snapshot their subscriber set and never retry or replay.
pub trait FeedPublisher: Send + Sync {
    fn publish(&self, event: FeedEvent);
}
