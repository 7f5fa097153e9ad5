use tokio::sync::{RwLock, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use super::config::EVENT_CHANNEL_CAPACITY;

/// One subscriber on an event channel.
#[derive(Debug)]
pub struct Subscription<T> {
    pub id: String,
    sender: mpsc::Sender<T>,
}

impl<T> Subscription<T> {
    fn new() -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let id = Uuid::new_v4().to_string();

        (Self { id, sender: tx }, rx)
    }
}

/// Per-instance publish/subscribe over bounded channels. Delivery walks
/// subscribers in subscription order; a subscriber that went away is
/// skipped, never an error.
#[derive(Debug)]
pub struct EventChannel<T> {
    subscribers: RwLock<Vec<Subscription<T>>>,
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventChannel<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: RwLock::const_new(Vec::new()),
        }
    }

    pub async fn subscribe(&self) -> (String, mpsc::Receiver<T>) {
        let (subscription, receiver) = Subscription::new();
        let id = subscription.id.clone();

        let mut subs = self.subscribers.write().await;
        subs.push(subscription);

        (id, receiver)
    }

    /// Subscribe wrapped as a `Stream`, for UI loops that `select!` over
    /// several sources.
    pub async fn subscribe_stream(&self) -> (String, ReceiverStream<T>) {
        let (id, receiver) = self.subscribe().await;
        (id, ReceiverStream::new(receiver))
    }

    pub async fn unsubscribe(&self, subscription_id: &str) {
        let mut subs = self.subscribers.write().await;
        subs.retain(|s| s.id != subscription_id);
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl<T: Clone> EventChannel<T> {
    pub async fn publish(&self, payload: T) {
        let subs = self.subscribers.read().await;

        for subscription in subs.iter() {
            // Send payload, ignore if receiver dropped
            let _ = subscription.sender.send(payload.clone()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_unsubscribe() {
        let channel: EventChannel<u32> = EventChannel::new();

        let (id1, _rx1) = channel.subscribe().await;
        let (id2, _rx2) = channel.subscribe().await;

        assert_eq!(channel.subscriber_count().await, 2);

        channel.unsubscribe(&id1).await;
        assert_eq!(channel.subscriber_count().await, 1);

        channel.unsubscribe(&id2).await;
        assert_eq!(channel.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers_in_order() {
        let channel: EventChannel<&'static str> = EventChannel::new();

        let (_id1, mut rx1) = channel.subscribe().await;
        let (_id2, mut rx2) = channel.subscribe().await;

        channel.publish("first").await;
        channel.publish("second").await;

        assert_eq!(rx1.recv().await, Some("first"));
        assert_eq!(rx1.recv().await, Some("second"));
        assert_eq!(rx2.recv().await, Some("first"));
        assert_eq!(rx2.recv().await, Some("second"));
    }

    #[tokio::test]
    async fn test_dead_subscriber_does_not_block_later_ones() {
        let channel: EventChannel<u32> = EventChannel::new();

        let (_id1, rx1) = channel.subscribe().await;
        let (_id2, mut rx2) = channel.subscribe().await;
        drop(rx1);

        channel.publish(7).await;
        assert_eq!(rx2.recv().await, Some(7));
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_id_is_a_noop() {
        let channel: EventChannel<u32> = EventChannel::new();
        let (_id, _rx) = channel.subscribe().await;

        channel.unsubscribe("not-a-subscription").await;
        assert_eq!(channel.subscriber_count().await, 1);
    }
}
