//! Progress sinks for the run subscription channel

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::traits::ProgressSink;
use shared::messages::ScanUpdate;

/// Progress sink backed by an unbounded mpsc channel.
///
/// Publishing is best-effort: a dropped receiver never fails the run.
pub struct ChannelProgressSink {
    sender: mpsc::UnboundedSender<ScanUpdate>,
}

impl ChannelProgressSink {
    pub fn new(sender: mpsc::UnboundedSender<ScanUpdate>) -> Self {
        Self { sender }
    }

    /// Convenience constructor returning the sink and its receiver
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScanUpdate>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl ProgressSink for ChannelProgressSink {
    async fn publish(&self, update: ScanUpdate) {
        if self.sender.send(update).is_err() {
            debug!("📡 Progress subscriber disconnected, update dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let (sink, mut receiver) = ChannelProgressSink::channel();
        let run_id = Uuid::new_v4();

        sink.publish(ScanUpdate::Started { run_id, total: 2 }).await;

        let update = receiver.recv().await.unwrap();
        assert_eq!(update, ScanUpdate::Started { run_id, total: 2 });
    }

    #[tokio::test]
    async fn test_disconnected_subscriber_does_not_fail() {
        let (sink, receiver) = ChannelProgressSink::channel();
        drop(receiver);

        // Must not panic or error
        sink.publish(ScanUpdate::Failed {
            run_id: Uuid::new_v4(),
            message: "store unreachable".to_string(),
        })
        .await;
    }
}
