// Publisher - the outbound side of the gossip boundary
//
// The ledger core only ever calls `publish`; whatever carries messages to
// peers sits behind this trait. Delivery is fire-and-forget.

use crate::sync::GossipMessage;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Gossip channel closed")]
    ChannelClosed,
}

/// Outbound gossip capability handed to the node
pub trait GossipPublisher: Send + Sync {
    fn publish(&self, message: GossipMessage) -> Result<(), PublishError>;
}

/// Publishes into an unbounded channel drained by a transport task
#[derive(Clone, Debug)]
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<GossipMessage>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiver the transport reads from
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GossipMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl GossipPublisher for ChannelPublisher {
    fn publish(&self, message: GossipMessage) -> Result<(), PublishError> {
        self.sender
            .send(message)
            .map_err(|_| PublishError::ChannelClosed)
    }
}

/// Drops every message; for nodes running without peers
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPublisher;

impl GossipPublisher for NullPublisher {
    fn publish(&self, _message: GossipMessage) -> Result<(), PublishError> {
        Ok(())
    }
}
