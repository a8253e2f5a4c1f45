// Sync module - HOW NODES TALK
// The gossip envelope and the outbound publishing boundary

mod protocol;
mod publisher;

pub use protocol::{GossipMessage, MessageType, NewTransactionPayload, ProtocolError};
pub use publisher::{ChannelPublisher, GossipPublisher, NullPublisher, PublishError};
