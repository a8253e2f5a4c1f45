// Transport module - THE WIRE
// libp2p gossipsub carrying the gossip envelope between nodes

mod config;
mod mesh;

pub use config::{GossipConfig, TransportError};
pub use mesh::GossipTransport;
