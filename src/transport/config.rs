use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid multiaddress {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Failed to set up swarm: {0}")]
    Setup(String),

    #[error("Failed to subscribe to {topic}: {reason}")]
    Subscribe { topic: String, reason: String },
}

/// Configuration for the gossip transport
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GossipConfig {
    /// Multiaddress to listen on
    pub listen_addr: String,
    /// Peers dialed at startup
    pub bootstrap_peers: Vec<String>,
    /// Topic carrying wallet-create messages
    pub wallet_topic: String,
    /// Topic carrying new-transaction messages
    pub transaction_topic: String,
    /// Gossipsub heartbeat interval in seconds
    pub heartbeat_interval_secs: u64,
    /// Idle connections are closed after this many seconds
    pub idle_timeout_secs: u64,
    /// Discover peers on the local network
    pub enable_mdns: bool,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            listen_addr: "/ip4/0.0.0.0/tcp/0".to_string(),
            bootstrap_peers: Vec::new(),
            wallet_topic: "wallet-create-topic".to_string(),
            transaction_topic: "new-transaction-topic".to_string(),
            heartbeat_interval_secs: 1,
            idle_timeout_secs: 60,
            enable_mdns: true,
        }
    }
}

impl GossipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn with_bootstrap_peer(mut self, addr: impl Into<String>) -> Self {
        self.bootstrap_peers.push(addr.into());
        self
    }

    pub fn with_heartbeat_interval(mut self, secs: u64) -> Self {
        self.heartbeat_interval_secs = secs;
        self
    }

    pub fn with_mdns(mut self, enabled: bool) -> Self {
        self.enable_mdns = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.heartbeat_interval_secs == 0 {
            return Err(TransportError::InvalidConfig(
                "heartbeat_interval_secs cannot be 0".to_string(),
            ));
        }
        if self.wallet_topic.is_empty() || self.transaction_topic.is_empty() {
            return Err(TransportError::InvalidConfig(
                "topic names cannot be empty".to_string(),
            ));
        }
        if self.wallet_topic == self.transaction_topic {
            return Err(TransportError::InvalidConfig(
                "wallet and transaction topics must differ".to_string(),
            ));
        }
        Ok(())
    }
}
