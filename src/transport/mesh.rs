// Gossipsub transport - carries the gossip envelope between nodes
//
// Outbound messages arrive on a channel fed by `ChannelPublisher`; inbound
// messages are decoded and handed to the node on a blocking worker each.
// Messages this node published are never delivered back to it.

use crate::node::Node;
use crate::sync::{GossipMessage, MessageType};
use crate::transport::{GossipConfig, TransportError};
use futures::StreamExt;
use libp2p::swarm::behaviour::toggle::Toggle;
use libp2p::swarm::{NetworkBehaviour, SwarmEvent};
use libp2p::{gossipsub, identify, identity, mdns, noise, tcp, yamux, Multiaddr, PeerId, Swarm};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "/tanglemesh/1.0.0";

#[derive(NetworkBehaviour)]
struct MeshBehaviour {
    gossipsub: gossipsub::Behaviour,
    mdns: Toggle<mdns::tokio::Behaviour>,
    identify: identify::Behaviour,
}

/// Content-addressed message ids so the same envelope is only seen once
fn message_id(message: &gossipsub::Message) -> gossipsub::MessageId {
    gossipsub::MessageId::from(hex::encode(Sha256::digest(&message.data)))
}

fn build_behaviour(
    key: &identity::Keypair,
    config: &GossipConfig,
) -> Result<MeshBehaviour, Box<dyn std::error::Error + Send + Sync>> {
    let gossipsub_config = gossipsub::ConfigBuilder::default()
        .heartbeat_interval(Duration::from_secs(config.heartbeat_interval_secs))
        .validation_mode(gossipsub::ValidationMode::Strict)
        .message_id_fn(message_id)
        .build()?;

    let gossipsub = gossipsub::Behaviour::new(
        gossipsub::MessageAuthenticity::Signed(key.clone()),
        gossipsub_config,
    )?;

    let mdns = if config.enable_mdns {
        Some(mdns::tokio::Behaviour::new(
            mdns::Config::default(),
            key.public().to_peer_id(),
        )?)
    } else {
        None
    };

    let identify = identify::Behaviour::new(identify::Config::new(
        PROTOCOL_VERSION.to_string(),
        key.public(),
    ));

    Ok(MeshBehaviour {
        gossipsub,
        mdns: Toggle::from(mdns),
        identify,
    })
}

fn parse_addr(addr: &str) -> Result<Multiaddr, TransportError> {
    addr.parse().map_err(|e: libp2p::multiaddr::Error| TransportError::InvalidAddress {
        addr: addr.to_string(),
        reason: e.to_string(),
    })
}

/// libp2p gossipsub transport for one node
pub struct GossipTransport {
    swarm: Swarm<MeshBehaviour>,
    wallet_topic: gossipsub::IdentTopic,
    transaction_topic: gossipsub::IdentTopic,
}

impl GossipTransport {
    /// Build the swarm, subscribe to both topics, start listening and dial bootstrap peers
    pub fn new(config: &GossipConfig) -> Result<Self, TransportError> {
        config.validate()?;

        let mut swarm = libp2p::SwarmBuilder::with_new_identity()
            .with_tokio()
            .with_tcp(
                tcp::Config::default(),
                noise::Config::new,
                yamux::Config::default,
            )
            .map_err(|e| TransportError::Setup(e.to_string()))?
            .with_behaviour(|key| build_behaviour(key, config))
            .map_err(|e| TransportError::Setup(e.to_string()))?
            .with_swarm_config(|cfg| {
                cfg.with_idle_connection_timeout(Duration::from_secs(config.idle_timeout_secs))
            })
            .build();

        let wallet_topic = gossipsub::IdentTopic::new(config.wallet_topic.clone());
        let transaction_topic = gossipsub::IdentTopic::new(config.transaction_topic.clone());

        for (name, topic) in [
            (&config.wallet_topic, &wallet_topic),
            (&config.transaction_topic, &transaction_topic),
        ] {
            swarm
                .behaviour_mut()
                .gossipsub
                .subscribe(topic)
                .map_err(|e| TransportError::Subscribe {
                    topic: name.clone(),
                    reason: format!("{e:?}"),
                })?;
        }

        swarm
            .listen_on(parse_addr(&config.listen_addr)?)
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        for peer in &config.bootstrap_peers {
            let addr = parse_addr(peer)?;
            if let Err(e) = swarm.dial(addr) {
                warn!(peer = %peer, error = %e, "failed to dial bootstrap peer");
            }
        }

        info!(peer_id = %swarm.local_peer_id(), "gossip transport ready");

        Ok(Self {
            swarm,
            wallet_topic,
            transaction_topic,
        })
    }

    pub fn local_peer_id(&self) -> PeerId {
        *self.swarm.local_peer_id()
    }

    /// Drive the swarm until `shutdown` resolves
    pub async fn run(
        mut self,
        node: Arc<Node>,
        mut outbound: mpsc::UnboundedReceiver<GossipMessage>,
        shutdown: impl Future<Output = ()>,
    ) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("gossip transport stopping");
                    break;
                }
                Some(message) = outbound.recv() => self.publish(message),
                event = self.swarm.select_next_some() => self.handle_event(event, &node),
            }
        }
    }

    fn topic_for(&self, message_type: MessageType) -> gossipsub::IdentTopic {
        match message_type {
            MessageType::WalletCreate => self.wallet_topic.clone(),
            MessageType::NewTransaction => self.transaction_topic.clone(),
        }
    }

    fn publish(&mut self, message: GossipMessage) {
        let topic = self.topic_for(message.message_type());
        let bytes = match message.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to encode outbound message");
                return;
            }
        };

        match self.swarm.behaviour_mut().gossipsub.publish(topic, bytes) {
            Ok(id) => debug!(message_id = ?id, message_type = %message.message_type(), "published"),
            Err(e) => warn!(error = ?e, message_type = %message.message_type(), "publish failed"),
        }
    }

    fn handle_event(&mut self, event: SwarmEvent<MeshBehaviourEvent>, node: &Arc<Node>) {
        match event {
            SwarmEvent::NewListenAddr { address, .. } => {
                info!(%address, "listening");
            }
            SwarmEvent::ConnectionEstablished { peer_id, .. } => {
                debug!(peer = %peer_id, "connection established");
            }
            SwarmEvent::ConnectionClosed { peer_id, .. } => {
                debug!(peer = %peer_id, "connection closed");
            }
            SwarmEvent::Behaviour(MeshBehaviourEvent::Mdns(mdns::Event::Discovered(peers))) => {
                for (peer_id, _addr) in peers {
                    info!(peer = %peer_id, "discovered peer");
                    self.swarm.behaviour_mut().gossipsub.add_explicit_peer(&peer_id);
                }
            }
            SwarmEvent::Behaviour(MeshBehaviourEvent::Mdns(mdns::Event::Expired(peers))) => {
                for (peer_id, _addr) in peers {
                    debug!(peer = %peer_id, "peer expired");
                    self.swarm.behaviour_mut().gossipsub.remove_explicit_peer(&peer_id);
                }
            }
            SwarmEvent::Behaviour(MeshBehaviourEvent::Gossipsub(gossipsub::Event::Message {
                propagation_source,
                message,
                ..
            })) => self.deliver(propagation_source, message, node),
            _ => {}
        }
    }

    fn deliver(&self, from: PeerId, message: gossipsub::Message, node: &Arc<Node>) {
        if message.source.as_ref() == Some(self.swarm.local_peer_id()) {
            return;
        }

        let envelope = match GossipMessage::from_bytes(&message.data) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(peer = %from, error = %e, "undecodable gossip message");
                return;
            }
        };

        debug!(peer = %from, message_type = %envelope.message_type(), "gossip received");
        let node = Arc::clone(node);
        tokio::task::spawn_blocking(move || node.receive(envelope));
    }
}
