use clap::Parser;
use std::sync::Arc;
use tanglemesh::node::{Node, NodeConfig};
use tanglemesh::sync::ChannelPublisher;
use tanglemesh::transport::{GossipConfig, GossipTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a tangle ledger node on the gossip network
#[derive(Parser, Debug)]
#[command(name = "tangle", version, about)]
struct Args {
    /// Multiaddress to listen on
    #[arg(long, default_value = "/ip4/0.0.0.0/tcp/0")]
    listen: String,

    /// Peer multiaddress to dial at startup (repeatable)
    #[arg(long = "peer")]
    peers: Vec<String>,

    /// Disable mDNS peer discovery
    #[arg(long)]
    no_mdns: bool,

    /// Pre-load the demonstration pending transactions
    #[arg(long)]
    seed_demo: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn node_config(&self) -> NodeConfig {
        NodeConfig::new().with_demo_transactions(self.seed_demo)
    }

    fn gossip_config(&self) -> GossipConfig {
        let mut config = GossipConfig::new()
            .with_listen_addr(self.listen.clone())
            .with_mdns(!self.no_mdns);
        for peer in &self.peers {
            config = config.with_bootstrap_peer(peer.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("initializing node");
    let (publisher, outbound) = ChannelPublisher::new();
    let node = Arc::new(Node::new(args.node_config(), Arc::new(publisher))?);

    let transport = GossipTransport::new(&args.gossip_config())?;
    info!(peer_id = %transport.local_peer_id(), "node started");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for interrupt");
        }
        info!("received interrupt signal, shutting down");
    };

    transport.run(node, outbound, shutdown).await;
    Ok(())
}
