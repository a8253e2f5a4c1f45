// Gossip protocol integration tests
