// Wallet integration tests
