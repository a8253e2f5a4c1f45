// Ledger integration tests
