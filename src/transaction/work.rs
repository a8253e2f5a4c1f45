// Proof-of-work gate for standard transactions
//
// Difficulty grows logarithmically with payload size: the hex digest of
// sha256(data || decimal(nonce)) must start with `target_prefix_length(data)` zeros.

use sha2::{Digest, Sha256};

/// Number of leading hex zeros required for a payload
pub fn target_prefix_length(data: &str) -> usize {
    // Integer division first; log2(0) is -inf and gets clamped to 1.
    let tens = (data.len() / 10) as f64;
    tens.log2().max(1.0).floor() as usize + 1
}

fn digest_hex(data: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

fn meets_target(digest: &str, prefix_len: usize) -> bool {
    digest.len() >= prefix_len && digest.bytes().take(prefix_len).all(|b| b == b'0')
}

/// Check a nonce against the proof-of-work target for `data`
pub fn verify_proof_of_work(data: &str, nonce: u64) -> bool {
    meets_target(&digest_hex(data, nonce), target_prefix_length(data))
}

/// Search nonces `0..max_iterations` for one that satisfies the target
pub fn solve_proof_of_work(data: &str, max_iterations: u64) -> Option<u64> {
    let prefix_len = target_prefix_length(data);
    (0..max_iterations).find(|nonce| meets_target(&digest_hex(data, *nonce), prefix_len))
}
