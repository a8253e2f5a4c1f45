use rand::RngCore;

/// Generate a fresh random wallet address: 32 random bytes, hex-encoded to 64 characters
pub fn generate_seed() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
