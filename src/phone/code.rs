use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a random six-digit one-time code.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:06}")
}

/// Hash a one-time code for storage; the raw code only travels out-of-band.
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}
