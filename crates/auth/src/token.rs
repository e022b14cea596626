use rand::RngCore;

/// 32 bytes from the OS RNG, hex-encoded: 256 bits of entropy, 64 chars.
const TOKEN_BYTES: usize = 32;

/// Generate an opaque session token. Carries no decodable structure — it is
/// purely a lookup key, so revocation stays a row deletion.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hex digest of a token, for storing in the database. The raw
/// token never touches a table.
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
