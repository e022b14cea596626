use crate::error::Result;

/// bcrypt work factor. Keeps a single hash in the tens of milliseconds.
const BCRYPT_COST: u32 = 10;

pub struct PasswordHasher;

impl PasswordHasher {
    /// Hash a password with bcrypt (random salt, fixed cost).
    pub fn hash(password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, BCRYPT_COST)?)
    }

    /// Verify a password against a stored digest. A mismatch is `Ok(false)`,
    /// not an error.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }

    /// Hash on the blocking pool. bcrypt is CPU-bound; running it inline
    /// would stall the async runtime under a login burst.
    pub async fn hash_blocking(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password)).await?
    }

    /// Verify on the blocking pool.
    pub async fn verify_blocking(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash)).await?
    }
}
