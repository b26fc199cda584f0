//! Salted and peppered password hashing.
//!
//! The stored hash is `bcrypt(hex(sha256(password ‖ salt ‖ pepper)))`. The
//! SHA-256 pre-hash keeps the bcrypt input under its 72-byte limit.
//!
//! bcrypt is CPU-bound, so request paths use the `*_async` variants, which
//! run on tokio's blocking pool.

use std::sync::{Arc, OnceLock};

use rand::RngExt;
use sha2::{Digest, Sha256};
use tokio::task;

/// Number of random bytes in a salt (hex-encoded, so 256 characters stored).
pub const SALT_BYTES: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("password hashing task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Hash and salt to persist for a user.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

#[derive(Clone)]
pub struct PasswordHasher {
    pepper: String,
    cost: u32,
    /// Hash verified against when the user does not exist, built on first use.
    dummy: Arc<OnceLock<String>>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
            cost: bcrypt::DEFAULT_COST,
            dummy: Arc::default(),
        }
    }

    /// Override the bcrypt work factor.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self.dummy = Arc::default();
        self
    }

    /// Hash `password` under a freshly generated salt.
    pub fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let salt = generate_salt();
        let hash = bcrypt::hash(self.prehash(password, &salt), self.cost)?;
        Ok(HashedPassword { hash, salt })
    }

    /// Check `password` against a stored hash and salt.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, salt: &str, hash: &str) -> bool {
        match bcrypt::verify(self.prehash(password, salt), hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_async(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();
        task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    /// [`verify`](Self::verify) on the blocking pool.
    pub async fn verify_async(
        &self,
        password: &str,
        salt: &str,
        hash: &str,
    ) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        let (password, salt, hash) = (password.to_owned(), salt.to_owned(), hash.to_owned());
        Ok(task::spawn_blocking(move || hasher.verify(&password, &salt, &hash)).await?)
    }

    /// Spend the same bcrypt work as [`verify_async`](Self::verify_async) for a
    /// username that has no account, so both rejections take as long.
    pub async fn verify_missing(&self, password: &str) -> Result<(), PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();
        task::spawn_blocking(move || -> Result<(), PasswordError> {
            let dummy = match hasher.dummy.get() {
                Some(dummy) => dummy.clone(),
                None => {
                    let dummy = bcrypt::hash(hasher.prehash("", ""), hasher.cost)?;
                    hasher.dummy.get_or_init(|| dummy).clone()
                }
            };
            bcrypt::verify(hasher.prehash(&password, ""), &dummy)?;
            Ok(())
        })
        .await?
    }

    fn prehash(&self, password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(salt.as_bytes());
        hasher.update(self.pepper.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn generate_salt() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..SALT_BYTES)
        .map(|_| rng.random_range(0..=u8::MAX))
        .collect();
    hex::encode(bytes)
}
