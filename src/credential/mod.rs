//! Password hashing and session tokens.
//!
//! Hashing is deliberately slow, so the async entry points run it on the
//! blocking thread pool instead of a request worker.

pub mod password;
pub mod token;

use argon2::Argon2;

pub use token::{Claims, Keys, TokenError};

/// An error that can occur while hashing or verifying a password.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("password hashing error: {0}")]
	Hash(#[from] argon2::password_hash::Error),
	#[error("hashing task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

/// Hashes a password with a fresh random salt, returning a PHC string.
pub async fn hash_password(hasher: Argon2<'static>, password: String) -> Result<String, Error> {
	let hash = tokio::task::spawn_blocking(move || password::hash(&hasher, &password)).await??;

	Ok(hash)
}

/// Verifies a password against a PHC string produced by [`hash_password`].
///
/// A malformed hash is reported as a mismatch, not as an error.
pub async fn verify_password(
	hasher: Argon2<'static>,
	password: String,
	hash: String,
) -> Result<bool, Error> {
	Ok(tokio::task::spawn_blocking(move || password::verify(&hasher, &password, &hash)).await?)
}
