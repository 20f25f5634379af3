use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};

/// Hashes a password with Argon2 and a random salt.
///
/// The salt and parameters are embedded in the returned PHC string, so
/// hashing the same password twice yields two different strings.
pub fn hash(hasher: &Argon2, password: &str) -> Result<String, argon2::password_hash::Error> {
	let salt = SaltString::generate(&mut OsRng);

	Ok(hasher.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Checks a password against a PHC string. The comparison itself is done in
/// constant time by `argon2`.
pub fn verify(hasher: &Argon2, password: &str, hash: &str) -> bool {
	PasswordHash::new(hash)
		.is_ok_and(|hash| hasher.verify_password(password.as_bytes(), &hash).is_ok())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_hash_is_salted() {
		let hasher = Argon2::default();

		let first = hash(&hasher, "sekret").unwrap();
		let second = hash(&hasher, "sekret").unwrap();

		assert_ne!(first, second);
		assert!(verify(&hasher, "sekret", &first));
		assert!(verify(&hasher, "sekret", &second));
	}

	#[test]
	fn test_wrong_password() {
		let hasher = Argon2::default();
		let hashed = hash(&hasher, "sekret").unwrap();

		assert!(!verify(&hasher, "sekrit", &hashed));
		assert!(!verify(&hasher, "", &hashed));
	}

	#[test]
	fn test_malformed_hash() {
		let hasher = Argon2::default();

		assert!(!verify(&hasher, "sekret", ""));
		assert!(!verify(&hasher, "sekret", "$2b$10$examplehash"));
		assert!(!verify(&hasher, "sekret", "not a hash at all"));
	}
}
