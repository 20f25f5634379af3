use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// The id of the user the token was issued to.
	pub sub: Uuid,
	pub username: String,
	pub iat: i64,
	pub exp: i64,
}

/// Why a token was rejected.
///
/// Expiry is reported separately so that clients can tell a stale token
/// apart from a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
	#[error("invalid token")]
	Invalid,
	#[error("token expired")]
	Expired,
}

/// Signing and verification keys for session tokens, derived from the
/// configured secret.
pub struct Keys {
	encoding: EncodingKey,
	decoding: DecodingKey,
	validation: Validation,
	ttl: Duration,
}

impl Keys {
	pub fn new(secret: &[u8], ttl: Duration) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);

		validation.leeway = 0;
		validation.set_required_spec_claims(&["exp", "sub"]);

		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			validation,
			ttl,
		}
	}

	/// Issues a token for the user that expires after the configured ttl.
	pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
		self.issue_at(user_id, username, Utc::now())
	}

	pub fn issue_at(
		&self,
		user_id: Uuid,
		username: &str,
		issued_at: DateTime<Utc>,
	) -> Result<String, jsonwebtoken::errors::Error> {
		let iat = issued_at.timestamp();
		let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

		let claims = Claims {
			sub: user_id,
			username: username.to_string(),
			iat,
			exp: iat.saturating_add(ttl),
		};

		jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
	}

	/// Checks the signature and expiry of a token, returning its claims.
	pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
		jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
			.map(|data| data.claims)
			.map_err(|error| match error.kind() {
				ErrorKind::ExpiredSignature => TokenError::Expired,
				_ => TokenError::Invalid,
			})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	const TTL: Duration = Duration::from_secs(60 * 60);

	#[test]
	fn test_round_trip() {
		let keys = Keys::new(b"secret", TTL);
		let user_id = Uuid::new_v4();

		let token = keys.issue(user_id, "root").unwrap();
		let claims = keys.verify(&token).unwrap();

		assert_eq!(claims.sub, user_id);
		assert_eq!(claims.username, "root");
		assert_eq!(claims.exp - claims.iat, 60 * 60);
	}

	#[test]
	fn test_expired() {
		let keys = Keys::new(b"secret", TTL);
		let issued_at = Utc::now() - chrono::Duration::seconds(60 * 60 + 10);

		let token = keys.issue_at(Uuid::new_v4(), "root", issued_at).unwrap();

		assert_eq!(keys.verify(&token), Err(TokenError::Expired));
	}

	#[test]
	fn test_wrong_secret() {
		let keys = Keys::new(b"secret", TTL);
		let other = Keys::new(b"rotated", TTL);

		let token = keys.issue(Uuid::new_v4(), "root").unwrap();

		assert_eq!(other.verify(&token), Err(TokenError::Invalid));
	}

	#[test]
	fn test_expired_with_wrong_secret_is_invalid() {
		let keys = Keys::new(b"secret", TTL);
		let other = Keys::new(b"rotated", TTL);
		let issued_at = Utc::now() - chrono::Duration::seconds(60 * 60 + 10);

		let token = keys.issue_at(Uuid::new_v4(), "root", issued_at).unwrap();

		assert_eq!(other.verify(&token), Err(TokenError::Invalid));
	}

	#[test]
	fn test_malformed() {
		let keys = Keys::new(b"secret", TTL);

		assert_eq!(keys.verify(""), Err(TokenError::Invalid));
		assert_eq!(keys.verify("not.a.token"), Err(TokenError::Invalid));
	}

	#[test]
	fn test_missing_subject() {
		#[derive(Serialize)]
		struct NoSubject {
			username: String,
			exp: i64,
		}

		let keys = Keys::new(b"secret", TTL);
		let token = jsonwebtoken::encode(
			&Header::new(Algorithm::HS256),
			&NoSubject {
				username: "root".into(),
				exp: Utc::now().timestamp() + 60,
			},
			&EncodingKey::from_secret(b"secret"),
		)
		.unwrap();

		assert_eq!(keys.verify(&token), Err(TokenError::Invalid));
	}
}
