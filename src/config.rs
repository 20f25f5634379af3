use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 3003;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// An error that can occur while reading the configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0} must be set")]
	Missing(&'static str),
	#[error("{0} must be a number")]
	NotANumber(&'static str),
	#[error("SECRET must not be empty")]
	EmptySecret,
}

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
	pub port: u16,
	/// When unset, the in-memory store is used.
	pub database_url: Option<String>,
	/// The secret used to sign and verify session tokens.
	pub secret: String,
	pub token_ttl: Duration,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let port = match lookup("PORT") {
			Some(port) => port.parse().map_err(|_| Error::NotANumber("PORT"))?,
			None => DEFAULT_PORT,
		};

		let token_ttl = match lookup("TOKEN_TTL_SECS") {
			Some(ttl) => Duration::from_secs(
				ttl.parse()
					.map_err(|_| Error::NotANumber("TOKEN_TTL_SECS"))?,
			),
			None => DEFAULT_TOKEN_TTL,
		};

		let secret = lookup("SECRET").ok_or(Error::Missing("SECRET"))?;

		if secret.is_empty() {
			return Err(Error::EmptySecret);
		}

		Ok(Self {
			port,
			database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
			secret,
			token_ttl,
		})
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::*;

	fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
		let vars = vars
			.iter()
			.map(|(k, v)| ((*k).to_string(), (*v).to_string()))
			.collect::<HashMap<_, _>>();

		Config::from_lookup(|key| vars.get(key).cloned())
	}

	#[test]
	fn test_defaults() {
		let config = config(&[("SECRET", "hunter2")]).unwrap();

		assert_eq!(config.port, DEFAULT_PORT);
		assert_eq!(config.token_ttl, DEFAULT_TOKEN_TTL);
		assert!(config.database_url.is_none());
	}

	#[test]
	fn test_secret_is_required() {
		assert!(matches!(config(&[]), Err(Error::Missing("SECRET"))));
		assert!(matches!(
			config(&[("SECRET", "")]),
			Err(Error::EmptySecret)
		));
	}

	#[test]
	fn test_overrides() {
		let config = config(&[
			("SECRET", "hunter2"),
			("PORT", "8080"),
			("TOKEN_TTL_SECS", "60"),
			("DATABASE_URL", "postgres://localhost/blog"),
		])
		.unwrap();

		assert_eq!(config.port, 8080);
		assert_eq!(config.token_ttl, Duration::from_secs(60));
		assert_eq!(
			config.database_url.as_deref(),
			Some("postgres://localhost/blog")
		);
	}

	#[test]
	fn test_bad_port() {
		assert!(matches!(
			config(&[("SECRET", "x"), ("PORT", "http")]),
			Err(Error::NotANumber("PORT"))
		));
	}
}
