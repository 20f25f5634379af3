use std::{convert::Infallible, sync::Arc};

use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request, HeaderMap},
};

use crate::{
	credential::{Claims, Keys},
	error::Error,
	model,
	openapi::SECURITY_SCHEME_BEARER,
	route::auth,
	Database,
};

pub const AUTHORIZATION_PREFIX: &str = "bearer ";

/// The candidate token from the `Authorization` header, if any.
///
/// This never rejects a request. A missing header, a header that is not valid
/// UTF-8, a scheme other than `Bearer` or an empty token all produce `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let token = headers
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| {
				let prefix = value.get(..AUTHORIZATION_PREFIX.len())?;

				let token = &value[AUTHORIZATION_PREFIX.len()..];

				(prefix.eq_ignore_ascii_case(AUTHORIZATION_PREFIX) && !token.is_empty())
					.then(|| token.to_string())
			});

		Self(token)
	}

	/// Verifies the token and looks up the user it was issued to.
	pub async fn resolve(&self, keys: &Keys, database: &Database) -> Result<Session, Error> {
		let token = self.0.as_deref().ok_or(auth::Error::MissingToken)?;
		let claims = keys.verify(token).map_err(auth::Error::from)?;

		let user = database
			.find_user(claims.sub)
			.await?
			.ok_or(auth::Error::UnknownUser)?;

		Ok(Session { user, claims })
	}
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
	S: Sync + Send,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		Ok(Self::from_headers(&parts.headers))
	}
}

impl OperationInput for BearerToken {}

/// Extracts the bearer token and resolves it to a user.
///
/// If there is no token, a [`auth::Error::MissingToken`] is returned.
/// If the token is invalid or expired, a [`auth::Error::InvalidToken`] or
/// [`auth::Error::ExpiredToken`] is returned.
/// If the user no longer exists, a [`auth::Error::UnknownUser`] is returned.
///
/// ```rust
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub user: model::User,
	pub claims: Claims,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Database: FromRef<S>,
	Arc<Keys>: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let keys = Arc::<Keys>::from_ref(state);
		let database = Database::from_ref(state);

		BearerToken::from_headers(&parts.headers)
			.resolve(&keys, &database)
			.await
	}
}

impl OperationInput for Session {
	/// Operation input for the session extractor.
	///
	/// This adds a bearer token requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_BEARER.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}
