use aide::axum::{routing::post_with, ApiRouter};
use axum::http::StatusCode;

use crate::{credential::TokenError, AppState};

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid username or password")]
	InvalidUsernameOrPassword,
	#[error("token missing or invalid")]
	MissingToken,
	#[error("invalid token")]
	InvalidToken,
	#[error("token expired")]
	ExpiredToken,
	#[error("user not found")]
	UnknownUser,
	#[error("token signing error: {0}")]
	Sign(#[from] jsonwebtoken::errors::Error),
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::InvalidUsernameOrPassword
			| Self::MissingToken
			| Self::InvalidToken
			| Self::ExpiredToken
			| Self::UnknownUser => StatusCode::UNAUTHORIZED,
			Self::Sign(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<TokenError> for Error {
	fn from(error: TokenError) -> Self {
		match error {
			TokenError::Invalid => Self::InvalidToken,
			TokenError::Expired => Self::ExpiredToken,
		}
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route("/", post_with(login, login_docs))
}
