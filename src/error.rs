use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
	credential,
	route::{auth, blog, user},
	store,
};

/// Error type for the application.
///
/// The Display trait is not sent to the client for internal errors, so it can
/// show sensitive information. Every other variant is rendered with
/// [`Error::message`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("malformatted id")]
	MalformedId(#[from] rejection::PathRejection),
	#[error("unknown endpoint")]
	UnknownEndpoint,
	#[error("method not allowed")]
	MethodNotAllowed,
	#[error("auth error: {0}")]
	Auth(#[from] auth::Error),
	#[error("blog error: {0}")]
	Blog(#[from] blog::Error),
	#[error("user error: {0}")]
	User(#[from] user::Error),
	#[error("credential error: {0}")]
	Credential(#[from] credential::Error),
	#[error("store error: {0}")]
	Store(store::Error),
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message {
	pub error: String,
}

impl From<store::Error> for Error {
	fn from(error: store::Error) -> Self {
		match error {
			store::Error::UsernameTaken => user::Error::UsernameTaken.into(),
			error => Self::Store(error),
		}
	}
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::MalformedId(..) => StatusCode::BAD_REQUEST,
			Self::UnknownEndpoint => StatusCode::NOT_FOUND,
			Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			Self::Auth(error) => error.status(),
			Self::Blog(error) => error.status(),
			Self::User(error) => error.status(),
			Self::Credential(..) | Self::Store(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The message presented to the client.
	///
	/// Server errors are never described beyond a generic message.
	pub fn message(&self) -> String {
		if self.status().is_server_error() {
			return "something went wrong".into();
		}

		match self {
			Self::Validation(errors) => {
				let mut messages = errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						errors.iter().map(move |error| {
							error
								.message
								.as_ref()
								.map_or_else(|| format!("{field} is invalid"), ToString::to_string)
						})
					})
					.collect::<Vec<_>>();

				messages.sort();
				messages.join("; ")
			}
			Self::Json(error) => error.body_text(),
			Self::Auth(error) => error.to_string(),
			Self::Blog(error) => error.to_string(),
			Self::User(error) => error.to_string(),
			Self::MalformedId(..)
			| Self::UnknownEndpoint
			| Self::MethodNotAllowed
			| Self::Credential(..)
			| Self::Store(..) => self.to_string(),
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}

		(
			status,
			Json(Message {
				error: self.message(),
			}),
		)
			.into_response()
	}
}

impl OperationOutput for Error {
	type Inner = Message;
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::*;

	#[derive(Validate)]
	struct Input {
		#[validate(length(min = 3, message = "username must be at least 3 characters long"))]
		username: String,
		#[validate(length(min = 3, message = "password must be at least 3 characters long"))]
		password: String,
	}

	#[test]
	fn test_validation_message() {
		let errors = Input {
			username: "ab".into(),
			password: "12".into(),
		}
		.validate()
		.unwrap_err();

		let error = Error::from(errors);

		assert_eq!(error.status(), StatusCode::BAD_REQUEST);
		assert_eq!(
			error.message(),
			"password must be at least 3 characters long; username must be at least 3 characters long"
		);
	}

	#[test]
	fn test_internal_errors_are_hidden() {
		let error = Error::from(store::Error::UnknownUser(uuid::Uuid::nil()));

		assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(error.message(), "something went wrong");
	}

	#[test]
	fn test_duplicate_username() {
		let error = Error::from(store::Error::UsernameTaken);

		assert_eq!(error.status(), StatusCode::BAD_REQUEST);
		assert_eq!(error.message(), "username must be unique");
	}
}
