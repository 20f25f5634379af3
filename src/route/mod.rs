use aide::axum::ApiRouter;

use crate::{AppState, Error};

pub mod auth;
pub mod blog;
pub mod docs;
pub mod user;

pub fn routes() -> ApiRouter<AppState> {
	ApiRouter::new()
		.nest("/api/blogs", blog::routes())
		.nest("/api/users", user::routes())
		.nest("/api/login", auth::routes())
		.nest("/docs", docs::routes())
}

/// Fallback for any path that no route matches.
pub async fn unknown_endpoint() -> Error {
	Error::UnknownEndpoint
}

/// Fallback for a known path requested with a method it does not support.
pub async fn method_not_allowed() -> Error {
	Error::MethodNotAllowed
}
