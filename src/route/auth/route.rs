use axum::extract::State;
use macros::route;

use crate::{credential, extract::Json, openapi::tag, AppState};

use super::{model, Error};

/// Log in
/// Checks a username and password, returning a session token for use in the `Authorization` header.
#[route(tag = tag::AUTH, response(status = 200, description = "Logged in successfully.", shape = "Json<model::Token>"))]
pub async fn login(
	State(state): State<AppState>,
	Json(input): Json<model::LoginInput>,
) -> Result<Json<model::Token>, crate::Error> {
	let Some(user) = state.database.find_user_by_username(&input.username).await? else {
		return Err(Error::InvalidUsernameOrPassword.into());
	};

	let valid =
		credential::verify_password(state.hasher.clone(), input.password, user.password_hash)
			.await?;

	if !valid {
		return Err(Error::InvalidUsernameOrPassword.into());
	}

	let token = state
		.keys
		.issue(user.id, &user.username)
		.map_err(Error::from)?;

	tracing::info!(username = %user.username, "user logged in");

	Ok(Json(model::Token {
		token,
		username: user.username,
		name: user.name,
	}))
}
