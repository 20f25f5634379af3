use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode};
use macros::route;

use crate::{
	credential,
	extract::Json,
	model::{self as domain, NewUser},
	openapi::tag,
	AppState, Database,
};

use super::model;

/// List users
/// Returns every user in registration order, each with the blog posts they created.
#[route(tag = tag::USER, response(status = 200, description = "All users.", shape = "Json<Vec<model::UserWithPosts>>"))]
pub async fn list_users(
	State(database): State<Database>,
) -> Result<Json<Vec<model::UserWithPosts>>, crate::Error> {
	let users = database.list_users().await?;
	let posts = database.list_posts().await?;

	Ok(Json(
		users
			.into_iter()
			.map(|user| model::UserWithPosts::populate(user, &posts))
			.collect(),
	))
}

/// Register account
/// Registers a new user. The username must be unique, and both the username and password must be at least 3 characters long.
#[route(tag = tag::USER, response(status = 201, description = "Registered successfully.", shape = "Json<domain::User>"))]
pub async fn register(
	State(state): State<AppState>,
	Json(input): Json<model::RegisterInput>,
) -> Result<impl IntoApiResponse, crate::Error> {
	let password_hash = credential::hash_password(state.hasher.clone(), input.password).await?;

	let user = state
		.database
		.insert_user(NewUser {
			username: input.username,
			name: input.name,
			password_hash,
		})
		.await?;

	tracing::info!(user = %user.id, username = %user.username, "user registered");

	Ok((StatusCode::CREATED, Json(user)))
}
