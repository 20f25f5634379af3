use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Session},
	model,
	openapi::tag,
	stats, Database,
};

use super::Error;

/// List blogs
/// Returns every blog post in creation order, each with the public profile of its creator.
#[route(tag = tag::BLOG, response(status = 200, description = "All blog posts.", shape = "Json<Vec<model::Post>>"))]
pub async fn list_blogs(
	State(database): State<Database>,
) -> Result<Json<Vec<model::Post>>, crate::Error> {
	let posts = database.list_posts().await?;

	Ok(Json(posts))
}

/// Create a blog
/// Creates a blog post owned by the logged in user. `likes` defaults to zero.
#[route(tag = tag::BLOG, response(status = 201, description = "The created blog post.", shape = "Json<model::Post>"))]
pub async fn create_blog(
	State(database): State<Database>,
	session: Session,
	Json(post): Json<model::CreatePostInput>,
) -> Result<impl IntoApiResponse, crate::Error> {
	let post = database.insert_post(session.user.id, post).await?;

	database.append_post(session.user.id, post.id).await?;

	tracing::info!(post = %post.id, user = %session.user.id, "blog created");

	Ok((StatusCode::CREATED, Json(post)))
}

/// Blog statistics
/// Returns the total likes, the favourite post and the most prolific and most liked authors.
#[route(tag = tag::BLOG, response(status = 200, description = "Aggregates over all blog posts.", shape = "Json<stats::Summary>"))]
pub async fn stats(State(database): State<Database>) -> Result<Json<stats::Summary>, crate::Error> {
	let posts = database.list_posts().await?;

	Ok(Json(stats::Summary::of(&posts)))
}

/// Update a blog
/// Updates the given fields of a blog post. Fields that are left out are not changed.
#[route(tag = tag::BLOG, response(status = 200, description = "The updated blog post.", shape = "Json<model::Post>"))]
pub async fn update_blog(
	State(database): State<Database>,
	Path(id): Path<Uuid>,
	Json(post): Json<model::UpdatePostInput>,
) -> Result<Json<model::Post>, crate::Error> {
	let post = database
		.update_post(id, post)
		.await?
		.ok_or(Error::UnknownBlog(id))?;

	Ok(Json(post))
}

/// Delete a blog
/// Deletes a blog post. Only its creator may delete it, and deleting a post that does not exist succeeds.
#[route(tag = tag::BLOG, response(status = 204, description = "The blog post no longer exists."))]
pub async fn delete_blog(
	State(database): State<Database>,
	session: Session,
	Path(id): Path<Uuid>,
) -> Result<impl IntoApiResponse, crate::Error> {
	let Some(post) = database.find_post(id).await? else {
		return Ok(StatusCode::NO_CONTENT.into_response());
	};

	if post.user.id != session.user.id {
		return Err(Error::NotOwner.into());
	}

	if database.delete_post(id).await? {
		database.remove_post(session.user.id, id).await?;
		tracing::info!(post = %id, user = %session.user.id, "blog deleted");
	}

	Ok(StatusCode::NO_CONTENT.into_response())
}
