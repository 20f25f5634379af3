use aide::axum::{
	routing::{get_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::AppState;

pub mod route;

/// An error that can occur while managing blog posts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("only the creator can delete a blog")]
	NotOwner,
	#[error("blog not found")]
	UnknownBlog(Uuid),
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::NotOwner => StatusCode::UNAUTHORIZED,
			Self::UnknownBlog(..) => StatusCode::NOT_FOUND,
		}
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(list_blogs, list_blogs_docs).post_with(create_blog, create_blog_docs),
		)
		.api_route("/stats", get_with(stats, stats_docs))
		.api_route(
			"/:id",
			put_with(update_blog, update_blog_docs).delete_with(delete_blog, delete_blog_docs),
		)
}
