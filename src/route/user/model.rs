use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::{Post, User};

#[derive(Deserialize, Validate, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterInput {
	/// The username used for logging in. Must be unique.
	#[validate(length(min = 3, message = "username must be at least 3 characters long"))]
	pub username: String,
	/// The name to display to the public.
	pub name: Option<String>,
	#[validate(length(min = 3, message = "password must be at least 3 characters long"))]
	pub password: String,
}

/// A user, with their posts in place of the bare ids.
#[derive(Debug, Serialize, JsonSchema)]
pub struct UserWithPosts {
	pub id: Uuid,
	pub username: String,
	pub name: Option<String>,
	pub posts: Vec<PostSummary>,
}

/// A post as listed under its creator.
#[derive(Debug, Serialize, JsonSchema)]
pub struct PostSummary {
	pub id: Uuid,
	pub title: String,
	pub author: String,
	pub url: String,
	pub likes: i64,
}

impl From<&Post> for PostSummary {
	fn from(post: &Post) -> Self {
		Self {
			id: post.id,
			title: post.title.clone(),
			author: post.author.clone(),
			url: post.url.clone(),
			likes: post.likes,
		}
	}
}

impl UserWithPosts {
	/// Replaces each post id of the user with the matching post, keeping the
	/// user's order. Ids with no matching post are dropped.
	pub fn populate(user: User, posts: &[Post]) -> Self {
		let posts = user
			.posts
			.iter()
			.filter_map(|id| posts.iter().find(|post| post.id == *id))
			.map(PostSummary::from)
			.collect();

		Self {
			id: user.id,
			username: user.username,
			name: user.name,
			posts,
		}
	}
}
