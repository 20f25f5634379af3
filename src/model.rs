use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single user.
///
/// The password hash is never serialized, so this can be returned to the client as-is.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct User {
	/// The unique identifier of the user.
	pub id: Uuid,
	/// The username used for logging in, unique across all users.
	pub username: String,
	/// The name that is displayed to the public.
	pub name: Option<String>,
	/// The argon2 hash of the user's password, in PHC format.
	#[serde(skip)]
	pub password_hash: String,
	/// The posts created by the user, oldest first.
	pub posts: Vec<Uuid>,
}

/// A user about to be inserted into the store.
#[derive(Debug)]
pub struct NewUser {
	pub username: String,
	pub name: Option<String>,
	pub password_hash: String,
}

/// The public profile of the user that created a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Owner {
	pub id: Uuid,
	pub username: String,
	pub name: Option<String>,
}

impl From<&User> for Owner {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			name: user.name.clone(),
		}
	}
}

/// A single blog post, created by a user.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct Post {
	/// The unique identifier of the post.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The title of the post.
	#[validate(length(min = 1, message = "title is required"))]
	pub title: String,
	/// The author of the post, which need not be the user that created it.
	pub author: String,
	/// Where the post can be read.
	#[validate(length(min = 1, message = "url is required"))]
	pub url: String,
	/// The number of likes the post has received.
	#[serde(default)]
	#[validate(range(min = 0, message = "likes must not be negative"))]
	pub likes: i64,
	/// The user that created the post.
	#[serde(skip_deserializing)]
	pub user: Owner,
}
