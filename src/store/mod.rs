//! Persistence for users and posts.
//!
//! Handlers only ever see the [`Store`] trait. PostgreSQL is used when a
//! database is configured, and [`memory::MemoryStore`] otherwise.

pub mod memory;
pub mod postgres;

use uuid::Uuid;

use crate::model::{CreatePostInput, NewUser, Post, UpdatePostInput, User};

/// An error raised by a store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("username already taken")]
	UsernameTaken,
	#[error("unknown user {0}")]
	UnknownUser(Uuid),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every operation is a single write or read. Nothing here spans more than
/// one statement, so callers that need two writes make two calls.
#[axum::async_trait]
pub trait Store: Send + Sync {
	/// Inserts a user, failing with [`Error::UsernameTaken`] if the
	/// username is already in use.
	async fn insert_user(&self, user: NewUser) -> Result<User>;

	async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

	async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

	/// Lists all users in registration order.
	async fn list_users(&self) -> Result<Vec<User>>;

	/// Inserts a post owned by `owner`. The owner's post list is left alone.
	async fn insert_post(&self, owner: Uuid, post: CreatePostInput) -> Result<Post>;

	/// Appends a post to the end of the user's post list.
	async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()>;

	/// Removes a post from the user's post list, if present.
	async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()>;

	async fn find_post(&self, id: Uuid) -> Result<Option<Post>>;

	/// Lists all posts in creation order, with their owners populated.
	async fn list_posts(&self) -> Result<Vec<Post>>;

	/// Applies the fields that are set, returning `None` if the post does not exist.
	async fn update_post(&self, id: Uuid, post: UpdatePostInput) -> Result<Option<Post>>;

	/// Deletes a post, returning whether it existed.
	async fn delete_post(&self, id: Uuid) -> Result<bool>;
}
