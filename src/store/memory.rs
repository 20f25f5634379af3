use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Error, Result, Store};
use crate::model::{CreatePostInput, NewUser, Owner, Post, UpdatePostInput, User};

/// A post as it is stored, referencing its owner by id.
#[derive(Debug, Clone)]
struct PostRecord {
	id: Uuid,
	user_id: Uuid,
	title: String,
	author: String,
	url: String,
	likes: i64,
}

#[derive(Debug, Default)]
struct Inner {
	users: Vec<User>,
	posts: Vec<PostRecord>,
}

impl Inner {
	fn user(&self, id: Uuid) -> Option<&User> {
		self.users.iter().find(|user| user.id == id)
	}

	fn user_mut(&mut self, id: Uuid) -> Result<&mut User> {
		self.users
			.iter_mut()
			.find(|user| user.id == id)
			.ok_or(Error::UnknownUser(id))
	}

	fn populate(&self, record: &PostRecord) -> Post {
		Post {
			id: record.id,
			title: record.title.clone(),
			author: record.author.clone(),
			url: record.url.clone(),
			likes: record.likes,
			user: self.user(record.user_id).map(Owner::from).unwrap_or_default(),
		}
	}
}

/// A store that keeps everything in process memory.
///
/// Used when no database is configured, and by the test-suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

#[axum::async_trait]
impl Store for MemoryStore {
	async fn insert_user(&self, user: NewUser) -> Result<User> {
		let mut inner = self.inner.write().await;

		if inner.users.iter().any(|u| u.username == user.username) {
			return Err(Error::UsernameTaken);
		}

		let user = User {
			id: Uuid::new_v4(),
			username: user.username,
			name: user.name,
			password_hash: user.password_hash,
			posts: Vec::new(),
		};

		inner.users.push(user.clone());

		Ok(user)
	}

	async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
		Ok(self.inner.read().await.user(id).cloned())
	}

	async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
		let inner = self.inner.read().await;

		Ok(inner
			.users
			.iter()
			.find(|user| user.username == username)
			.cloned())
	}

	async fn list_users(&self) -> Result<Vec<User>> {
		Ok(self.inner.read().await.users.clone())
	}

	async fn insert_post(&self, owner: Uuid, post: CreatePostInput) -> Result<Post> {
		let mut inner = self.inner.write().await;

		if inner.user(owner).is_none() {
			return Err(Error::UnknownUser(owner));
		}

		let record = PostRecord {
			id: Uuid::new_v4(),
			user_id: owner,
			title: post.title,
			author: post.author,
			url: post.url,
			likes: post.likes,
		};

		let post = inner.populate(&record);
		inner.posts.push(record);

		Ok(post)
	}

	async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
		self.inner.write().await.user_mut(user_id)?.posts.push(post_id);

		Ok(())
	}

	async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
		self.inner
			.write()
			.await
			.user_mut(user_id)?
			.posts
			.retain(|id| *id != post_id);

		Ok(())
	}

	async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
		let inner = self.inner.read().await;

		Ok(inner
			.posts
			.iter()
			.find(|post| post.id == id)
			.map(|record| inner.populate(record)))
	}

	async fn list_posts(&self) -> Result<Vec<Post>> {
		let inner = self.inner.read().await;

		Ok(inner
			.posts
			.iter()
			.map(|record| inner.populate(record))
			.collect())
	}

	async fn update_post(&self, id: Uuid, post: UpdatePostInput) -> Result<Option<Post>> {
		let mut inner = self.inner.write().await;

		let Some(record) = inner.posts.iter_mut().find(|record| record.id == id) else {
			return Ok(None);
		};

		if let Some(title) = post.title {
			record.title = title;
		}
		if let Some(author) = post.author {
			record.author = author;
		}
		if let Some(url) = post.url {
			record.url = url;
		}
		if let Some(likes) = post.likes {
			record.likes = likes;
		}

		let record = record.clone();

		Ok(Some(inner.populate(&record)))
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool> {
		let mut inner = self.inner.write().await;
		let before = inner.posts.len();

		inner.posts.retain(|post| post.id != id);

		Ok(inner.posts.len() != before)
	}
}
