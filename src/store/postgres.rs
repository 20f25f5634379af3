use sqlx::postgres::PgPool;
use uuid::Uuid;

use super::{Error, Result, Store};
use crate::model::{CreatePostInput, NewUser, Owner, Post, UpdatePostInput, User};

/// Selects a post joined with its owner. Expects the post table to be aliased as `p`.
const POST_COLUMNS: &str = r#"
	p.id, p.title, p.author, p.url, p.likes,
	u.id AS user_id, u.username, u.name
"#;

const USER_COLUMNS: &str = "id, username, name, password_hash, post_ids";

#[derive(sqlx::FromRow)]
struct UserRow {
	id: Uuid,
	username: String,
	name: Option<String>,
	password_hash: String,
	post_ids: Vec<Uuid>,
}

impl From<UserRow> for User {
	fn from(row: UserRow) -> Self {
		Self {
			id: row.id,
			username: row.username,
			name: row.name,
			password_hash: row.password_hash,
			posts: row.post_ids,
		}
	}
}

#[derive(sqlx::FromRow)]
struct PostRow {
	id: Uuid,
	title: String,
	author: String,
	url: String,
	likes: i64,
	user_id: Uuid,
	username: String,
	name: Option<String>,
}

impl From<PostRow> for Post {
	fn from(row: PostRow) -> Self {
		Self {
			id: row.id,
			title: row.title,
			author: row.author,
			url: row.url,
			likes: row.likes,
			user: Owner {
				id: row.user_id,
				username: row.username,
				name: row.name,
			},
		}
	}
}

/// A store backed by PostgreSQL.
pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	/// Connects to the database and runs any pending migrations.
	pub async fn connect(url: &str) -> Result<Self> {
		let pool = PgPool::connect(url).await?;

		sqlx::migrate!().run(&pool).await?;
		tracing::info!("database migrations are up to date");

		Ok(Self::new(pool))
	}

	/// Wraps a pool whose schema is already migrated.
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[axum::async_trait]
impl Store for PgStore {
	async fn insert_user(&self, user: NewUser) -> Result<User> {
		let user = sqlx::query_as::<_, UserRow>(&format!(
			r#"
				INSERT INTO "user" (username, name, password_hash) VALUES ($1, $2, $3)
				RETURNING {USER_COLUMNS}
			"#
		))
		.bind(&user.username)
		.bind(&user.name)
		.bind(&user.password_hash)
		.fetch_one(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref d) if d.constraint() == Some("user_username_key") => {
				Error::UsernameTaken
			}
			e => Error::Database(e),
		})?;

		Ok(user.into())
	}

	async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
		let user = sqlx::query_as::<_, UserRow>(&format!(
			r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(user.map(User::from))
	}

	async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
		let user = sqlx::query_as::<_, UserRow>(&format!(
			r#"SELECT {USER_COLUMNS} FROM "user" WHERE username = $1"#
		))
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		Ok(user.map(User::from))
	}

	async fn list_users(&self) -> Result<Vec<User>> {
		let users = sqlx::query_as::<_, UserRow>(&format!(
			r#"SELECT {USER_COLUMNS} FROM "user" ORDER BY created_at"#
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(users.into_iter().map(User::from).collect())
	}

	async fn insert_post(&self, owner: Uuid, post: CreatePostInput) -> Result<Post> {
		let post = sqlx::query_as::<_, PostRow>(&format!(
			r#"
				WITH p AS (
					INSERT INTO post (user_id, title, author, url, likes)
					VALUES ($1, $2, $3, $4, $5)
					RETURNING *
				)
				SELECT {POST_COLUMNS} FROM p JOIN "user" u ON u.id = p.user_id
			"#
		))
		.bind(owner)
		.bind(&post.title)
		.bind(&post.author)
		.bind(&post.url)
		.bind(post.likes)
		.fetch_one(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref d) if d.is_foreign_key_violation() => {
				Error::UnknownUser(owner)
			}
			e => Error::Database(e),
		})?;

		Ok(post.into())
	}

	async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
		let status = sqlx::query(
			r#"UPDATE "user" SET post_ids = array_append(post_ids, $1) WHERE id = $2"#,
		)
		.bind(post_id)
		.bind(user_id)
		.execute(&self.pool)
		.await?;

		if status.rows_affected() == 0 {
			return Err(Error::UnknownUser(user_id));
		}

		Ok(())
	}

	async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
		let status = sqlx::query(
			r#"UPDATE "user" SET post_ids = array_remove(post_ids, $1) WHERE id = $2"#,
		)
		.bind(post_id)
		.bind(user_id)
		.execute(&self.pool)
		.await?;

		if status.rows_affected() == 0 {
			return Err(Error::UnknownUser(user_id));
		}

		Ok(())
	}

	async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
		let post = sqlx::query_as::<_, PostRow>(&format!(
			r#"
				SELECT {POST_COLUMNS} FROM post p
				JOIN "user" u ON u.id = p.user_id
				WHERE p.id = $1
			"#
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post.map(Post::from))
	}

	async fn list_posts(&self) -> Result<Vec<Post>> {
		let posts = sqlx::query_as::<_, PostRow>(&format!(
			r#"
				SELECT {POST_COLUMNS} FROM post p
				JOIN "user" u ON u.id = p.user_id
				ORDER BY p.created_at
			"#
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(posts.into_iter().map(Post::from).collect())
	}

	async fn update_post(&self, id: Uuid, post: UpdatePostInput) -> Result<Option<Post>> {
		let post = sqlx::query_as::<_, PostRow>(&format!(
			r#"
				WITH p AS (
					UPDATE post
					SET
						title = COALESCE($1, title),
						author = COALESCE($2, author),
						url = COALESCE($3, url),
						likes = COALESCE($4, likes)
					WHERE id = $5
					RETURNING *
				)
				SELECT {POST_COLUMNS} FROM p JOIN "user" u ON u.id = p.user_id
			"#
		))
		.bind(&post.title)
		.bind(&post.author)
		.bind(&post.url)
		.bind(post.likes)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post.map(Post::from))
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool> {
		let status = sqlx::query("DELETE FROM post WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(status.rows_affected() > 0)
	}
}
