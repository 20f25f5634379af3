use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::AppState;

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("username must be unique")]
	UsernameTaken,
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UsernameTaken => StatusCode::BAD_REQUEST,
		}
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route(
		"/",
		get_with(list_users, list_users_docs).post_with(register, register_docs),
	)
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_register() {
		let app = app();

		let response = app
			.post("/api/users")
			.json(&json!({
				"username": "mluukkai",
				"name": "Matti Luukkainen",
				"password": "salainen",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);

		let body = response.json::<Value>();

		assert_eq!(body["username"], "mluukkai");
		assert_eq!(body["name"], "Matti Luukkainen");
		assert_eq!(body["posts"], json!([]));
		assert!(body["id"].is_string());
		assert!(body.get("password").is_none());
		assert!(body.get("password_hash").is_none());
	}

	#[tokio::test]
	async fn test_register_without_name() {
		let app = app();

		let response = app
			.post("/api/users")
			.json(&json!({
				"username": "root",
				"password": "sekret",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);
		assert_eq!(response.json::<Value>()["name"], Value::Null);
	}

	#[tokio::test]
	async fn test_register_duplicate_username() {
		let app = app();

		register(&app, "root", "sekret").await;

		let response = app
			.post("/api/users")
			.json(&json!({
				"username": "root",
				"name": "Superuser",
				"password": "salainen",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(response.json::<Value>()["error"], "username must be unique");

		let users = app.get("/api/users").await.json::<Value>();

		assert_eq!(users.as_array().map(Vec::len), Some(1));
	}

	#[tokio::test]
	async fn test_register_short_username() {
		let app = app();

		let response = app
			.post("/api/users")
			.json(&json!({
				"username": "ro",
				"password": "sekret",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(
			response.json::<Value>()["error"],
			"username must be at least 3 characters long"
		);
	}

	#[tokio::test]
	async fn test_register_short_password() {
		let app = app();

		let response = app
			.post("/api/users")
			.json(&json!({
				"username": "root",
				"password": "se",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(
			response.json::<Value>()["error"],
			"password must be at least 3 characters long"
		);

		let users = app.get("/api/users").await.json::<Value>();

		assert_eq!(users, json!([]));
	}

	#[tokio::test]
	async fn test_register_missing_password() {
		let app = app();

		let response = app
			.post("/api/users")
			.json(&json!({ "username": "root" }))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_list_users() {
		let app = app();

		register(&app, "root", "sekret").await;
		register(&app, "mluukkai", "salainen").await;

		let users = app.get("/api/users").await.json::<Value>();

		assert_eq!(users[0]["username"], "root");
		assert_eq!(users[1]["username"], "mluukkai");
		assert_eq!(users[1]["posts"], json!([]));
	}
}
