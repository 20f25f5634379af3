use std::sync::Arc;

use aide::{
	axum::{
		routing::{get, get_with},
		ApiRouter, IntoApiResponse,
	},
	openapi::OpenApi,
	scalar::Scalar,
};
use axum::{response::IntoResponse, Extension};

use crate::{extract::Json, AppState};

pub fn routes() -> ApiRouter<AppState> {
	ApiRouter::new()
		.api_route(
			"/",
			get_with(
				Scalar::new("/docs/api.json")
					.with_title("Bloglist")
					.axum_handler(),
				|op| op.description("This documentation page."),
			),
		)
		.route("/api.json", get(serve_docs))
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
	Json(api).into_response()
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_openapi_document() {
		let app = app();

		let response = app.get("/docs/api.json").await;

		assert_eq!(response.status_code(), StatusCode::OK);

		let document = response.json::<Value>();

		assert_eq!(document["info"]["title"], "Bloglist");

		let paths = document["paths"].as_object().unwrap();

		assert!(paths.keys().any(|path| path.starts_with("/api/blogs")));
		assert!(paths.keys().any(|path| path.starts_with("/api/login")));
		assert!(document["components"]["securitySchemes"]["Bearer"].is_object());
	}

	#[tokio::test]
	async fn test_unknown_endpoint() {
		let app = app();

		let response = app.get("/api/nothing-here").await;

		assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
		assert_eq!(response.json::<Value>()["error"], "unknown endpoint");
	}

	#[tokio::test]
	async fn test_method_not_allowed() {
		let app = app();

		let response = app.patch("/api/blogs").await;

		assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(response.json::<Value>()["error"], "method not allowed");
	}
}
