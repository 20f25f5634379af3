#![warn(clippy::pedantic)]

mod config;
mod credential;
mod error;
mod extract;
mod model;
mod openapi;
mod route;
mod stats;
mod store;

use std::sync::Arc;

use aide::openapi::OpenApi;
use argon2::Argon2;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use error::Error;

/// A handle to whichever [`store::Store`] backs this process.
pub type Database = Arc<dyn store::Store>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the store, the password hasher and the token signing keys.
/// Everything in here is read-only after startup.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
	pub keys: Arc<credential::Keys>,
}

impl State {
	pub fn new(database: Database, config: &config::Config) -> Self {
		Self {
			database,
			hasher: Argon2::default(),
			keys: Arc::new(credential::Keys::new(
				config.secret.as_bytes(),
				config.token_ttl,
			)),
		}
	}
}

/// Builds the full application router, including the generated documentation.
pub fn app(state: State) -> Router {
	let mut api = OpenApi::default();

	route::routes()
		.finish_api_with(&mut api, openapi::docs)
		.method_not_allowed_fallback(route::method_not_allowed)
		.fallback(route::unknown_endpoint)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "bloglist=info,tower_http=info".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let config = config::Config::from_env().expect("invalid configuration");

	let database: Database = match config.database_url {
		Some(ref url) => Arc::new(
			store::postgres::PgStore::connect(url)
				.await
				.expect("failed to connect to database"),
		),
		None => {
			tracing::warn!("DATABASE_URL is not set, using the in-memory store");
			Arc::new(store::memory::MemoryStore::default())
		}
	};

	let app = app(State::new(database, &config));

	let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", config.port);

	axum::serve(listener, app).await.expect("server error");
}
