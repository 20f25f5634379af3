use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
	pub username: String,
	pub password: String,
}

/// A session token and the profile of the user it was issued to.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Token {
	/// The token to send in the `Authorization: Bearer <token>` header.
	pub token: String,
	pub username: String,
	pub name: Option<String>,
}
