mod model;
mod route;

use proc_macro::TokenStream;

/// Documents a handler from its doc comment.
///
/// The first doc line becomes the operation summary and the rest its
/// description. `tag = ...` and `response(status = ..., shape = "...",
/// description = "...")` may each be repeated. The generated function is
/// named `<handler>_docs` and is meant for aide's `*_with` routing helpers.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Derives `Create<Model>Input` and `Update<Model>Input` alongside a model.
///
/// Server-assigned fields, marked `#[serde(skip)]` or
/// `#[serde(skip_deserializing)]`, are left out of both. The create input
/// keeps every other field as declared. The update input wraps each one in
/// `Option`, so that a missing field means "unchanged".
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
