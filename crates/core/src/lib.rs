//! # gqlmongo core
//!
//! This crate turns model field definitions into GraphQL SDL, and turns the
//! `where` and `orderBy` arguments of the generated queries into MongoDB
//! filter and sort documents.
//!
//! ```
//! use gqlmongo_core::model::{FieldSpec, Model};
//! use gqlmongo_core::resolver::{SortDocument, resolve};
//! use serde_json::json;
//!
//! let model = Model::new("Book", "books").field("title", FieldSpec::string());
//! let args = json!({ "where": { "title": { "_eq": "Dune" } }, "orderBy": [{ "title": "asc" }] });
//! let (filter, sort) = resolve(&args, &model, &SortDocument::new()).unwrap();
//! assert_eq!(filter.to_string(), r#"{"$and":[{"title":{"$eq":"Dune"}}]}"#);
//! assert_eq!(sort["title"], 1);
//! ```

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cnf;
pub mod err;
pub mod filter;
pub mod model;
pub mod resolver;
pub mod schema;
pub mod sdl;

pub use err::Error;
pub use filter::{Fragment, WhereExpression, translate_where};
pub use model::{FieldSpec, FieldType, FilterKind, Model};
pub use resolver::Resolver;
pub use schema::Schema;
