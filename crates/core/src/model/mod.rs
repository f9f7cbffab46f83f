//! Field and model definitions.
//!
//! A [`Model`] is built once when the schema is assembled and is shared by every
//! query which is resolved against it.

mod definition;
mod field;
mod kind;

use indexmap::IndexMap;

pub use definition::{FieldDefinition, ModelDefinition, SchemaDefinition};
pub use field::{CustomFilter, FieldSpec};
pub use kind::{FieldType, FilterKind};

/// A queryable model, with its fields in declaration order.
#[derive(Clone, Debug)]
pub struct Model {
	name: String,
	query: String,
	fields: IndexMap<String, FieldSpec>,
	parameters: IndexMap<String, String>,
}

impl Model {
	/// Create a model named `name`, queried through the `query` field
	pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			query: query.into(),
			fields: IndexMap::new(),
			parameters: IndexMap::new(),
		}
	}

	pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
		self.fields.insert(name.into(), spec);
		self
	}

	/// Add an extra argument to the query field
	pub fn parameter(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
		self.parameters.insert(name.into(), ty.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn fields(&self) -> &IndexMap<String, FieldSpec> {
		&self.fields
	}

	pub fn parameters(&self) -> &IndexMap<String, String> {
		&self.parameters
	}

	/// The name of the generated where input
	pub fn where_input_name(&self) -> String {
		format!("{}Where", self.query)
	}

	/// The name of the generated orderBy input
	pub fn order_by_input_name(&self) -> String {
		format!("{}OrderBy", self.query)
	}
}
