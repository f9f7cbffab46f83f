use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::err::{Error, invalid_field};
use crate::model::{FieldSpec, FieldType, FilterKind, Model};

/// The serialized form of a field, as found in model files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
	#[serde(rename = "type")]
	pub ty: Option<String>,
	pub required: Option<bool>,
	pub schema_doc: Option<String>,
	pub filter_type: Option<String>,
	pub create_filter: Option<bool>,
	pub create_order_by: Option<bool>,
	pub enum_values: Option<Vec<String>>,
}

/// The serialized form of a model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
	pub name: String,
	pub query: String,
	pub fields: IndexMap<String, FieldDefinition>,
	#[serde(default)]
	pub query_parameters: IndexMap<String, String>,
}

/// The serialized form of a whole schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
	/// Extra SDL appended after the generated types
	#[serde(default)]
	pub typedefs: Option<String>,
	pub models: Vec<ModelDefinition>,
}

impl FieldDefinition {
	/// Validate the definition and turn it into a field spec
	pub fn to_spec(&self, field: &str) -> Result<FieldSpec, Error> {
		let ty = match self.ty.as_deref().map(str::trim) {
			Some(ty) if !ty.is_empty() => parse_type(field, ty, self.enum_values.as_deref())?,
			_ => return Err(invalid_field(field, format!("{field} has no type specified."))),
		};
		// Fields read from a definition are nullable unless stated otherwise
		let mut spec = FieldSpec::new(ty).required(self.required.unwrap_or(false));
		if let Some(doc) = &self.schema_doc {
			spec = spec.doc(doc);
		}
		if let Some(kind) = &self.filter_type {
			spec = spec.filter_kind(FilterKind::from(kind.as_str()));
		}
		if let Some(create) = self.create_filter {
			spec = spec.create_filter(create);
		}
		if let Some(create) = self.create_order_by {
			spec = spec.create_order_by(create);
		}
		Ok(spec)
	}
}

impl ModelDefinition {
	pub fn to_model(&self) -> Result<Model, Error> {
		let mut model = Model::new(&self.name, &self.query);
		for (name, def) in self.fields.iter() {
			model = model.field(name, def.to_spec(name)?);
		}
		for (name, ty) in self.query_parameters.iter() {
			model = model.parameter(name, ty);
		}
		Ok(model)
	}
}

fn parse_type(field: &str, ty: &str, enum_values: Option<&[String]>) -> Result<FieldType, Error> {
	if let Some(inner) = ty.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
		let inner = inner.trim().trim_end_matches('!');
		if inner.is_empty() {
			return Err(invalid_field(field, format!("{field} has an empty list type")));
		}
		return Ok(FieldType::List(Box::new(parse_type(field, inner, enum_values)?)));
	}
	if ty.ends_with('!') {
		return Err(invalid_field(
			field,
			format!("{field} marks its type {ty} as non-null, use `required` instead"),
		));
	}
	Ok(match (ty, enum_values) {
		("Int" | "Float" | "String" | "Boolean", Some(_)) => {
			return Err(invalid_field(field, format!("enum values cannot be given for {ty}")));
		}
		("Int", _) => FieldType::Int,
		("Float", _) => FieldType::Float,
		("String", _) => FieldType::String,
		("Boolean", _) => FieldType::Boolean,
		(name, Some([])) => {
			return Err(invalid_field(field, format!("enum values must be provided for {name}")));
		}
		(name, Some(values)) => FieldType::Enum {
			name: name.to_owned(),
			values: values.to_vec(),
		},
		(name, None) => FieldType::Object(name.to_owned()),
	})
}
