//! A set of models making up one GraphQL schema.

use indexmap::IndexMap;

use crate::err::Error;
use crate::model::{Model, SchemaDefinition};
use crate::resolver::Resolver;
use crate::sdl;

#[derive(Clone, Debug, Default)]
pub struct Schema {
	models: IndexMap<String, Model>,
	typedefs: Option<String>,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a model, which must have a name of its own
	pub fn add(&mut self, model: Model) -> Result<(), Error> {
		if self.models.contains_key(model.name()) {
			return Err(Error::DuplicateModel(model.name().to_owned()));
		}
		self.models.insert(model.name().to_owned(), model);
		Ok(())
	}

	/// Set extra SDL emitted after the generated types
	pub fn typedefs(mut self, typedefs: impl Into<String>) -> Self {
		self.typedefs = Some(typedefs.into());
		self
	}

	pub fn from_definition(def: &SchemaDefinition) -> Result<Self, Error> {
		let mut schema = Self::new();
		for model in def.models.iter() {
			schema.add(model.to_model()?)?;
		}
		schema.typedefs = def.typedefs.clone();
		Ok(schema)
	}

	/// Load a schema from the JSON form of a [`SchemaDefinition`]
	pub fn from_json(json: &str) -> Result<Self, Error> {
		let def: SchemaDefinition = serde_json::from_str(json)?;
		Self::from_definition(&def)
	}

	pub fn model(&self, name: &str) -> Result<&Model, Error> {
		self.models.get(name).ok_or_else(|| Error::UnknownModel(name.to_owned()))
	}

	pub fn models(&self) -> impl Iterator<Item = &Model> {
		self.models.values()
	}

	/// Build the resolver of a model
	pub fn resolver(&self, name: &str) -> Result<Resolver, Error> {
		self.model(name).map(Resolver::new)
	}

	/// Render the whole schema, starting with the global typedefs.
	///
	/// Enum types and enum filter inputs shared by several models are only
	/// emitted once.
	pub fn sdl(&self) -> String {
		let mut enums = IndexMap::new();
		let mut enum_filters = IndexMap::new();
		for model in self.models.values() {
			for spec in model.fields().values() {
				if let Some((name, values)) = spec.ty().enums() {
					enums.entry(name.to_owned()).or_insert_with(|| sdl::enum_type(name, values));
				}
			}
			for (name, ty) in sdl::enum_filters(model) {
				enum_filters.entry(name).or_insert_with_key(|name| sdl::enum_filter_type(name, &ty));
			}
		}
		let mut parts: Vec<String> = enums.into_values().chain(enum_filters.into_values()).collect();
		for model in self.models.values() {
			parts.push(sdl::model_sdl(model));
			parts.push(sdl::where_sdl(model));
			parts.push(sdl::order_by_sdl(model));
			parts.push(sdl::query_sdl(model));
		}
		if let Some(typedefs) = &self.typedefs {
			parts.push(typedefs.trim().to_owned());
		}
		sdl::create_typedefs(&parts.join("\n\n"))
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn schema() -> Schema {
		Schema::from_json(
			&json!({
				"typedefs": "type Stats {\n  count: Int\n}",
				"models": [
					{
						"name": "Book",
						"query": "books",
						"fields": {
							"title": { "type": "String", "required": true },
							"status": { "type": "Status", "enumValues": ["draft", "published"] }
						}
					},
					{
						"name": "Article",
						"query": "articles",
						"fields": {
							"status": { "type": "Status", "enumValues": ["draft", "published"] }
						},
						"queryParameters": { "limit": "Int" }
					}
				]
			})
			.to_string(),
		)
		.unwrap()
	}

	#[test]
	fn shared_enums_are_emitted_once() {
		let out = schema().sdl();
		assert_eq!(out.matches("enum Status {").count(), 1);
		assert_eq!(out.matches("input StatusEnumFilter {").count(), 1);
		assert!(out.contains("status: StatusEnumFilter"));
		assert!(out.contains("extend type Query {\n  articles(\n    limit: Int\n"));
		assert!(out.trim_end().ends_with("type Stats {\n  count: Int\n}"));
	}

	#[test]
	fn models_are_looked_up_by_name() {
		let schema = schema();
		assert_eq!(schema.model("Book").unwrap().query(), "books");
		assert!(matches!(schema.model("Author"), Err(Error::UnknownModel(_))));
		assert!(schema.resolver("Article").is_ok());
		assert_eq!(schema.models().count(), 2);
	}

	#[test]
	fn duplicate_models_are_rejected() {
		let mut schema = Schema::new();
		schema.add(Model::new("Book", "books")).unwrap();
		let err = schema.add(Model::new("Book", "moreBooks")).unwrap_err();
		assert!(matches!(err, Error::DuplicateModel(ref m) if m == "Book"));
	}

	#[test]
	fn invalid_json_is_reported() {
		assert!(matches!(Schema::from_json("{"), Err(Error::Json(_))));
		let err = Schema::from_json(r#"{ "models": [{ "name": "A", "query": "as", "fields": { "x": {} } }] }"#);
		assert!(matches!(err, Err(Error::InvalidFieldSpec { .. })));
	}
}
