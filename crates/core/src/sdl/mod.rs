//! GraphQL SDL generation for models.

use crate::model::{FieldSpec, FilterKind, Model};

/// The types every generated schema depends on
pub const GLOBAL_TYPEDEFS: &str = "\
type Query {
  # implementation detail, ignore
  _empty: String
}

enum OrderBy {
  asc
  desc
}

# filters for graphql
input BooleanFilter {
  _eq: Boolean
  _ne: Boolean
}

# more restrictive IntFilter as some operations do not make sense for ids
input IDFilter {
  _eq: Int
  _ne: Int
  _in: [Int!]
  _nin: [Int!]
}

input IntFilter {
  _eq: Int
  _ne: Int
  _lt: Int
  _lte: Int
  _gt: Int
  _gte: Int
  _in: [Int!]
  _nin: [Int!]
}

input FloatFilter {
  _eq: Float
  _ne: Float
  _lt: Float
  _lte: Float
  _gt: Float
  _gte: Float
}

input StringFilter {
  _eq: String
  _ieq: String
  _ne: String
  _ine: String
  _contains: String
  _icontains: String
  _startswith: String
  _istartswith: String
  _endswith: String
  _iendswith: String
  _regex: String
  _iregex: String
  _in: [String!]
  _nin: [String!]
}
";

const INDENT: &str = "  ";

fn block(head: &str, lines: &[String]) -> String {
	let mut out = format!("{head} {{\n");
	for line in lines {
		out.push_str(INDENT);
		out.push_str(line);
		out.push('\n');
	}
	out.push('}');
	out
}

/// The field lines, preceded by the doc comment of the field if it has one
fn entry(lines: &mut Vec<String>, spec: &FieldSpec, line: String) {
	if let Some(doc) = spec.schema_doc() {
		lines.extend(doc.lines().map(|l| format!("# {l}")));
	}
	lines.push(line);
}

/// Render an enum definition
pub fn enum_type(name: &str, values: &[String]) -> String {
	block(&format!("enum {name}"), values)
}

/// Render the filter input of an enum, accepting the equality and membership operators
pub fn enum_filter_type(name: &str, ty: &str) -> String {
	let lines = [
		format!("_eq: {ty}"),
		format!("_ne: {ty}"),
		format!("_in: [{ty}!]"),
		format!("_nin: [{ty}!]"),
	];
	block(&format!("input {name}"), &lines)
}

/// The logical connectives of a where input named `name`
pub fn where_input(name: &str) -> Vec<String> {
	vec![format!("_and: [{name}]"), format!("_not: [{name}]"), format!("_or: [{name}]")]
}

/// The name of the filter input used by a field in the where input.
///
/// Returns `None` when the field type has no filter input of its own.
pub fn filter_input_name(spec: &FieldSpec) -> Option<String> {
	match spec.effective_filter_kind()? {
		FilterKind::Enum => Some(format!("{}EnumFilter", spec.ty().base_name())),
		kind => Some(kind.to_string()),
	}
}

/// The enum filter inputs needed by the where input of a model, as `(input, type)` pairs
pub fn enum_filters(model: &Model) -> Vec<(String, String)> {
	model
		.fields()
		.values()
		.filter(|spec| spec.is_filterable())
		.filter(|spec| spec.effective_filter_kind() == Some(FilterKind::Enum))
		.filter_map(|spec| {
			let name = filter_input_name(spec)?;
			Some((name, spec.ty().base_name().to_owned()))
		})
		.collect()
}

/// Render the object type of a model
pub fn model_sdl(model: &Model) -> String {
	let mut lines = Vec::new();
	for (name, spec) in model.fields() {
		let bang = if spec.is_required() { "!" } else { "" };
		entry(&mut lines, spec, format!("{name}: {}{bang}", spec.ty()));
	}
	block(&format!("type {}", model.name()), &lines)
}

/// Render the where input of a model
pub fn where_sdl(model: &Model) -> String {
	let name = model.where_input_name();
	let mut lines = where_input(&name);
	for (field, spec) in model.fields().iter().filter(|(_, s)| s.is_filterable()) {
		match filter_input_name(spec) {
			Some(input) => entry(&mut lines, spec, format!("{field}: {input}")),
			None => debug!("Field `{field}` of type `{}` has no filter input", spec.ty()),
		}
	}
	block(&format!("input {name}"), &lines)
}

/// Render the orderBy input of a model
pub fn order_by_sdl(model: &Model) -> String {
	let mut lines = Vec::new();
	for (field, spec) in model.fields().iter().filter(|(_, s)| s.is_sortable()) {
		entry(&mut lines, spec, format!("{field}: OrderBy"));
	}
	block(&format!("input {}", model.order_by_input_name()), &lines)
}

/// Render the query field of a model as an extension of the root query type
pub fn query_sdl(model: &Model) -> String {
	let mut out = format!("extend type Query {{\n{INDENT}{}(\n", model.query());
	let args = model
		.parameters()
		.iter()
		.map(|(name, ty)| format!("{name}: {ty}"))
		.chain([
			format!("orderBy: [{}!]", model.order_by_input_name()),
			format!("where: {}", model.where_input_name()),
		]);
	for arg in args {
		out.push_str(&format!("{INDENT}{INDENT}{arg}\n"));
	}
	out.push_str(&format!("{INDENT}): [{}]!\n}}", model.name()));
	out
}

/// Render everything a model adds to the schema, apart from its enum types
pub fn create_model(model: &Model) -> String {
	let mut parts: Vec<String> = enum_filters(model)
		.iter()
		.map(|(name, ty)| enum_filter_type(name, ty))
		.collect();
	parts.push(model_sdl(model));
	parts.push(where_sdl(model));
	parts.push(order_by_sdl(model));
	parts.push(query_sdl(model));
	parts.join("\n\n")
}

/// Place the global typedefs before the given SDL
pub fn create_typedefs(sdl: &str) -> String {
	format!("{GLOBAL_TYPEDEFS}\n{sdl}\n")
}
