use indexmap::IndexMap;
use serde_json::Map;

use crate::cnf;
use crate::err::Error;
use crate::filter::operator::{self, is_numeric_operator};
use crate::filter::{ComparisonMap, Fragment};
use crate::model::{CustomFilter, FieldSpec, FieldType, FilterKind, Model};

/// Builds the filter fragment of a single field.
pub trait FieldFilterBuilder {
	fn build(&self, field: &str, comparison: &ComparisonMap) -> Result<Fragment, Error>;
}

impl<F> FieldFilterBuilder for F
where
	F: Fn(&str, &ComparisonMap) -> Result<Fragment, Error>,
{
	fn build(&self, field: &str, comparison: &ComparisonMap) -> Result<Fragment, Error> {
		self(field, comparison)
	}
}

/// How strictly filters are translated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FilterOptions {
	/// Reject numeric operators outside of the numeric vocabulary
	pub strict_operators: bool,
	/// Fail instead of skipping fields whose filter kind cannot be translated
	pub strict_filter_kinds: bool,
}

impl Default for FilterOptions {
	fn default() -> Self {
		Self {
			strict_operators: *cnf::STRICT_OPERATORS,
			strict_filter_kinds: *cnf::STRICT_FILTER_KINDS,
		}
	}
}

/// The translator picked for a field.
#[derive(Clone)]
enum Handler {
	Numeric,
	String,
	Custom(CustomFilter),
	Unhandled {
		kind: String,
		ty: String,
	},
}

impl Handler {
	fn resolve(spec: &FieldSpec) -> Self {
		if let Some(f) = spec.get_custom_filter() {
			return Self::Custom(f.clone());
		}
		let unhandled = |kind: String| Self::Unhandled {
			kind,
			ty: spec.ty().to_string(),
		};
		let Some(kind) = spec.effective_filter_kind() else {
			return unhandled(format!("{}Filter", spec.ty()));
		};
		match kind {
			FilterKind::Int | FilterKind::Float | FilterKind::Boolean => Self::Numeric,
			FilterKind::String | FilterKind::Enum => Self::String,
			FilterKind::Id => match spec.ty() {
				FieldType::Int => Self::Numeric,
				FieldType::String => Self::String,
				_ => unhandled(FilterKind::Id.to_string()),
			},
			FilterKind::Named(name) => unhandled(name),
		}
	}
}

fn build(
	field: &str,
	comparison: &ComparisonMap,
	handler: &Handler,
	options: FilterOptions,
) -> Result<Fragment, Error> {
	// An empty filter places no constraint on the field
	if comparison.is_empty() {
		return Ok(Fragment::new());
	}
	match handler {
		Handler::Custom(f) => f(field, comparison),
		Handler::Numeric => numeric_filter(field, comparison, options),
		Handler::String => string_filter(field, comparison),
		Handler::Unhandled {
			kind,
			ty,
		} => {
			let err = Error::UnhandledFilterKind {
				field: field.to_owned(),
				kind: kind.clone(),
				ty: ty.clone(),
			};
			if options.strict_filter_kinds {
				return Err(err);
			}
			warn!("{err}, the field is not filtered");
			Ok(Fragment::new())
		}
	}
}

fn numeric_filter(
	field: &str,
	comparison: &ComparisonMap,
	options: FilterOptions,
) -> Result<Fragment, Error> {
	let mut cond = Map::new();
	for (op, v) in comparison.iter() {
		if !is_numeric_operator(op) {
			if options.strict_operators {
				return Err(Error::UnsupportedNumericOperator {
					field: field.to_owned(),
					operator: op.clone(),
				});
			}
			warn!("Passing unknown operator `{op}` on field `{field}` through to the filter");
		}
		cond.insert(operator::translate_numeric(op), v.clone());
	}
	Ok(Fragment::field(field, cond))
}

fn string_filter(field: &str, comparison: &ComparisonMap) -> Result<Fragment, Error> {
	let branches = comparison
		.iter()
		.map(|(op, v)| operator::translate(op, v).map(|cond| Fragment::field(field, cond)))
		.collect::<Result<Vec<_>, Error>>()?;
	Ok(Fragment::conjunction(branches))
}

/// Build the filter fragment of one field from its comparison map
pub fn build_field_filter(
	field: &str,
	comparison: &ComparisonMap,
	spec: &FieldSpec,
) -> Result<Fragment, Error> {
	build(field, comparison, &Handler::resolve(spec), FilterOptions::default())
}

/// The field filter builders of one model.
///
/// The translator of every filterable field is resolved once, when the
/// registry is created, and reused for every query.
#[derive(Clone)]
pub struct FieldFilters {
	fields: IndexMap<String, Handler>,
	options: FilterOptions,
}

impl FieldFilters {
	pub fn new(model: &Model) -> Self {
		Self::with_options(model, FilterOptions::default())
	}

	pub fn with_options(model: &Model, options: FilterOptions) -> Self {
		let fields = model
			.fields()
			.iter()
			.filter(|(_, spec)| spec.is_filterable())
			.map(|(name, spec)| (name.clone(), Handler::resolve(spec)))
			.collect();
		Self {
			fields,
			options,
		}
	}

	/// Whether the field can be used in a where argument
	pub fn contains(&self, field: &str) -> bool {
		self.fields.contains_key(field)
	}
}

impl FieldFilterBuilder for FieldFilters {
	fn build(&self, field: &str, comparison: &ComparisonMap) -> Result<Fragment, Error> {
		let handler = self.fields.get(field).ok_or_else(|| Error::UnknownField(field.to_owned()))?;
		build(field, comparison, handler, self.options)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::{Value, json};

	use super::*;

	fn comparison(v: Value) -> ComparisonMap {
		match v {
			Value::Object(o) => o,
			_ => unreachable!(),
		}
	}

	fn lenient() -> FilterOptions {
		FilterOptions {
			strict_operators: false,
			strict_filter_kinds: false,
		}
	}

	fn fragment(v: Value) -> Fragment {
		serde_json::from_value(v).unwrap()
	}

	#[test]
	fn numeric_single_condition() {
		let out = build_field_filter("a", &comparison(json!({ "_eq": 1 })), &FieldSpec::int());
		assert_eq!(out.unwrap(), fragment(json!({ "a": { "$eq": 1 } })));
	}

	#[test]
	fn numeric_multiple_conditions() {
		let cmp = comparison(json!({ "_eq": 1, "_lt": 2 }));
		let out = build_field_filter("a", &cmp, &FieldSpec::float());
		assert_eq!(out.unwrap(), fragment(json!({ "a": { "$eq": 1, "$lt": 2 } })));
	}

	#[test]
	fn numeric_filters_are_idempotent() {
		let cmp = comparison(json!({ "_eq": 1 }));
		let spec = FieldSpec::int();
		assert_eq!(
			build_field_filter("a", &cmp, &spec).unwrap(),
			build_field_filter("a", &cmp, &spec).unwrap()
		);
	}

	#[test]
	fn string_single_condition() {
		let out = build_field_filter("a", &comparison(json!({ "_eq": "1" })), &FieldSpec::string());
		assert_eq!(out.unwrap(), fragment(json!({ "$and": [{ "a": { "$eq": "1" } }] })));
	}

	#[test]
	fn string_conditions_are_anded() {
		let cmp = comparison(json!({ "_eq": "1", "_iregex": "2" }));
		let out = build_field_filter("a", &cmp, &FieldSpec::string()).unwrap();
		assert_eq!(
			out,
			fragment(json!({ "$and": [
				{ "a": { "$eq": "1" } },
				{ "a": { "$regex": "2", "$options": "i" } },
			] }))
		);
	}

	#[test]
	fn empty_comparison_is_a_no_op() {
		for spec in [FieldSpec::int(), FieldSpec::string(), FieldSpec::boolean()] {
			assert!(build_field_filter("a", &Map::new(), &spec).unwrap().is_empty());
		}
	}

	#[test]
	fn unknown_operators_differ_by_field_kind() {
		let cmp = comparison(json!({ "_badop": "x" }));
		let err = build_field_filter("a", &cmp, &FieldSpec::string()).unwrap_err();
		assert!(matches!(err, Error::UnsupportedOperator { .. }));
		let model = Model::new("M", "ms").field("a", FieldSpec::int());
		let out = FieldFilters::with_options(&model, lenient()).build("a", &cmp).unwrap();
		assert_eq!(out, fragment(json!({ "a": { "$badop": "x" } })));
	}

	#[test]
	fn strict_operators_reject_unknown_numeric_operators() {
		let model = Model::new("M", "ms").field("a", FieldSpec::int());
		let filters = FieldFilters::with_options(
			&model,
			FilterOptions {
				strict_operators: true,
				..lenient()
			},
		);
		let err = filters.build("a", &comparison(json!({ "_badop": 1 }))).unwrap_err();
		assert!(matches!(err, Error::UnsupportedNumericOperator { .. }));
	}

	#[test]
	fn id_filters_follow_the_field_type() {
		let cmp = comparison(json!({ "_eq": 1 }));
		let spec = FieldSpec::int().filter_kind(FilterKind::Id);
		assert_eq!(
			build_field_filter("id", &cmp, &spec).unwrap(),
			fragment(json!({ "id": { "$eq": 1 } }))
		);
		let cmp = comparison(json!({ "_eq": "x1" }));
		let spec = FieldSpec::string().filter_kind(FilterKind::Id);
		assert_eq!(
			build_field_filter("id", &cmp, &spec).unwrap(),
			fragment(json!({ "$and": [{ "id": { "$eq": "x1" } }] }))
		);
	}

	#[test]
	fn enum_fields_use_string_operators() {
		let spec = FieldSpec::enumeration("Status", ["open", "closed"]).unwrap();
		let cmp = comparison(json!({ "_in": ["open"] }));
		assert_eq!(
			build_field_filter("status", &cmp, &spec).unwrap(),
			fragment(json!({ "$and": [{ "status": { "$in": ["open"] } }] }))
		);
	}

	#[test_log::test]
	fn unhandled_filter_kinds_are_skipped() {
		let model = Model::new("M", "ms")
			.field("tags", FieldSpec::list(FieldType::String))
			.field("id", FieldSpec::boolean().filter_kind(FilterKind::Id));
		let filters = FieldFilters::with_options(&model, lenient());
		let cmp = comparison(json!({ "_eq": "x" }));
		assert!(filters.build("tags", &cmp).unwrap().is_empty());
		assert!(filters.build("id", &cmp).unwrap().is_empty());
	}

	#[test]
	fn strict_filter_kinds_fail() {
		let model = Model::new("M", "ms").field("tags", FieldSpec::list(FieldType::String));
		let filters = FieldFilters::with_options(
			&model,
			FilterOptions {
				strict_filter_kinds: true,
				..lenient()
			},
		);
		let err = filters.build("tags", &comparison(json!({ "_eq": "x" }))).unwrap_err();
		assert!(matches!(
			err,
			Error::UnhandledFilterKind { ref kind, .. } if kind == "[String]Filter"
		));
	}

	#[test]
	fn custom_filters_take_over() {
		let spec = FieldSpec::object("Point")
			.filter_kind(FilterKind::Named("NearFilter".into()))
			.custom_filter(|field, cmp| {
				let near = cmp.get("_near").cloned().unwrap_or_default();
				Ok(Fragment::field(field, json!({ "$near": near })))
			});
		let cmp = comparison(json!({ "_near": [1, 2] }));
		assert_eq!(
			build_field_filter("location", &cmp, &spec).unwrap(),
			fragment(json!({ "location": { "$near": [1, 2] } }))
		);
	}

	#[test]
	fn fields_outside_the_model_are_rejected() {
		let model = Model::new("M", "ms")
			.field("a", FieldSpec::int())
			.field("hidden", FieldSpec::int().create_filter(false));
		let filters = FieldFilters::new(&model);
		assert!(filters.contains("a"));
		let cmp = comparison(json!({ "_eq": 1 }));
		assert!(matches!(filters.build("b", &cmp), Err(Error::UnknownField(_))));
		assert!(matches!(filters.build("hidden", &cmp), Err(Error::UnknownField(_))));
	}
}
