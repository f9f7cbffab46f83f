//! Resolution of query arguments into the filter and sort documents.

use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::cnf::{SORT_ASC, SORT_DESC};
use crate::err::Error;
use crate::filter::{FieldFilters, FilterOptions, Fragment, WhereExpression, translate_where};
use crate::model::Model;

/// The argument holding the where expression
pub const WHERE_ARGUMENT: &str = "where";

/// The argument holding the list of orderings
pub const ORDER_BY_ARGUMENT: &str = "orderBy";

/// A sort document, mapping field names to `1` or `-1`
pub type SortDocument = Map<String, Value>;

/// Resolves the arguments of the query field of one model.
///
/// A resolver is built once per model and can be shared between threads.
#[derive(Clone)]
pub struct Resolver {
	model: String,
	filters: FieldFilters,
	fields: IndexSet<String>,
	sortable: IndexSet<String>,
}

impl Resolver {
	pub fn new(model: &Model) -> Self {
		Self::with_options(model, FilterOptions::default())
	}

	pub fn with_options(model: &Model, options: FilterOptions) -> Self {
		Self {
			model: model.name().to_owned(),
			filters: FieldFilters::with_options(model, options),
			fields: model.fields().keys().cloned().collect(),
			sortable: model
				.fields()
				.iter()
				.filter(|(_, spec)| spec.is_sortable())
				.map(|(name, _)| name.clone())
				.collect(),
		}
	}

	/// Translate the where argument, where a missing argument matches everything
	pub fn filter(&self, value: Option<&Value>) -> Result<Fragment, Error> {
		match value {
			None => Ok(Fragment::new()),
			Some(v) => translate_where(&WhereExpression::parse(v)?, &self.filters),
		}
	}

	/// Translate the orderBy argument.
	///
	/// The orderings are merged in order, with later ones replacing the
	/// direction of a field ordered earlier. Fields which cannot be sorted on
	/// are left out.
	pub fn sort(&self, value: Option<&Value>) -> Result<SortDocument, Error> {
		let entries = match value {
			None | Some(Value::Null) => return Ok(SortDocument::new()),
			Some(Value::Array(v)) => v.as_slice(),
			// A single input is accepted in place of a list of one
			Some(v @ Value::Object(_)) => std::slice::from_ref(v),
			Some(v) => {
				return Err(Error::InvalidArguments(format!(
					"`{ORDER_BY_ARGUMENT}` must be a list of orderings, found {v}"
				)));
			}
		};
		let mut sort = SortDocument::new();
		for entry in entries {
			let Value::Object(entry) = entry else {
				return Err(Error::InvalidArguments(format!(
					"an ordering must be an object, found {entry}"
				)));
			};
			for (field, direction) in entry {
				if !self.fields.contains(field) {
					return Err(Error::UnknownField(field.clone()));
				}
				if direction.is_null() {
					continue;
				}
				if !self.sortable.contains(field) {
					trace!("Ignoring ordering on unsortable field `{field}` of `{}`", self.model);
					continue;
				}
				let marker = match direction.as_str() {
					Some("asc") => SORT_ASC,
					Some("desc") => SORT_DESC,
					_ => return Err(Error::InvalidOrderDirection(direction.to_string())),
				};
				sort.insert(field.clone(), Value::from(marker));
			}
		}
		Ok(sort)
	}

	/// Turn the query arguments into the filter and sort documents.
	///
	/// The default sort is used when the arguments do not order on any field.
	pub fn resolve(
		&self,
		args: &Value,
		default_sort: &SortDocument,
	) -> Result<(Fragment, SortDocument), Error> {
		let empty = Map::new();
		let args = match args {
			Value::Null => &empty,
			Value::Object(args) => args,
			v => {
				return Err(Error::InvalidArguments(format!("expected an object, found {v}")));
			}
		};
		let filter = self.filter(args.get(WHERE_ARGUMENT))?;
		let mut sort = self.sort(args.get(ORDER_BY_ARGUMENT))?;
		if sort.is_empty() {
			sort = default_sort.clone();
		}
		let sort_doc = Value::Object(sort.clone());
		debug!("Resolved `{}` arguments into filter {filter} and sort {sort_doc}", self.model);
		Ok((filter, sort))
	}
}

/// Resolve the query arguments of a model without keeping a resolver around
pub fn resolve(
	args: &Value,
	model: &Model,
	default_sort: &SortDocument,
) -> Result<(Fragment, SortDocument), Error> {
	Resolver::new(model).resolve(args, default_sort)
}
