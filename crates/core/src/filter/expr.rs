use indexmap::IndexMap;
use serde_json::Value;

use crate::cnf::{WHERE_AND, WHERE_NOT, WHERE_OR};
use crate::err::{Error, invalid_where};
use crate::filter::ComparisonMap;

/// A parsed where argument.
///
/// Field comparisons are kept in the order they were written, separately
/// from the logical connectives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WhereExpression {
	pub fields: IndexMap<String, ComparisonMap>,
	pub and: Vec<WhereExpression>,
	pub or: Vec<WhereExpression>,
	pub not: Vec<WhereExpression>,
}

impl WhereExpression {
	/// Parse a where argument, where `null` matches every document
	pub fn parse(value: &Value) -> Result<Self, Error> {
		let obj = match value {
			Value::Null => return Ok(Self::default()),
			Value::Object(obj) => obj,
			v => return Err(invalid_where(format!("expected an object, found {v}"))),
		};
		let mut expr = Self::default();
		for (key, v) in obj.iter() {
			match key.as_str() {
				WHERE_AND => expr.and = children(key, v)?,
				WHERE_OR => expr.or = children(key, v)?,
				WHERE_NOT => expr.not = children(key, v)?,
				field => {
					let comparison = match v {
						Value::Null => ComparisonMap::new(),
						Value::Object(o) => o.clone(),
						v => {
							return Err(invalid_where(format!(
								"the filter of field `{field}` must be an object, found {v}"
							)));
						}
					};
					expr.fields.insert(field.to_owned(), comparison);
				}
			}
		}
		Ok(expr)
	}

	/// Whether this node places no constraint at all
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty() && self.and.is_empty() && self.or.is_empty() && self.not.is_empty()
	}
}

fn children(key: &str, value: &Value) -> Result<Vec<WhereExpression>, Error> {
	match value {
		Value::Null => Ok(Vec::new()),
		Value::Array(v) => v.iter().map(WhereExpression::parse).collect(),
		// A single input is accepted in place of a list of one
		Value::Object(_) => Ok(vec![WhereExpression::parse(value)?]),
		v => Err(invalid_where(format!("`{key}` must be a list of conditions, found {v}"))),
	}
}

impl TryFrom<&Value> for WhereExpression {
	type Error = Error;

	fn try_from(value: &Value) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn null_and_empty_objects_match_everything() {
		assert!(WhereExpression::parse(&Value::Null).unwrap().is_empty());
		assert!(WhereExpression::parse(&json!({})).unwrap().is_empty());
	}

	#[test]
	fn connectives_are_separated_from_fields() {
		let expr = WhereExpression::parse(&json!({
			"b": { "_eq": 1 },
			"_or": [{ "a": { "_eq": 2 } }, { "a": { "_eq": 3 } }],
			"a": null,
			"_not": [{}]
		}))
		.unwrap();
		assert_eq!(expr.fields.keys().collect::<Vec<_>>(), ["b", "a"]);
		assert!(expr.fields["a"].is_empty());
		assert_eq!(expr.or.len(), 2);
		assert!(expr.and.is_empty());
		assert_eq!(expr.not, vec![WhereExpression::default()]);
	}

	#[test]
	fn single_connective_input_is_coerced_to_a_list() {
		let expr = WhereExpression::parse(&json!({ "_and": { "a": { "_eq": 1 } } })).unwrap();
		assert_eq!(expr.and.len(), 1);
		assert!(expr.and[0].fields.contains_key("a"));
	}

	#[test]
	fn malformed_input_is_rejected() {
		for v in [
			json!([]),
			json!("a"),
			json!({ "_and": 3 }),
			json!({ "_or": ["a"] }),
			json!({ "a": 1 }),
		] {
			let err = WhereExpression::try_from(&v).unwrap_err();
			assert!(matches!(err, Error::InvalidWhere(_)), "{v} gave {err}");
		}
	}
}
