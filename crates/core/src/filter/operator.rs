//! Translation of single comparison operators.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::cnf::{NOT, OPERATOR_PREFIX, WHERE_OPERATOR_PREFIX};
use crate::err::Error;

/// The operators accepted by numeric and boolean filters
pub const NUMERIC_OPERATORS: [&str; 8] = ["_eq", "_ne", "_lt", "_lte", "_gt", "_gte", "_in", "_nin"];

/// An operator accepted by string and enum filters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StringOperator {
	Eq,
	Ne,
	Ieq,
	Ine,
	Regex,
	Iregex,
	Contains,
	Icontains,
	StartsWith,
	IstartsWith,
	EndsWith,
	IendsWith,
	In,
	Nin,
}

impl StringOperator {
	pub const ALL: [Self; 14] = [
		Self::Eq,
		Self::Ne,
		Self::Ieq,
		Self::Ine,
		Self::Regex,
		Self::Iregex,
		Self::Contains,
		Self::Icontains,
		Self::StartsWith,
		Self::IstartsWith,
		Self::EndsWith,
		Self::IendsWith,
		Self::In,
		Self::Nin,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eq => "_eq",
			Self::Ne => "_ne",
			Self::Ieq => "_ieq",
			Self::Ine => "_ine",
			Self::Regex => "_regex",
			Self::Iregex => "_iregex",
			Self::Contains => "_contains",
			Self::Icontains => "_icontains",
			Self::StartsWith => "_startswith",
			Self::IstartsWith => "_istartswith",
			Self::EndsWith => "_endswith",
			Self::IendsWith => "_iendswith",
			Self::In => "_in",
			Self::Nin => "_nin",
		}
	}

	pub fn is_case_insensitive(&self) -> bool {
		matches!(
			self,
			Self::Ieq | Self::Ine | Self::Iregex | Self::Icontains | Self::IstartsWith | Self::IendsWith
		)
	}

	/// Build the condition for this operator applied to `value`
	pub fn condition(&self, value: &Value) -> Result<Value, Error> {
		let cond = match self {
			Self::Eq => doc! { "$eq" => value.clone() },
			Self::Ne => doc! { "$ne" => value.clone() },
			Self::In => doc! { "$in" => self.list(value)? },
			Self::Nin => doc! { "$nin" => self.list(value)? },
			Self::Ieq => self.pattern(format!("^{}$", regex::escape(self.string(value)?))),
			Self::Ine => {
				let exact = self.pattern(format!("^{}$", regex::escape(self.string(value)?)));
				doc! { NOT => exact }
			}
			Self::Regex | Self::Iregex | Self::Contains | Self::Icontains => {
				self.pattern(self.string(value)?.to_owned())
			}
			Self::StartsWith | Self::IstartsWith => self.pattern(format!("^{}", self.string(value)?)),
			Self::EndsWith | Self::IendsWith => self.pattern(format!("{}$", self.string(value)?)),
		};
		Ok(Value::Object(cond))
	}

	fn pattern(&self, pattern: String) -> Map<String, Value> {
		let mut m = doc! { "$regex" => pattern };
		if self.is_case_insensitive() {
			m.insert("$options".to_owned(), Value::from("i"));
		}
		m
	}

	fn string<'a>(&self, value: &'a Value) -> Result<&'a str, Error> {
		value.as_str().ok_or_else(|| Error::InvalidOperand {
			operator: self.as_str().to_owned(),
			expected: "a string",
		})
	}

	fn list(&self, value: &Value) -> Result<Value, Error> {
		match value {
			Value::Array(_) => Ok(value.clone()),
			_ => Err(Error::InvalidOperand {
				operator: self.as_str().to_owned(),
				expected: "a list",
			}),
		}
	}
}

impl Display for StringOperator {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for StringOperator {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|op| op.as_str() == s).ok_or_else(|| {
			Error::UnsupportedOperator {
				operator: s.to_owned(),
			}
		})
	}
}

/// Translate one string filter operator and its value into a condition
pub fn translate(operator: &str, value: &Value) -> Result<Value, Error> {
	operator.parse::<StringOperator>()?.condition(value)
}

/// Rename a numeric filter operator into the filter dialect, `_lt` becoming `$lt`
pub fn translate_numeric(operator: &str) -> String {
	match operator.strip_prefix(WHERE_OPERATOR_PREFIX) {
		Some(rest) => format!("{OPERATOR_PREFIX}{rest}"),
		None => operator.to_owned(),
	}
}

pub fn is_numeric_operator(operator: &str) -> bool {
	NUMERIC_OPERATORS.contains(&operator)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[rstest]
	#[case::eq("_eq", json!("1"), json!({ "$eq": "1" }))]
	#[case::ne("_ne", json!("1"), json!({ "$ne": "1" }))]
	#[case::ieq("_ieq", json!("a.b"), json!({ "$regex": "^a\\.b$", "$options": "i" }))]
	#[case::ine("_ine", json!("ab"), json!({ "$not": { "$regex": "^ab$", "$options": "i" } }))]
	#[case::regex("_regex", json!("a.*"), json!({ "$regex": "a.*" }))]
	#[case::iregex("_iregex", json!("a.*"), json!({ "$regex": "a.*", "$options": "i" }))]
	#[case::contains("_contains", json!("ab"), json!({ "$regex": "ab" }))]
	#[case::icontains("_icontains", json!("ab"), json!({ "$regex": "ab", "$options": "i" }))]
	#[case::startswith("_startswith", json!("ab"), json!({ "$regex": "^ab" }))]
	#[case::istartswith("_istartswith", json!("ab"), json!({ "$regex": "^ab", "$options": "i" }))]
	#[case::endswith("_endswith", json!("ab"), json!({ "$regex": "ab$" }))]
	#[case::iendswith("_iendswith", json!("ab"), json!({ "$regex": "ab$", "$options": "i" }))]
	#[case::in_list("_in", json!(["a", "b"]), json!({ "$in": ["a", "b"] }))]
	#[case::nin_list("_nin", json!(["a"]), json!({ "$nin": ["a"] }))]
	fn string_operators(#[case] op: &str, #[case] value: Value, #[case] expected: Value) {
		assert_eq!(translate(op, &value).unwrap(), expected);
	}

	#[test]
	fn every_operator_round_trips_through_its_name() {
		for op in StringOperator::ALL {
			assert_eq!(op.as_str().parse::<StringOperator>().unwrap(), op);
		}
	}

	#[test]
	fn unknown_string_operator_fails() {
		let err = translate("_badop", &json!("x")).unwrap_err();
		assert!(matches!(err, Error::UnsupportedOperator { ref operator } if operator == "_badop"));
	}

	#[test]
	fn pattern_operators_need_strings() {
		let err = translate("_startswith", &json!(3)).unwrap_err();
		assert!(matches!(err, Error::InvalidOperand { expected: "a string", .. }));
		let err = translate("_in", &json!("a")).unwrap_err();
		assert!(matches!(err, Error::InvalidOperand { expected: "a list", .. }));
	}

	#[rstest]
	#[case("_eq", "$eq")]
	#[case("_lt", "$lt")]
	#[case("_gte", "$gte")]
	#[case("_nin", "$nin")]
	#[case("_badop", "$badop")]
	fn numeric_operators_are_renamed(#[case] op: &str, #[case] expected: &str) {
		assert_eq!(translate_numeric(op), expected);
	}
}
