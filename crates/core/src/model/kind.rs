use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The GraphQL type of a model field.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FieldType {
	Int,
	Float,
	String,
	Boolean,
	Enum {
		name: String,
		values: Vec<String>,
	},
	List(Box<FieldType>),
	/// Any other named GraphQL type
	Object(String),
}

impl FieldType {
	/// The innermost type name, without list brackets
	pub fn base_name(&self) -> &str {
		match self {
			Self::Int => "Int",
			Self::Float => "Float",
			Self::String => "String",
			Self::Boolean => "Boolean",
			Self::Enum {
				name,
				..
			} => name,
			Self::List(inner) => inner.base_name(),
			Self::Object(name) => name,
		}
	}

	/// The enum referenced by this type, including through lists
	pub fn enums(&self) -> Option<(&str, &[String])> {
		match self {
			Self::Enum {
				name,
				values,
			} => Some((name, values)),
			Self::List(inner) => inner.enums(),
			_ => None,
		}
	}

	/// The filter kind used when a field does not declare one
	pub fn default_filter_kind(&self) -> Option<FilterKind> {
		match self {
			Self::Int => Some(FilterKind::Int),
			Self::Float => Some(FilterKind::Float),
			Self::String => Some(FilterKind::String),
			Self::Boolean => Some(FilterKind::Boolean),
			Self::Enum {
				..
			} => Some(FilterKind::Enum),
			Self::List(_) | Self::Object(_) => None,
		}
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::List(inner) => write!(f, "[{inner}]"),
			v => f.write_str(v.base_name()),
		}
	}
}

/// The filter input used to search a field.
///
/// Each kind maps onto one translator when a where argument is translated,
/// and onto one input type name when the SDL is generated.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FilterKind {
	Int,
	/// Identifier filter, searched as numbers or strings depending on the field type
	Id,
	Enum,
	Float,
	String,
	Boolean,
	/// A user supplied filter input, searched through a custom filter function
	Named(String),
}

impl FilterKind {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Int => "IntFilter",
			Self::Id => "IDFilter",
			Self::Enum => "EnumFilter",
			Self::Float => "FloatFilter",
			Self::String => "StringFilter",
			Self::Boolean => "BooleanFilter",
			Self::Named(name) => name,
		}
	}
}

impl Display for FilterKind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for FilterKind {
	fn from(s: &str) -> Self {
		match s {
			"IntFilter" => Self::Int,
			"IDFilter" => Self::Id,
			"EnumFilter" => Self::Enum,
			"FloatFilter" => Self::Float,
			"StringFilter" => Self::String,
			"BooleanFilter" => Self::Boolean,
			name => Self::Named(name.to_owned()),
		}
	}
}

impl FromStr for FilterKind {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn list_types_render_with_brackets() {
		let ty = FieldType::List(Box::new(FieldType::List(Box::new(FieldType::Int))));
		assert_eq!(ty.to_string(), "[[Int]]");
		assert_eq!(ty.base_name(), "Int");
		assert_eq!(ty.default_filter_kind(), None);
	}

	#[test]
	fn filter_kinds_parse_from_their_names() {
		for kind in [
			FilterKind::Int,
			FilterKind::Id,
			FilterKind::Enum,
			FilterKind::Float,
			FilterKind::String,
			FilterKind::Boolean,
		] {
			assert_eq!(kind.as_str().parse::<FilterKind>().unwrap(), kind);
		}
		assert_eq!(
			"DateFilter".parse::<FilterKind>().unwrap(),
			FilterKind::Named("DateFilter".to_owned())
		);
	}
}
