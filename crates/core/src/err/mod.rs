use serde_json::Error as JsonError;
use thiserror::Error;

/// An error raised while building a model or translating query arguments.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// A field definition could not be turned into a field spec
	#[error("Invalid definition for field `{field}`: {reason}")]
	InvalidFieldSpec {
		field: String,
		reason: String,
	},

	/// A string filter received an operator outside of its vocabulary
	#[error("Unsupported filter operator `{operator}`")]
	UnsupportedOperator {
		operator: String,
	},

	/// A numeric filter received an operator outside of its vocabulary
	#[error("Unsupported numeric filter operator `{operator}` on field `{field}`")]
	UnsupportedNumericOperator {
		field: String,
		operator: String,
	},

	/// The filter kind of a field cannot be dispatched to a translator
	#[error("Unhandled filter `{kind}` for field `{field}` of type `{ty}`")]
	UnhandledFilterKind {
		field: String,
		kind: String,
		ty: String,
	},

	/// An operator received a value of the wrong shape
	#[error("Operator `{operator}` expects {expected}")]
	InvalidOperand {
		operator: String,
		expected: &'static str,
	},

	/// The where argument does not have the shape of a where expression
	#[error("Invalid where argument: {0}")]
	InvalidWhere(String),

	/// The argument references a field which is not part of the model
	#[error("The field `{0}` does not exist or cannot be used here")]
	UnknownField(String),

	/// The query arguments, or one of them, do not have the expected shape
	#[error("Invalid query arguments: {0}")]
	InvalidArguments(String),

	/// The orderBy argument used something other than `asc` or `desc`
	#[error("Invalid sort direction `{0}`, expected `asc` or `desc`")]
	InvalidOrderDirection(String),

	/// The model does not exist in the loaded schema
	#[error("The model `{0}` does not exist")]
	UnknownModel(String),

	/// Two models were registered under the same name
	#[error("The model `{0}` is defined more than once")]
	DuplicateModel(String),

	/// There was an error decoding JSON input
	#[error("JSON Error: {0}")]
	Json(#[from] JsonError),
}

pub(crate) fn invalid_where(msg: impl Into<String>) -> Error {
	Error::InvalidWhere(msg.into())
}

pub(crate) fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Error {
	Error::InvalidFieldSpec {
		field: field.into(),
		reason: reason.into(),
	}
}
