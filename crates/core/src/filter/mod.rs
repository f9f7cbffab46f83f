//! Translation of GraphQL where arguments into filter documents.
//!
//! A where argument is parsed into a [`WhereExpression`], and each node of the
//! expression is turned into a [`Fragment`]. Fragments are only ever combined
//! through [`merge`].

mod expr;
mod field;
mod fragment;
pub mod operator;
mod translate;

use serde_json::{Map, Value};

pub use expr::WhereExpression;
pub use field::{FieldFilterBuilder, FieldFilters, FilterOptions, build_field_filter};
pub use fragment::{Fragment, merge};
pub use translate::translate_where;

/// The comparisons requested on one field, keyed by operator name
pub type ComparisonMap = Map<String, Value>;
