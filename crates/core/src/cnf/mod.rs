use std::sync::LazyLock;

/// The key under which conjunction branches are collected
pub const AND: &str = "$and";

/// The key under which disjunction branches are collected
pub const OR: &str = "$or";

/// The key under which branches are collected when none of them may match
pub const NOR: &str = "$nor";

/// The key which negates a field condition
pub const NOT: &str = "$not";

/// The prefix of every operator in the filter dialect
pub const OPERATOR_PREFIX: &str = "$";

/// The prefix of every operator in the where argument
pub const WHERE_OPERATOR_PREFIX: &str = "_";

/// The connective keys of a where expression
pub const WHERE_AND: &str = "_and";
pub const WHERE_OR: &str = "_or";
pub const WHERE_NOT: &str = "_not";

/// Sort marker for ascending order
pub const SORT_ASC: i64 = 1;

/// Sort marker for descending order
pub const SORT_DESC: i64 = -1;

/// Whether numeric filters reject operators outside of their vocabulary (defaults to false)
pub static STRICT_OPERATORS: LazyLock<bool> =
	lazy_env_parse!("GQLMONGO_STRICT_OPERATORS", bool, false);

/// Whether a field with an unhandled filter kind fails the query (defaults to false)
pub static STRICT_FILTER_KINDS: LazyLock<bool> =
	lazy_env_parse!("GQLMONGO_STRICT_FILTER_KINDS", bool, false);
