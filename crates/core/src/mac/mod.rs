/// A macro that allows lazily parsing a value from the environment variable,
/// with a fallback default value if the variable is not set or parsing fails.
///
/// # Parameters
///
/// - `$key`: An expression representing the name of the environment variable.
/// - `$t`: The type of the value to be parsed.
/// - `$default`: The default value to fall back to if the environment variable is not set or
///   parsing fails.
///
/// # Return Value
///
/// A lazy static variable of type `std::sync::LazyLock`, which holds the parsed
/// value from the environment variable or the default value.
#[macro_export]
macro_rules! lazy_env_parse {
	// With a static expression for the default value
	($key:expr_2021, $t:ty, $default:expr_2021) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or($default)
		})
	};
}

/// Builds a JSON object from `key => value` pairs, keeping insertion order.
macro_rules! doc {
	($($k:expr_2021 => $v:expr_2021),* $(,)?) => {{
		#[allow(unused_mut)]
		let mut m = ::serde_json::Map::new();
		$(m.insert(::std::string::String::from($k), ::serde_json::Value::from($v));)*
		m
	}};
}
