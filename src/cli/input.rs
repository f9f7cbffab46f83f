use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gqlmongo_core::Schema;
use serde_json::Value;

/// Load the models described in a JSON file
pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("Failed to read the models file `{}`", path.display()))?;
	Schema::from_json(&text)
		.with_context(|| format!("Failed to load the models in `{}`", path.display()))
}

/// Parse a JSON argument, which is read from a file when it starts with `@`
pub(crate) fn read_json(arg: &str) -> Result<Value> {
	let text = match arg.strip_prefix('@') {
		Some(path) => fs::read_to_string(path)
			.with_context(|| format!("Failed to read the JSON file `{path}`"))?,
		None => arg.to_owned(),
	};
	serde_json::from_str(&text).context("Failed to parse the JSON input")
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn json_is_read_inline_or_from_a_file() {
		assert_eq!(read_json(r#"{ "where": null }"#).unwrap(), json!({ "where": null }));
		let file = tempfile::NamedTempFile::new().unwrap();
		fs::write(file.path(), "[1, 2]").unwrap();
		let arg = format!("@{}", file.path().display());
		assert_eq!(read_json(&arg).unwrap(), json!([1, 2]));
		assert!(read_json("{").is_err());
		assert!(read_json("@/definitely/not/here.json").is_err());
	}

	#[test]
	fn invalid_models_mention_the_file() {
		let file = tempfile::NamedTempFile::new().unwrap();
		let models = r#"{ "models": [{ "name": "A", "query": "as", "fields": { "x": {} } }] }"#;
		fs::write(file.path(), models).unwrap();
		let err = load_schema(file.path()).unwrap_err();
		assert!(format!("{err:#}").contains("x has no type specified."));
	}
}
