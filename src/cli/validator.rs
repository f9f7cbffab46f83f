use std::path::{Path, PathBuf};

use crate::telemetry::filter_from_value;

pub(crate) fn path_exists(path: &str) -> Result<PathBuf, String> {
	let path = Path::new(path);
	if !*path.try_exists().as_ref().map_err(ToString::to_string)? {
		return Err(String::from("Ensure the path exists"));
	}
	Ok(path.to_owned())
}

pub(crate) fn file_exists(path: &str) -> Result<PathBuf, String> {
	let path = path_exists(path)?;
	if !path.is_file() {
		return Err(String::from("Ensure the path is a file"));
	}
	Ok(path)
}

pub(crate) fn log_level(v: &str) -> Result<String, String> {
	match filter_from_value(v) {
		Ok(_) => Ok(v.to_owned()),
		Err(e) => Err(format!("Provide a valid log filter configuration string: {e}")),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("none")]
	#[case("full")]
	#[case("error")]
	#[case("warn")]
	#[case("debug")]
	#[case("gqlmongo_core::filter=trace")]
	fn log_levels_are_accepted(#[case] level: &str) {
		assert_eq!(log_level(level).unwrap(), level);
	}

	#[rstest]
	#[case("loud")]
	#[case("verbose")]
	#[case("gqlmongo=loudest")]
	fn log_levels_are_rejected(#[case] level: &str) {
		assert!(log_level(level).is_err());
	}

	#[test]
	fn missing_files_are_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("models.json");
		assert!(file_exists(&missing.to_string_lossy()).is_err());
		assert!(file_exists(&dir.path().to_string_lossy()).is_err());
		std::fs::write(&missing, "{}").unwrap();
		assert_eq!(file_exists(&missing.to_string_lossy()).unwrap(), missing);
	}
}
