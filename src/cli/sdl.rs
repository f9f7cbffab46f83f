use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::input::load_schema;

#[derive(Args, Debug)]
pub struct SdlCommandArguments {
	#[arg(help = "Path to the JSON file describing the models")]
	#[arg(env = "GQLMONGO_MODELS", long = "models")]
	#[arg(value_parser = super::validator::file_exists)]
	models: PathBuf,
}

pub fn init(
	SdlCommandArguments {
		models,
	}: SdlCommandArguments,
) -> Result<()> {
	// Load the models
	let schema = load_schema(&models)?;
	debug!("Loaded {} models from `{}`", schema.models().count(), models.display());
	// Print the generated schema
	print!("{}", schema.sdl());
	// All ok
	Ok(())
}
