use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use gqlmongo_core::resolver::SortDocument;
use serde_json::{Value, json};

use super::input::{load_schema, read_json};

#[derive(Args, Debug)]
pub struct FilterCommandArguments {
	#[arg(help = "Path to the JSON file describing the models")]
	#[arg(env = "GQLMONGO_MODELS", long = "models")]
	#[arg(value_parser = super::validator::file_exists)]
	models: PathBuf,
	#[arg(help = "The name of the model being queried")]
	#[arg(long = "model")]
	model: String,
	#[arg(help = "The query arguments, as JSON or as @ followed by the path to a JSON file")]
	#[arg(long = "args", default_value = "{}")]
	args: String,
	#[arg(help = "The sort used when the arguments do not order the results")]
	#[arg(long = "default-sort")]
	default_sort: Option<String>,
	#[arg(help = "Whether to pretty-print the output")]
	#[arg(long)]
	#[arg(default_value_t = false)]
	pretty: bool,
}

pub fn init(args: FilterCommandArguments) -> Result<()> {
	let pretty = args.pretty;
	let output = run(args)?;
	if pretty {
		println!("{}", serde_json::to_string_pretty(&output)?);
	} else {
		println!("{output}");
	}
	Ok(())
}

/// Resolve the query arguments into `{ "filter": ..., "sort": ... }`
fn run(
	FilterCommandArguments {
		models,
		model,
		args,
		default_sort,
		..
	}: FilterCommandArguments,
) -> Result<Value> {
	// Load the models
	let schema = load_schema(&models)?;
	let resolver = schema.resolver(&model)?;
	// Parse the arguments
	let args = read_json(&args).context("Invalid query arguments")?;
	let default_sort = match default_sort {
		None => SortDocument::new(),
		Some(v) => match read_json(&v).context("Invalid default sort")? {
			Value::Object(sort) => sort,
			v => bail!("The default sort must be a JSON object, found {v}"),
		},
	};
	// Translate them
	let (filter, sort) = resolver
		.resolve(&args, &default_sort)
		.with_context(|| format!("Failed to resolve the arguments of `{model}`"))?;
	Ok(json!({
		"filter": filter,
		"sort": sort,
	}))
}
