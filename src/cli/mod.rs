mod filter;
mod input;
mod sdl;
mod validator;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cnf::{DEFAULT_LOG_LEVEL, INFO, PKG_NAME, PKG_VERSION};
use crate::telemetry;
use filter::FilterCommandArguments;
use sdl::SdlCommandArguments;

#[derive(Parser, Debug)]
#[command(name = "gqlmongo command-line interface")]
#[command(bin_name = PKG_NAME, version = PKG_VERSION, about = INFO)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level for the command-line tool")]
	#[arg(env = "GQLMONGO_LOG", short = 'l', long = "log", global = true)]
	#[arg(default_value = DEFAULT_LOG_LEVEL)]
	#[arg(value_parser = validator::log_level)]
	log: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Print the GraphQL schema generated for a set of models")]
	Sdl(SdlCommandArguments),
	#[command(about = "Translate query arguments into a MongoDB filter and sort")]
	Filter(FilterCommandArguments),
}

pub fn init() -> ExitCode {
	// Parse the CLI arguments
	let args = Cli::parse();
	// Setup the logging output
	if let Err(e) = telemetry::builder().with_log_level(&args.log).init() {
		eprintln!("{e:#}");
		return ExitCode::FAILURE;
	}
	// Run the chosen command
	let output = match args.command {
		Commands::Sdl(args) => sdl::init(args),
		Commands::Filter(args) => filter::init(args),
	};
	// Error and exit the programme
	if let Err(e) = output {
		error!("{e:#}");
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
