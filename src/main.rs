//! This binary is the command-line interface of gqlmongo.
//!
//! It loads model definitions from a JSON file, prints the GraphQL schema
//! generated for them, and translates query arguments into the filter and
//! sort documents passed to MongoDB.

#[macro_use]
extern crate tracing;

mod cli;
mod cnf;
mod telemetry;

use std::process::ExitCode;

fn main() -> ExitCode {
	cli::init() // Initiate the command line
}
