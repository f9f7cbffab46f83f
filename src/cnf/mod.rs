/// The publicly visible name of the command-line tool
pub const PKG_NAME: &str = "gqlmongo";

/// The version of the command-line tool
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The description shown in the command-line help
pub const INFO: &str = "\
Generate GraphQL schemas for model definitions, and translate the where and \
orderBy arguments of their queries into MongoDB filter and sort documents.";

/// The log level used when none is specified
pub const DEFAULT_LOG_LEVEL: &str = "warn";
