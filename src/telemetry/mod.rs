use anyhow::{Context, Result, bail};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Default, Debug, Clone)]
pub struct Builder {
	log_level: Option<String>,
}

pub fn builder() -> Builder {
	Builder::default()
}

impl Builder {
	/// Set the log level on the builder
	pub fn with_log_level(mut self, log_level: &str) -> Self {
		self.log_level = Some(log_level.to_owned());
		self
	}

	/// Build a tracing dispatcher with the fmt subscriber writing to stderr
	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync + 'static>> {
		let level = self.log_level.as_deref().unwrap_or(crate::cnf::DEFAULT_LOG_LEVEL);
		let filter = filter_from_value(level)
			.with_context(|| format!("Invalid log filter configuration `{level}`"))?;
		let registry = tracing_subscriber::registry().with(
			tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.with_filter(filter),
		);
		Ok(Box::new(registry))
	}

	/// Install the tracing pipeline
	pub fn init(self) -> Result<()> {
		self.build()?.try_init().context("Failed to install the log subscriber")
	}
}

/// Create an EnvFilter from the given value.
///
/// The named levels only apply to this tool's own crates. Any other value must
/// look like a filter directive, naming a target with `=` or `::`, or listing
/// several directives separated by `,`.
pub fn filter_from_value(v: &str) -> Result<EnvFilter> {
	let filter = match v {
		// Don't show any logs at all
		"none" => EnvFilter::builder().parse("off")?,
		// Show all logs, including from dependencies
		"full" => EnvFilter::builder().parse("trace")?,
		// Otherwise, show the logs of the tool at the chosen level
		"error" | "warn" | "info" | "debug" | "trace" => {
			EnvFilter::builder().parse(format!("error,gqlmongo={v},gqlmongo_core={v}"))?
		}
		// Let's try to parse the custom log level
		_ if v.contains('=') || v.contains("::") || v.contains(',') => {
			EnvFilter::builder().parse(v)?
		}
		_ => bail!("Unknown log level `{v}`"),
	};
	Ok(filter)
}
