//! Tracing subscriber setup for the `apibox` binary.
//!
//! The subscriber is only installed when `APIBOX_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! APIBOX_LOG=debug apibox render api.json Client
//! APIBOX_LOG=apibox::resolve=warn APIBOX_LOG_FORMAT=json apibox render api.json Client
//! ```

use std::env;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Filter directives, `RUST_LOG` syntax.
pub const LOG_ENV: &str = "APIBOX_LOG";
/// `text` (default) or `json`.
pub const LOG_FORMAT_ENV: &str = "APIBOX_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	/// Flat text lines.
	#[default]
	Text,
	/// Newline-delimited JSON objects.
	Json,
}

impl LogFormat {
	/// Parse a format name; anything unrecognised is text.
	pub fn parse(value: &str) -> Self {
		match value.trim().to_lowercase().as_str() {
			"json" => Self::Json,
			_ => Self::Text,
		}
	}

	fn from_env() -> Self {
		Self::parse(&env::var(LOG_FORMAT_ENV).unwrap_or_default())
	}
}

fn build_filter() -> EnvFilter {
	match env::var(LOG_ENV) {
		Ok(directives) => EnvFilter::builder().parse_lossy(directives),
		Err(_) => EnvFilter::from_default_env(),
	}
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Does nothing when neither `APIBOX_LOG` nor `RUST_LOG` is set.
pub fn init_tracing() {
	if env::var_os(LOG_ENV).is_none() && env::var_os("RUST_LOG").is_none() {
		return;
	}

	let filter = build_filter();
	match LogFormat::from_env() {
		LogFormat::Json => {
			let layer = fmt::layer().json().with_writer(std::io::stderr);
			Registry::default().with(filter).with(layer).init();
		}
		LogFormat::Text => {
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_writer(std::io::stderr)
				.init();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_log_format_names() {
		assert_eq!(LogFormat::parse("json"), LogFormat::Json);
		assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
		assert_eq!(LogFormat::parse("tree"), LogFormat::Text);
		assert_eq!(LogFormat::parse(""), LogFormat::Text);
	}
}
