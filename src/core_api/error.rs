use std::fmt;

use serde_json::error::Category;
use thiserror::Error;

/// Aggregate errors produced by the apibox API.
#[derive(Debug, Error)]
pub enum ApiBoxError {
	/// The requested declaration name is not present in the index.
	#[error("unknown declaration `{0}`")]
	UnknownDeclaration(String),
	/// The declaration tree violates the document schema or cannot be traversed.
	#[error("malformed input at {path}: {reason}")]
	MalformedInput {
		/// Dotted declaration path, or `line:column` for parse failures.
		path: String,
		/// What was wrong at that location.
		reason: String,
	},
	/// The document is not valid JSON.
	#[error("invalid JSON: {0}")]
	Json(#[source] serde_json::Error),
	/// Failed to read the document.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// A listing query could not be compiled.
	#[error("invalid query: {0}")]
	InvalidQuery(String),
}

impl ApiBoxError {
	/// Build a [`ApiBoxError::MalformedInput`] for the given node path.
	pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::MalformedInput {
			path: path.into(),
			reason: reason.into(),
		}
	}
}

impl From<serde_json::Error> for ApiBoxError {
	fn from(err: serde_json::Error) -> Self {
		match err.classify() {
			// Well-formed JSON that does not fit the declaration schema.
			Category::Data => Self::malformed(
				format!("{}:{}", err.line(), err.column()),
				err.to_string(),
			),
			Category::Io => Self::Io(err.into()),
			// Valid JSON nested past serde_json's recursion limit.
			Category::Syntax if err.to_string().starts_with("recursion limit exceeded") => {
				Self::malformed(
					format!("{}:{}", err.line(), err.column()),
					"declaration tree nests too deeply",
				)
			}
			Category::Syntax | Category::Eof => Self::Json(err),
		}
	}
}

/// A type expression that could not be named and was rendered as `any`.
///
/// This is never returned as an error; resolvers record it and keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedType {
	/// Name of the declaration whose type fell back to `any`.
	pub declaration: String,
}

impl fmt::Display for UnresolvedType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"unknown type name for {}, using the type name `any`",
			self.declaration
		)
	}
}

/// Result type returned by the apibox library.
pub type Result<T> = std::result::Result<T, ApiBoxError>;
