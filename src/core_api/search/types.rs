use bitflags::bitflags;
use regex::{Regex, RegexBuilder};

use crate::core_api::error::{ApiBoxError, Result};

bitflags! {
	/// Fields of a declaration that a listing query is matched against.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct SearchDomain: u32 {
		/// Match against index keys (`Client.fetch`).
		const NAMES = 1 << 0;
		/// Match against comment text.
		const DOCS = 1 << 1;
		/// Match against kind strings (`Method`, `Type alias`).
		const KINDS = 1 << 2;
	}
}

impl Default for SearchDomain {
	fn default() -> Self {
		Self::NAMES | Self::DOCS
	}
}

/// Options controlling a filtered listing.
#[derive(Debug, Clone)]
pub struct SearchOptions {
	/// Raw query. `|` separates alternatives; everything else is literal.
	pub query: String,
	/// Domains to search; defaults to [`SearchDomain::default`].
	pub domains: SearchDomain,
	/// Whether matching should respect letter casing.
	pub case_sensitive: bool,
}

impl SearchOptions {
	/// Create options for the given query with default domains.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			domains: SearchDomain::default(),
			case_sensitive: false,
		}
	}

	/// Ensure the options have at least one domain selected.
	pub fn ensure_domains(&mut self) {
		if self.domains.is_empty() {
			self.domains = SearchDomain::default();
		}
	}

	/// Compile the query into a regex of literal alternatives.
	pub fn to_regex(&self) -> Result<Regex> {
		let alternatives: Vec<String> = self
			.query
			.split('|')
			.map(str::trim)
			.filter(|term| !term.is_empty())
			.map(regex::escape)
			.collect();
		if alternatives.is_empty() {
			return Err(ApiBoxError::InvalidQuery(format!(
				"`{}` has no search terms",
				self.query
			)));
		}
		RegexBuilder::new(&alternatives.join("|"))
			.case_insensitive(!self.case_sensitive)
			.build()
			.map_err(|err| ApiBoxError::InvalidQuery(err.to_string()))
	}
}

/// Source location associated with a declaration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceLocation {
	/// Prefixed source file path.
	pub path: String,
	/// One-indexed line number.
	pub line: u32,
}

impl SourceLocation {
	/// Format the source location as `path:line`.
	pub fn to_compact_string(&self) -> String {
		format!("{}:{}", self.path, self.line)
	}
}

/// Lightweight record describing a declaration for list output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListItem {
	/// Index key, usable as a render target.
	pub key: String,
	/// Kind string, if the declaration has one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Source location if available.
	#[serde(skip_serializing_if = "Option::is_none", rename = "src")]
	pub source: Option<SourceLocation>,
}

impl ListItem {
	/// Kind label for tabular output.
	pub fn kind_label(&self) -> &str {
		self.kind.as_deref().unwrap_or("-")
	}
}
