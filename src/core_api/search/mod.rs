//! Declaration listing and query filtering.

mod types;

use regex::Regex;

pub use types::{ListItem, SearchDomain, SearchOptions, SourceLocation};

use super::error::Result;
use crate::index::{DeclarationIndex, IndexEntry};

/// List reachable declarations in traversal order, optionally filtered by a query.
pub fn list_entries(
	index: &DeclarationIndex<'_>,
	filepath_prefix: &str,
	search: Option<&SearchOptions>,
) -> Result<Vec<ListItem>> {
	let matcher = match search {
		Some(options) => {
			let mut options = options.clone();
			options.ensure_domains();
			Some((options.to_regex()?, options.domains))
		}
		None => None,
	};

	Ok(index
		.iter()
		.filter(|entry| match &matcher {
			Some((regex, domains)) => matches_entry(entry, regex, *domains),
			None => true,
		})
		.map(|entry| list_item(entry, filepath_prefix))
		.collect())
}

fn matches_entry(entry: &IndexEntry<'_>, regex: &Regex, domains: SearchDomain) -> bool {
	let node = entry.node();
	if domains.contains(SearchDomain::NAMES) && regex.is_match(entry.key()) {
		return true;
	}
	if domains.contains(SearchDomain::DOCS) {
		let docs = node
			.comment
			.as_ref()
			.and_then(|comment| comment.description())
			.or_else(|| node.first_signature().and_then(|signature| signature.short_text()));
		if docs.is_some_and(|docs| regex.is_match(docs)) {
			return true;
		}
	}
	domains.contains(SearchDomain::KINDS)
		&& node
			.kind
			.as_ref()
			.is_some_and(|kind| regex.is_match(kind.as_str()))
}

fn list_item(entry: &IndexEntry<'_>, filepath_prefix: &str) -> ListItem {
	let node = entry.node();
	ListItem {
		key: entry.key().to_string(),
		kind: node.kind.as_ref().map(|kind| kind.as_str().to_string()),
		source: node.first_source().map(|source| SourceLocation {
			path: format!("{filepath_prefix}{}", source.file_name),
			line: source.line,
		}),
	}
}
