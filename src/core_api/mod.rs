//! Core library API for apibox, tying parsing, indexing, resolution and rendering together.
//!
//! [`ApiBox`] is the high-level entry point. It is UI-agnostic: the CLI is one frontend,
//! documentation site generators are another.

/// Source link settings and environment fallbacks.
pub mod config;
/// Error types for the core API.
pub mod error;
/// Declaration listing and query filtering.
pub mod search;

use std::path::Path;

pub use self::config::SourceLinkConfig;
pub use self::error::{ApiBoxError, Result, UnresolvedType};
pub use self::search::{ListItem, SearchDomain, SearchOptions, SourceLocation};
use crate::index::{DeclarationIndex, IndexOptions};
use crate::model::Document;
pub use crate::render::{RenderFormat, Renderer};
use crate::resolve::{LinkStyle, RenderArgs, Resolver};

/// ApiBox renders API reference boxes from a TypeScript declaration-tree document.
///
/// Each call indexes the document afresh and never mutates it, so one [`Document`] can be
/// shared by many calls.
#[derive(Debug, Clone)]
pub struct ApiBox {
	/// Output format to use when rendering declarations.
	render_format: RenderFormat,

	/// Link style override. When None the format's default style is used.
	link_style: Option<LinkStyle>,

	/// Settings for source links.
	links: SourceLinkConfig,

	/// Whether colliding index keys are an error.
	strict_keys: bool,
}

impl Default for ApiBox {
	fn default() -> Self {
		Self::new()
	}
}

impl ApiBox {
	/// Creates a new ApiBox instance with default configuration: Markdown output, no
	/// filepath prefix, branch `master`, lenient key collisions.
	pub fn new() -> Self {
		Self {
			render_format: RenderFormat::Markdown,
			link_style: None,
			links: SourceLinkConfig::default(),
			strict_keys: false,
		}
	}

	/// Selects the output format used when rendering declarations.
	pub fn with_render_format(mut self, format: RenderFormat) -> Self {
		self.render_format = format;
		self
	}

	/// Sets the prefix prepended to every source file name.
	pub fn with_filepath_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.links.filepath_prefix = prefix.into();
		self
	}

	/// Sets the repository used for source links, overriding `APIBOX_REPO`.
	pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
		self.links = self.links.with_repo(repo);
		self
	}

	/// Sets the branch used for source links.
	pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
		self.links = self.links.with_branch(branch);
		self
	}

	/// Enables or disables rejection of colliding index keys.
	pub fn with_strict_keys(mut self, strict: bool) -> Self {
		self.strict_keys = strict;
		self
	}

	/// Overrides the link style chosen by the render format.
	pub fn with_link_style(mut self, style: LinkStyle) -> Self {
		self.link_style = Some(style);
		self
	}

	/// Returns the currently configured render format.
	pub fn render_format(&self) -> RenderFormat {
		self.render_format
	}

	/// Returns the effective link style.
	pub fn link_style(&self) -> LinkStyle {
		self.link_style
			.unwrap_or_else(|| self.render_format.link_style())
	}

	/// Returns the source link settings.
	pub fn source_links(&self) -> &SourceLinkConfig {
		&self.links
	}

	/// Reads and parses a declaration document from disk.
	pub fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
		Document::from_path(path)
	}

	/// Builds the render arguments for one declaration.
	pub fn render_args(&self, doc: &Document, name: &str) -> Result<RenderArgs> {
		let index = self.index(doc)?;
		let resolver = self.resolver(&index);
		resolver.render_args(name)
	}

	/// Renders the named declarations in order, joined by the format's separator.
	///
	/// Unresolvable types are rendered as `any` and logged; unknown names abort the call.
	pub fn render(&self, doc: &Document, names: &[impl AsRef<str>]) -> Result<String> {
		let (rendered, diagnostics) = self.render_with_diagnostics(doc, names)?;
		if !diagnostics.is_empty() {
			tracing::debug!(count = diagnostics.len(), "rendered with unresolved types");
		}
		Ok(rendered)
	}

	/// Like [`render`](Self::render), additionally returning the unresolved-type diagnostics.
	pub fn render_with_diagnostics(
		&self,
		doc: &Document,
		names: &[impl AsRef<str>],
	) -> Result<(String, Vec<UnresolvedType>)> {
		let index = self.index(doc)?;
		let resolver = self.resolver(&index);
		let all = names
			.iter()
			.map(|name| resolver.render_args(name.as_ref()))
			.collect::<Result<Vec<_>>>()?;
		let rendered = Renderer::new()
			.with_format(self.render_format)
			.render_all(&all)?;
		Ok((rendered, resolver.diagnostics()))
	}

	/// Lists reachable declarations, optionally filtered by a search query.
	pub fn list(&self, doc: &Document, search: Option<&SearchOptions>) -> Result<Vec<ListItem>> {
		let index = self.index(doc)?;
		search::list_entries(&index, &self.links.filepath_prefix, search)
	}

	/// Serializes the named declaration node back to pretty JSON.
	pub fn raw_json(&self, doc: &Document, name: &str) -> Result<String> {
		let index = self.index(doc)?;
		let node = index
			.node(name)
			.ok_or_else(|| ApiBoxError::UnknownDeclaration(name.to_string()))?;
		Ok(serde_json::to_string_pretty(node)?)
	}

	fn index<'a>(&self, doc: &'a Document) -> Result<DeclarationIndex<'a>> {
		DeclarationIndex::build_with(
			doc.root(),
			IndexOptions {
				strict_keys: self.strict_keys,
			},
		)
	}

	fn resolver<'i, 'a>(&self, index: &'i DeclarationIndex<'a>) -> Resolver<'i, 'a> {
		Resolver::new(index)
			.with_link_style(self.link_style())
			.with_source_links(self.links.clone())
	}
}
