//! Type-name resolution over an indexed declaration tree.
//!
//! A [`Resolver`] turns declarations into display strings: type names, parameter
//! descriptors, signatures and finally [`RenderArgs`]. Resolution never fails; a type
//! expression with no display form falls back to `any`, is logged, and is recorded as an
//! [`UnresolvedType`].

/// Render argument assembly for a single declaration.
pub mod args;
/// Parameter descriptors and object property lists.
pub mod params;

use std::borrow::Cow;
use std::cell::RefCell;

pub use self::args::{Group, GroupKind, RenderArgs};
pub use self::params::{ParameterDescriptor, display_parameter_name, is_readable_name};
use crate::core_api::config::SourceLinkConfig;
use crate::core_api::error::UnresolvedType;
use crate::index::DeclarationIndex;
use crate::model::{DeclarationKind, DeclarationNode, TypeExpr};
use crate::render::utils::escape_html;

/// Fallback type name for expressions that cannot be displayed.
pub const ANY: &str = "any";

/// How references to other declarations are written into type strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
	/// `<a href="#id">name</a>`; all other text is HTML-escaped.
	#[default]
	Html,
	/// `[name](#id)`.
	Markdown,
	/// The display name alone.
	Plain,
}

/// Resolves declarations of one index into display strings.
pub struct Resolver<'i, 'a> {
	index: &'i DeclarationIndex<'a>,
	links: SourceLinkConfig,
	style: LinkStyle,
	/// Type aliases currently being expanded inline.
	expanding: RefCell<Vec<String>>,
	diagnostics: RefCell<Vec<UnresolvedType>>,
}

impl<'i, 'a> Resolver<'i, 'a> {
	/// Create a resolver with HTML links and default source-link settings.
	pub fn new(index: &'i DeclarationIndex<'a>) -> Self {
		Self {
			index,
			links: SourceLinkConfig::default(),
			style: LinkStyle::default(),
			expanding: RefCell::new(Vec::new()),
			diagnostics: RefCell::new(Vec::new()),
		}
	}

	/// Select the link style.
	pub fn with_link_style(mut self, style: LinkStyle) -> Self {
		self.style = style;
		self
	}

	/// Set the source-link configuration.
	pub fn with_source_links(mut self, links: SourceLinkConfig) -> Self {
		self.links = links;
		self
	}

	/// The index this resolver reads from.
	pub fn index(&self) -> &'i DeclarationIndex<'a> {
		self.index
	}

	/// Type expressions that fell back to `any` so far.
	pub fn diagnostics(&self) -> Vec<UnresolvedType> {
		self.diagnostics.borrow().clone()
	}

	/// Name a type expression, or `None` when it has no one-line display form.
	///
	/// Unions resolve only when every member does. References to simple type aliases are
	/// expanded inline; other references become links.
	pub fn resolve_type_name(&self, expr: &TypeExpr) -> Option<String> {
		match expr {
			TypeExpr::Intrinsic { name, is_array, .. } => {
				let name = self.text(name);
				Some(if *is_array {
					format!("[{name}]")
				} else {
					name.into_owned()
				})
			}
			TypeExpr::Union { types, .. } => types
				.iter()
				.map(|member| self.resolve_type_name(member))
				.collect::<Option<Vec<_>>>()
				.map(|names| names.join(" | ")),
			TypeExpr::Reference {
				name, full_name, ..
			} => {
				if let Some(expanded) = self.expand_alias(name) {
					return Some(expanded);
				}
				Some(self.link(full_name.as_deref().unwrap_or(name), name))
			}
			TypeExpr::StringLiteral { value, .. } => {
				Some(self.text(&format!("\"{value}\"")).into_owned())
			}
			TypeExpr::Reflection { .. } | TypeExpr::Unknown { .. } => None,
		}
	}

	/// Render the type of a declaration, signature or parameter.
	///
	/// Methods resolve through their first signature. Call signatures render as
	/// `(params) => return` unless `skip_signature_unwrap` is set, in which case only the
	/// return type is produced.
	pub fn resolve_type(&self, node: &DeclarationNode, skip_signature_unwrap: bool) -> String {
		if node.is_kind(&DeclarationKind::Method)
			&& let Some(signature) = node.first_signature()
		{
			return self.resolve_type(signature, false);
		}

		if node.is_kind(&DeclarationKind::CallSignature) && !skip_signature_unwrap {
			let params = node
				.params()
				.iter()
				.map(|param| self.resolve_type(param, false))
				.collect::<Vec<_>>()
				.join(", ");
			return format!(
				"({params}){}{}",
				self.text(" => "),
				self.resolve_type(node, true)
			);
		}

		let reflected = node.is_kind(&DeclarationKind::TypeAlias)
			|| matches!(node.type_, Some(TypeExpr::Reflection { .. }));
		if reflected && let Some(declaration) = node.inline_declaration() {
			if let Some(signature) = declaration.first_signature() {
				return self.resolve_type(signature, false);
			}
			if let Some(entry) = declaration.index_entries().first() {
				return format!(
					"{}: {}",
					self.index_parameter_string(entry),
					self.resolve_type(entry, false)
				);
			}
		}

		let type_ = node.type_.as_ref();
		let name = type_
			.and_then(|expr| self.resolve_type_name(expr))
			.unwrap_or_else(|| self.fallback(node));

		match type_.and_then(TypeExpr::type_arguments) {
			Some(arguments) => {
				let arguments = arguments
					.iter()
					.map(|argument| {
						self.resolve_type_name(argument)
							.unwrap_or_else(|| self.fallback(node))
					})
					.collect::<Vec<_>>()
					.join(", ");
				let (open, close) = self.angle_brackets();
				format!("{name}{open}{arguments}{close}")
			}
			None => name,
		}
	}

	/// `[key: string, ...]` for the parameters of an index signature.
	pub fn index_parameter_string(&self, signature: &DeclarationNode) -> String {
		let params = signature
			.params()
			.iter()
			.map(|param| {
				let type_name = param
					.type_
					.as_ref()
					.and_then(|expr| self.resolve_type_name(expr))
					.unwrap_or_else(|| self.fallback(param));
				format!("{}: {type_name}", self.text(&param.name))
			})
			.collect::<Vec<_>>()
			.join(", ");
		format!("[{params}]")
	}

	/// Inline a reference to a type alias that is not an object literal.
	fn expand_alias(&self, name: &str) -> Option<String> {
		let referenced = self.index.node(name)?;
		if !referenced.is_kind(&DeclarationKind::TypeAlias) || referenced.has_object_type() {
			return None;
		}
		// Self-referential aliases render as links instead of recursing forever.
		if self.expanding.borrow().iter().any(|active| active == name) {
			return None;
		}
		self.expanding.borrow_mut().push(name.to_string());
		let expanded = self.resolve_type(referenced, false);
		self.expanding.borrow_mut().pop();
		Some(expanded)
	}

	fn fallback(&self, node: &DeclarationNode) -> String {
		tracing::warn!(
			declaration = %node.name,
			"unknown type name, using the type name `any`"
		);
		self.diagnostics.borrow_mut().push(UnresolvedType {
			declaration: node.name.clone(),
		});
		ANY.to_string()
	}

	fn link(&self, id: &str, name: &str) -> String {
		match self.style {
			LinkStyle::Html => format!(
				"<a href=\"#{}\">{}</a>",
				escape_html(id),
				escape_html(name)
			),
			LinkStyle::Markdown => format!("[{name}](#{id})"),
			LinkStyle::Plain => name.to_string(),
		}
	}

	/// Type-argument brackets in the output style.
	fn angle_brackets(&self) -> (&'static str, &'static str) {
		match self.style {
			LinkStyle::Html => ("&lt;", "&gt;"),
			// A bare `<string>` reads as an inline HTML tag.
			LinkStyle::Markdown => ("\\<", "\\>"),
			LinkStyle::Plain => ("<", ">"),
		}
	}

	/// Literal text in the output style.
	pub(crate) fn text<'s>(&self, text: &'s str) -> Cow<'s, str> {
		match self.style {
			LinkStyle::Html => escape_html(text),
			LinkStyle::Markdown | LinkStyle::Plain => Cow::Borrowed(text),
		}
	}
}
