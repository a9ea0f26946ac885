//! Serde model of the declaration tree emitted by TypeScript API extractors.
//!
//! Declarations, call signatures and parameters all share one JSON shape, so a single
//! [`DeclarationNode`] type covers the three of them. Fields that are absent in the JSON
//! stay `None`; several resolution rules depend on the difference between "absent" and
//! "present but empty".

/// Loading documents from strings, readers and files.
pub mod document;
/// Type expressions attached to declarations.
pub mod types;

use serde::{Deserialize, Deserializer, Serialize};

pub use self::document::Document;
pub use self::types::TypeExpr;

/// A call signature entry. Same shape as a declaration, with `parameters` populated.
pub type CallSignature = DeclarationNode;

/// A parameter of a call or index signature.
pub type Parameter = DeclarationNode;

/// One node of the declaration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationNode {
	/// Declared name. `__`-prefixed names are compiler-generated.
	pub name: String,
	/// Source-level name of a parameter whose `name` was synthesized.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original_name: Option<String>,
	/// Reflection kind as a human-readable string.
	#[serde(rename = "kindString", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<DeclarationKind>,
	/// Attached doc comment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<Comment>,
	/// Call signatures of callable declarations.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub signatures: Option<Vec<CallSignature>>,
	/// Parameters, present on call and index signatures.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parameters: Option<Vec<Parameter>>,
	/// Nested member declarations.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub children: Option<Vec<DeclarationNode>>,
	/// Declared type.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub type_: Option<TypeExpr>,
	/// Index signatures such as `[key: string]: V`.
	#[serde(
		default,
		deserialize_with = "one_or_many",
		skip_serializing_if = "Option::is_none"
	)]
	pub index_signature: Option<Vec<CallSignature>>,
	/// Provenance used for "view source" links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sources: Option<Vec<Source>>,
	/// Default value expression of a parameter.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<String>,
}

impl DeclarationNode {
	/// Create a bare node with only a name and kind.
	pub fn new(name: impl Into<String>, kind: Option<DeclarationKind>) -> Self {
		Self {
			name: name.into(),
			original_name: None,
			kind,
			comment: None,
			signatures: None,
			parameters: None,
			children: None,
			type_: None,
			index_signature: None,
			sources: None,
			default_value: None,
		}
	}

	/// Whether the node has the given kind.
	pub fn is_kind(&self, kind: &DeclarationKind) -> bool {
		self.kind.as_ref() == Some(kind)
	}

	/// Child declarations, empty when absent.
	pub fn members(&self) -> &[DeclarationNode] {
		self.children.as_deref().unwrap_or_default()
	}

	/// Parameters, empty when absent.
	pub fn params(&self) -> &[Parameter] {
		self.parameters.as_deref().unwrap_or_default()
	}

	/// Index signatures, empty when absent.
	pub fn index_entries(&self) -> &[CallSignature] {
		self.index_signature.as_deref().unwrap_or_default()
	}

	/// First call signature, if any.
	pub fn first_signature(&self) -> Option<&CallSignature> {
		self.signatures.as_deref().and_then(<[_]>::first)
	}

	/// Inline declaration carried by a reflection type.
	pub fn inline_declaration(&self) -> Option<&DeclarationNode> {
		self.type_.as_ref().and_then(TypeExpr::declaration)
	}

	/// A `Property` whose type is an inline reflection.
	pub fn is_reflected_property(&self) -> bool {
		self.is_kind(&DeclarationKind::Property)
			&& matches!(self.type_, Some(TypeExpr::Reflection { .. }))
	}

	/// Whether the node's type is an inline object literal with member declarations.
	///
	/// Presence of `children` is what counts; an empty member list is still an object.
	pub fn has_object_type(&self) -> bool {
		self.inline_declaration()
			.is_some_and(|declaration| declaration.children.is_some())
	}

	/// First declared source location.
	pub fn first_source(&self) -> Option<&Source> {
		self.sources.as_deref().and_then(<[_]>::first)
	}

	/// Short comment text, ignoring empty strings.
	pub fn short_text(&self) -> Option<&str> {
		self.comment.as_ref().and_then(Comment::short)
	}
}

/// Kinds the renderer distinguishes. Everything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclarationKind {
	/// Class constructor.
	Constructor,
	/// Class or interface method.
	Method,
	/// Class or interface property.
	Property,
	/// Interface declaration.
	Interface,
	/// `type X = ...` alias.
	TypeAlias,
	/// Call signature of a function-like declaration.
	CallSignature,
	/// Any other kind string.
	Other(String),
}

impl DeclarationKind {
	/// The kind string as it appears in the document.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Constructor => "Constructor",
			Self::Method => "Method",
			Self::Property => "Property",
			Self::Interface => "Interface",
			Self::TypeAlias => "Type alias",
			Self::CallSignature => "Call signature",
			Self::Other(kind) => kind,
		}
	}

	/// Member kinds are indexed under `parent.name` rather than their bare name.
	pub fn is_member(&self) -> bool {
		matches!(self, Self::Constructor | Self::Method | Self::Property)
	}
}

impl From<String> for DeclarationKind {
	fn from(kind: String) -> Self {
		match kind.as_str() {
			"Constructor" => Self::Constructor,
			"Method" => Self::Method,
			"Property" => Self::Property,
			"Interface" => Self::Interface,
			"Type alias" => Self::TypeAlias,
			"Call signature" => Self::CallSignature,
			_ => Self::Other(kind),
		}
	}
}

impl From<DeclarationKind> for String {
	fn from(kind: DeclarationKind) -> Self {
		match kind {
			DeclarationKind::Other(kind) => kind,
			known => known.as_str().to_string(),
		}
	}
}

/// Doc comment attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	/// First paragraph of the comment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_text: Option<String>,
	/// Remaining comment text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
}

impl Comment {
	/// Short text, `None` when absent or empty.
	pub fn short(&self) -> Option<&str> {
		non_empty(self.short_text.as_deref())
	}

	/// Long text if present, else the short text.
	pub fn description(&self) -> Option<&str> {
		non_empty(self.text.as_deref()).or_else(|| self.short())
	}
}

fn non_empty(text: Option<&str>) -> Option<&str> {
	text.filter(|text| !text.is_empty())
}

/// Source location of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
	/// Path relative to the documented project root.
	pub file_name: String,
	/// One-indexed line number.
	pub line: u32,
}

/// Older extractors emit `indexSignature` as an array, newer ones as a single object.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<CallSignature>>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum OneOrMany {
		Many(Vec<CallSignature>),
		One(Box<CallSignature>),
	}

	Ok(
		Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
			OneOrMany::Many(entries) => entries,
			OneOrMany::One(entry) => vec![*entry],
		}),
	)
}
