use serde::{Deserialize, Serialize};

use super::DeclarationNode;

/// A type expression, discriminated by the JSON `type` tag.
///
/// Tags the resolver has no rendering for land in [`TypeExpr::Unknown`], which resolves
/// to `any`. Serializing an `Unknown` keeps only its tag and type arguments. Every variant
/// carries `typeArguments`, since extractors attach them to more than references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTypeExpr", into = "RawTypeExpr")]
pub enum TypeExpr {
	/// Built-in type such as `string`.
	Intrinsic {
		/// Type name.
		name: String,
		/// Rendered as `[name]`.
		is_array: bool,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
	/// `A | B | C`.
	Union {
		/// Member types in declaration order.
		types: Vec<TypeExpr>,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
	/// Named reference to another declaration.
	Reference {
		/// Referenced declaration name.
		name: String,
		/// Qualified name used for link ids.
		full_name: Option<String>,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
	/// Inline object or function type.
	Reflection {
		/// The anonymous declaration describing the type.
		declaration: Option<Box<DeclarationNode>>,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
	/// `"literal"`.
	StringLiteral {
		/// Literal contents without quotes.
		value: String,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
	/// Any tag without a dedicated variant.
	Unknown {
		/// The original `type` tag.
		tag: String,
		/// Explicit generic arguments.
		type_arguments: Option<Vec<TypeExpr>>,
	},
}

impl TypeExpr {
	/// Shorthand for a non-array intrinsic type.
	pub fn intrinsic(name: impl Into<String>) -> Self {
		Self::Intrinsic {
			name: name.into(),
			is_array: false,
			type_arguments: None,
		}
	}

	/// Shorthand for a reference without type arguments.
	pub fn reference(name: impl Into<String>) -> Self {
		Self::Reference {
			name: name.into(),
			full_name: None,
			type_arguments: None,
		}
	}

	/// The JSON tag for this expression.
	pub fn tag(&self) -> &str {
		match self {
			Self::Intrinsic { .. } => "intrinsic",
			Self::Union { .. } => "union",
			Self::Reference { .. } => "reference",
			Self::Reflection { .. } => "reflection",
			Self::StringLiteral { .. } => "stringLiteral",
			Self::Unknown { tag, .. } => tag,
		}
	}

	/// Inline declaration of a reflection type.
	pub fn declaration(&self) -> Option<&DeclarationNode> {
		match self {
			Self::Reflection { declaration, .. } => declaration.as_deref(),
			_ => None,
		}
	}

	/// Explicit generic arguments, whatever the tag.
	pub fn type_arguments(&self) -> Option<&[TypeExpr]> {
		match self {
			Self::Intrinsic { type_arguments, .. }
			| Self::Union { type_arguments, .. }
			| Self::Reference { type_arguments, .. }
			| Self::Reflection { type_arguments, .. }
			| Self::StringLiteral { type_arguments, .. }
			| Self::Unknown { type_arguments, .. } => type_arguments.as_deref(),
		}
	}
}

/// Flat wire shape shared by all tags.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeExpr {
	#[serde(rename = "type")]
	tag: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	name: Option<String>,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	is_array: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	types: Option<Vec<TypeExpr>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	full_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	type_arguments: Option<Vec<TypeExpr>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	declaration: Option<Box<DeclarationNode>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	value: Option<String>,
}

fn required<T>(field: Option<T>, tag: &str, name: &str) -> Result<T, String> {
	field.ok_or_else(|| format!("`{tag}` type without `{name}`"))
}

impl TryFrom<RawTypeExpr> for TypeExpr {
	type Error = String;

	fn try_from(raw: RawTypeExpr) -> Result<Self, Self::Error> {
		let tag = raw.tag.as_str();
		let type_arguments = raw.type_arguments;
		Ok(match tag {
			// Some extractor versions misspell the intrinsic tag.
			"intrinsic" | "instrinct" => Self::Intrinsic {
				name: required(raw.name, tag, "name")?,
				is_array: raw.is_array,
				type_arguments,
			},
			"union" => Self::Union {
				types: required(raw.types, tag, "types")?,
				type_arguments,
			},
			"reference" => Self::Reference {
				name: required(raw.name, tag, "name")?,
				full_name: raw.full_name,
				type_arguments,
			},
			"reflection" => Self::Reflection {
				declaration: raw.declaration,
				type_arguments,
			},
			"stringLiteral" => Self::StringLiteral {
				value: required(raw.value, tag, "value")?,
				type_arguments,
			},
			_ => Self::Unknown {
				tag: raw.tag,
				type_arguments,
			},
		})
	}
}

impl From<TypeExpr> for RawTypeExpr {
	fn from(expr: TypeExpr) -> Self {
		match expr {
			TypeExpr::Intrinsic {
				name,
				is_array,
				type_arguments,
			} => Self {
				tag: "intrinsic".into(),
				name: Some(name),
				is_array,
				type_arguments,
				..Self::default()
			},
			TypeExpr::Union {
				types,
				type_arguments,
			} => Self {
				tag: "union".into(),
				types: Some(types),
				type_arguments,
				..Self::default()
			},
			TypeExpr::Reference {
				name,
				full_name,
				type_arguments,
			} => Self {
				tag: "reference".into(),
				name: Some(name),
				full_name,
				type_arguments,
				..Self::default()
			},
			TypeExpr::Reflection {
				declaration,
				type_arguments,
			} => Self {
				tag: "reflection".into(),
				declaration,
				type_arguments,
				..Self::default()
			},
			TypeExpr::StringLiteral {
				value,
				type_arguments,
			} => Self {
				tag: "stringLiteral".into(),
				value: Some(value),
				type_arguments,
				..Self::default()
			},
			TypeExpr::Unknown {
				tag,
				type_arguments,
			} => Self {
				tag,
				type_arguments,
				..Self::default()
			},
		}
	}
}
