use serde::Serialize;

use super::Resolver;
use crate::model::{DeclarationNode, Parameter, TypeExpr};

/// Name assigned to parameters whose given and original names are both synthesized.
pub const OPTIONS_NAME: &str = "options";

/// One row of a member group: a parameter, property or index signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
	/// Display name.
	pub name: String,
	/// Resolved type string.
	#[serde(rename = "type")]
	pub type_name: String,
	/// Comment text, preferring the long form.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether this is the named-options parameter.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub is_options: bool,
	/// Whether the parameter declares a default value.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub optional: bool,
	/// Fields of an object-typed parameter.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub properties: Vec<ParameterDescriptor>,
}

/// Names starting with `__` are generated by the compiler.
pub fn is_readable_name(name: &str) -> bool {
	!name.starts_with("__")
}

/// Pick the name shown for a parameter: its own name, else its original name, else
/// `options`.
pub fn display_parameter_name(param: &Parameter) -> &str {
	if is_readable_name(&param.name) {
		return &param.name;
	}
	match param.original_name.as_deref() {
		Some(original) if is_readable_name(original) => original,
		_ => OPTIONS_NAME,
	}
}

impl Resolver<'_, '_> {
	/// Plain descriptor for a property, child or parameter.
	pub fn parameter(&self, node: &DeclarationNode) -> ParameterDescriptor {
		ParameterDescriptor {
			name: self.text(&node.name).into_owned(),
			type_name: self.resolve_type(node, false),
			description: node
				.comment
				.as_ref()
				.and_then(|comment| comment.description())
				.map(|text| self.text(text).into_owned()),
			is_options: false,
			optional: false,
			properties: Vec::new(),
		}
	}

	/// Descriptors for the first call signature's parameters.
	///
	/// Reflected properties (`foo: (a: A) => B`) read the signature from their inline type.
	pub fn parameters(&self, node: &DeclarationNode) -> Vec<ParameterDescriptor> {
		if node.is_reflected_property()
			&& let Some(declaration) = node.inline_declaration()
		{
			return self.parameters(declaration);
		}

		let Some(signature) = node.first_signature() else {
			return Vec::new();
		};
		signature
			.params()
			.iter()
			.map(|param| self.signature_parameter(param))
			.collect()
	}

	fn signature_parameter(&self, param: &Parameter) -> ParameterDescriptor {
		let name = display_parameter_name(param);
		let properties = match &param.type_ {
			Some(TypeExpr::Reflection {
				declaration: Some(declaration),
				..
			}) => self.members(declaration),
			Some(TypeExpr::Reference { name, .. }) => self
				.index()
				.node(name)
				.map(|referenced| self.members(referenced))
				.unwrap_or_default(),
			_ => Vec::new(),
		};

		ParameterDescriptor {
			name: self.text(name).into_owned(),
			is_options: name == OPTIONS_NAME,
			optional: param
				.default_value
				.as_deref()
				.is_some_and(|value| !value.is_empty()),
			properties,
			..self.parameter(param)
		}
	}

	fn members(&self, node: &DeclarationNode) -> Vec<ParameterDescriptor> {
		node.members()
			.iter()
			.map(|child| self.parameter(child))
			.collect()
	}

	/// Index signatures (named `[key: K]`) followed by child declarations.
	pub fn object_properties(&self, node: &DeclarationNode) -> Vec<ParameterDescriptor> {
		node.index_entries()
			.iter()
			.map(|entry| ParameterDescriptor {
				name: self.index_parameter_string(entry),
				..self.parameter(entry)
			})
			.chain(node.members().iter().map(|child| self.parameter(child)))
			.collect()
	}
}
