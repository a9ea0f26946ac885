use serde::Serialize;

use super::Resolver;
use super::params::ParameterDescriptor;
use crate::core_api::error::{ApiBoxError, Result};
use crate::model::{DeclarationKind, DeclarationNode};

/// Heading of a member group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKind {
	/// Positional parameters.
	Arguments,
	/// Fields of the named-options parameter.
	Options,
	/// Properties of an interface or object type alias.
	Properties,
}

impl GroupKind {
	/// Display heading.
	pub fn label(self) -> &'static str {
		match self {
			Self::Arguments => "Arguments",
			Self::Options => "Options",
			Self::Properties => "Properties",
		}
	}
}

/// A titled list of members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
	/// Group heading.
	#[serde(rename = "name")]
	pub kind: GroupKind,
	/// Rows in display order.
	pub members: Vec<ParameterDescriptor>,
}

impl Group {
	fn new(kind: GroupKind, members: Vec<ParameterDescriptor>) -> Self {
		Self { kind, members }
	}
}

/// Everything a rendering layer needs to draw one API box.
///
/// Text fields (`id`, `name`, `type`, `signature`, `summary` and member text) are written
/// in the resolver's link style, so with HTML links they are already escaped. `repo` and
/// `filepath` are raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderArgs {
	/// Anchor id: full name for members, else the plain name.
	pub id: String,
	/// Declared name.
	pub name: String,
	/// Scalar type, only for type aliases that are not object literals.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_name: Option<String>,
	/// One-line signature.
	pub signature: String,
	/// First paragraph of documentation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// Member groups in fixed order: Arguments, Options, Properties.
	pub groups: Vec<Group>,
	/// Repository identifier used in the source link.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repo: Option<String>,
	/// Prefixed source file path.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filepath: Option<String>,
	/// Source line number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lineno: Option<u32>,
	/// Full "view source" URL, when both a repo and a file path are known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source_url: Option<String>,
}

impl RenderArgs {
	/// Find a group by kind.
	pub fn group(&self, kind: GroupKind) -> Option<&Group> {
		self.groups.iter().find(|group| group.kind == kind)
	}
}

impl Resolver<'_, '_> {
	/// Build render arguments for the declaration indexed under `name`.
	pub fn render_args(&self, name: &str) -> Result<RenderArgs> {
		let entry = self
			.index()
			.get(name)
			.ok_or_else(|| ApiBoxError::UnknownDeclaration(name.to_string()))?;
		Ok(self.build_args(entry.id(), entry.node()))
	}

	/// Build render arguments for a node of the indexed tree.
	///
	/// Nodes that are not part of the index (for example inline declarations) use their
	/// plain name as id.
	pub fn render_node(&self, node: &DeclarationNode) -> RenderArgs {
		let id = self
			.index()
			.entry_for(node)
			.map_or(node.name.as_str(), |entry| entry.id());
		self.build_args(id, node)
	}

	fn build_args(&self, id: &str, node: &DeclarationNode) -> RenderArgs {
		let parameters = self.parameters(node);
		let (options, arguments): (Vec<_>, Vec<_>) = parameters
			.iter()
			.cloned()
			.partition(|param| param.is_options);

		let mut groups = Vec::new();
		if !arguments.is_empty() {
			groups.push(Group::new(GroupKind::Arguments, arguments));
		}
		// The options parameter itself is not listed, only its fields.
		if let Some(options) = options.into_iter().next() {
			groups.push(Group::new(GroupKind::Options, options.properties));
		}
		if node.is_kind(&DeclarationKind::Interface) {
			groups.push(Group::new(GroupKind::Properties, self.object_properties(node)));
		}

		let mut type_name = None;
		if node.is_kind(&DeclarationKind::TypeAlias) {
			match node.inline_declaration() {
				Some(declaration) if declaration.children.is_some() => groups.push(Group::new(
					GroupKind::Properties,
					self.object_properties(declaration),
				)),
				_ => type_name = Some(self.resolve_type(node, false)),
			}
		}

		let source = node.first_source();
		let filepath = source.map(|source| format!("{}{}", self.links.filepath_prefix, source.file_name));
		let lineno = source.map(|source| source.line);
		let repo = self.links.resolved_repo();
		let source_url = match (&repo, &filepath, lineno) {
			(Some(repo), Some(filepath), Some(lineno)) => {
				Some(self.links.source_url(repo, filepath, lineno))
			}
			_ => None,
		};

		RenderArgs {
			id: self.text(id).into_owned(),
			name: self.text(&node.name).into_owned(),
			type_name,
			signature: self.signature(node, &parameters),
			summary: summary(node).map(|text| self.text(text).into_owned()),
			groups,
			repo,
			filepath,
			lineno,
			source_url,
		}
	}

	/// `name(a, b): Return`, or just the name when the declaration is not callable.
	pub fn signature(&self, node: &DeclarationNode, parameters: &[ParameterDescriptor]) -> String {
		let target = if node.is_reflected_property() {
			node.inline_declaration().unwrap_or(node)
		} else {
			node
		};

		let name = self.text(&node.name);
		let Some(signature) = target.first_signature() else {
			return name.into_owned();
		};

		let names = parameters
			.iter()
			.map(|param| param.name.as_str())
			.collect::<Vec<_>>()
			.join(", ");
		let mut rendered = format!("{name}({names})");
		if !node.is_kind(&DeclarationKind::Constructor) {
			let return_type = self.resolve_type(signature, true);
			if return_type != "void" {
				rendered.push_str(": ");
				rendered.push_str(&return_type);
			}
		}
		rendered
	}
}

/// Own short text, else the first signature's short text.
fn summary(node: &DeclarationNode) -> Option<&str> {
	node.short_text()
		.or_else(|| node.first_signature().and_then(DeclarationNode::short_text))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::core_api::config::SourceLinkConfig;
	use crate::index::DeclarationIndex;
	use crate::model::Document;
	use crate::resolve::LinkStyle;

	fn signature(
		name: &str,
		params: serde_json::Value,
		returns: serde_json::Value,
	) -> serde_json::Value {
		json!({
			"name": name,
			"kindString": "Call signature",
			"parameters": params,
			"type": returns
		})
	}

	fn doc() -> Document {
		let string = json!({"type": "intrinsic", "name": "string"});
		let void = json!({"type": "intrinsic", "name": "void"});
		let client = json!({"type": "reference", "name": "Client"});
		serde_json::from_value(json!({
			"name": "api",
			"children": [{
				"name": "Client",
				"kindString": "Class",
				"sources": [{"fileName": "src/client.ts", "line": 10}],
				"children": [{
					"name": "constructor",
					"kindString": "Constructor",
					"signatures": [signature("new Client", json!([{"name": "url", "type": string}]), client)]
				}, {
					"name": "fetch",
					"kindString": "Method",
					"comment": {"shortText": "Fetch a resource."},
					"sources": [{"fileName": "src/client.ts", "line": 42}],
					"signatures": [signature("fetch", json!([{"name": "url", "type": string}]), void.clone())]
				}, {
					"name": "get",
					"kindString": "Method",
					"signatures": [{
						"name": "get",
						"kindString": "Call signature",
						"comment": {"shortText": "Read a key."},
						"parameters": [{"name": "key", "type": string}],
						"type": string
					}]
				}, {
					"name": "onChange",
					"kindString": "Property",
					"type": {"type": "reflection", "declaration": {
						"name": "__type",
						"signatures": [signature("__call", json!([{"name": "value", "type": string}]), json!({
							"type": "intrinsic", "name": "boolean"
						}))]
					}}
				}, {
					"name": "watch",
					"kindString": "Method",
					"signatures": [signature("watch", json!([
						{"name": "key", "type": string},
						{"name": "__namedParameters", "originalName": "options", "type": {
							"type": "reflection",
							"declaration": {"name": "__type", "children": [
								{"name": "immediate", "type": {"type": "intrinsic", "name": "boolean"}},
								{"name": "deep", "type": {"type": "intrinsic", "name": "boolean"}}
							]}
						}}
					]), void)]
				}]
			}, {
				"name": "Options",
				"kindString": "Interface",
				"children": [{"name": "timeout", "type": {"type": "intrinsic", "name": "number"}}]
			}, {
				"name": "Headers",
				"kindString": "Type alias",
				"type": {"type": "reflection", "declaration": {
					"name": "__type",
					"indexSignature": [{
						"name": "__index",
						"parameters": [{"name": "name", "type": string}],
						"type": string
					}],
					"children": [{"name": "accept", "type": string}]
				}}
			}, {
				"name": "Mode",
				"kindString": "Type alias",
				"type": {"type": "union", "types": [
					{"type": "stringLiteral", "value": "fast"},
					{"type": "stringLiteral", "value": "safe"}
				]}
			}]
		}))
		.unwrap()
	}

	fn plain<'i, 'a>(index: &'i DeclarationIndex<'a>) -> Resolver<'i, 'a> {
		Resolver::new(index).with_link_style(LinkStyle::Plain)
	}

	#[test]
	fn method_signature_omits_void_return() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Client.fetch").unwrap();
		assert_eq!(args.signature, "fetch(url)");
		assert_eq!(args.id, "Client.fetch");
		assert_eq!(args.summary.as_deref(), Some("Fetch a resource."));
		assert_eq!(args.type_name, None);
		assert_eq!(args.groups.len(), 1);
		assert_eq!(args.groups[0].kind, GroupKind::Arguments);
		assert_eq!(args.groups[0].members[0].name, "url");
		assert_eq!(args.groups[0].members[0].type_name, "string");
	}

	#[test]
	fn method_signature_includes_non_void_return() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Client.get").unwrap();
		assert_eq!(args.signature, "get(key): string");
		assert_eq!(args.summary.as_deref(), Some("Read a key."));
	}

	#[test]
	fn constructor_signature_never_has_return_type() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Client.constructor").unwrap();
		assert_eq!(args.signature, "constructor(url)");
	}

	#[test]
	fn reflected_property_uses_inline_signature() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Client.onChange").unwrap();
		assert_eq!(args.signature, "onChange(value): boolean");
		assert_eq!(args.groups[0].members[0].name, "value");
	}

	#[test]
	fn options_group_lists_fields_of_options_parameter() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Client.watch").unwrap();
		assert_eq!(args.signature, "watch(key, options)");

		let kinds: Vec<GroupKind> = args.groups.iter().map(|group| group.kind).collect();
		assert_eq!(kinds, vec![GroupKind::Arguments, GroupKind::Options]);

		let arguments = args.group(GroupKind::Arguments).unwrap();
		assert_eq!(arguments.members.len(), 1);
		assert_eq!(arguments.members[0].name, "key");

		let options: Vec<&str> = args
			.group(GroupKind::Options)
			.unwrap()
			.members
			.iter()
			.map(|member| member.name.as_str())
			.collect();
		assert_eq!(options, vec!["immediate", "deep"]);
	}

	#[test]
	fn interface_lists_properties() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Options").unwrap();
		assert_eq!(args.signature, "Options");
		assert_eq!(args.groups.len(), 1);
		let group = &args.groups[0];
		assert_eq!(group.kind, GroupKind::Properties);
		assert_eq!(group.members.len(), 1);
		assert_eq!(group.members[0].name, "timeout");
		assert_eq!(group.members[0].type_name, "number");
	}

	#[test]
	fn object_alias_lists_properties_without_type() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Headers").unwrap();
		assert_eq!(args.type_name, None);
		let names: Vec<&str> = args.groups[0]
			.members
			.iter()
			.map(|member| member.name.as_str())
			.collect();
		assert_eq!(names, vec!["[name: string]", "accept"]);
	}

	#[test]
	fn scalar_alias_has_type_string() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Mode").unwrap();
		assert_eq!(args.type_name.as_deref(), Some("\"fast\" | \"safe\""));
		assert!(args.groups.is_empty());
	}

	#[test]
	fn unknown_declaration_is_an_error() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let err = plain(&index).render_args("Client.missing").unwrap_err();
		assert!(matches!(err, ApiBoxError::UnknownDeclaration(name) if name == "Client.missing"));
	}

	#[test]
	fn source_fields_use_prefix_and_repo() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let resolver = plain(&index)
			.with_source_links(SourceLinkConfig::new("packages/core/").with_repo("acme/client"));
		let args = resolver.render_args("Client.fetch").unwrap();
		assert_eq!(args.filepath.as_deref(), Some("packages/core/src/client.ts"));
		assert_eq!(args.lineno, Some(42));
		assert_eq!(
			args.source_url.as_deref(),
			Some("https://github.com/acme/client/blob/master/packages/core/src/client.ts#L42")
		);

		let args = resolver.render_args("Options").unwrap();
		assert_eq!(args.filepath, None);
		assert_eq!(args.source_url, None);
	}

	#[test]
	fn render_node_finds_id_by_identity() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let fetch = &doc.root().members()[0].members()[1];
		assert_eq!(plain(&index).render_node(fetch).id, "Client.fetch");
	}

	#[test]
	fn serializes_with_original_field_names() {
		let doc = doc();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let args = plain(&index).render_args("Options").unwrap();
		assert_eq!(
			serde_json::to_value(&args).unwrap(),
			json!({
				"id": "Options",
				"name": "Options",
				"signature": "Options",
				"groups": [{
					"name": "Properties",
					"members": [{"name": "timeout", "type": "number"}]
				}]
			})
		);
	}
}
