//! Flat lookup table over a declaration tree.
//!
//! Member declarations (constructors, methods, properties) are keyed by their dotted
//! `parent.name`; everything else by its bare name. Computed names are kept in the index
//! itself instead of being written back into the tree.

use std::collections::HashMap;

use crate::core_api::error::{ApiBoxError, Result};
use crate::model::DeclarationNode;

/// Deepest nesting of `children` accepted before the tree is reported as malformed.
///
/// Each level costs serde_json two containers (the node and its `children` array), so this
/// stays well under its recursion limit of 128 and the check is reachable from parsed text.
pub const MAX_DEPTH: usize = 48;

/// Options controlling index construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
	/// Reject documents where two declarations compute the same key.
	pub strict_keys: bool,
}

/// A visited declaration together with its computed names.
#[derive(Debug, Clone)]
pub struct IndexEntry<'a> {
	key: String,
	parent_name: Option<String>,
	path: String,
	node: &'a DeclarationNode,
}

impl<'a> IndexEntry<'a> {
	/// Lookup key, which doubles as the declaration's anchor id.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Dotted `parent.name` for member kinds.
	pub fn full_name(&self) -> Option<&str> {
		self.parent_name.as_ref().map(|_| self.key.as_str())
	}

	/// Key of the enclosing declaration for member kinds.
	pub fn parent_name(&self) -> Option<&str> {
		self.parent_name.as_deref()
	}

	/// Anchor id: the full name when set, else the plain name.
	pub fn id(&self) -> &str {
		self.full_name().unwrap_or(&self.node.name)
	}

	/// Path of plain names from the root, used in error messages.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The indexed declaration.
	pub fn node(&self) -> &'a DeclarationNode {
		self.node
	}
}

/// Lookup table built from one document, borrowed for the duration of a render.
#[derive(Debug, Clone)]
pub struct DeclarationIndex<'a> {
	/// Every visited node in pre-order, shadowed ones included.
	entries: Vec<IndexEntry<'a>>,
	/// Key to the position of the last node that computed it.
	by_key: HashMap<String, usize>,
	/// Node address to its position in `entries`.
	by_node: HashMap<usize, usize>,
	options: IndexOptions,
}

fn node_addr(node: &DeclarationNode) -> usize {
	std::ptr::from_ref(node) as usize
}

impl<'a> DeclarationIndex<'a> {
	/// Build a lenient index; colliding keys keep the last node in traversal order.
	pub fn build(root: &'a DeclarationNode) -> Result<Self> {
		Self::build_with(root, IndexOptions::default())
	}

	/// Build an index with explicit options.
	pub fn build_with(root: &'a DeclarationNode, options: IndexOptions) -> Result<Self> {
		let mut index = Self {
			entries: Vec::new(),
			by_key: HashMap::new(),
			by_node: HashMap::new(),
			options,
		};
		index.visit(root, None, "", 0)?;
		tracing::debug!(
			nodes = index.entries.len(),
			keys = index.by_key.len(),
			"built declaration index"
		);
		Ok(index)
	}

	fn visit(
		&mut self,
		node: &'a DeclarationNode,
		parent: Option<&str>,
		parent_path: &str,
		depth: usize,
	) -> Result<()> {
		let path = if parent_path.is_empty() {
			node.name.clone()
		} else {
			format!("{parent_path}.{}", node.name)
		};
		if depth > MAX_DEPTH {
			return Err(ApiBoxError::malformed(
				path,
				format!("declaration tree nests deeper than {MAX_DEPTH} levels"),
			));
		}

		let is_member = node.kind.as_ref().is_some_and(|kind| kind.is_member());
		let (key, parent_name) = match parent {
			Some(parent) if is_member => (format!("{parent}.{}", node.name), Some(parent.to_string())),
			_ => (node.name.clone(), None),
		};

		let position = self.entries.len();
		if let Some(previous) = self.by_key.insert(key.clone(), position) {
			if self.options.strict_keys {
				return Err(ApiBoxError::malformed(
					path,
					format!(
						"duplicate declaration key `{key}` (first declared at {})",
						self.entries[previous].path
					),
				));
			}
			tracing::debug!(
				key = %key,
				shadowed = %self.entries[previous].path,
				by = %path,
				"declaration key overwritten"
			);
		}
		self.by_node.insert(node_addr(node), position);
		self.entries.push(IndexEntry {
			key: key.clone(),
			parent_name,
			path: path.clone(),
			node,
		});

		for child in node.members() {
			self.visit(child, Some(&key), &path, depth + 1)?;
		}
		Ok(())
	}

	/// Look up a declaration by key.
	pub fn get(&self, key: &str) -> Option<&IndexEntry<'a>> {
		self.by_key.get(key).map(|&position| &self.entries[position])
	}

	/// Look up the declaration node for a key.
	pub fn node(&self, key: &str) -> Option<&'a DeclarationNode> {
		self.get(key).map(IndexEntry::node)
	}

	/// Computed names for a node of the indexed tree, found by identity.
	pub fn entry_for(&self, node: &DeclarationNode) -> Option<&IndexEntry<'a>> {
		self.by_node
			.get(&node_addr(node))
			.map(|&position| &self.entries[position])
	}

	/// Reachable entries (one per key) in traversal order.
	pub fn iter(&self) -> impl Iterator<Item = &IndexEntry<'a>> {
		self.entries
			.iter()
			.enumerate()
			.filter(|(position, entry)| self.by_key.get(&entry.key) == Some(position))
			.map(|(_, entry)| entry)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.by_key.len()
	}

	/// Whether the index holds no keys.
	pub fn is_empty(&self) -> bool {
		self.by_key.is_empty()
	}

	/// Options the index was built with.
	pub fn options(&self) -> IndexOptions {
		self.options
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::model::{DeclarationKind, Document};

	fn fixture() -> Document {
		serde_json::from_value(json!({
			"name": "client",
			"children": [{
				"name": "Client",
				"kindString": "Class",
				"children": [
					{"name": "constructor", "kindString": "Constructor"},
					{"name": "fetch", "kindString": "Method"},
					{"name": "timeout", "kindString": "Property"}
				]
			}, {
				"name": "Options",
				"kindString": "Interface",
				"children": [{"name": "retries", "kindString": "Property"}]
			}]
		}))
		.unwrap()
	}

	#[test]
	fn member_kinds_use_dotted_keys() {
		let doc = fixture();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		let keys: Vec<&str> = index.iter().map(IndexEntry::key).collect();
		assert_eq!(
			keys,
			vec![
				"client",
				"Client",
				"Client.constructor",
				"Client.fetch",
				"Client.timeout",
				"Options",
				"Options.retries",
			]
		);
		let fetch = index.get("Client.fetch").unwrap();
		assert_eq!(fetch.full_name(), Some("Client.fetch"));
		assert_eq!(fetch.parent_name(), Some("Client"));
		assert_eq!(fetch.id(), "Client.fetch");

		let client = index.get("Client").unwrap();
		assert_eq!(client.full_name(), None);
		assert_eq!(client.id(), "Client");
	}

	#[test]
	fn members_nest_under_member_keys() {
		let doc: Document = serde_json::from_value(json!({
			"name": "root",
			"children": [{
				"name": "A",
				"kindString": "Class",
				"children": [{
					"name": "b",
					"kindString": "Property",
					"children": [{"name": "c", "kindString": "Property"}]
				}]
			}]
		}))
		.unwrap();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		assert_eq!(index.get("A.b.c").unwrap().parent_name(), Some("A.b"));
	}

	#[test]
	fn input_tree_is_not_modified() {
		let doc = fixture();
		let before = doc.clone();
		let _index = DeclarationIndex::build(doc.root()).unwrap();
		assert_eq!(doc, before);
	}

	#[test]
	fn collisions_keep_last_node_when_lenient() {
		let doc: Document = serde_json::from_value(json!({
			"name": "root",
			"children": [
				{"name": "Shared", "kindString": "Interface"},
				{"name": "Shared", "kindString": "Type alias"}
			]
		}))
		.unwrap();
		let index = DeclarationIndex::build(doc.root()).unwrap();
		assert_eq!(index.len(), 2);
		assert_eq!(
			index.node("Shared").unwrap().kind,
			Some(DeclarationKind::TypeAlias)
		);
		// The shadowed node keeps its own entry, reachable by identity.
		let shadowed = &doc.root().members()[0];
		assert_eq!(index.entry_for(shadowed).unwrap().key(), "Shared");
		assert_eq!(index.iter().filter(|entry| entry.key() == "Shared").count(), 1);
	}

	#[test]
	fn collisions_are_rejected_when_strict() {
		let doc: Document = serde_json::from_value(json!({
			"name": "root",
			"children": [
				{"name": "Shared", "kindString": "Interface"},
				{"name": "Shared", "kindString": "Type alias"}
			]
		}))
		.unwrap();
		let err = DeclarationIndex::build_with(doc.root(), IndexOptions { strict_keys: true })
			.unwrap_err();
		match err {
			ApiBoxError::MalformedInput { path, reason } => {
				assert_eq!(path, "root.Shared");
				assert!(reason.contains("duplicate declaration key `Shared`"), "{reason}");
			}
			other => panic!("expected MalformedInput, got {other:?}"),
		}
	}

	#[test]
	fn overly_deep_trees_are_malformed() {
		let mut node = DeclarationNode::new("leaf", None);
		for level in 0..=MAX_DEPTH {
			let mut parent = DeclarationNode::new(format!("n{level}"), None);
			parent.children = Some(vec![node]);
			node = parent;
		}
		let err = DeclarationIndex::build(&node).unwrap_err();
		match err {
			ApiBoxError::MalformedInput { path, .. } => assert!(path.ends_with(".leaf"), "{path}"),
			other => panic!("expected MalformedInput, got {other:?}"),
		}
	}

	#[test]
	fn deep_documents_parse_but_fail_to_index() {
		let mut node = json!({"name": "leaf"});
		for level in (0..=MAX_DEPTH).rev() {
			node = json!({"name": format!("n{level}"), "children": [node]});
		}
		let doc = Document::parse(&node.to_string()).unwrap();
		let err = DeclarationIndex::build(doc.root()).unwrap_err();
		match err {
			ApiBoxError::MalformedInput { path, reason } => {
				assert!(path.starts_with("n0.n1."), "{path}");
				assert!(path.ends_with(".leaf"), "{path}");
				assert!(reason.contains("deeper than 48 levels"), "{reason}");
			}
			other => panic!("expected MalformedInput, got {other:?}"),
		}
	}

	#[test]
	fn root_member_without_parent_uses_plain_name() {
		let root = DeclarationNode::new("fetch", Some(DeclarationKind::Method));
		let index = DeclarationIndex::build(&root).unwrap();
		let entry = index.get("fetch").unwrap();
		assert_eq!(entry.full_name(), None);
	}
}
