use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DeclarationNode;
use crate::core_api::error::{ApiBoxError, Result};

/// A parsed declaration-tree document.
///
/// The document is never mutated after parsing, so one instance can back any number of
/// render calls, including concurrent ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
	root: DeclarationNode,
}

impl Document {
	/// Wrap an already-built root node.
	pub fn new(root: DeclarationNode) -> Self {
		Self { root }
	}

	/// Parse a document from JSON text.
	pub fn parse(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Parse a document from a reader.
	pub fn from_reader(reader: impl Read) -> Result<Self> {
		Ok(serde_json::from_reader(reader)?)
	}

	/// Read and parse a document from disk.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let file = File::open(path)?;
		tracing::debug!(path = %path.display(), "loading declaration document");
		Self::from_reader(BufReader::new(file))
	}

	/// Root declaration of the tree.
	pub fn root(&self) -> &DeclarationNode {
		&self.root
	}
}

impl FromStr for Document {
	type Err = ApiBoxError;

	fn from_str(json: &str) -> Result<Self> {
		Self::parse(json)
	}
}
