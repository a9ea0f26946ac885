//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use apibox::Document;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A small SDK surface: a class with a method taking named options, the options
/// interface, a string-literal union alias and an index-signature alias.
pub fn sdk_json() -> Value {
	let string = json!({"type": "intrinsic", "name": "string"});
	let number = json!({"type": "intrinsic", "name": "number"});
	json!({
		"name": "my-sdk",
		"children": [{
			"name": "Client",
			"kindString": "Class",
			"comment": {"shortText": "HTTP client."},
			"sources": [{"fileName": "src/client.ts", "line": 10}],
			"children": [{
				"name": "fetch",
				"kindString": "Method",
				"sources": [{"fileName": "src/client.ts", "line": 42}],
				"signatures": [{
					"name": "fetch",
					"kindString": "Call signature",
					"comment": {
						"shortText": "Fetch a resource.",
						"text": "Resolves with the response body."
					},
					"parameters": [{
						"name": "url",
						"kindString": "Parameter",
						"type": string,
						"comment": {"shortText": "Absolute URL."}
					}, {
						"name": "__namedParameters",
						"originalName": "__namedParameters",
						"kindString": "Parameter",
						"type": {"type": "reference", "name": "RequestOptions"}
					}],
					"type": {
						"type": "reference",
						"name": "Promise",
						"typeArguments": [string]
					}
				}]
			}, {
				"name": "timeout",
				"kindString": "Property",
				"type": number
			}]
		}, {
			"name": "RequestOptions",
			"kindString": "Interface",
			"comment": {"shortText": "Options for <code>fetch</code> & friends."},
			"sources": [{"fileName": "src/options.ts", "line": 3}],
			"children": [{
				"name": "timeout",
				"kindString": "Property",
				"type": number,
				"comment": {"shortText": "Milliseconds."}
			}, {
				"name": "retries",
				"kindString": "Property",
				"type": number
			}]
		}, {
			"name": "Method",
			"kindString": "Type alias",
			"comment": {"shortText": "HTTP verbs."},
			"type": {"type": "union", "types": [
				{"type": "stringLiteral", "value": "GET"},
				{"type": "stringLiteral", "value": "POST"}
			]}
		}, {
			"name": "Headers",
			"kindString": "Type alias",
			"type": {"type": "reflection", "declaration": {
				"name": "__type",
				"indexSignature": {
					"name": "__index",
					"parameters": [{"name": "header", "type": string}],
					"type": string
				}
			}}
		}]
	})
}

/// Parse the SDK fixture.
pub fn sdk_document() -> Document {
	serde_json::from_value(sdk_json()).unwrap()
}

/// Write JSON text into a fresh temp directory, returning the directory guard and path.
pub fn write_document(contents: &str) -> (TempDir, PathBuf) {
	let temp_dir = TempDir::new().expect("tempdir");
	let path = temp_dir.path().join("api.json");
	fs::write(&path, contents).expect("write document");
	(temp_dir, path)
}
