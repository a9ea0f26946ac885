//! Render API reference boxes from TypeScript declaration-tree JSON.
//!
//! A document is parsed once into a [`Document`], indexed by [`index::DeclarationIndex`],
//! resolved into [`RenderArgs`] by [`resolve::Resolver`] and turned into HTML, Markdown
//! or JSON by [`Renderer`]. [`ApiBox`] wires these together behind a builder.

/// Core API: the `ApiBox` facade, configuration, errors and listing.
pub mod core_api;

/// Name index over a declaration tree.
pub mod index;

/// Tracing subscriber setup.
pub mod logging;

/// Declaration-tree data model.
pub mod model;

/// Output renderers.
pub mod render;

/// Type and parameter resolution.
pub mod resolve;

pub use crate::core_api::{
	ApiBox, ApiBoxError, ListItem, RenderFormat, Renderer, Result, SearchDomain, SearchOptions,
	SourceLinkConfig, SourceLocation, UnresolvedType,
};
pub use crate::model::{DeclarationKind, DeclarationNode, Document, TypeExpr};
pub use crate::resolve::{LinkStyle, RenderArgs};
