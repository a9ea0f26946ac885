//! Output layers that turn [`RenderArgs`](crate::resolve::RenderArgs) into text.

/// Format selection and the renderer entry point.
pub mod core;
/// HTML API-box markup.
pub mod html;
/// Markdown sections with member tables.
pub mod markdown;
/// Escaping helpers shared by the renderers and the resolver.
pub mod utils;

pub use self::core::{RenderFormat, Renderer};
