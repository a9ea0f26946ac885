use super::{html, markdown};
use crate::core_api::error::Result;
use crate::resolve::{LinkStyle, RenderArgs};

/// Output format for rendered API boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
	/// HTML markup, one `div.api` block per declaration.
	Html,
	/// Markdown with a heading and one table per member group.
	Markdown,
	/// The render arguments serialized as JSON.
	///
	/// The text fields are meant for HTML templates. They carry HTML links and
	/// HTML-escaped text, so `"GET"` arrives as `&quot;GET&quot;`. Pair this format
	/// with [`LinkStyle::Plain`] to get raw text instead.
	Json,
}

impl RenderFormat {
	/// Link style the resolver should use to feed this format.
	pub fn link_style(self) -> LinkStyle {
		match self {
			Self::Html | Self::Json => LinkStyle::Html,
			Self::Markdown => LinkStyle::Markdown,
		}
	}

	fn separator(self) -> &'static str {
		match self {
			Self::Html => "\n",
			Self::Markdown => "\n\n---\n\n",
			Self::Json => ",\n",
		}
	}
}

/// Turns render arguments into output text.
#[derive(Debug, Clone)]
pub struct Renderer {
	/// Target output format.
	pub format: RenderFormat,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// Create a Markdown renderer.
	pub fn new() -> Self {
		Self {
			format: RenderFormat::Markdown,
		}
	}

	/// Select the output format to render.
	pub fn with_format(mut self, format: RenderFormat) -> Self {
		self.format = format;
		self
	}

	/// Render a single API box.
	pub fn render(&self, args: &RenderArgs) -> Result<String> {
		Ok(match self.format {
			RenderFormat::Html => html::render_box(args),
			RenderFormat::Markdown => markdown::render_box(args),
			RenderFormat::Json => serde_json::to_string_pretty(args)?,
		})
	}

	/// Render several API boxes. JSON output becomes an array when there is more than one.
	pub fn render_all(&self, all: &[RenderArgs]) -> Result<String> {
		if self.format == RenderFormat::Json && all.len() != 1 {
			return Ok(serde_json::to_string_pretty(all)?);
		}
		let rendered = all
			.iter()
			.map(|args| self.render(args))
			.collect::<Result<Vec<_>>>()?;
		Ok(rendered.join(self.format.separator()))
	}
}
