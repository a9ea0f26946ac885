//! HTML API-box markup.
//!
//! Text fields of [`RenderArgs`] arrive pre-escaped from an HTML-style resolver and are
//! inserted as-is. Only the raw source fields are escaped here.

use std::fmt::Write;

use super::utils::escape_html;
use crate::resolve::{Group, RenderArgs};

/// Render one declaration as an `api` block.
pub fn render_box(args: &RenderArgs) -> String {
	let mut out = String::new();
	let id = &args.id;

	out.push_str("<div class=\"api new-api-box\">\n");
	out.push_str("  <div class=\"api-heading\">\n");
	let _ = writeln!(
		out,
		"    <h3 title=\"{}\" class=\"title-api selflink\" id=\"{id}\">",
		args.name
	);
	let _ = writeln!(
		out,
		"      <a href=\"#{id}\" class=\"link primary\">{}</a>",
		args.signature
	);
	out.push_str("    </h3>\n");
	out.push_str("    <div class=\"subtext-api\">\n");
	if let (Some(url), Some(filepath), Some(lineno)) =
		(&args.source_url, &args.filepath, args.lineno)
	{
		let _ = writeln!(
			out,
			"      <a class=\"src-code link secondary\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">({}, line {lineno})</a>",
			escape_html(url),
			escape_html(filepath)
		);
	}
	out.push_str("    </div>\n");
	out.push_str("  </div>\n");

	out.push_str("  <div class=\"api-body\">\n");
	let _ = writeln!(
		out,
		"    <div class=\"desc\">{}</div>",
		args.summary.as_deref().unwrap_or_default()
	);
	if let Some(type_name) = &args.type_name {
		let _ = writeln!(out, "    <div class=\"type\">{type_name}</div>");
	}
	for group in &args.groups {
		render_group(&mut out, group);
	}
	out.push_str("  </div>\n");
	out.push_str("</div>\n");
	out
}

fn render_group(out: &mut String, group: &Group) {
	let _ = writeln!(out, "    <h4 class=\"subheading\">{}</h4>", group.kind.label());
	out.push_str("    <dl class=\"args\">\n");
	for member in &group.members {
		let _ = writeln!(
			out,
			"      <dt><span class=\"name\">{}</span><span class=\"type\">{}</span></dt>",
			member.name, member.type_name
		);
		let _ = writeln!(
			out,
			"      <dd>{}</dd>",
			member.description.as_deref().unwrap_or_default()
		);
	}
	out.push_str("    </dl>\n");
}
