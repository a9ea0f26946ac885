use std::borrow::Cow;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
	if !text.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 16);
	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}
	Cow::Owned(escaped)
}

/// Make text safe inside a Markdown table cell.
pub fn escape_table_cell(text: &str) -> String {
	text.replace('|', "\\|")
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}
