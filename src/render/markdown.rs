use super::utils::{escape_html, escape_table_cell};
use crate::resolve::{Group, RenderArgs};

/// Render one declaration as a Markdown section.
pub fn render_box(args: &RenderArgs) -> String {
	let mut blocks = vec![format!(
		"<a id=\"{}\"></a>\n\n### {}",
		escape_html(&args.id),
		args.signature
	)];

	if let (Some(filepath), Some(lineno)) = (&args.filepath, args.lineno) {
		let location = format!("{filepath}, line {lineno}");
		blocks.push(match &args.source_url {
			Some(url) => format!("[{location}]({url})"),
			None => format!("_{location}_"),
		});
	}
	if let Some(summary) = &args.summary {
		blocks.push(summary.clone());
	}
	if let Some(type_name) = &args.type_name {
		blocks.push(format!("**Type:** {type_name}"));
	}
	blocks.extend(args.groups.iter().map(render_group));

	let mut out = blocks.join("\n\n");
	out.push('\n');
	out
}

fn render_group(group: &Group) -> String {
	let mut table = format!(
		"#### {}\n\n| Name | Type | Description |\n| --- | --- | --- |",
		group.kind.label()
	);
	for member in &group.members {
		table.push_str(&format!(
			"\n| `{}` | {} | {} |",
			member.name,
			escape_table_cell(&member.type_name),
			escape_table_cell(member.description.as_deref().unwrap_or_default())
		));
	}
	table
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::resolve::{GroupKind, ParameterDescriptor};

	#[test]
	fn renders_type_alias_section() {
		let args = RenderArgs {
			id: "Mode".into(),
			name: "Mode".into(),
			type_name: Some("\"fast\" | \"safe\"".into()),
			signature: "Mode".into(),
			summary: Some("Execution mode.".into()),
			groups: Vec::new(),
			repo: None,
			filepath: Some("src/mode.ts".into()),
			lineno: Some(3),
			source_url: None,
		};
		assert_eq!(
			render_box(&args),
			"<a id=\"Mode\"></a>\n\n### Mode\n\n_src/mode.ts, line 3_\n\nExecution mode.\n\n**Type:** \"fast\" | \"safe\"\n"
		);
	}

	#[test]
	fn renders_group_tables() {
		let args = RenderArgs {
			id: "Options".into(),
			name: "Options".into(),
			type_name: None,
			signature: "Options".into(),
			summary: None,
			groups: vec![Group {
				kind: GroupKind::Properties,
				members: vec![ParameterDescriptor {
					name: "mode".into(),
					type_name: "\"fast\" | \"safe\"".into(),
					description: Some("How to run.\nDefaults to fast.".into()),
					is_options: false,
					optional: false,
					properties: Vec::new(),
				}],
			}],
			repo: None,
			filepath: None,
			lineno: None,
			source_url: None,
		};
		assert_eq!(
			render_box(&args),
			"<a id=\"Options\"></a>\n\n### Options\n\n#### Properties\n\n| Name | Type | Description |\n| --- | --- | --- |\n| `mode` | \"fast\" \\| \"safe\" | How to run. Defaults to fast. |\n"
		);
	}

	#[test]
	fn anchor_ids_are_attribute_escaped() {
		let args = RenderArgs {
			id: "\"><script>".into(),
			name: "odd".into(),
			type_name: None,
			signature: "odd".into(),
			summary: None,
			groups: Vec::new(),
			repo: None,
			filepath: None,
			lineno: None,
			source_url: None,
		};
		assert_eq!(
			render_box(&args),
			"<a id=\"&quot;&gt;&lt;script&gt;\"></a>\n\n### odd\n"
		);
	}
}
