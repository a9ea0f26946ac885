//! CLI entrypoint.

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use apibox::logging::init_tracing;
use apibox::{
	ApiBox, LinkStyle, ListItem, RenderFormat, SearchDomain, SearchOptions, SourceLocation,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use regex::Regex;

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Available search domains accepted by `--search-spec`.
enum SearchSpec {
	/// Match against index keys.
	Name,
	/// Match against comment text.
	Doc,
	/// Match against kind strings.
	Kind,
}

impl From<SearchSpec> for SearchDomain {
	fn from(spec: SearchSpec) -> Self {
		match spec {
			SearchSpec::Name => Self::NAMES,
			SearchSpec::Doc => Self::DOCS,
			SearchSpec::Kind => Self::KINDS,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Output formats for `render`.
enum OutputFormat {
	/// API-box HTML markup.
	Html,
	/// Markdown sections.
	Markdown,
	/// Render arguments as JSON.
	Json,
}

impl From<OutputFormat> for RenderFormat {
	fn from(format: OutputFormat) -> Self {
		match format {
			OutputFormat::Html => Self::Html,
			OutputFormat::Markdown => Self::Markdown,
			OutputFormat::Json => Self::Json,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Output formats for `list`.
enum ListFormat {
	/// Aligned columns.
	Text,
	/// JSON array of list items.
	Json,
}

#[derive(Args, Clone)]
struct CommonArgs {
	/// Declaration-tree JSON file
	doc: PathBuf,

	/// Prefix prepended to every source file name
	#[arg(long, default_value = "")]
	filepath_prefix: String,

	/// Reject documents where two declarations compute the same name
	#[arg(long, default_value_t = false)]
	strict: bool,
}

#[derive(Args, Clone)]
struct RenderArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Declaration names to render, in order
	#[arg(required = true, value_name = "NAME")]
	names: Vec<String>,

	/// Select the output format
	#[arg(short = 'f', long, value_enum, default_value = "markdown")]
	format: OutputFormat,

	/// Repository (`owner/name`) for source links; defaults to `APIBOX_REPO`
	#[arg(long)]
	repo: Option<String>,

	/// Branch used in source links
	#[arg(long, default_value = "master")]
	branch: String,

	/// Render type references as plain names instead of links
	#[arg(long, default_value_t = false)]
	no_links: bool,
}

#[derive(Args, Clone)]
struct ListArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Optional search query used to filter the listing
	#[arg(short = 's', long)]
	search: Option<String>,

	/// Comma-separated list of search domains (name, doc, kind). Defaults to name, doc.
	#[arg(
		short = 'S',
		long = "search-spec",
		value_delimiter = ',',
		value_name = "DOMAIN[,DOMAIN...]",
		default_value = "name,doc"
	)]
	search_spec: Vec<SearchSpec>,

	/// Execute the search in a case sensitive manner.
	#[arg(short = 'c', long, default_value_t = false)]
	search_case_sensitive: bool,

	/// Select the output format
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	format: ListFormat,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

#[derive(Args, Clone)]
struct RawArgs {
	/// Declaration-tree JSON file
	doc: PathBuf,

	/// Declaration name to print
	name: String,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Render API boxes for the named declarations.
	Render(RenderArgs),
	/// Produce a listing of indexed declarations.
	List(ListArgs),
	/// Print the raw JSON of one declaration.
	Raw(RawArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the apibox CLI.
struct Cli {
	#[command(subcommand)]
	command: Command,
}

/// Build an ApiBox instance configured with common CLI knobs.
fn build_apibox(common: &CommonArgs) -> ApiBox {
	ApiBox::new()
		.with_filepath_prefix(common.filepath_prefix.clone())
		.with_strict_keys(common.strict)
}

/// Render the requested declarations to stdout.
fn run_render(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
	let mut apibox = build_apibox(&args.common)
		.with_render_format(args.format.into())
		.with_branch(args.branch.clone());
	if let Some(repo) = &args.repo {
		apibox = apibox.with_repo(repo.clone());
	}
	if args.no_links {
		apibox = apibox.with_link_style(LinkStyle::Plain);
	}

	let doc = apibox.load(&args.common.doc)?;
	let output = apibox.render(&doc, args.names.as_slice())?;
	println!("{}", output.trim_end());
	Ok(())
}

/// Resolve the active search domains specified by the CLI flags.
fn search_domains(specs: &[SearchSpec]) -> SearchDomain {
	specs
		.iter()
		.fold(SearchDomain::empty(), |acc, spec| acc | SearchDomain::from(*spec))
}

/// Execute the list flow and print a structured item summary.
fn run_list(args: &ListArgs) -> Result<(), Box<dyn Error>> {
	let mut search_options: Option<SearchOptions> = None;
	if let Some(query) = args.search.as_deref() {
		let trimmed = query.trim();
		if trimmed.is_empty() {
			println!("Search query is empty; nothing to do.");
			return Ok(());
		}
		let mut options = SearchOptions::new(trimmed);
		options.case_sensitive = args.search_case_sensitive;
		options.domains = search_domains(&args.search_spec);
		options.ensure_domains();
		search_options = Some(options);
	}

	let apibox = build_apibox(&args.common);
	let doc = apibox.load(&args.common.doc)?;
	let listings = apibox.list(&doc, search_options.as_ref())?;

	if args.format == ListFormat::Json {
		println!("{}", serde_json::to_string_pretty(&listings)?);
		return Ok(());
	}

	if listings.is_empty() {
		match &search_options {
			Some(options) => println!("No matches found for \"{}\".", options.query),
			None => println!("No declarations found."),
		}
		return Ok(());
	}

	let highlighter = match &search_options {
		Some(options) if should_color_output(args.no_color) => Some(options.to_regex()?),
		_ => None,
	};
	let domains = search_options
		.as_ref()
		.map_or(SearchDomain::empty(), |options| options.domains);
	print!(
		"{}",
		format_listing(&listings, highlighter.as_ref().map(|regex| (regex, domains)))
	);
	Ok(())
}

/// Lay out list items as aligned `kind key location` columns.
///
/// With a highlighter, matches are marked only in the columns its domains search: the
/// key for `NAMES`, the kind for `KINDS`.
fn format_listing(listings: &[ListItem], highlighter: Option<(&Regex, SearchDomain)>) -> String {
	let label_width = listings
		.iter()
		.map(|entry| entry.kind_label().len())
		.max()
		.unwrap_or(0);
	let key_width = listings
		.iter()
		.map(|entry| entry.key.len())
		.max()
		.unwrap_or(0);

	let mut buffer = String::new();
	for entry in listings {
		let location = format_source_location(entry.source.as_ref());
		let mut label = format!("{:<label_width$}", entry.kind_label());
		let mut key = format!("{:<key_width$}", entry.key);
		if let Some((regex, domains)) = highlighter {
			if domains.contains(SearchDomain::KINDS) && entry.kind.is_some() {
				label = highlight_matches(&label, regex);
			}
			if domains.contains(SearchDomain::NAMES) {
				key = highlight_matches(&key, regex);
			}
		}
		buffer.push_str(&format!("{label} {key} {location}\n"));
	}
	buffer
}

/// Format a source location for display.
fn format_source_location(source: Option<&SourceLocation>) -> String {
	source.map_or_else(|| "-".to_string(), SourceLocation::to_compact_string)
}

/// Print one declaration's JSON to stdout.
fn run_raw(args: &RawArgs) -> Result<(), Box<dyn Error>> {
	let apibox = ApiBox::new();
	let doc = apibox.load(&args.doc)?;
	println!("{}", apibox.raw_json(&doc, &args.name)?);
	Ok(())
}

fn should_color_output(no_color: bool) -> bool {
	if no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stdout().is_terminal()
}

/// Highlight all matches of the query regex in bright green and bold.
fn highlight_matches(text: &str, regex: &Regex) -> String {
	let mut result = String::with_capacity(text.len() * 2);
	let mut last_end = 0;

	for mat in regex.find_iter(text) {
		result.push_str(&text[last_end..mat.start()]);
		result.push_str(&mat.as_str().bright_green().bold().to_string());
		last_end = mat.end();
	}

	result.push_str(&text[last_end..]);
	result
}

fn main() {
	init_tracing();
	let cli = Cli::parse();

	if let Err(e) = run(cli) {
		eprintln!("{e}");
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	match cli.command {
		Command::Render(args) => run_render(&args),
		Command::List(args) => run_list(&args),
		Command::Raw(args) => run_raw(&args),
	}
}
