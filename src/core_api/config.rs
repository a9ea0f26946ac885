use std::env;

/// Environment variable consulted when no repository is configured explicitly.
pub const REPO_ENV: &str = "APIBOX_REPO";

/// Settings for the "view source" link attached to each rendered declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLinkConfig {
	/// Prepended verbatim to each source file name.
	pub filepath_prefix: String,
	/// Repository identifier such as `owner/name`.
	/// If None, `APIBOX_REPO` is used when set.
	pub repo: Option<String>,
	/// Branch or revision embedded in source URLs.
	pub branch: String,
}

impl Default for SourceLinkConfig {
	fn default() -> Self {
		Self {
			filepath_prefix: String::new(),
			repo: None,
			branch: "master".to_string(),
		}
	}
}

impl SourceLinkConfig {
	/// Create a configuration with the given file path prefix.
	pub fn new(filepath_prefix: impl Into<String>) -> Self {
		Self {
			filepath_prefix: filepath_prefix.into(),
			..Self::default()
		}
	}

	/// Set the repository identifier.
	pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
		self.repo = Some(repo.into());
		self
	}

	/// Set the branch used in source URLs.
	pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
		self.branch = branch.into();
		self
	}

	/// Effective repository, falling back to the environment.
	pub fn resolved_repo(&self) -> Option<String> {
		if let Some(ref repo) = self.repo {
			return Some(repo.clone());
		}
		env::var(REPO_ENV).ok().filter(|repo| !repo.trim().is_empty())
	}

	/// Build the source URL for a file path and line.
	pub fn source_url(&self, repo: &str, filepath: &str, lineno: u32) -> String {
		format!(
			"https://github.com/{repo}/blob/{}/{filepath}#L{lineno}",
			self.branch
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_repo_wins() {
		let config = SourceLinkConfig::new("src/").with_repo("acme/widgets");
		assert_eq!(config.resolved_repo().as_deref(), Some("acme/widgets"));
	}

	#[test]
	fn source_url_uses_branch() {
		let config = SourceLinkConfig::new("").with_branch("main");
		assert_eq!(
			config.source_url("acme/widgets", "src/client.ts", 12),
			"https://github.com/acme/widgets/blob/main/src/client.ts#L12"
		);
	}
}
