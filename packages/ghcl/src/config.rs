/// Environment variables the command line falls back to.
pub const OWNER_VAR: &str = "GITHUB_REPOSITORY_OWNER";
pub const REPO_VAR: &str = "GITHUB_REPOSITORY_NAME";
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Where the changelog comes from and how to authenticate against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub token: String,
    /// Alternate API endpoint, e.g. a GitHub Enterprise `/api/v3/` URL.
    /// Empty means the public `https://api.github.com`.
    pub base_url: String,
}

impl GitHubConfig {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
            base_url: base_url.into(),
        }
    }
}

