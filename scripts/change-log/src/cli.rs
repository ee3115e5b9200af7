use std::path::PathBuf;

use clap::Parser;
use ghcl::{
    config::{API_URL_VAR, OWNER_VAR, REPO_VAR, TOKEN_VAR},
    GitHubConfig,
};

/// Lists the pull requests merged since the latest GitHub release.
#[derive(Debug, Parser)]
#[command(name = "change-log", version, about)]
pub struct Cli {
    /// Owner or organization of the repository
    #[arg(short, long, env = OWNER_VAR)]
    pub owner: String,

    /// Name of the repository
    #[arg(short, long, env = REPO_VAR)]
    pub repo: String,

    /// GitHub access token
    #[arg(short, long, env = TOKEN_VAR, hide_env_values = true)]
    pub token: String,

    /// Alternate API base URL, e.g. for GitHub Enterprise. Empty uses api.github.com
    #[arg(long, env = API_URL_VAR, default_value = "", value_name = "URL")]
    pub url: String,

    /// Write the changelog to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn github_config(&self) -> GitHubConfig {
        GitHubConfig::new(&self.owner, &self.repo, &self.token, &self.url)
    }
}
