mod cli;

use clap::Parser;
use color_eyre::{eyre::Context, Result};
use ghcl::{
    adapters::{
        file_changelog_writer::FileChangelogWriter,
        stdout_changelog_writer::StdoutChangelogWriter,
    },
    build, GitHubChangelogService,
};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let service = GitHubChangelogService::from_config(cli.github_config());
    tracing::info!(owner = %cli.owner, repo = %cli.repo, "building changelog");

    let built = match &cli.output {
        Some(path) => build(&service, &FileChangelogWriter::new(path)).await,
        None => build(&service, &StdoutChangelogWriter).await,
    };
    built.wrap_err_with(|| format!("failed to build changelog for {}/{}", cli.owner, cli.repo))?;

    Ok(())
}
