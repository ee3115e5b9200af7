//! Lists the pull requests merged into a GitHub repository since its latest release.
//!
//! The [`ChangelogService`](ports::changelog_service::ChangelogService) port reports the
//! release cutoff and the merged pull requests; [`fetch_changelog_entries`] and [`build`]
//! assemble the changelog from any implementation of it.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::octocrab::GitHubChangelogService;
pub use config::GitHubConfig;
pub use domain::{
    changelog::{build, entries_merged_after, fetch_changelog_entries},
    models::ChangelogEntry,
};
pub use error::{Error, Result, RetrievalError};
pub use ports::{changelog_service::ChangelogService, changelog_writer::ChangelogWriter};
