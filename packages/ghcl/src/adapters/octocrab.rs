use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::{
    models::pulls::PullRequest,
    params::{self, pulls::Sort},
    Octocrab, Page,
};
use once_cell::sync::OnceCell;

use crate::{
    config::GitHubConfig,
    domain::models::{unreleased_cutoff, ChangelogEntry},
    error::RetrievalError,
    ports::changelog_service::ChangelogService,
};

const PER_PAGE: u8 = 100;

/// [`ChangelogService`] backed by the GitHub REST API.
///
/// The HTTP client is built on first use, so an unusable base URL is reported by the
/// first operation rather than by the constructor.
pub struct GitHubChangelogService {
    config: GitHubConfig,
    client: OnceCell<Octocrab>,
}

impl GitHubChangelogService {
    /// An empty `base_url` targets the public GitHub API.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::from_config(GitHubConfig::new(owner, repo, token, base_url))
    }

    pub fn from_config(config: GitHubConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn client(&self) -> Result<&Octocrab, RetrievalError> {
        self.client.get_or_try_init(|| {
            let mut builder = Octocrab::builder().personal_token(self.config.token.clone());
            if !self.config.base_url.is_empty() {
                builder = builder
                    .base_uri(self.config.base_url.as_str())
                    .map_err(RetrievalError::Client)?;
            }
            builder.build().map_err(RetrievalError::Client)
        })
    }

    /// Tells "no releases yet" apart from "no such repository": both answer 404 on the
    /// latest release endpoint.
    async fn repository_exists(&self, client: &Octocrab) -> Result<bool, RetrievalError> {
        match client
            .repos(&self.config.owner, &self.config.repo)
            .get()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if is_not_found(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl ChangelogService for GitHubChangelogService {
    async fn fetch_release_time(&self) -> Result<DateTime<Utc>, RetrievalError> {
        let client = self.client()?;
        let latest = client
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_latest()
            .await;

        match latest {
            Ok(release) => release
                .created_at
                .or(release.published_at)
                .ok_or_else(|| {
                    RetrievalError::MalformedResponse(format!(
                        "release {} has no creation time",
                        release.tag_name
                    ))
                }),
            Err(err) if is_not_found(&err) => {
                if self.repository_exists(client).await? {
                    tracing::debug!(
                        owner = %self.config.owner,
                        repo = %self.config.repo,
                        "no releases, including all merged pull requests"
                    );
                    Ok(unreleased_cutoff())
                } else {
                    Err(err.into())
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch_changelog_entries_until(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ChangelogEntry>, RetrievalError> {
        let client = self.client()?;
        let mut page: Page<PullRequest> = client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Closed)
            .sort(Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let mut entries = Vec::new();
        let mut page_number = 1;
        loop {
            tracing::debug!(
                page = page_number,
                pulls = page.items.len(),
                "fetched closed pull requests"
            );

            let records = page.take_items().into_iter().map(PullRecord::from);
            if let PageScan::ReachedCutoff = scan_page(records, cutoff, &mut entries) {
                break;
            }

            match client.get_page::<PullRequest>(&page.next).await? {
                Some(next_page) => page = next_page,
                None => break,
            }
            page_number += 1;
        }

        newest_merge_first(&mut entries);
        Ok(entries)
    }
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// The parts of a closed pull request needed to page through history.
#[derive(Debug, Clone, PartialEq)]
struct PullRecord {
    number: u64,
    body: Option<String>,
    username: Option<String>,
    merged_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRecord {
    fn from(pull: PullRequest) -> Self {
        Self {
            number: pull.number,
            body: pull.body,
            username: pull.user.map(|user| user.login),
            merged_at: pull.merged_at,
            updated_at: pull.updated_at,
        }
    }
}

impl PullRecord {
    /// `None` for pull requests closed without merging.
    fn into_entry(self) -> Option<ChangelogEntry> {
        let merged_at = self.merged_at?;
        Some(ChangelogEntry::new(
            self.number,
            self.body.unwrap_or_default(),
            self.username.unwrap_or_default(),
            merged_at,
        ))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PageScan {
    Continue,
    ReachedCutoff,
}

/// Collects the merged pull requests newer than `cutoff` from one page ordered by
/// `updated_at` descending.
///
/// A pull request is updated when merged, so once a record was last updated at or
/// before the cutoff every following record was merged before it as well.
fn scan_page(
    records: impl IntoIterator<Item = PullRecord>,
    cutoff: DateTime<Utc>,
    entries: &mut Vec<ChangelogEntry>,
) -> PageScan {
    for record in records {
        if record.updated_at.is_some_and(|updated| updated <= cutoff) {
            tracing::trace!(number = record.number, "reached release cutoff");
            return PageScan::ReachedCutoff;
        }

        let number = record.number;
        match record.into_entry() {
            Some(entry) if entry.merged_at() > cutoff => entries.push(entry),
            Some(_) => tracing::trace!(number, "skipping pull request merged before release"),
            None => tracing::trace!(number, "skipping pull request closed without merge"),
        }
    }

    PageScan::Continue
}

/// Pages are ordered by last update, which a comment after merging can move ahead of
/// newer merges. Stable, so equal merge times keep the listing order.
fn newest_merge_first(entries: &mut [ChangelogEntry]) {
    entries.sort_by(|a, b| b.merged_at().cmp(&a.merged_at()));
}
