use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{domain::models::ChangelogEntry, error::RetrievalError};

/// This port abstracts where releases and merged pull requests come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangelogService: Send + Sync {
    /// Creation time of the most recent release.
    ///
    /// A repository without releases yields the Unix epoch, not an error.
    async fn fetch_release_time(&self) -> Result<DateTime<Utc>, RetrievalError>;

    /// Merged pull requests more recent than `cutoff`, newest first.
    ///
    /// Implementations may stop paging once they reach the cutoff and may also return
    /// entries at or before it; callers re-filter. Unmerged pull requests are never returned.
    async fn fetch_changelog_entries_until(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ChangelogEntry>, RetrievalError>;
}
