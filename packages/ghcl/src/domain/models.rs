use std::{fmt, time::UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// One merged pull request worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    number: u64,
    body: String,
    username: String,
    merged_at: DateTime<Utc>,
}

impl ChangelogEntry {
    pub fn new(
        number: u64,
        body: impl Into<String>,
        username: impl Into<String>,
        merged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            body: body.into(),
            username: username.into(),
            merged_at,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn merged_at(&self) -> DateTime<Utc> {
        self.merged_at
    }

    /// First non-blank line of the description, if any.
    pub fn summary(&self) -> Option<&str> {
        self.body
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

impl fmt::Display for ChangelogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{} @{}", self.number, self.username)?;
        if let Some(summary) = self.summary() {
            write!(f, ": {summary}")?;
        }
        Ok(())
    }
}

/// Cutoff used when the repository has never been released: everything is newer.
pub fn unreleased_cutoff() -> DateTime<Utc> {
    DateTime::<Utc>::from(UNIX_EPOCH)
}
