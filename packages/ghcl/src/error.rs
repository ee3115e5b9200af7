use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure to obtain the release cutoff or the changelog entries from a
/// [`ChangelogService`](crate::ports::changelog_service::ChangelogService).
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Could not build GitHub client: {0}")]
    Client(#[source] octocrab::Error),
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error("Could not write changelog: {0}")]
    Write(#[from] std::io::Error),
}
