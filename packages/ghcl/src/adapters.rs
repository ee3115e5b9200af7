pub mod file_changelog_writer;
pub mod octocrab;
pub mod stdout_changelog_writer;
