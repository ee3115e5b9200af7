pub mod changelog_service;
pub mod changelog_writer;
