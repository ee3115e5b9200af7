use std::{fs::File, io::BufWriter, path::PathBuf};

use crate::{
    domain::models::ChangelogEntry,
    ports::changelog_writer::{write_entries, ChangelogWriter},
};

pub struct FileChangelogWriter {
    pub file_path: PathBuf,
}

impl FileChangelogWriter {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl ChangelogWriter for FileChangelogWriter {
    fn write_changelog(&self, entries: &[ChangelogEntry]) -> std::io::Result<()> {
        let file = File::create(&self.file_path)?;
        write_entries(BufWriter::new(file), entries)
    }
}
