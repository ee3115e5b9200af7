use crate::{
    domain::models::ChangelogEntry,
    ports::changelog_writer::{write_entries, ChangelogWriter},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutChangelogWriter;

impl ChangelogWriter for StdoutChangelogWriter {
    fn write_changelog(&self, entries: &[ChangelogEntry]) -> std::io::Result<()> {
        write_entries(std::io::stdout().lock(), entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn writes_to_stdout() {
        let merged_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let entries = [ChangelogEntry::new(1, "add 1-click apps", "sammy", merged_at)];

        StdoutChangelogWriter.write_changelog(&entries).unwrap();
    }
}
