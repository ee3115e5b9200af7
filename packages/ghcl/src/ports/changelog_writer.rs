use crate::domain::models::ChangelogEntry;

/// This port abstracts the output of the changelog.
pub trait ChangelogWriter {
    /// Write the entries in the order given. For example, this could print them to stdout.
    fn write_changelog(&self, entries: &[ChangelogEntry]) -> std::io::Result<()>;
}

/// Writes one line per entry using its `Display` form.
pub(crate) fn write_entries(
    mut out: impl std::io::Write,
    entries: &[ChangelogEntry],
) -> std::io::Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}
