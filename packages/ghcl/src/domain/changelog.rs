use chrono::{DateTime, Utc};

use crate::{
    domain::models::ChangelogEntry,
    error::{Result, RetrievalError},
    ports::{changelog_service::ChangelogService, changelog_writer::ChangelogWriter},
};

/// Fetches the release cutoff, then the entries merged after it.
///
/// Either fetch failing ends the call with that error; the entries are only requested
/// once the cutoff is known. The returned entries keep the service's order.
#[tracing::instrument(skip_all)]
pub async fn fetch_changelog_entries<S>(
    service: &S,
) -> Result<Vec<ChangelogEntry>, RetrievalError>
where
    S: ChangelogService + ?Sized,
{
    let cutoff = service.fetch_release_time().await?;
    tracing::debug!(%cutoff, "fetched release cutoff");

    let fetched = service.fetch_changelog_entries_until(cutoff).await?;
    let fetched_count = fetched.len();

    let entries = entries_merged_after(fetched, cutoff);
    tracing::debug!(
        fetched = fetched_count,
        kept = entries.len(),
        "filtered changelog entries"
    );

    Ok(entries)
}

/// Keeps the entries merged strictly after `cutoff`, in their original order.
pub fn entries_merged_after(
    entries: Vec<ChangelogEntry>,
    cutoff: DateTime<Utc>,
) -> Vec<ChangelogEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.merged_at() > cutoff)
        .collect()
}

/// Assembles the changelog and hands it to `writer`.
pub async fn build<S, W>(service: &S, writer: &W) -> Result<()>
where
    S: ChangelogService + ?Sized,
    W: ChangelogWriter + ?Sized,
{
    let entries = fetch_changelog_entries(service).await?;
    writer.write_changelog(&entries)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io};

    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::{error::Error, ports::changelog_service::MockChangelogService};

    fn at_minute(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 12, minute, 0).unwrap()
    }

    fn entry(number: u64, merged_at: DateTime<Utc>) -> ChangelogEntry {
        ChangelogEntry::new(number, format!("change {number}"), "digitalocean", merged_at)
    }

    fn service_returning(
        cutoff: DateTime<Utc>,
        entries: Vec<ChangelogEntry>,
    ) -> MockChangelogService {
        let mut service = MockChangelogService::new();
        service
            .expect_fetch_release_time()
            .once()
            .return_once(move || Ok(cutoff));
        service
            .expect_fetch_changelog_entries_until()
            .withf(move |requested| *requested == cutoff)
            .once()
            .return_once(move |_| Ok(entries));
        service
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: RefCell<Vec<ChangelogEntry>>,
        fail: bool,
    }

    impl ChangelogWriter for RecordingWriter {
        fn write_changelog(&self, entries: &[ChangelogEntry]) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.borrow_mut().extend_from_slice(entries);
            Ok(())
        }
    }

    #[test_case(29, false; "merged before the cutoff")]
    #[test_case(30, false; "merged exactly at the cutoff")]
    #[test_case(31, true; "merged after the cutoff")]
    fn cutoff_is_exclusive(merged_minute: u32, kept: bool) {
        let entries = vec![entry(1, at_minute(merged_minute))];

        let filtered = entries_merged_after(entries, at_minute(30));

        assert_eq!(filtered.len(), usize::from(kept));
    }

    #[test]
    fn filter_preserves_order() {
        let entries = vec![
            entry(5, at_minute(50)),
            entry(4, at_minute(10)),
            entry(3, at_minute(40)),
            entry(2, at_minute(45)),
            entry(1, at_minute(20)),
        ];

        let filtered = entries_merged_after(entries, at_minute(30));

        let numbers: Vec<_> = filtered.iter().map(ChangelogEntry::number).collect();
        assert_eq!(numbers, vec![5, 3, 2]);
    }

    #[tokio::test]
    async fn keeps_only_entries_merged_after_release() {
        // given
        let now = Utc::now();
        let newer = ChangelogEntry::new(
            2,
            "this should be in the changelog",
            "digitalocean",
            now - Duration::minutes(30),
        );
        let older = ChangelogEntry::new(
            1,
            "this should NOT be in the changelog",
            "digitalocean",
            now - Duration::minutes(90),
        );
        let service =
            service_returning(now - Duration::minutes(60), vec![newer.clone(), older]);

        // when
        let entries = fetch_changelog_entries(&service).await.unwrap();

        // then
        assert_eq!(entries, vec![newer]);
    }

    #[tokio::test]
    async fn over_fetched_entries_are_dropped() {
        // given
        let service = service_returning(
            at_minute(30),
            vec![
                entry(3, at_minute(45)),
                entry(2, at_minute(30)),
                entry(1, at_minute(15)),
            ],
        );

        // when
        let entries = fetch_changelog_entries(&service).await.unwrap();

        // then
        assert_eq!(entries, vec![entry(3, at_minute(45))]);
    }

    #[tokio::test]
    async fn no_entries_is_an_empty_changelog() {
        let service = service_returning(at_minute(0), vec![]);

        let entries = fetch_changelog_entries(&service).await.unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn release_time_failure_skips_entries_fetch() {
        // given
        let mut service = MockChangelogService::new();
        service
            .expect_fetch_release_time()
            .once()
            .return_once(|| Err(RetrievalError::MalformedResponse("no release".into())));
        service.expect_fetch_changelog_entries_until().never();

        // when
        let err = fetch_changelog_entries(&service).await.unwrap_err();

        // then
        // mock validates the entries were never requested
        assert!(matches!(err, RetrievalError::MalformedResponse(msg) if msg == "no release"));
    }

    #[tokio::test]
    async fn entries_failure_is_returned_unchanged() {
        // given
        let mut service = MockChangelogService::new();
        service
            .expect_fetch_release_time()
            .once()
            .return_once(|| Ok(at_minute(0)));
        service
            .expect_fetch_changelog_entries_until()
            .once()
            .return_once(|_| Err(RetrievalError::Other("bad credentials".into())));

        // when
        let err = fetch_changelog_entries(&service).await.unwrap_err();

        // then
        assert!(matches!(err, RetrievalError::Other(_)));
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[tokio::test]
    async fn build_writes_filtered_entries() {
        // given
        let service = service_returning(
            at_minute(30),
            vec![entry(2, at_minute(40)), entry(1, at_minute(20))],
        );
        let writer = RecordingWriter::default();

        // when
        build(&service, &writer).await.unwrap();

        // then
        assert_eq!(*writer.written.borrow(), vec![entry(2, at_minute(40))]);
    }

    #[tokio::test]
    async fn build_does_not_write_when_retrieval_fails() {
        // given
        let mut service = MockChangelogService::new();
        service
            .expect_fetch_release_time()
            .once()
            .return_once(|| Err(RetrievalError::MalformedResponse("boom".into())));
        service.expect_fetch_changelog_entries_until().never();
        let writer = RecordingWriter::default();

        // when
        let err = build(&service, &writer).await.unwrap_err();

        // then
        assert!(matches!(
            err,
            Error::Retrieval(RetrievalError::MalformedResponse(_))
        ));
        assert!(writer.written.borrow().is_empty());
    }

    #[tokio::test]
    async fn build_reports_writer_failure() {
        let service = service_returning(at_minute(0), vec![entry(1, at_minute(10))]);
        let writer = RecordingWriter {
            fail: true,
            ..Default::default()
        };

        let err = build(&service, &writer).await.unwrap_err();

        assert!(matches!(err, Error::Write(_)));
    }
}
