use crate::distribution::{Period, PeriodDistribution, summarize_periods};
use crate::errors::FetchError;
use crate::models::{FlagEvent, Snapshot};
use crate::pagination::Page;
use crate::time_convert::{local_date, parse_utc};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Read-only access to flag records, wherever they live.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn list_resources(&self) -> Result<Vec<String>, FetchError>;

    /// Rows of `resource`, most recent (highest id) first.
    async fn fetch_page(
        &self,
        resource: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError>;

    async fn fetch_distribution(
        &self,
        periods: &[Period],
    ) -> Result<Vec<PeriodDistribution>, FetchError>;

    /// Every event whose local date falls in `month` (1-12) of `year`, plus
    /// any event whose timestamp cannot be read, so the caller can report it.
    async fn fetch_month_events(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<FlagEvent>, FetchError>;

    /// Like `fetch_month_events`, for a single local date.
    async fn fetch_day_events(&self, date: NaiveDate) -> Result<Vec<FlagEvent>, FetchError>;
}

/// Serves records from a snapshot held in memory.
pub struct SnapshotSource {
    snapshot: Snapshot,
    events_resource: String,
    known: BTreeMap<String, String>,
}

impl SnapshotSource {
    pub fn new(
        snapshot: Snapshot,
        events_resource: impl Into<String>,
        known: BTreeMap<String, String>,
    ) -> Self {
        Self {
            snapshot,
            events_resource: events_resource.into(),
            known,
        }
    }

    fn table(&self, resource: &str) -> Result<&[FlagEvent], FetchError> {
        self.snapshot
            .tables
            .get(resource)
            .map(Vec::as_slice)
            .ok_or_else(|| FetchError::UnknownResource(resource.to_string()))
    }

    fn events_where(
        &self,
        keep: impl Fn(NaiveDate) -> bool,
    ) -> Result<Vec<FlagEvent>, FetchError> {
        let events = self.table(&self.events_resource)?;
        Ok(events
            .iter()
            .filter(|event| {
                parse_utc(&event.timestamp).map_or(true, |instant| keep(local_date(instant)))
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecordFetcher for SnapshotSource {
    async fn list_resources(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.snapshot.tables.keys().cloned().collect())
    }

    async fn fetch_page(
        &self,
        resource: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError> {
        let mut rows = self.table(resource)?.to_vec();
        rows.sort_by(|a, b| b.id.cmp(&a.id));

        let total_rows = rows.len();
        let rows: Vec<FlagEvent> = rows.into_iter().skip(offset).take(limit).collect();

        Ok(Page {
            limit,
            offset,
            rows,
            has_next: offset.saturating_add(limit) < total_rows,
            total_rows,
        })
    }

    async fn fetch_distribution(
        &self,
        periods: &[Period],
    ) -> Result<Vec<PeriodDistribution>, FetchError> {
        let events = self.table(&self.events_resource)?;
        Ok(summarize_periods(events, periods, Utc::now(), &self.known))
    }

    async fn fetch_month_events(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<FlagEvent>, FetchError> {
        self.events_where(|date| date.year() == year && date.month() == month)
    }

    async fn fetch_day_events(&self, date: NaiveDate) -> Result<Vec<FlagEvent>, FetchError> {
        self.events_where(|local| local == date)
    }
}
