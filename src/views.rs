//! View state for the table and calendar panels.
//!
//! Each view owns its navigation state and last rendered data. A refresh
//! fetches first and only then commits, so a failed fetch leaves the view
//! exactly as it was.

use crate::aggregate::{DaySummary, SkippedRecord, group_by_local_date};
use crate::calendar::{self, CalendarCell};
use crate::errors::ViewError;
use crate::fetcher::RecordFetcher;
use crate::pagination::{Page, PaginationState};
use chrono::NaiveDate;

pub struct TableView {
    resource: String,
    pagination: PaginationState,
    page: Option<Page>,
}

impl TableView {
    pub fn new(resource: impl Into<String>, limit: usize) -> Result<Self, ViewError> {
        Self::at(resource, limit, 0)
    }

    pub fn at(
        resource: impl Into<String>,
        limit: usize,
        offset: usize,
    ) -> Result<Self, ViewError> {
        Ok(Self {
            resource: resource.into(),
            pagination: PaginationState::at(limit, offset)?,
            page: None,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub async fn load(&mut self, fetcher: &dyn RecordFetcher) -> Result<(), ViewError> {
        self.commit(self.pagination, fetcher).await
    }

    pub async fn next(&mut self, fetcher: &dyn RecordFetcher) -> Result<(), ViewError> {
        let mut target = self.pagination;
        target.next()?;
        self.commit(target, fetcher).await
    }

    pub async fn previous(&mut self, fetcher: &dyn RecordFetcher) -> Result<(), ViewError> {
        let mut target = self.pagination;
        target.previous()?;
        self.commit(target, fetcher).await
    }

    /// Switches to another resource, starting from its first page.
    pub async fn select(
        &mut self,
        resource: &str,
        fetcher: &dyn RecordFetcher,
    ) -> Result<(), ViewError> {
        let mut target = self.pagination;
        target.reset();
        let page = fetcher
            .fetch_page(resource, target.limit(), target.offset())
            .await?;
        target.record_fetch(page.has_next);
        self.resource = resource.to_string();
        self.pagination = target;
        self.page = Some(page);
        Ok(())
    }

    async fn commit(
        &mut self,
        mut target: PaginationState,
        fetcher: &dyn RecordFetcher,
    ) -> Result<(), ViewError> {
        let page = fetcher
            .fetch_page(&self.resource, target.limit(), target.offset())
            .await?;
        target.record_fetch(page.has_next);
        self.pagination = target;
        self.page = Some(page);
        Ok(())
    }
}

pub struct CalendarView {
    year: i32,
    month0: u32,
    cells: Vec<CalendarCell>,
    skipped: Vec<SkippedRecord>,
}

impl CalendarView {
    /// Calendar positioned on a zero-based month (0 = January). Nothing is
    /// fetched until `load`.
    pub fn new(year: i32, month0: u32) -> Self {
        Self {
            year,
            month0,
            cells: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub async fn load(&mut self, fetcher: &dyn RecordFetcher) -> Result<(), ViewError> {
        self.show(self.year, self.month0, fetcher).await
    }

    /// Moves `delta` months and loads the new month.
    pub async fn step(
        &mut self,
        delta: i32,
        fetcher: &dyn RecordFetcher,
    ) -> Result<(), ViewError> {
        let (year, month0) = calendar::navigate(self.year, self.month0, delta);
        self.show(year, month0, fetcher).await
    }

    /// Events of one local date, independent of the month on display.
    pub async fn day(
        date: NaiveDate,
        fetcher: &dyn RecordFetcher,
    ) -> Result<(Option<DaySummary>, Vec<SkippedRecord>), ViewError> {
        let events = fetcher.fetch_day_events(date).await?;
        let grouping = group_by_local_date(&events);
        let summary = grouping.day(date).cloned();
        Ok((summary, grouping.skipped))
    }

    async fn show(
        &mut self,
        year: i32,
        month0: u32,
        fetcher: &dyn RecordFetcher,
    ) -> Result<(), ViewError> {
        let events = fetcher.fetch_month_events(year, month0 + 1).await?;
        let grouping = group_by_local_date(&events);
        let cells = calendar::build(year, month0 + 1, &grouping.days)?;

        self.year = year;
        self.month0 = month0;
        self.cells = cells;
        self.skipped = grouping.skipped;
        Ok(())
    }
}
