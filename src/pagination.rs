use crate::errors::PaginationError;
use crate::models::FlagEvent;
use serde::Serialize;

/// A window over records ordered by recency, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
    pub rows: Vec<FlagEvent>,
    pub has_next: bool,
    pub total_rows: usize,
}

/// Fetch window for the raw table view.
///
/// `offset` is always a multiple of `limit`, so the 1-based page number is
/// `offset / limit + 1`. Navigation past either end leaves the state as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    limit: usize,
    offset: usize,
    has_next: bool,
}

impl PaginationState {
    pub fn new(limit: usize) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self {
            limit,
            offset: 0,
            has_next: false,
        })
    }

    /// State positioned at `offset`, floored to the enclosing page boundary.
    pub fn at(limit: usize, offset: usize) -> Result<Self, PaginationError> {
        let mut state = Self::new(limit)?;
        state.offset = offset - offset % limit;
        Ok(state)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page(&self) -> usize {
        self.offset / self.limit + 1
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// Records the outcome of the fetch for the current window.
    pub fn record_fetch(&mut self, has_next: bool) {
        self.has_next = has_next;
    }

    pub fn next_offset(&self) -> Option<usize> {
        self.has_next.then(|| self.offset + self.limit)
    }

    pub fn previous_offset(&self) -> Option<usize> {
        self.has_previous().then(|| self.offset.saturating_sub(self.limit))
    }

    pub fn next(&mut self) -> Result<(), PaginationError> {
        let offset = self.next_offset().ok_or(PaginationError::NoNextPage)?;
        self.offset = offset;
        // Unknown until the new window has been fetched.
        self.has_next = false;
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), PaginationError> {
        let offset = self
            .previous_offset()
            .ok_or(PaginationError::NoPreviousPage)?;
        self.offset = offset;
        self.has_next = true;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_next = false;
    }
}
