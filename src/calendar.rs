//! Month grid model for the calendar view.

use crate::aggregate::DaySummary;
use crate::errors::CalendarError;
use chrono::{Datelike, NaiveDate};

/// Above this many events a cell shows a "+N flags" badge instead of markers.
pub const BADGE_THRESHOLD: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    /// `None` for leading padding before the 1st.
    pub date: Option<NaiveDate>,
    pub summary: Option<DaySummary>,
}

impl CalendarCell {
    pub fn count(&self) -> usize {
        self.summary.as_ref().map_or(0, DaySummary::count)
    }

    pub fn badge(&self) -> Option<String> {
        let count = self.count();
        (count > BADGE_THRESHOLD).then(|| format!("+{count} flags"))
    }
}

/// Cells for `month` (1-12) of `year`: one padding cell per weekday before
/// the 1st (Sunday first), then one cell per day. No trailing padding.
pub fn build(
    year: i32,
    month: u32,
    summaries: &[DaySummary],
) -> Result<Vec<CalendarCell>, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month)?;

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend((0..leading).map(|_| CalendarCell {
        date: None,
        summary: None,
    }));

    for day in 1..=days {
        let date = first
            .with_day(day)
            .ok_or(CalendarError::InvalidMonth { year, month })?;
        let summary = summaries.iter().find(|summary| summary.date == date).cloned();
        cells.push(CalendarCell {
            date: Some(date),
            summary,
        });
    }

    Ok(cells)
}

pub fn leading_padding(cells: &[CalendarCell]) -> usize {
    cells.iter().take_while(|cell| cell.date.is_none()).count()
}

/// Steps a zero-based month index (0 = January) by `delta` months, rolling the
/// year over as needed.
pub fn navigate(year: i32, month0: u32, delta: i32) -> (i32, u32) {
    let absolute = year * 12 + month0 as i32 + delta;
    (absolute.div_euclid(12), absolute.rem_euclid(12) as u32)
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let invalid = CalendarError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid)?;
    let (next_year, next_month0) = navigate(year, month - 1, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month0 + 1, 1).ok_or(invalid)?;
    Ok((next_first - first).num_days() as u32)
}
