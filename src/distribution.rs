//! Per-category counts for the pie and bar charts.

use crate::errors::DistributionError;
use crate::models::FlagEvent;
use crate::time_convert::{DISPLAY_ZONE, local_date, parse_utc};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const FALLBACK_COLOR: &str = "#9e9e9e";
pub const UNSPECIFIED_LABEL: &str = "unspecified";
pub const MAX_PERIODS: usize = 3;

const CANONICAL_LABELS: [(&str, &str); 5] = [
    ("yellow flag", "#f2c94c"),
    ("red flag", "#eb5757"),
    ("double red flag", "#9b1c1c"),
    ("red over purple flag", "#8e44ad"),
    ("yellow over purple flag", "#b58900"),
];

pub fn known_labels() -> BTreeMap<String, String> {
    CANONICAL_LABELS
        .iter()
        .map(|(label, color)| (label.to_string(), color.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
    pub color: String,
    /// False for labels outside the known set; those use `FALLBACK_COLOR`.
    pub known: bool,
}

pub fn normalize_label(raw: &str) -> String {
    let label = raw.trim().to_lowercase();
    if label.is_empty() {
        UNSPECIFIED_LABEL.to_string()
    } else {
        label
    }
}

/// Counts events per normalized flag type, most frequent first.
///
/// Only labels present in `events` are reported; known labels with no
/// occurrences are not zero-filled.
pub fn summarize(events: &[FlagEvent], known: &BTreeMap<String, String>) -> Vec<CategoryCount> {
    let colors: BTreeMap<String, &String> = known
        .iter()
        .map(|(label, color)| (normalize_label(label), color))
        .collect();

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for event in events {
        *counts.entry(normalize_label(&event.flag_type)).or_default() += 1;
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| {
            let color = colors.get(&label).map(|color| color.to_string());
            CategoryCount {
                known: color.is_some(),
                color: color.unwrap_or_else(|| FALLBACK_COLOR.to_string()),
                label,
                count,
            }
        })
        .collect();
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories
}

pub fn total(categories: &[CategoryCount]) -> u64 {
    categories.iter().map(|category| category.count).sum()
}

pub fn percentage_value(value: u64, total: u64) -> Option<u64> {
    if total == 0 {
        return None;
    }
    Some((value as f64 / total as f64 * 100.0).round() as u64)
}

pub fn percentage(value: u64, total: u64) -> String {
    match percentage_value(value, total) {
        Some(percent) => format!("{percent}%"),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Since local midnight.
    Today,
    /// Trailing 7 days.
    Week,
    /// Trailing 30 days.
    Month,
    All,
}

impl Period {
    pub const DEFAULT: [Period; 3] = [Period::Today, Period::Week, Period::Month];

    pub fn name(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DistributionError> {
        match raw.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            _ => Err(DistributionError::UnknownPeriod(raw.to_string())),
        }
    }

    /// Inclusive lower bound of the period ending at `now`, `None` if unbounded.
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::Today => {
                let midnight = local_date(now).and_hms_opt(0, 0, 0)?;
                let start = DISPLAY_ZONE
                    .from_local_datetime(&midnight)
                    .earliest()
                    .map(|local| local.with_timezone(&Utc));
                Some(start.unwrap_or(now - Duration::days(1)))
            }
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(now - Duration::days(30)),
            Period::All => None,
        }
    }

    pub fn contains(self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        instant <= now && self.start(now).is_none_or(|start| instant >= start)
    }
}

/// Parses a comma-separated period list, falling back to `Period::DEFAULT`
/// when nothing is given.
pub fn parse_periods(raw: Option<&str>) -> Result<Vec<Period>, DistributionError> {
    let periods = raw
        .unwrap_or_default()
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Period::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if periods.len() > MAX_PERIODS {
        return Err(DistributionError::TooManyPeriods {
            max: MAX_PERIODS,
            got: periods.len(),
        });
    }
    if periods.is_empty() {
        return Ok(Period::DEFAULT.to_vec());
    }
    Ok(periods)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodDistribution {
    pub period: Period,
    pub categories: Vec<CategoryCount>,
}

impl PeriodDistribution {
    pub fn total(&self) -> u64 {
        total(&self.categories)
    }
}

/// Summarizes each period separately. Records without a readable timestamp
/// only count toward `Period::All`.
pub fn summarize_periods(
    events: &[FlagEvent],
    periods: &[Period],
    now: DateTime<Utc>,
    known: &BTreeMap<String, String>,
) -> Vec<PeriodDistribution> {
    periods
        .iter()
        .map(|&period| {
            let in_window: Vec<FlagEvent> = events
                .iter()
                .filter(|event| match period {
                    Period::All => true,
                    _ => parse_utc(&event.timestamp)
                        .is_ok_and(|instant| period.contains(instant, now)),
                })
                .cloned()
                .collect();
            PeriodDistribution {
                period,
                categories: summarize(&in_window, known),
            }
        })
        .collect()
}
