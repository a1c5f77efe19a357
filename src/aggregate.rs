use crate::models::FlagEvent;
use crate::time_convert::{local_date, local_hhmm, parse_utc};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Events that fall on one calendar date in the display zone, ordered by
/// time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub events: Vec<FlagEvent>,
}

impl DaySummary {
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Most recent event, by id.
    pub fn latest(&self) -> Option<&FlagEvent> {
        self.events.iter().max_by_key(|event| event.id)
    }
}

/// A record left out of an aggregation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub days: Vec<DaySummary>,
    pub skipped: Vec<SkippedRecord>,
}

impl Grouping {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.days.iter().find(|summary| summary.date == date)
    }
}

/// Buckets events by their local calendar date.
///
/// Within a day, events are ordered by their local `HH:MM` with a stable sort,
/// so events in the same minute keep their input order. Days come out in
/// ascending date order. Events whose timestamp cannot be parsed are reported
/// in `skipped`.
pub fn group_by_local_date(events: &[FlagEvent]) -> Grouping {
    let mut buckets: BTreeMap<NaiveDate, Vec<(String, FlagEvent)>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for event in events {
        match parse_utc(&event.timestamp) {
            Ok(instant) => buckets
                .entry(local_date(instant))
                .or_default()
                .push((local_hhmm(instant), event.clone())),
            Err(err) => skipped.push(SkippedRecord {
                id: event.id,
                reason: err.to_string(),
            }),
        }
    }

    let days = buckets
        .into_iter()
        .map(|(date, mut timed)| {
            timed.sort_by(|a, b| a.0.cmp(&b.0));
            DaySummary {
                date,
                events: timed.into_iter().map(|(_, event)| event).collect(),
            }
        })
        .collect();

    Grouping { days, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, timestamp: &str, flag_type: &str) -> FlagEvent {
        FlagEvent {
            id,
            timestamp: timestamp.to_string(),
            flag_type: flag_type.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<FlagEvent> {
        vec![
            event(5, "2024-07-04T22:10:00Z", "red flag"),
            event(4, "2024-07-04T14:00:00Z", "yellow flag"),
            // 01:30 UTC on the 5th is 20:30 on the 4th in Chicago.
            event(6, "2024-07-05T01:30:00Z", "double red flag"),
            event(7, "2024-07-05T13:00:00Z", "yellow flag"),
            event(8, "not a time", "red flag"),
        ]
    }

    #[test]
    fn groups_by_local_date_not_utc_date() {
        let grouping = group_by_local_date(&sample());
        assert_eq!(grouping.days.len(), 2);

        let fourth = grouping.day(date(2024, 7, 4)).expect("missing July 4");
        let ids: Vec<i64> = fourth.events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(fourth.count(), 3);
        assert_eq!(fourth.latest().map(|e| e.id), Some(6));

        let fifth = grouping.day(date(2024, 7, 5)).expect("missing July 5");
        assert_eq!(fifth.count(), 1);
    }

    #[test]
    fn malformed_records_are_reported() {
        let grouping = group_by_local_date(&sample());
        assert_eq!(grouping.skipped.len(), 1);
        assert_eq!(grouping.skipped[0].id, 8);
        assert!(grouping.skipped[0].reason.contains("not a time"));
    }

    #[test]
    fn events_within_day_are_sorted_by_time() {
        let grouping = group_by_local_date(&sample());
        for summary in &grouping.days {
            let times: Vec<String> = summary
                .events
                .iter()
                .map(|e| local_hhmm(parse_utc(&e.timestamp).unwrap()))
                .collect();
            assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn same_minute_keeps_input_order() {
        let events = vec![
            event(2, "2024-07-04T14:00:40Z", "red flag"),
            event(1, "2024-07-04T14:00:05Z", "yellow flag"),
        ];
        let grouping = group_by_local_date(&events);
        let ids: Vec<i64> = grouping.days[0].events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn regrouping_is_idempotent() {
        let first = group_by_local_date(&sample());
        let union: Vec<FlagEvent> = first
            .days
            .iter()
            .flat_map(|summary| summary.events.iter().cloned())
            .collect();
        let second = group_by_local_date(&union);
        assert_eq!(second.days, first.days);
        assert!(second.skipped.is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(group_by_local_date(&[]), Grouping::default());
    }
}
