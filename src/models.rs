use crate::aggregate::SkippedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded flag observation. `timestamp` is kept as received (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEvent {
    pub id: i64,
    pub timestamp: String,
    #[serde(alias = "flagType")]
    pub flag_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub tables: BTreeMap<String, Vec<FlagEvent>>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    pub periods: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RowView {
    pub id: i64,
    pub timestamp: String,
    pub flag_type: String,
    pub local_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total_rows: usize,
    pub limit: usize,
    pub offset: usize,
    pub page: usize,
    pub has_next: bool,
    pub next_offset: Option<usize>,
    pub previous_offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableDataResponse {
    pub data: Vec<RowView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventView {
    pub id: i64,
    pub flag_type: String,
    pub timestamp: String,
    pub local_time: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CellView {
    pub date: Option<NaiveDate>,
    pub day: Option<u32>,
    pub count: usize,
    pub badge: Option<String>,
    pub latest_flag: Option<String>,
    pub events: Vec<EventView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub leading_padding: usize,
    pub cells: Vec<CellView>,
    pub previous: MonthRef,
    pub next: MonthRef,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub count: usize,
    pub events: Vec<EventView>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryView {
    pub label: String,
    pub count: u64,
    pub color: String,
    pub known: bool,
    pub percentage: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodView {
    pub period: String,
    pub total: u64,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistributionResponse {
    pub periods: Vec<PeriodView>,
}
