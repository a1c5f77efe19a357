use crate::aggregate::SkippedRecord;
use crate::calendar::{self, CalendarCell};
use crate::config::MAX_PAGE_LIMIT;
use crate::distribution::{self, PeriodDistribution, normalize_label};
use crate::errors::AppError;
use crate::models::{
    CalendarResponse, CategoryView, CellView, DayResponse, DistributionQuery,
    DistributionResponse, EventView, FlagEvent, MonthRef, PageQuery, PaginationInfo, PeriodView,
    RowView, TableDataResponse, TablesResponse,
};
use crate::state::AppState;
use crate::time_convert::{DISPLAY_ZONE, display_or_absent, local_hhmm, parse_utc, to_12_hour};
use crate::ui::render_index;
use crate::views::{CalendarView, TableView};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(DISPLAY_ZONE.name(), state.page_limit))
}

pub async fn get_tables(State(state): State<AppState>) -> Result<Json<TablesResponse>, AppError> {
    let mut tables = state.fetcher.list_resources().await?;
    tables.sort();
    Ok(Json(TablesResponse { tables }))
}

pub async fn get_table_data(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TableDataResponse>, AppError> {
    if !valid_table_name(&table) {
        return Err(AppError::bad_request("invalid table name"));
    }

    let limit = query.limit.unwrap_or(state.page_limit);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(AppError::bad_request(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    let mut view = TableView::at(table, limit, query.offset.unwrap_or(0))?;
    view.load(state.fetcher.as_ref()).await?;
    debug!(
        table = view.resource(),
        page = view.pagination().page(),
        "served table page"
    );

    let pagination = view.pagination();
    let (data, total_rows) = match view.page() {
        Some(page) => (page.rows.iter().map(to_row).collect(), page.total_rows),
        None => (Vec::new(), 0),
    };

    Ok(Json(TableDataResponse {
        data,
        pagination: PaginationInfo {
            total_rows,
            limit: pagination.limit(),
            offset: pagination.offset(),
            page: pagination.page(),
            has_next: pagination.has_next(),
            next_offset: pagination.next_offset(),
            previous_offset: pagination.previous_offset(),
        },
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<CalendarResponse>, AppError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return Err(AppError::bad_request(format!("invalid month {year}-{month:02}")));
    }

    let mut view = CalendarView::new(year, month - 1);
    view.load(state.fetcher.as_ref()).await?;
    log_skipped(view.skipped());

    let month_ref = |delta| {
        let (year, month0) = calendar::navigate(view.year(), view.month() - 1, delta);
        MonthRef {
            year,
            month: month0 + 1,
        }
    };

    Ok(Json(CalendarResponse {
        year: view.year(),
        month: view.month(),
        leading_padding: calendar::leading_padding(view.cells()),
        cells: view.cells().iter().map(to_cell).collect(),
        previous: month_ref(-1),
        next: month_ref(1),
        skipped: view.skipped().to_vec(),
    }))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(format!("invalid date {date:?}, expected YYYY-MM-DD"))
    })?;

    let (summary, skipped) = CalendarView::day(date, state.fetcher.as_ref()).await?;
    log_skipped(&skipped);

    let events: Vec<EventView> = summary
        .map(|summary| summary.events.iter().map(to_event).collect())
        .unwrap_or_default();

    Ok(Json(DayResponse {
        date,
        count: events.len(),
        events,
        skipped,
    }))
}

pub async fn get_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> Result<Json<DistributionResponse>, AppError> {
    let periods = distribution::parse_periods(query.periods.as_deref())?;
    let distributions = state.fetcher.fetch_distribution(&periods).await?;

    Ok(Json(DistributionResponse {
        periods: distributions.iter().map(to_period).collect(),
    }))
}

fn valid_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn log_skipped(skipped: &[SkippedRecord]) {
    for record in skipped {
        warn!(id = record.id, reason = %record.reason, "skipped record");
    }
}

fn to_row(event: &FlagEvent) -> RowView {
    RowView {
        id: event.id,
        timestamp: event.timestamp.clone(),
        flag_type: event.flag_type.clone(),
        local_time: display_or_absent(&event.timestamp),
    }
}

fn to_event(event: &FlagEvent) -> EventView {
    let time = parse_utc(&event.timestamp)
        .ok()
        .and_then(|instant| to_12_hour(&local_hhmm(instant)).ok());

    EventView {
        id: event.id,
        flag_type: normalize_label(&event.flag_type),
        timestamp: event.timestamp.clone(),
        local_time: display_or_absent(&event.timestamp),
        time,
    }
}

fn to_cell(cell: &CalendarCell) -> CellView {
    let summary = cell.summary.as_ref();
    CellView {
        date: cell.date,
        day: cell.date.map(|date| date.day()),
        count: cell.count(),
        badge: cell.badge(),
        latest_flag: summary
            .and_then(|summary| summary.latest())
            .map(|event| normalize_label(&event.flag_type)),
        events: summary
            .map(|summary| summary.events.iter().map(to_event).collect())
            .unwrap_or_default(),
    }
}

fn to_period(distribution: &PeriodDistribution) -> PeriodView {
    let total = distribution.total();
    PeriodView {
        period: distribution.period.name().to_string(),
        total,
        categories: distribution
            .categories
            .iter()
            .map(|category| CategoryView {
                label: category.label.clone(),
                count: category.count,
                color: category.color.clone(),
                known: category.known,
                percentage: distribution::percentage(category.count, total),
            })
            .collect(),
    }
}
