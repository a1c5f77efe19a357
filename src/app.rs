use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tables", get(handlers::get_tables))
        .route("/api/table-data/:table", get(handlers::get_table_data))
        .route("/api/calendar/:year/:month", get(handlers::get_calendar))
        .route("/api/day/:date", get(handlers::get_day))
        .route("/api/distribution", get(handlers::get_distribution))
        .with_state(state)
}
