pub mod aggregate;
pub mod app;
pub mod calendar;
pub mod config;
pub mod distribution;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod state;
pub mod storage;
pub mod time_convert;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::Config;
pub use fetcher::{RecordFetcher, SnapshotSource};
pub use state::AppState;
pub use storage::load_snapshot;
