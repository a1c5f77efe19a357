use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
    #[error("malformed time: {0:?}")]
    MalformedTime(String),
}

/// Boundary conditions of page navigation. These are expected UI states
/// (first or last page), so callers treat them as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("no next page")]
    NoNextPage,
    #[error("no previous page")]
    NoPreviousPage,
    #[error("page limit must be positive")]
    ZeroLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("fetch failed: {0}")]
    Failure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("unknown period: {0}")]
    UnknownPeriod(String),
    #[error("at most {max} periods may be requested, got {got}")]
    TooManyPeriods { max: usize, got: usize },
}

/// Failure of a view refresh. The view keeps its previous contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::UnknownResource(_) => Self::not_found(err.to_string()),
            FetchError::Failure(_) => Self::internal(err),
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<DistributionError> for AppError {
    fn from(err: DistributionError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<PaginationError> for AppError {
    fn from(err: PaginationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::Pagination(err) => err.into(),
            ViewError::Fetch(err) => err.into(),
            ViewError::Calendar(err) => err.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_resource_maps_to_not_found() {
        let err: AppError = FetchError::UnknownResource("tides".into()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.message.contains("tides"));
    }

    #[test]
    fn fetch_failure_maps_to_internal() {
        let err: AppError = FetchError::Failure("connection reset".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
