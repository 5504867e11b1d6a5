//! API error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use quad_db::repositories::{SemesterError, TimesheetError, UsageLogError};
use quad_shared::AppError;

/// Wrapper turning [`AppError`] into an HTTP response with the standard
/// `{"error": ..., "message": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        tracing::error!(error = %err, "database error");
        Self(AppError::Database(err.to_string()))
    }
}

impl From<UsageLogError> for ApiError {
    fn from(err: UsageLogError) -> Self {
        match err {
            UsageLogError::AlreadyCheckedIn(_) | UsageLogError::NotCheckedIn(_) => {
                Self(AppError::Conflict(err.to_string()))
            }
            UsageLogError::Database(e) => e.into(),
        }
    }
}

impl From<TimesheetError> for ApiError {
    fn from(err: TimesheetError) -> Self {
        match err {
            TimesheetError::Shift(_) | TimesheetError::NoPayPeriod(_) => {
                Self(AppError::Validation(err.to_string()))
            }
            TimesheetError::AlreadyClockedIn | TimesheetError::NotClockedIn => {
                Self(AppError::Conflict(err.to_string()))
            }
            TimesheetError::Database(e) => e.into(),
        }
    }
}

impl From<SemesterError> for ApiError {
    fn from(err: SemesterError) -> Self {
        match err {
            SemesterError::Dates(_) => Self(AppError::Validation(err.to_string())),
            SemesterError::Database(e) => e.into(),
        }
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
