//! Timesheet routes: pay periods and shift clock-in/out.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use quad_core::terms::worked_hms;
use quad_db::TimesheetRepository;
use quad_db::entities::timesheet_shifts;
use quad_db::repositories::CreateShiftInput;
use quad_shared::AppError;

/// Creates the timesheets router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pay-periods", get(list_periods).post(create_period))
        .route("/pay-periods/current", get(current_period))
        .route("/timesheets/clock-in", post(clock_in))
        .route("/timesheets/clock-out", post(clock_out))
        .route("/timesheets/shifts", post(add_shift))
        .route("/timesheets/{period_id}/shifts", get(list_shifts))
}

/// GET /pay-periods - Recent pay periods, newest first.
async fn list_periods(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = TimesheetRepository::new((*state.db).clone());
    Ok(Json(repo.list_periods(26).await?))
}

/// Pay period creation payload.
#[derive(Debug, Deserialize)]
struct CreatePeriodRequest {
    date_start: NaiveDate,
}

/// POST /pay-periods - Create a pay period (staff only). The end date is
/// derived: start + 13 days.
async fn create_period(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePeriodRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = TimesheetRepository::new((*state.db).clone());
    let period = repo.get_or_create_period(payload.date_start).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

/// GET /pay-periods/current - The period containing today.
async fn current_period(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = TimesheetRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();
    let period = repo
        .find_period_for(today)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("no pay period covers {today}"))))?;
    Ok(Json(period))
}

/// Clock-in payload.
#[derive(Debug, Deserialize)]
struct ClockInRequest {
    signature: String,
}

/// POST /timesheets/clock-in - Start a shift for the calling employee.
async fn clock_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ClockInRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.signature.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "signature is required".to_string(),
        )));
    }

    let repo = TimesheetRepository::new((*state.db).clone());
    let shift = repo
        .clock_in(auth.user_id(), Utc::now(), &payload.signature)
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// POST /timesheets/clock-out - End the calling employee's open shift.
async fn clock_out(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = TimesheetRepository::new((*state.db).clone());
    let shift = repo.clock_out(auth.user_id(), Utc::now()).await?;
    Ok(Json(shift))
}

/// Admin shift-correction payload.
#[derive(Debug, Deserialize)]
struct AddShiftRequest {
    employee_id: Uuid,
    clock_in: DateTime<Utc>,
    clock_out: Option<DateTime<Utc>>,
    #[serde(default = "default_signature")]
    signature: String,
}

fn default_signature() -> String {
    "1".to_string()
}

/// POST /timesheets/shifts - Record a shift on an employee's behalf
/// (staff only).
async fn add_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AddShiftRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = TimesheetRepository::new((*state.db).clone());
    let shift = repo
        .add_shift(CreateShiftInput {
            employee_id: payload.employee_id,
            clock_in: payload.clock_in,
            clock_out: payload.clock_out,
            signature: payload.signature,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Filter for shift listings.
#[derive(Debug, Deserialize)]
struct ShiftFilter {
    employee_id: Option<Uuid>,
}

/// A shift with its worked time broken out.
#[derive(Debug, Serialize)]
struct ShiftResponse {
    #[serde(flatten)]
    shift: timesheet_shifts::Model,
    worked: Option<WorkedTime>,
}

/// Worked time in whole hours/minutes/seconds.
#[derive(Debug, Serialize)]
struct WorkedTime {
    hours: i64,
    minutes: i64,
    seconds: i64,
}

/// GET /timesheets/{period_id}/shifts - An employee's shifts in a period.
///
/// Non-staff callers can only see their own shifts.
async fn list_shifts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(period_id): Path<Uuid>,
    Query(filter): Query<ShiftFilter>,
) -> ApiResult<impl IntoResponse> {
    let employee_id = match filter.employee_id {
        Some(id) if id != auth.user_id() => {
            auth.require_staff()?;
            id
        }
        _ => auth.user_id(),
    };

    let repo = TimesheetRepository::new((*state.db).clone());
    let shifts = repo.shifts_for(employee_id, period_id).await?;

    let response: Vec<ShiftResponse> = shifts
        .into_iter()
        .map(|shift| {
            let worked = shift.clock_out.map(|out| {
                let (hours, minutes, seconds) = worked_hms(
                    shift.clock_in.with_timezone(&Utc),
                    out.with_timezone(&Utc),
                );
                WorkedTime {
                    hours,
                    minutes,
                    seconds,
                }
            });
            ShiftResponse { shift, worked }
        })
        .collect();

    Ok(Json(response))
}
