//! Success Center routes: student check-in/out and the live roster.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use quad_core::directory::resolve_status;
use quad_db::UsageLogRepository;
use quad_db::entities::{student_usage_logs, wmu_users};
use quad_db::repositories::DirectoryRepository;
use quad_shared::AppError;

/// Creates the Success Center router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/success-center/checked-in", get(checked_in))
        .route("/success-center/check-in", post(check_in))
        .route("/success-center/check-out", post(check_out))
        .route("/success-center/locations", get(locations))
        .route(
            "/success-center/profile",
            get(get_profile).put(set_profile),
        )
}

/// A roster row: one currently-checked-in student.
#[derive(Debug, Serialize)]
struct RosterEntry {
    log_id: Uuid,
    bronco_net: String,
    first_name: String,
    last_name: String,
    check_in: chrono::DateTime<chrono::FixedOffset>,
    location_id: Option<Uuid>,
}

/// GET /success-center/checked-in - The live roster, oldest check-in first.
async fn checked_in(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = UsageLogRepository::new((*state.db).clone());
    let logs = repo.open_logs(None).await?;

    let roster: Vec<RosterEntry> = logs
        .into_iter()
        .filter_map(|(log, student)| {
            student.map(|s| RosterEntry {
                log_id: log.id,
                bronco_net: s.bronco_net,
                first_name: s.first_name,
                last_name: s.last_name,
                check_in: log.check_in,
                location_id: log.location_id,
            })
        })
        .collect();

    Ok(Json(roster))
}

/// Check-in/out payload. The identifier may be a BroncoNet, a Winno, or a
/// raw card swipe.
#[derive(Debug, Deserialize)]
struct StudentIdRequest {
    student_id: String,
    location_id: Option<Uuid>,
}

/// Check-in/out response: the affected log plus any warnings gathered along
/// the way (directory down, student not found locally).
#[derive(Debug, Serialize)]
struct CheckInResponse {
    log: Option<student_usage_logs::Model>,
    warnings: Vec<String>,
}

/// POST /success-center/check-in - Check a student in.
///
/// The student is resolved locally first, then via the campus directory when
/// configured. Directory connectivity problems degrade to a warning rather
/// than an error, matching the front-desk workflow: the attendant can retype
/// the id or check the student in once the directory recovers.
async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<StudentIdRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut warnings = Vec::new();
    let identifier = normalize_identifier(&payload.student_id);

    let Some(student) = resolve_student(&state, &identifier, &mut warnings).await? else {
        return Ok((
            StatusCode::OK,
            Json(CheckInResponse {
                log: None,
                warnings,
            }),
        )
            .into_response());
    };

    let repo = UsageLogRepository::new((*state.db).clone());

    // Fall back to the attendant's default location when none is given.
    let location_id = match payload.location_id {
        Some(id) => Some(id),
        None => repo.default_location_for(auth.user_id()).await?,
    };
    if location_id.is_none() {
        warnings.push(
            "Tutor location not set. Please set a default location in your profile.".to_string(),
        );
    }

    let log = repo.check_in(&student, location_id, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            log: Some(log),
            warnings,
        }),
    )
        .into_response())
}

/// POST /success-center/check-out - Check a student out.
async fn check_out(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<StudentIdRequest>,
) -> ApiResult<impl IntoResponse> {
    let identifier = normalize_identifier(&payload.student_id);

    let directory_repo = DirectoryRepository::new((*state.db).clone());
    let student = find_local(&directory_repo, &identifier)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("student {identifier}"))))?;

    let repo = UsageLogRepository::new((*state.db).clone());
    let log = repo.check_out(&student, Utc::now()).await?;

    Ok(Json(CheckInResponse {
        log: Some(log),
        warnings: Vec::new(),
    }))
}

/// GET /success-center/locations - Active tutoring locations.
async fn locations(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = UsageLogRepository::new((*state.db).clone());
    Ok(Json(repo.active_locations().await?))
}

/// GET /success-center/profile - The caller's default tutoring location.
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = UsageLogRepository::new((*state.db).clone());
    let default_location = repo.default_location_for(auth.user_id()).await?;
    Ok(Json(
        serde_json::json!({ "default_tutor_location_id": default_location }),
    ))
}

/// Profile update payload.
#[derive(Debug, Deserialize)]
struct SetProfileRequest {
    default_tutor_location_id: Option<Uuid>,
}

/// PUT /success-center/profile - Set the caller's default tutoring location.
async fn set_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SetProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = UsageLogRepository::new((*state.db).clone());
    repo.set_default_location(auth.user_id(), payload.default_tutor_location_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Trims card-swipe framing from a student identifier. Swipes arrive as a
/// sentinel character followed by the 9-digit Winno and a checksum.
fn normalize_identifier(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() > 10 {
        raw.chars().skip(1).take(9).collect()
    } else {
        raw.to_string()
    }
}

/// Looks a student up in the local database by Winno or BroncoNet.
async fn find_local(
    repo: &DirectoryRepository,
    identifier: &str,
) -> Result<Option<wmu_users::Model>, ApiError> {
    let student = if identifier.chars().all(|c| c.is_ascii_digit()) {
        repo.find_wmu_user_by_winno(identifier).await?
    } else {
        repo.find_wmu_user(identifier).await?
    };
    Ok(student)
}

/// Resolves a student, falling back to the campus directory for unknown ids.
///
/// Directory lookups also refresh the student's status per the retention
/// rules when the last check is stale.
async fn resolve_student(
    state: &AppState,
    identifier: &str,
    warnings: &mut Vec<String>,
) -> Result<Option<wmu_users::Model>, ApiError> {
    let directory_repo = DirectoryRepository::new((*state.db).clone());

    if let Some(student) = find_local(&directory_repo, identifier).await? {
        // Known locally; refresh a stale status when the directory is up.
        if let Some(client) = &state.directory {
            refresh_status(&directory_repo, client.as_ref(), &student.bronco_net, warnings)
                .await?;
        }
        return Ok(Some(student));
    }

    // Not known locally; ask the campus directory.
    let Some(client) = &state.directory else {
        warnings.push(format!(
            "Failed to find student \"{identifier}\" and LDAP connection is not set up for local server."
        ));
        return Ok(None);
    };

    let lookup = if identifier.chars().all(|c| c.is_ascii_digit()) {
        client.find_by_winno(identifier).await
    } else {
        client.find_by_uid(identifier).await
    };

    let attrs = match lookup {
        Ok(Some(attrs)) => attrs,
        Ok(None) => {
            warnings.push(format!(
                "Failed to find student \"{identifier}\". Did you type it correctly?"
            ));
            return Ok(None);
        }
        Err(e) => {
            // Directory trouble is a warning, not a request failure.
            warn!(error = %e, "directory lookup failed");
            warnings.push(format!(
                "Campus directory is unreachable; could not look up \"{identifier}\"."
            ));
            return Ok(None);
        }
    };

    let bronco_net = attrs
        .single("uid")
        .map(str::to_string)
        .unwrap_or_else(|| identifier.to_string());

    let student = directory_repo
        .upsert_from_attributes(&bronco_net, &attrs)
        .await?;

    // Apply activity status while we hold fresh attributes, except for
    // protected roles.
    let now = Utc::now();
    if !directory_repo.is_protected(&bronco_net).await? {
        let status = resolve_status(&attrs, now);
        directory_repo.apply_status(&bronco_net, status, now).await?;
    }

    Ok(Some(student))
}

/// Re-checks a known student's directory status when the last check is
/// older than a day. Directory trouble degrades to a warning.
async fn refresh_status(
    directory_repo: &DirectoryRepository,
    client: &dyn quad_core::directory::DirectoryClient,
    bronco_net: &str,
    warnings: &mut Vec<String>,
) -> Result<(), ApiError> {
    let now = Utc::now();
    if !directory_repo.needs_status_check(bronco_net, now).await?
        || directory_repo.is_protected(bronco_net).await?
    {
        return Ok(());
    }

    match client.find_by_uid(bronco_net).await {
        Ok(Some(attrs)) => {
            directory_repo
                .upsert_from_attributes(bronco_net, &attrs)
                .await?;
            let status = resolve_status(&attrs, now);
            directory_repo.apply_status(bronco_net, status, now).await?;
        }
        Ok(None) => {
            warn!(uid = bronco_net, "known student missing from directory");
        }
        Err(e) => {
            warn!(error = %e, "directory status refresh failed");
            warnings.push("Campus directory is unreachable; status not refreshed.".to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier_passthrough() {
        assert_eq!(normalize_identifier("abc1234"), "abc1234");
        assert_eq!(normalize_identifier(" 123456789 "), "123456789");
    }

    #[test]
    fn test_normalize_identifier_card_swipe() {
        // Sentinel + 9-digit winno + checksum digits.
        assert_eq!(normalize_identifier(";123456789012"), "123456789");
    }
}
