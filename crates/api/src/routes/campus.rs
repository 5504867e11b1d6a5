//! Campus record routes: departments, rooms, majors, semesters.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use quad_db::CampusRepository;
use quad_db::repositories::{CreateRoomInput, CreateSemesterInput};
use quad_shared::AppError;

/// Creates the campus records router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments))
        .route("/room-types", get(list_room_types))
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{slug}", get(get_room))
        .route("/majors", get(list_majors))
        .route(
            "/students/{bronco_net}/majors",
            get(student_majors).put(declare_major),
        )
        .route("/semesters", get(list_semesters).post(create_semester))
}

/// GET /departments - List departments.
async fn list_departments(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    Ok(Json(repo.list_departments().await?))
}

/// GET /room-types - List room types.
async fn list_room_types(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    Ok(Json(repo.list_room_types().await?))
}

/// GET /rooms - List rooms with their types.
async fn list_rooms(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    let rooms = repo.list_rooms().await?;

    Ok(Json(
        rooms
            .into_iter()
            .map(|(room, room_type)| {
                serde_json::json!({
                    "id": room.id,
                    "name": room.name,
                    "slug": room.slug,
                    "description": room.description,
                    "capacity": room.capacity,
                    "room_type": room_type.map(|t| t.name),
                })
            })
            .collect::<Vec<_>>(),
    ))
}

/// Room creation payload.
#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    capacity: i16,
    room_type_id: Uuid,
    #[serde(default)]
    department_ids: Vec<Uuid>,
}

/// POST /rooms - Create a room (staff only).
async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRoomRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    if payload.name.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "room name must not be empty".to_string(),
        )));
    }

    let repo = CampusRepository::new((*state.db).clone());
    let room = repo
        .create_room(CreateRoomInput {
            name: payload.name,
            description: payload.description,
            capacity: payload.capacity,
            room_type_id: payload.room_type_id,
            department_ids: payload.department_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /rooms/{slug} - Fetch a room by slug.
async fn get_room(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    let room = repo
        .find_room_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("room {slug}"))))?;
    Ok(Json(room))
}

/// Filter for major listings.
#[derive(Debug, Deserialize)]
struct MajorFilter {
    department_id: Option<Uuid>,
}

/// GET /majors - List majors, optionally per department.
async fn list_majors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<MajorFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    Ok(Json(repo.list_majors(filter.department_id).await?))
}

/// GET /students/{bronco_net}/majors - A student's active majors.
async fn student_majors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(bronco_net): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let directory_repo = quad_db::repositories::DirectoryRepository::new((*state.db).clone());
    let student = directory_repo
        .find_wmu_user(&bronco_net)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("student {bronco_net}"))))?;

    let repo = CampusRepository::new((*state.db).clone());
    Ok(Json(repo.majors_for_student(student.id).await?))
}

/// Major declaration payload.
#[derive(Debug, Deserialize)]
struct DeclareMajorRequest {
    major_id: Uuid,
}

/// PUT /students/{bronco_net}/majors - Record a student's current major
/// (staff only). Prior active majors are closed, not deleted.
async fn declare_major(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(bronco_net): Path<String>,
    Json(payload): Json<DeclareMajorRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let directory_repo = quad_db::repositories::DirectoryRepository::new((*state.db).clone());
    let student = directory_repo
        .find_wmu_user(&bronco_net)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("student {bronco_net}"))))?;

    let repo = CampusRepository::new((*state.db).clone());
    repo.declare_major(student.id, payload.major_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /semesters - List semesters.
async fn list_semesters(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = CampusRepository::new((*state.db).clone());
    Ok(Json(repo.list_semesters().await?))
}

/// Semester creation payload.
#[derive(Debug, Deserialize)]
struct CreateSemesterRequest {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// POST /semesters - Create a semester (staff only). The name is derived
/// from the dates.
async fn create_semester(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSemesterRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = CampusRepository::new((*state.db).clone());
    let semester = repo
        .create_semester(CreateSemesterInput {
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(semester)))
}
