//! User and group management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::AppState;
use quad_db::UserRepository;
use quad_db::entities::users;
use quad_shared::AppError;
use quad_shared::types::{PageRequest, PageResponse};

/// Creates the user management router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).patch(update_user))
        .route("/users/{id}/groups", put(set_user_groups))
        .route("/groups", get(list_groups))
}

/// A user row in API responses.
#[derive(Debug, Serialize)]
struct UserResponse {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    is_staff: bool,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_staff: user.is_staff,
        }
    }
}

/// GET /users - List users (staff only).
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = UserRepository::new((*state.db).clone());
    let (items, total) = repo.list(&page).await?;

    let data: Vec<UserResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(PageResponse::new(data, page.page, page.per_page, total)))
}

/// GET /users/{id} - Fetch one user with their groups.
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    // Users may fetch themselves; anything else is staff-only.
    if auth.user_id() != id {
        auth.require_staff()?;
    }

    let repo = UserRepository::new((*state.db).clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("user {id}"))))?;
    let groups = repo.get_user_groups(id).await?;

    Ok(Json(serde_json::json!({
        "user": UserResponse::from(user),
        "groups": groups.into_iter().map(|g| g.name).collect::<Vec<_>>(),
    })))
}

/// Editable user fields.
#[derive(Debug, Deserialize, Validate)]
struct UpdateUserRequest {
    #[validate(length(max = 255))]
    first_name: Option<String>,
    #[validate(length(max = 255))]
    last_name: Option<String>,
    #[validate(email)]
    email: Option<String>,
}

/// PATCH /users/{id} - Update a user's editable fields.
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    if auth.user_id() != id {
        auth.require_staff()?;
    }
    payload
        .validate()
        .map_err(|e| ApiError(AppError::Validation(e.to_string())))?;

    let repo = UserRepository::new((*state.db).clone());
    let updated = repo
        .update_names(id, payload.first_name, payload.last_name, payload.email)
        .await?;

    Ok(Json(UserResponse::from(updated)))
}

/// Group assignment payload.
#[derive(Debug, Deserialize)]
struct SetGroupsRequest {
    group_ids: Vec<Uuid>,
}

/// PUT /users/{id}/groups - Replace a user's group assignments (staff only).
///
/// Assignments drive access: a user left with no valid portal group is
/// deactivated by this call.
async fn set_user_groups(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetGroupsRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = UserRepository::new((*state.db).clone());
    let updated = repo.set_groups(id, &payload.group_ids).await?;

    Ok((StatusCode::OK, Json(UserResponse::from(updated))))
}

/// GET /groups - List all groups.
async fn list_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = quad_db::GroupRepository::new((*state.db).clone());
    let groups = repo.list().await?;

    Ok(Json(
        groups
            .into_iter()
            .map(|g| serde_json::json!({ "id": g.id, "name": g.name }))
            .collect::<Vec<_>>(),
    ))
}
