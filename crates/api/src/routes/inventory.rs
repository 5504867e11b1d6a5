//! Inventory routes: assets and the software catalog.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use quad_db::InventoryRepository;
use quad_db::entities::software_details::SoftwareType;
use quad_db::repositories::{CreateAssetInput, CreateSoftwareDetailInput};
use quad_shared::AppError;
use quad_shared::types::{PageRequest, PageResponse};

/// Creates the inventory router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route("/assets/{tag}", get(get_asset))
        .route("/software", get(list_software).post(create_software))
        .route("/software/{id}/details", post(create_software_detail))
}

/// GET /assets - List assets by tag.
async fn list_assets(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = InventoryRepository::new((*state.db).clone());
    let (items, total) = repo.list_assets(&page).await?;
    Ok(Json(PageResponse::new(items, page.page, page.per_page, total)))
}

/// Asset creation payload.
#[derive(Debug, Deserialize)]
struct CreateAssetRequest {
    serial_number: String,
    asset_tag: String,
    brand_name: String,
    mac_address: Option<String>,
    ip_address: Option<String>,
    device_name: Option<String>,
    description: Option<String>,
}

/// POST /assets - Create an asset (staff only).
async fn create_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAssetRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = InventoryRepository::new((*state.db).clone());
    let asset = repo
        .create_asset(CreateAssetInput {
            serial_number: payload.serial_number,
            asset_tag: payload.asset_tag,
            brand_name: payload.brand_name,
            mac_address: payload.mac_address,
            ip_address: payload.ip_address,
            device_name: payload.device_name,
            description: payload.description,
        })
        .await
        .map_err(|e| {
            // Uniqueness collisions on serial/tag/MAC/IP surface as conflicts.
            if e.to_string().contains("duplicate key") {
                ApiError(AppError::Conflict("asset already exists".to_string()))
            } else {
                e.into()
            }
        })?;

    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /assets/{tag} - Fetch an asset by its tag.
async fn get_asset(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tag): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let repo = InventoryRepository::new((*state.db).clone());
    let asset = repo
        .find_asset_by_tag(&tag)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("asset {tag}"))))?;
    Ok(Json(asset))
}

/// GET /software - List the software catalog with versions.
async fn list_software(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = InventoryRepository::new((*state.db).clone());
    let catalog = repo.list_software().await?;

    Ok(Json(
        catalog
            .into_iter()
            .map(|(software, details)| {
                serde_json::json!({
                    "id": software.id,
                    "name": software.name,
                    "slug": software.slug,
                    "versions": details,
                })
            })
            .collect::<Vec<_>>(),
    ))
}

/// Software creation payload.
#[derive(Debug, Deserialize)]
struct CreateSoftwareRequest {
    name: String,
}

/// POST /software - Create a software catalog entry (staff only).
async fn create_software(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSoftwareRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = InventoryRepository::new((*state.db).clone());
    let software = repo.create_software(&payload.name).await.map_err(|e| {
        if e.to_string().contains("duplicate key") {
            ApiError(AppError::Conflict(format!(
                "software \"{}\" already exists",
                payload.name
            )))
        } else {
            e.into()
        }
    })?;

    Ok((StatusCode::CREATED, Json(software)))
}

/// Software version payload.
#[derive(Debug, Deserialize)]
struct CreateDetailRequest {
    software_type: SoftwareType,
    version: String,
    expiration: Option<NaiveDate>,
}

/// POST /software/{id}/details - Add a version record (staff only).
async fn create_software_detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateDetailRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_staff()?;

    let repo = InventoryRepository::new((*state.db).clone());
    let detail = repo
        .create_software_detail(CreateSoftwareDetailInput {
            software_id: id,
            software_type: payload.software_type,
            version: payload.version,
            expiration: payload.expiration,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}
