//! Handler functions for the sample document endpoints.

use crate::api::common::{
    ApiResponse, PaginatedData, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateSampleData, SampleDataInfo};
use crate::services::sample_data_service::SampleDataService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};

#[axum::debug_handler]
pub async fn create_sample_data(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateSampleData>,
) -> Result<(StatusCode, Json<ApiResponse<SampleDataInfo>>), (StatusCode, String)> {
    let data = SampleDataService::new(&state.pool)
        .create(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(data, "Sample data stored"))))
}

#[axum::debug_handler]
pub async fn get_sample_data(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SampleDataInfo>>, (StatusCode, String)> {
    let data = SampleDataService::new(&state.pool)
        .get_required(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::ok(data)))
}

#[axum::debug_handler]
pub async fn list_sample_data(
    Extension(state): Extension<AppState>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<PaginatedData<SampleDataInfo>>>, (StatusCode, String)> {
    let (items, total) = SampleDataService::new(&state.pool)
        .list(&pagination)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::paginated(
        PaginatedData::new(items, total),
        PaginationMeta::from_filter(&pagination, total),
        "Sample data retrieved successfully",
    )))
}
