use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::Experience;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::experience_service::{
    CreateExperienceInput, ExperienceService, UpdateExperienceInput,
};

/// GET /api/experiences - Ordered by sort_order, then most recent first
pub async fn list() -> ApiResult<Vec<Experience>> {
    let service = ExperienceService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// POST /api/experiences
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateExperienceInput>,
) -> ApiResult<Experience> {
    input.validate()?;

    let service = ExperienceService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::created(service.create(user.user_id, &input).await?))
}

/// PUT /api/experiences/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateExperienceInput>,
) -> ApiResult<Experience> {
    input.validate()?;

    let service = ExperienceService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(id, &input).await?))
}

/// DELETE /api/experiences/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = ExperienceService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Experience deleted successfully"
    })))
}
