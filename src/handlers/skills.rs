use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Skill, SkillCategory};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::skill_service::{
    CreateSkillCategoryInput, CreateSkillInput, SkillService, SkillsView, UpdateSkillInput,
};

/// GET /api/skills - All skills, flat and grouped by category
pub async fn list() -> ApiResult<SkillsView> {
    let service = SkillService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// GET /api/skills/categories
pub async fn categories() -> ApiResult<Vec<SkillCategory>> {
    let service = SkillService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.categories().await?))
}

/// POST /api/skills/categories
pub async fn create_category(
    Json(input): Json<CreateSkillCategoryInput>,
) -> ApiResult<SkillCategory> {
    input.validate()?;

    let service = SkillService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::created(service.create_category(&input).await?))
}

/// POST /api/skills
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateSkillInput>,
) -> ApiResult<Skill> {
    input.validate()?;

    let service = SkillService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::created(service.create(user.user_id, &input).await?))
}

/// PUT /api/skills/:id
pub async fn update(Path(id): Path<Uuid>, Json(input): Json<UpdateSkillInput>) -> ApiResult<Skill> {
    input.validate()?;

    let service = SkillService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(id, &input).await?))
}

/// DELETE /api/skills/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = SkillService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Skill deleted successfully"
    })))
}
