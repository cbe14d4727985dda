use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{ProjectWithRelations, PublishStatus, Technology};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::project_service::{
    CreateProjectInput, ProjectService, ReorderItem, UpdateProjectInput,
};
use crate::types::Pagination;

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    /// Only honored for authenticated callers
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/projects - Paginated listing, visibility-filtered
pub async fn list(
    user: MaybeAuthUser,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Vec<ProjectWithRelations>> {
    let pagination = Pagination::new(query.limit, query.offset);
    let service = ProjectService::new(DatabaseManager::pool().await?);

    let (projects, total) = service
        .list(
            query.status,
            query.featured.unwrap_or(false),
            user.is_authenticated(),
            pagination,
        )
        .await?;

    Ok(ApiResponse::paginated(projects, total, pagination))
}

/// GET /api/projects/technologies
pub async fn technologies() -> ApiResult<Vec<Technology>> {
    let service = ProjectService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.technologies().await?))
}

/// GET /api/projects/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> ApiResult<ProjectWithRelations> {
    let service = ProjectService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get_by_slug(&slug).await?))
}

/// POST /api/projects
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateProjectInput>,
) -> ApiResult<ProjectWithRelations> {
    input.validate()?;

    let service = ProjectService::new(DatabaseManager::pool().await?);
    let project = service.create(user.user_id, &input).await?;
    Ok(ApiResponse::created(project))
}

/// PUT /api/projects/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> ApiResult<ProjectWithRelations> {
    input.validate()?;

    let service = ProjectService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(id, &input).await?))
}

/// PUT /api/projects/reorder - Bulk sort_order update
pub async fn reorder(Json(items): Json<Vec<ReorderItem>>) -> ApiResult<Value> {
    let service = ProjectService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.reorder(&items).await?))
}

/// DELETE /api/projects/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = ProjectService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Project deleted successfully"
    })))
}
