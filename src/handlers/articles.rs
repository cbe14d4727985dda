use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{ArticleWithRelations, Category, PublishStatus, Tag};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::article_service::{ArticleService, CreateArticleInput, UpdateArticleInput};
use crate::types::Pagination;

#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    /// Only honored for authenticated callers
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    /// Category slug
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/articles - Paginated listing, visibility-filtered
pub async fn list(
    user: MaybeAuthUser,
    Query(query): Query<ArticleListQuery>,
) -> ApiResult<Vec<ArticleWithRelations>> {
    let pagination = Pagination::new(query.limit, query.offset);
    let service = ArticleService::new(DatabaseManager::pool().await?);

    let (articles, total) = service
        .list(
            query.status,
            query.featured.unwrap_or(false),
            query.category,
            user.is_authenticated(),
            pagination,
        )
        .await?;

    Ok(ApiResponse::paginated(articles, total, pagination))
}

/// GET /api/articles/categories
pub async fn categories() -> ApiResult<Vec<Category>> {
    let service = ArticleService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.categories().await?))
}

/// GET /api/articles/tags
pub async fn tags() -> ApiResult<Vec<Tag>> {
    let service = ArticleService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.tags().await?))
}

/// GET /api/articles/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> ApiResult<ArticleWithRelations> {
    let service = ArticleService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get_by_slug(&slug).await?))
}

/// POST /api/articles
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateArticleInput>,
) -> ApiResult<ArticleWithRelations> {
    input.validate()?;

    let service = ArticleService::new(DatabaseManager::pool().await?);
    let article = service.create(user.user_id, &input).await?;
    Ok(ApiResponse::created(article))
}

/// PUT /api/articles/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateArticleInput>,
) -> ApiResult<ArticleWithRelations> {
    input.validate()?;

    let service = ArticleService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(id, &input).await?))
}

/// DELETE /api/articles/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = ArticleService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Article deleted successfully"
    })))
}
