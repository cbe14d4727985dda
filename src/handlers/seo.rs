use axum::extract::Path;
use axum::{Extension, Json};
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::SeoSetting;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::seo_service::{SeoPageView, SeoService, UpdateSeoInput};

/// GET /api/seo - All SEO settings
pub async fn list() -> ApiResult<Vec<SeoSetting>> {
    let service = SeoService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// GET /api/seo/:page_key - Stored settings or an empty default, never 404
pub async fn get_by_page_key(Path(page_key): Path<String>) -> ApiResult<SeoPageView> {
    let service = SeoService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get_by_page_key(&page_key).await?))
}

/// PUT /api/seo/:page_key - Upsert keyed by (user, page)
pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    Path(page_key): Path<String>,
    Json(input): Json<UpdateSeoInput>,
) -> ApiResult<SeoSetting> {
    input.validate()?;

    let service = SeoService::new(DatabaseManager::pool().await?);
    let setting = service.upsert(user.user_id, &page_key, &input).await?;
    Ok(ApiResponse::success(setting))
}
