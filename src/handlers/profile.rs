use axum::{Extension, Json};
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Profile, ProfileWithEmail};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::profile_service::{ProfileService, UpdateProfileInput};

/// GET /api/profile - Public profile of the portfolio owner
pub async fn get() -> ApiResult<ProfileWithEmail> {
    let service = ProfileService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get().await?))
}

/// PUT /api/profile - Create-or-update the profile
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<UpdateProfileInput>,
) -> ApiResult<Profile> {
    input.validate()?;

    let service = ProfileService::new(DatabaseManager::pool().await?);
    let profile = service.update(user.user_id, &input).await?;
    Ok(ApiResponse::success(profile))
}
