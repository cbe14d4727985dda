use axum::{Extension, Json};
use serde_json::{json, Value};
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::auth_service::{
    AuthService, ChangePasswordInput, LoginInput, LoginResponse, UserView,
};

/// POST /api/auth/login - Authenticate the admin and receive a JWT
pub async fn login(Json(input): Json<LoginInput>) -> ApiResult<LoginResponse> {
    input.validate()?;

    let service = AuthService::new(DatabaseManager::pool().await?);
    let response = service.login(&input).await?;
    Ok(ApiResponse::success(response))
}

/// GET /api/auth/me - Current account with profile
pub async fn me(Extension(user): Extension<AuthUser>) -> ApiResult<UserView> {
    let service = AuthService::new(DatabaseManager::pool().await?);
    let view = service.current_user(user.user_id).await?;
    Ok(ApiResponse::success(view))
}

/// PUT /api/auth/password - Change the admin password
pub async fn change_password(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ChangePasswordInput>,
) -> ApiResult<Value> {
    input.validate()?;

    let service = AuthService::new(DatabaseManager::pool().await?);
    service.change_password(user.user_id, &input).await?;
    Ok(ApiResponse::success(json!({
        "message": "Password updated successfully"
    })))
}
