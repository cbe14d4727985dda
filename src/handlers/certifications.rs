use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::Certification;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::certification_service::{
    CertificationService, CreateCertificationInput, UpdateCertificationInput,
};

/// GET /api/certifications - Newest issue date first
pub async fn list() -> ApiResult<Vec<Certification>> {
    let service = CertificationService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// POST /api/certifications
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateCertificationInput>,
) -> ApiResult<Certification> {
    input.validate()?;

    let service = CertificationService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::created(service.create(user.user_id, &input).await?))
}

/// PUT /api/certifications/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCertificationInput>,
) -> ApiResult<Certification> {
    input.validate()?;

    let service = CertificationService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(id, &input).await?))
}

/// DELETE /api/certifications/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = CertificationService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Certification deleted successfully"
    })))
}
