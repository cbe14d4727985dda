use axum::extract::Path;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::ContactMessage;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::contact_service::{ContactService, CreateContactInput};

/// POST /api/contact - Leave a message for the site owner
pub async fn create(Json(input): Json<CreateContactInput>) -> ApiResult<Value> {
    input.validate()?;

    let service = ContactService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.create(&input).await?))
}

/// GET /api/contact - Inbox, newest first
pub async fn list() -> ApiResult<Vec<ContactMessage>> {
    let service = ContactService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// PUT /api/contact/:id/read
pub async fn mark_as_read(Path(id): Path<Uuid>) -> ApiResult<ContactMessage> {
    let service = ContactService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.mark_as_read(id).await?))
}

/// DELETE /api/contact/:id
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = ContactService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Message deleted successfully"
    })))
}
