use axum::extract::{Multipart, Path, Query};
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::UploadedFile;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::upload_service::UploadService;

const DEFAULT_FOLDER: &str = "portfolio";

/// POST /api/admin/upload - Multipart upload with a `file` field and an
/// optional `folder` field
pub async fn create(
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> ApiResult<UploadedFile> {
    let mut folder = DEFAULT_FOLDER.to_string();
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid folder field: {}", e)))?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid file field: {}", e)))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let service = UploadService::new(DatabaseManager::pool().await?);
    let record = service
        .store(user.user_id, &file_name, &content_type, &data, &folder)
        .await?;
    Ok(ApiResponse::created(record))
}

#[derive(Debug, Deserialize)]
pub struct UploadListQuery {
    pub folder: Option<String>,
}

/// GET /api/admin/upload - Uploaded files, optionally by folder
pub async fn list(Query(query): Query<UploadListQuery>) -> ApiResult<Vec<UploadedFile>> {
    let service = UploadService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(
        service.list(query.folder.as_deref()).await?,
    ))
}

/// DELETE /api/admin/upload/:id - Remove the record and the file on disk
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let service = UploadService::new(DatabaseManager::pool().await?);
    service.delete(id).await?;
    Ok(ApiResponse::success(json!({
        "message": "File deleted successfully"
    })))
}
