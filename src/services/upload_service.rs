use std::path::{Path, PathBuf};

use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::models::UploadedFile;
use crate::error::ApiError;
use crate::repositories::uploads::UploadRepository;

pub struct UploadService {
    repo: UploadRepository,
}

impl UploadService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: UploadRepository::new(pool),
        }
    }

    /// Validate, write the file under the configured upload directory with a
    /// UUID name, and record it. The original file name is kept only as
    /// display metadata.
    pub async fn store(
        &self,
        user_id: Uuid,
        original_name: &str,
        content_type: &str,
        data: &[u8],
        folder: &str,
    ) -> Result<UploadedFile, ApiError> {
        let upload = &config::config().upload;

        if data.is_empty() {
            return Err(ApiError::bad_request("No file uploaded"));
        }
        if data.len() > upload.max_size_bytes {
            return Err(ApiError::bad_request(format!(
                "File exceeds the maximum size of {} bytes",
                upload.max_size_bytes
            )));
        }
        if !upload.allowed_types.iter().any(|t| t == content_type) {
            return Err(ApiError::bad_request(format!(
                "Unsupported file type: {}",
                content_type
            )));
        }
        if !is_valid_folder(folder) {
            return Err(ApiError::bad_request(
                "Folder may only contain letters, digits, hyphens and underscores",
            ));
        }

        let stored_name = stored_file_name(original_name);
        let dir = PathBuf::from(&upload.dir).join(folder);
        let path = dir.join(&stored_name);

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            tracing::error!("Failed to create upload directory {}: {}", dir.display(), e);
            ApiError::internal_server_error("Failed to store file")
        })?;
        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write upload {}: {}", path.display(), e);
            ApiError::internal_server_error("Failed to store file")
        })?;

        let url = format!("/uploads/{}/{}", folder, stored_name);
        let record = self
            .repo
            .create(
                user_id,
                original_name,
                folder,
                &path.to_string_lossy(),
                &url,
                content_type,
                data.len() as i64,
            )
            .await?;

        Ok(record)
    }

    pub async fn list(&self, folder: Option<&str>) -> Result<Vec<UploadedFile>, ApiError> {
        Ok(self.repo.find_all(folder).await?)
    }

    /// Remove the database row and the file on disk. A file that is already
    /// gone from disk is logged, not an error.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let record = self
            .repo
            .find_row(id)
            .await?
            .ok_or_else(|| ApiError::not_found("File not found"))?;

        self.repo.delete(id).await?;

        if let Err(e) = tokio::fs::remove_file(&record.path).await {
            tracing::warn!("Could not remove uploaded file {}: {}", record.path, e);
        }

        Ok(())
    }
}

/// Folder names become path segments, so they are restricted to a safe
/// character set.
fn is_valid_folder(folder: &str) -> bool {
    !folder.is_empty()
        && folder.len() <= 64
        && folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// UUID file name carrying over a sanitized extension from the original.
fn stored_file_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_names_are_restricted() {
        assert!(is_valid_folder("portfolio"));
        assert!(is_valid_folder("blog-covers_2024"));
        assert!(!is_valid_folder(""));
        assert!(!is_valid_folder("../etc"));
        assert!(!is_valid_folder("a/b"));
        assert!(!is_valid_folder(&"x".repeat(65)));
    }

    #[test]
    fn stored_name_keeps_a_clean_extension() {
        let name = stored_file_name("photo.JPG");
        assert!(name.ends_with(".jpg"));

        // the rest is a UUID, not the original name
        assert!(!name.contains("photo"));
    }

    #[test]
    fn stored_name_drops_suspicious_extensions() {
        assert!(!stored_file_name("evil.a/b").contains('/'));
        let no_ext = stored_file_name("README");
        assert!(!no_ext.contains('.'));
    }
}
