use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::UploadedFile;

pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        folder: Option<&str>,
    ) -> Result<Vec<UploadedFile>, sqlx::Error> {
        match folder {
            Some(folder) => {
                sqlx::query_as(
                    "SELECT * FROM uploaded_files WHERE folder = $1 ORDER BY created_at DESC",
                )
                .bind(folder)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as("SELECT * FROM uploaded_files ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<UploadedFile>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM uploaded_files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        file_name: &str,
        folder: &str,
        path: &str,
        url: &str,
        content_type: &str,
        size_bytes: i64,
    ) -> Result<UploadedFile, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO uploaded_files \
                 (user_id, file_name, folder, path, url, content_type, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(user_id)
        .bind(file_name)
        .bind(folder)
        .bind(path)
        .bind(url)
        .bind(content_type)
        .bind(size_bytes)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM uploaded_files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
