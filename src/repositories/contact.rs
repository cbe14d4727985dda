use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::ContactMessage;
use crate::services::contact_service::CreateContactInput;

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        input: &CreateContactInput,
    ) -> Result<ContactMessage, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO contact_messages (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.message)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<Option<ContactMessage>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE contact_messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
