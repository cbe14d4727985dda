use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::ContactMessage;
use crate::error::ApiError;
use crate::repositories::contact::ContactRepository;
use crate::services::mailer::MAILER;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

pub struct ContactService {
    repo: ContactRepository,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ContactRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    /// Store the message, then notify the site owner by email in the
    /// background. Delivery failures are logged and never surfaced to the
    /// visitor.
    pub async fn create(&self, input: &CreateContactInput) -> Result<Value, ApiError> {
        self.repo.create(input).await?;

        if let Some(mailer) = MAILER.as_ref() {
            let notification = input.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_contact_notification(&notification).await {
                    tracing::warn!("Failed to send contact notification email: {}", e);
                }
            });
        }

        Ok(json!({ "message": "Message sent successfully" }))
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<ContactMessage, ApiError> {
        self.repo
            .mark_as_read(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Message not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Message not found"));
        }
        Ok(())
    }
}
