use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::Certification;
use crate::error::ApiError;
use crate::repositories::certifications::CertificationRepository;
use crate::types::double_option;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCertificationInput {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Issuer must be 1-200 characters"))]
    pub issuer: String,
    #[validate(length(max = 200))]
    pub credential_id: Option<String>,
    #[validate(url(message = "Credential URL must be a valid URL"))]
    pub credential_url: Option<String>,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCertificationInput {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Issuer must be 1-200 characters"))]
    pub issuer: Option<String>,
    #[validate(length(max = 200))]
    pub credential_id: Option<String>,
    #[validate(url(message = "Credential URL must be a valid URL"))]
    pub credential_url: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    /// Absent keeps the expiry, null clears it (certification no longer expires).
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<DateTime<Utc>>>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

pub struct CertificationService {
    repo: CertificationRepository,
}

impl CertificationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: CertificationRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Certification>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateCertificationInput,
    ) -> Result<Certification, ApiError> {
        Ok(self.repo.create(user_id, input).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateCertificationInput,
    ) -> Result<Certification, ApiError> {
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| ApiError::not_found("Certification not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Certification not found"));
        }
        Ok(())
    }
}
