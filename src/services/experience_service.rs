use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{Experience, ExperienceKind};
use crate::error::ApiError;
use crate::repositories::experiences::ExperienceRepository;
use crate::types::double_option;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExperienceInput {
    #[validate(length(min = 1, max = 200, message = "Company must be 1-200 characters"))]
    pub company: String,
    #[validate(length(min = 1, max = 200, message = "Position must be 1-200 characters"))]
    pub position: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: Option<bool>,
    pub kind: Option<ExperienceKind>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExperienceInput {
    #[validate(length(min = 1, max = 200, message = "Company must be 1-200 characters"))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Position must be 1-200 characters"))]
    pub position: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    /// Absent keeps the end date, null clears it (position became current).
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub is_current: Option<bool>,
    pub kind: Option<ExperienceKind>,
    pub sort_order: Option<i32>,
}

pub struct ExperienceService {
    repo: ExperienceRepository,
}

impl ExperienceService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ExperienceRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Experience>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateExperienceInput,
    ) -> Result<Experience, ApiError> {
        Ok(self.repo.create(user_id, input).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateExperienceInput,
    ) -> Result<Experience, ApiError> {
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| ApiError::not_found("Experience not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Experience not found"));
        }
        Ok(())
    }
}
