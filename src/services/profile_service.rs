use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{Profile, ProfileWithEmail};
use crate::error::ApiError;
use crate::repositories::profiles::ProfileRepository;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 200, message = "Full name must be 1-200 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    pub bio: Option<String>,
    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
    #[validate(url(message = "Resume URL must be a valid URL"))]
    pub resume_url: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub social_links: Option<Value>,
}

pub struct ProfileService {
    repo: ProfileRepository,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ProfileRepository::new(pool),
        }
    }

    pub async fn get(&self) -> Result<ProfileWithEmail, ApiError> {
        self.repo
            .find_first()
            .await?
            .ok_or_else(|| ApiError::not_found("Profile not found"))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        input: &UpdateProfileInput,
    ) -> Result<Profile, ApiError> {
        Ok(self.repo.upsert(user_id, input).await?)
    }
}
