use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{ProjectWithRelations, PublishStatus, Technology};
use crate::error::ApiError;
use crate::repositories::projects::{ProjectFilter, ProjectRepository};
use crate::slug::generate_slug;
use crate::types::{double_option, Pagination};

#[derive(Debug, Deserialize, Validate)]
pub struct ProjectImageInput {
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub url: String,
    #[validate(length(max = 200))]
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Thumbnail URL must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[validate(url(message = "Demo URL must be a valid URL"))]
    pub demo_url: Option<String>,
    #[validate(url(message = "Repository URL must be a valid URL"))]
    pub repo_url: Option<String>,
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub sort_order: Option<i32>,
    pub technologies: Option<Vec<String>>,
    #[validate(nested)]
    pub images: Option<Vec<ProjectImageInput>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Thumbnail URL must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[validate(url(message = "Demo URL must be a valid URL"))]
    pub demo_url: Option<String>,
    #[validate(url(message = "Repository URL must be a valid URL"))]
    pub repo_url: Option<String>,
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    /// Absent keeps the end date, null clears it (project back in progress).
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub sort_order: Option<i32>,
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderItem {
    pub id: Uuid,
    pub order: i32,
}

pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ProjectRepository::new(pool),
        }
    }

    /// List projects with the public/admin visibility rule applied.
    pub async fn list(
        &self,
        status: Option<PublishStatus>,
        featured: bool,
        is_authenticated: bool,
        pagination: Pagination,
    ) -> Result<(Vec<ProjectWithRelations>, i64), ApiError> {
        let status = if is_authenticated {
            status
        } else {
            Some(PublishStatus::Published)
        };

        let filter = ProjectFilter { status, featured };
        Ok(self.repo.find_page(&filter, pagination).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ProjectWithRelations, ApiError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateProjectInput,
    ) -> Result<ProjectWithRelations, ApiError> {
        let slug = generate_slug(&input.title);
        let status = input.status.unwrap_or(PublishStatus::Draft);
        Ok(self.repo.create(user_id, input, &slug, status).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateProjectInput,
    ) -> Result<ProjectWithRelations, ApiError> {
        let new_slug = input.title.as_deref().map(generate_slug);
        self.repo
            .update(id, input, new_slug.as_deref())
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Project not found"));
        }
        Ok(())
    }

    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<Value, ApiError> {
        self.repo.reorder(items).await?;
        Ok(json!({ "message": "Projects reordered successfully" }))
    }

    pub async fn technologies(&self) -> Result<Vec<Technology>, ApiError> {
        Ok(self.repo.find_technologies().await?)
    }
}
