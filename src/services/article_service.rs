use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{ArticleWithRelations, Category, PublishStatus, Tag};
use crate::error::ApiError;
use crate::repositories::articles::{ArticleFilter, ArticleRepository};
use crate::slug::{calculate_read_time, generate_slug};
use crate::types::{double_option, Pagination};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArticleInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image: Option<String>,
    /// Absent keeps the category, null detaches it, a value attaches it.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub status: Option<PublishStatus>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

pub struct ArticleService {
    repo: ArticleRepository,
}

impl ArticleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ArticleRepository::new(pool),
        }
    }

    /// List articles with the public/admin visibility rule applied: an
    /// unauthenticated caller is pinned to PUBLISHED regardless of the
    /// status filter.
    pub async fn list(
        &self,
        status: Option<PublishStatus>,
        featured: bool,
        category_slug: Option<String>,
        is_authenticated: bool,
        pagination: Pagination,
    ) -> Result<(Vec<ArticleWithRelations>, i64), ApiError> {
        let status = if is_authenticated {
            status
        } else {
            Some(PublishStatus::Published)
        };

        let filter = ArticleFilter {
            status,
            featured,
            category_slug,
        };
        Ok(self.repo.find_page(&filter, pagination).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ArticleWithRelations, ApiError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found"))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateArticleInput,
    ) -> Result<ArticleWithRelations, ApiError> {
        let slug = generate_slug(&input.title);
        let read_time = input
            .content
            .as_deref()
            .map(calculate_read_time)
            .unwrap_or(0);
        let status = input.status.unwrap_or(PublishStatus::Draft);
        let published_at = (status == PublishStatus::Published).then(Utc::now);

        Ok(self
            .repo
            .create(user_id, input, &slug, read_time, status, published_at)
            .await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateArticleInput,
    ) -> Result<ArticleWithRelations, ApiError> {
        let existing = self
            .repo
            .find_row(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found"))?;

        let new_slug = input.title.as_deref().map(generate_slug);
        let new_read_time = input.content.as_deref().map(calculate_read_time);
        // The first transition to PUBLISHED stamps published_at; later
        // updates never reset it.
        let stamp_published_at =
            input.status == Some(PublishStatus::Published) && existing.published_at.is_none();

        self.repo
            .update(id, input, new_slug.as_deref(), new_read_time, stamp_published_at)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Article not found"));
        }
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.repo.find_categories().await?)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        Ok(self.repo.find_tags().await?)
    }
}
