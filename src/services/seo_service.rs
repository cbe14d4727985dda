use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::SeoSetting;
use crate::error::ApiError;
use crate::repositories::seo::SeoRepository;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSeoInput {
    #[validate(length(max = 200, message = "Meta title must be at most 200 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500, message = "Meta description must be at most 500 characters"))]
    pub meta_description: Option<String>,
    #[validate(url(message = "OG image must be a valid URL"))]
    pub og_image: Option<String>,
    pub structured_data: Option<Value>,
}

/// Page lookup result: either the stored settings or an empty default, so
/// the frontend can render meta tags for any page key without a 404 branch.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SeoPageView {
    Stored(SeoSetting),
    Empty {
        page_key: String,
        meta_title: Option<String>,
        meta_description: Option<String>,
        og_image: Option<String>,
        structured_data: Option<Value>,
    },
}

pub struct SeoService {
    repo: SeoRepository,
}

impl SeoService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: SeoRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<SeoSetting>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_page_key(&self, page_key: &str) -> Result<SeoPageView, ApiError> {
        match self.repo.find_by_page_key(page_key).await? {
            Some(setting) => Ok(SeoPageView::Stored(setting)),
            None => Ok(SeoPageView::Empty {
                page_key: page_key.to_string(),
                meta_title: None,
                meta_description: None,
                og_image: None,
                structured_data: None,
            }),
        }
    }

    pub async fn upsert(
        &self,
        user_id: Uuid,
        page_key: &str,
        input: &UpdateSeoInput,
    ) -> Result<SeoSetting, ApiError> {
        Ok(self.repo.upsert(user_id, page_key, input).await?)
    }
}
