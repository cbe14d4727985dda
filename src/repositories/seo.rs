use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::SeoSetting;
use crate::services::seo_service::UpdateSeoInput;

pub struct SeoRepository {
    pool: PgPool,
}

impl SeoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<SeoSetting>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM seo_settings ORDER BY page_key ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_page_key(
        &self,
        page_key: &str,
    ) -> Result<Option<SeoSetting>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM seo_settings WHERE page_key = $1")
            .bind(page_key)
            .fetch_optional(&self.pool)
            .await
    }

    /// Create-or-update keyed by (user_id, page_key). Absent fields keep
    /// their stored value.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        page_key: &str,
        input: &UpdateSeoInput,
    ) -> Result<SeoSetting, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO seo_settings \
                 (user_id, page_key, meta_title, meta_description, og_image, structured_data) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, page_key) DO UPDATE SET \
                 meta_title       = COALESCE($3, seo_settings.meta_title), \
                 meta_description = COALESCE($4, seo_settings.meta_description), \
                 og_image         = COALESCE($5, seo_settings.og_image), \
                 structured_data  = COALESCE($6, seo_settings.structured_data) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(page_key)
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.og_image)
        .bind(&input.structured_data)
        .fetch_one(&self.pool)
        .await
    }
}
