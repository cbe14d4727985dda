use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Profile, ProfileWithEmail};
use crate::services::profile_service::UpdateProfileInput;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The portfolio has a single owner, so the public profile is simply the
    /// oldest row.
    pub async fn find_first(&self) -> Result<Option<ProfileWithEmail>, sqlx::Error> {
        sqlx::query_as(
            "SELECT p.*, u.email FROM profiles p \
             JOIN users u ON u.id = p.user_id \
             ORDER BY p.created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
    }

    /// Create-or-update keyed by user_id. Absent fields keep their stored
    /// value; on first insert a missing full_name falls back to a placeholder.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        input: &UpdateProfileInput,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO profiles \
                 (user_id, full_name, title, bio, avatar_url, resume_url, location, social_links) \
             VALUES ($1, COALESCE($2, 'Your Name'), $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 full_name    = COALESCE($2, profiles.full_name), \
                 title        = COALESCE($3, profiles.title), \
                 bio          = COALESCE($4, profiles.bio), \
                 avatar_url   = COALESCE($5, profiles.avatar_url), \
                 resume_url   = COALESCE($6, profiles.resume_url), \
                 location     = COALESCE($7, profiles.location), \
                 social_links = COALESCE($8, profiles.social_links), \
                 updated_at   = now() \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.full_name)
        .bind(&input.title)
        .bind(&input.bio)
        .bind(&input.avatar_url)
        .bind(&input.resume_url)
        .bind(&input.location)
        .bind(&input.social_links)
        .fetch_one(&self.pool)
        .await
    }
}
