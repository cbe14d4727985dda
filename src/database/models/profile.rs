use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Profile joined with the owning account's email, as served publicly.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileWithEmail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub profile: Profile,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub location: Option<String>,
    pub social_links: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
