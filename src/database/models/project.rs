use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::PublishStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Technology {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectImage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub thumbnail_url: Option<String>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
    pub status: PublishStatus,
    pub featured: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project as returned by the API: the row plus technologies and ordered images.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithRelations {
    #[serde(flatten)]
    pub project: Project,
    pub technologies: Vec<Technology>,
    pub images: Vec<ProjectImage>,
}
