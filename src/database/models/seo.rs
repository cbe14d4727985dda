use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SeoSetting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub page_key: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub structured_data: Option<Value>,
}
