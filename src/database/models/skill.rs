use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillCategory {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub proficiency: i32,
    pub category_id: Option<Uuid>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillWithCategory {
    #[serde(flatten)]
    pub skill: Skill,
    pub category: Option<SkillCategory>,
}
