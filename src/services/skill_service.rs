use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{Skill, SkillCategory, SkillWithCategory};
use crate::error::ApiError;
use crate::repositories::skills::SkillRepository;
use crate::types::double_option;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkillInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 0, max = 100, message = "Proficiency must be between 0 and 100"))]
    pub proficiency: Option<i32>,
    pub category_id: Option<Uuid>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSkillInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Proficiency must be between 0 and 100"))]
    pub proficiency: Option<i32>,
    /// Absent keeps the category, null detaches it, a value attaches it.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkillCategoryInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Listing response: the flat skill list plus the same skills grouped by
/// category name, with "Other" collecting the uncategorized ones.
#[derive(Debug, Serialize)]
pub struct SkillsView {
    pub skills: Vec<SkillWithCategory>,
    pub grouped: BTreeMap<String, Vec<SkillWithCategory>>,
}

pub struct SkillService {
    repo: SkillRepository,
}

impl SkillService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: SkillRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<SkillsView, ApiError> {
        let skills = self.repo.find_all().await?;
        let grouped = group_by_category(&skills);
        Ok(SkillsView { skills, grouped })
    }

    pub async fn create(&self, user_id: Uuid, input: &CreateSkillInput) -> Result<Skill, ApiError> {
        Ok(self.repo.create(user_id, input).await?)
    }

    pub async fn update(&self, id: Uuid, input: &UpdateSkillInput) -> Result<Skill, ApiError> {
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| ApiError::not_found("Skill not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("Skill not found"));
        }
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<SkillCategory>, ApiError> {
        Ok(self.repo.find_categories().await?)
    }

    pub async fn create_category(
        &self,
        input: &CreateSkillCategoryInput,
    ) -> Result<SkillCategory, ApiError> {
        Ok(self
            .repo
            .create_category(&input.name, input.sort_order.unwrap_or(0))
            .await?)
    }
}

fn group_by_category(
    skills: &[SkillWithCategory],
) -> BTreeMap<String, Vec<SkillWithCategory>> {
    let mut grouped: BTreeMap<String, Vec<SkillWithCategory>> = BTreeMap::new();
    for skill in skills {
        let key = skill
            .category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Other".to_string());
        grouped.entry(key).or_default().push(skill.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, category: Option<SkillCategory>) -> SkillWithCategory {
        SkillWithCategory {
            skill: Skill {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                name: name.to_string(),
                proficiency: 50,
                category_id: category.as_ref().map(|c| c.id),
                sort_order: 0,
            },
            category,
        }
    }

    fn category(name: &str) -> SkillCategory {
        SkillCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sort_order: 0,
        }
    }

    #[test]
    fn groups_by_category_name() {
        let backend = category("Backend");
        let skills = vec![
            skill("Rust", Some(backend.clone())),
            skill("Postgres", Some(backend)),
            skill("Juggling", None),
        ];

        let grouped = group_by_category(&skills);
        assert_eq!(grouped["Backend"].len(), 2);
        assert_eq!(grouped["Other"].len(), 1);
        assert_eq!(grouped["Other"][0].skill.name, "Juggling");
    }

    #[test]
    fn empty_input_groups_to_nothing() {
        assert!(group_by_category(&[]).is_empty());
    }
}
