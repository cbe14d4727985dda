use std::collections::HashMap;

use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::models::{Skill, SkillCategory, SkillWithCategory};
use crate::services::skill_service::{CreateSkillInput, UpdateSkillInput};

pub struct SkillRepository {
    pool: PgPool,
}

impl SkillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All skills ordered by category sort_order, then the skill's own
    /// sort_order. Uncategorized skills sort last.
    pub async fn find_all(&self) -> Result<Vec<SkillWithCategory>, sqlx::Error> {
        let skills: Vec<Skill> = sqlx::query_as(
            "SELECT s.* FROM skills s \
             LEFT JOIN skill_categories c ON c.id = s.category_id \
             ORDER BY c.sort_order ASC NULLS LAST, s.sort_order ASC, s.name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let categories: HashMap<Uuid, SkillCategory> = self
            .find_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(skills
            .into_iter()
            .map(|skill| {
                let category = skill.category_id.and_then(|id| categories.get(&id).cloned());
                SkillWithCategory { skill, category }
            })
            .collect())
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<Skill>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateSkillInput,
    ) -> Result<Skill, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO skills (user_id, name, proficiency, category_id, sort_order) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(input.proficiency.unwrap_or(50))
        .bind(input.category_id)
        .bind(input.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateSkillInput,
    ) -> Result<Option<Skill>, sqlx::Error> {
        // `id = id` keeps the SET clause valid when the payload is empty
        let mut qb = QueryBuilder::new("UPDATE skills SET id = id");
        if let Some(name) = &input.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(proficiency) = input.proficiency {
            qb.push(", proficiency = ").push_bind(proficiency);
        }
        match input.category_id {
            Some(Some(category_id)) => {
                qb.push(", category_id = ").push_bind(category_id);
            }
            Some(None) => {
                qb.push(", category_id = NULL");
            }
            None => {}
        }
        if let Some(sort_order) = input.sort_order {
            qb.push(", sort_order = ").push_bind(sort_order);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as().fetch_optional(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_categories(&self) -> Result<Vec<SkillCategory>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM skill_categories ORDER BY sort_order ASC, name ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create_category(
        &self,
        name: &str,
        sort_order: i32,
    ) -> Result<SkillCategory, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO skill_categories (name, sort_order) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
    }
}
