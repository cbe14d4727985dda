use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::models::{Experience, ExperienceKind};
use crate::services::experience_service::{CreateExperienceInput, UpdateExperienceInput};

pub struct ExperienceRepository {
    pool: PgPool,
}

impl ExperienceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Experience>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM experiences ORDER BY sort_order ASC, start_date DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<Experience>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM experiences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateExperienceInput,
    ) -> Result<Experience, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO experiences \
                 (user_id, company, position, location, description, start_date, end_date, \
                  is_current, kind, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.company)
        .bind(&input.position)
        .bind(&input.location)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_current.unwrap_or(false))
        .bind(input.kind.unwrap_or(ExperienceKind::Work))
        .bind(input.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateExperienceInput,
    ) -> Result<Option<Experience>, sqlx::Error> {
        // `id = id` keeps the SET clause valid when the payload is empty
        let mut qb = QueryBuilder::new("UPDATE experiences SET id = id");
        if let Some(company) = &input.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(position) = &input.position {
            qb.push(", position = ").push_bind(position);
        }
        if let Some(location) = &input.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(description) = &input.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(start_date) = input.start_date {
            qb.push(", start_date = ").push_bind(start_date);
        }
        match input.end_date {
            Some(Some(end_date)) => {
                qb.push(", end_date = ").push_bind(end_date);
            }
            Some(None) => {
                qb.push(", end_date = NULL");
            }
            None => {}
        }
        if let Some(is_current) = input.is_current {
            qb.push(", is_current = ").push_bind(is_current);
        }
        if let Some(kind) = input.kind {
            qb.push(", kind = ").push_bind(kind);
        }
        if let Some(sort_order) = input.sort_order {
            qb.push(", sort_order = ").push_bind(sort_order);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as().fetch_optional(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
