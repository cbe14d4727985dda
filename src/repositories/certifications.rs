use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::models::Certification;
use crate::services::certification_service::{
    CreateCertificationInput, UpdateCertificationInput,
};

pub struct CertificationRepository {
    pool: PgPool,
}

impl CertificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Certification>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM certifications ORDER BY issue_date DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<Certification>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM certifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateCertificationInput,
    ) -> Result<Certification, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO certifications \
                 (user_id, name, issuer, credential_id, credential_url, issue_date, \
                  expiry_date, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.issuer)
        .bind(&input.credential_id)
        .bind(&input.credential_url)
        .bind(input.issue_date)
        .bind(input.expiry_date)
        .bind(&input.image_url)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateCertificationInput,
    ) -> Result<Option<Certification>, sqlx::Error> {
        // `id = id` keeps the SET clause valid when the payload is empty
        let mut qb = QueryBuilder::new("UPDATE certifications SET id = id");
        if let Some(name) = &input.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(issuer) = &input.issuer {
            qb.push(", issuer = ").push_bind(issuer);
        }
        if let Some(credential_id) = &input.credential_id {
            qb.push(", credential_id = ").push_bind(credential_id);
        }
        if let Some(credential_url) = &input.credential_url {
            qb.push(", credential_url = ").push_bind(credential_url);
        }
        if let Some(issue_date) = input.issue_date {
            qb.push(", issue_date = ").push_bind(issue_date);
        }
        match input.expiry_date {
            Some(Some(expiry_date)) => {
                qb.push(", expiry_date = ").push_bind(expiry_date);
            }
            Some(None) => {
                qb.push(", expiry_date = NULL");
            }
            None => {}
        }
        if let Some(image_url) = &input.image_url {
            qb.push(", image_url = ").push_bind(image_url);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as().fetch_optional(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
