use std::collections::HashMap;

use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::database::models::{
    Project, ProjectImage, ProjectWithRelations, PublishStatus, Technology,
};
use crate::services::project_service::{CreateProjectInput, ReorderItem, UpdateProjectInput};
use crate::types::Pagination;

/// Visibility and query filters for project listings.
#[derive(Debug, Default)]
pub struct ProjectFilter {
    pub status: Option<PublishStatus>,
    pub featured: bool,
}

impl ProjectFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if self.featured {
            qb.push(" AND featured = TRUE");
        }
    }
}

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_page(
        &self,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> Result<(Vec<ProjectWithRelations>, i64), sqlx::Error> {
        let list = async {
            let mut qb = QueryBuilder::new("SELECT * FROM projects WHERE TRUE");
            filter.push_where(&mut qb);
            qb.push(" ORDER BY sort_order ASC, created_at DESC");
            qb.push(" LIMIT ").push_bind(pagination.limit_or_default());
            qb.push(" OFFSET ").push_bind(pagination.offset_or_zero());
            qb.build_query_as::<Project>().fetch_all(&self.pool).await
        };

        let count = async {
            let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE TRUE");
            filter.push_where(&mut qb);
            qb.build_query_scalar::<i64>().fetch_one(&self.pool).await
        };

        let (projects, total) = futures::try_join!(list, count)?;
        let projects = self.attach_relations(projects).await?;
        Ok((projects, total))
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProjectWithRelations>, sqlx::Error> {
        let project: Option<Project> = sqlx::query_as("SELECT * FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        self.with_relations(project).await
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateProjectInput,
        slug: &str,
        status: PublishStatus,
    ) -> Result<ProjectWithRelations, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let project: Project = sqlx::query_as(
            "INSERT INTO projects \
                 (user_id, title, slug, description, content, thumbnail_url, demo_url, \
                  repo_url, status, featured, start_date, end_date, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(slug)
        .bind(&input.description)
        .bind(&input.content)
        .bind(&input.thumbnail_url)
        .bind(&input.demo_url)
        .bind(&input.repo_url)
        .bind(status)
        .bind(input.featured.unwrap_or(false))
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.sort_order.unwrap_or(0))
        .fetch_one(&mut *tx)
        .await?;

        if let Some(technologies) = &input.technologies {
            Self::sync_technologies(&mut tx, project.id, technologies).await?;
        }

        if let Some(images) = &input.images {
            // Positional order in the payload becomes the display order
            for (idx, image) in images.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO project_images (project_id, url, alt_text, sort_order) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(project.id)
                .bind(&image.url)
                .bind(&image.alt_text)
                .bind(idx as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        self.attach_one(project).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateProjectInput,
        new_slug: Option<&str>,
    ) -> Result<Option<ProjectWithRelations>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::new("UPDATE projects SET updated_at = now()");
        if let Some(title) = &input.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(slug) = new_slug {
            qb.push(", slug = ").push_bind(slug.to_string());
        }
        if let Some(description) = &input.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(content) = &input.content {
            qb.push(", content = ").push_bind(content);
        }
        if let Some(thumbnail_url) = &input.thumbnail_url {
            qb.push(", thumbnail_url = ").push_bind(thumbnail_url);
        }
        if let Some(demo_url) = &input.demo_url {
            qb.push(", demo_url = ").push_bind(demo_url);
        }
        if let Some(repo_url) = &input.repo_url {
            qb.push(", repo_url = ").push_bind(repo_url);
        }
        if let Some(status) = input.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(featured) = input.featured {
            qb.push(", featured = ").push_bind(featured);
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
        if let Some(sort_order) = input.sort_order {
            qb.push(", sort_order = ").push_bind(sort_order);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let project: Option<Project> = qb.build_query_as().fetch_optional(&mut *tx).await?;

        if let (Some(project), Some(technologies)) = (&project, &input.technologies) {
            sqlx::query("DELETE FROM project_technologies WHERE project_id = $1")
                .bind(project.id)
                .execute(&mut *tx)
                .await?;
            Self::sync_technologies(&mut tx, project.id, technologies).await?;
        }

        tx.commit().await?;
        self.with_relations(project).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk sort_order update, applied atomically.
    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for item in items {
            sqlx::query("UPDATE projects SET sort_order = $1, updated_at = now() WHERE id = $2")
                .bind(item.order)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn find_technologies(&self) -> Result<Vec<Technology>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM technologies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    /// Connect-or-create each technology by name, then link it to the project.
    async fn sync_technologies(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
        technologies: &[String],
    ) -> Result<(), sqlx::Error> {
        for name in technologies {
            let technology_id: Uuid = sqlx::query_scalar(
                "INSERT INTO technologies (name) VALUES ($1) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING id",
            )
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

            sqlx::query(
                "INSERT INTO project_technologies (project_id, technology_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(project_id)
            .bind(technology_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn attach_one(&self, project: Project) -> Result<ProjectWithRelations, sqlx::Error> {
        match self.attach_relations(vec![project]).await?.pop() {
            Some(project) => Ok(project),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    async fn with_relations(
        &self,
        project: Option<Project>,
    ) -> Result<Option<ProjectWithRelations>, sqlx::Error> {
        match project {
            Some(project) => Ok(Some(self.attach_one(project).await?)),
            None => Ok(None),
        }
    }

    async fn attach_relations(
        &self,
        projects: Vec<Project>,
    ) -> Result<Vec<ProjectWithRelations>, sqlx::Error> {
        if projects.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

        #[derive(FromRow)]
        struct ProjectTechnologyRow {
            project_id: Uuid,
            #[sqlx(flatten)]
            technology: Technology,
        }

        let technology_rows: Vec<ProjectTechnologyRow> = sqlx::query_as(
            "SELECT pt.project_id, t.id, t.name \
             FROM project_technologies pt \
             JOIN technologies t ON t.id = pt.technology_id \
             WHERE pt.project_id = ANY($1) \
             ORDER BY t.name ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let images: Vec<ProjectImage> = sqlx::query_as(
            "SELECT * FROM project_images WHERE project_id = ANY($1) ORDER BY sort_order ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut technologies_by_project: HashMap<Uuid, Vec<Technology>> = HashMap::new();
        for row in technology_rows {
            technologies_by_project
                .entry(row.project_id)
                .or_default()
                .push(row.technology);
        }

        let mut images_by_project: HashMap<Uuid, Vec<ProjectImage>> = HashMap::new();
        for image in images {
            images_by_project.entry(image.project_id).or_default().push(image);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let technologies =
                    technologies_by_project.remove(&project.id).unwrap_or_default();
                let images = images_by_project.remove(&project.id).unwrap_or_default();
                ProjectWithRelations {
                    project,
                    technologies,
                    images,
                }
            })
            .collect())
    }
}
