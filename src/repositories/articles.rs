use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::database::models::{Article, ArticleWithRelations, Category, PublishStatus, Tag};
use crate::services::article_service::{CreateArticleInput, UpdateArticleInput};
use crate::slug::generate_slug;
use crate::types::Pagination;

/// Visibility and query filters for article listings.
#[derive(Debug, Default)]
pub struct ArticleFilter {
    pub status: Option<PublishStatus>,
    pub featured: bool,
    pub category_slug: Option<String>,
}

impl ArticleFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if self.featured {
            qb.push(" AND featured = TRUE");
        }
        if let Some(slug) = &self.category_slug {
            qb.push(" AND category_id = (SELECT id FROM categories WHERE slug = ")
                .push_bind(slug.clone())
                .push(")");
        }
    }
}

pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of articles plus the total matching count. The page
    /// query and the count query run concurrently.
    pub async fn find_page(
        &self,
        filter: &ArticleFilter,
        pagination: Pagination,
    ) -> Result<(Vec<ArticleWithRelations>, i64), sqlx::Error> {
        let list = async {
            let mut qb = QueryBuilder::new("SELECT * FROM articles WHERE TRUE");
            filter.push_where(&mut qb);
            qb.push(" ORDER BY published_at DESC NULLS LAST, created_at DESC");
            qb.push(" LIMIT ").push_bind(pagination.limit_or_default());
            qb.push(" OFFSET ").push_bind(pagination.offset_or_zero());
            qb.build_query_as::<Article>().fetch_all(&self.pool).await
        };

        let count = async {
            let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM articles WHERE TRUE");
            filter.push_where(&mut qb);
            qb.build_query_scalar::<i64>().fetch_one(&self.pool).await
        };

        let (articles, total) = futures::try_join!(list, count)?;
        let articles = self.attach_relations(articles).await?;
        Ok((articles, total))
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ArticleWithRelations>, sqlx::Error> {
        let article: Option<Article> = sqlx::query_as("SELECT * FROM articles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        self.with_relations(article).await
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateArticleInput,
        slug: &str,
        read_time: i32,
        status: PublishStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<ArticleWithRelations, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let article: Article = sqlx::query_as(
            "INSERT INTO articles \
                 (user_id, title, slug, excerpt, content, cover_image, category_id, \
                  status, featured, read_time, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.cover_image)
        .bind(input.category_id)
        .bind(status)
        .bind(input.featured.unwrap_or(false))
        .bind(read_time)
        .bind(published_at)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tags) = &input.tags {
            Self::sync_tags(&mut tx, article.id, tags).await?;
        }

        tx.commit().await?;
        self.attach_one(article).await
    }

    /// Apply a partial update. Only fields present in the input produce SET
    /// clauses; tags present means clear the join rows then resync.
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateArticleInput,
        new_slug: Option<&str>,
        new_read_time: Option<i32>,
        stamp_published_at: bool,
    ) -> Result<Option<ArticleWithRelations>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::new("UPDATE articles SET updated_at = now()");
        if let Some(title) = &input.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(slug) = new_slug {
            qb.push(", slug = ").push_bind(slug.to_string());
        }
        if let Some(excerpt) = &input.excerpt {
            qb.push(", excerpt = ").push_bind(excerpt);
        }
        if let Some(content) = &input.content {
            qb.push(", content = ").push_bind(content);
        }
        if let Some(cover_image) = &input.cover_image {
            qb.push(", cover_image = ").push_bind(cover_image);
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
        if let Some(status) = input.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(featured) = input.featured {
            qb.push(", featured = ").push_bind(featured);
        }
        if let Some(read_time) = new_read_time {
            qb.push(", read_time = ").push_bind(read_time);
        }
        if stamp_published_at {
            qb.push(", published_at = now()");
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let article: Option<Article> = qb.build_query_as().fetch_optional(&mut *tx).await?;

        if let (Some(article), Some(tags)) = (&article, &input.tags) {
            sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
                .bind(article.id)
                .execute(&mut *tx)
                .await?;
            Self::sync_tags(&mut tx, article.id, tags).await?;
        }

        tx.commit().await?;
        self.with_relations(article).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_tags(&self) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    /// Connect-or-create each tag by name, then link it to the article.
    async fn sync_tags(
        tx: &mut Transaction<'_, Postgres>,
        article_id: Uuid,
        tags: &[String],
    ) -> Result<(), sqlx::Error> {
        for name in tags {
            let tag_id: Uuid = sqlx::query_scalar(
                "INSERT INTO tags (name, slug) VALUES ($1, $2) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING id",
            )
            .bind(name)
            .bind(generate_slug(name))
            .fetch_one(&mut **tx)
            .await?;

            sqlx::query(
                "INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(article_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn attach_one(&self, article: Article) -> Result<ArticleWithRelations, sqlx::Error> {
        match self.attach_relations(vec![article]).await?.pop() {
            Some(article) => Ok(article),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    async fn with_relations(
        &self,
        article: Option<Article>,
    ) -> Result<Option<ArticleWithRelations>, sqlx::Error> {
        match article {
            Some(article) => Ok(Some(self.attach_one(article).await?)),
            None => Ok(None),
        }
    }

    /// Load categories and tags for a batch of articles in two queries and
    /// stitch them together in memory.
    async fn attach_relations(
        &self,
        articles: Vec<Article>,
    ) -> Result<Vec<ArticleWithRelations>, sqlx::Error> {
        if articles.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = articles.iter().map(|a| a.id).collect();
        let category_ids: Vec<Uuid> = articles.iter().filter_map(|a| a.category_id).collect();

        let categories: Vec<Category> = if category_ids.is_empty() {
            vec![]
        } else {
            sqlx::query_as("SELECT * FROM categories WHERE id = ANY($1)")
                .bind(&category_ids)
                .fetch_all(&self.pool)
                .await?
        };
        let categories: HashMap<Uuid, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();

        #[derive(FromRow)]
        struct ArticleTagRow {
            article_id: Uuid,
            #[sqlx(flatten)]
            tag: Tag,
        }

        let tag_rows: Vec<ArticleTagRow> = sqlx::query_as(
            "SELECT at.article_id, t.id, t.name, t.slug \
             FROM article_tags at \
             JOIN tags t ON t.id = at.tag_id \
             WHERE at.article_id = ANY($1) \
             ORDER BY t.name ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_article: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags_by_article.entry(row.article_id).or_default().push(row.tag);
        }

        Ok(articles
            .into_iter()
            .map(|article| {
                let category = article.category_id.and_then(|id| categories.get(&id).cloned());
                let tags = tags_by_article.remove(&article.id).unwrap_or_default();
                ArticleWithRelations {
                    article,
                    category,
                    tags,
                }
            })
            .collect())
    }
}
