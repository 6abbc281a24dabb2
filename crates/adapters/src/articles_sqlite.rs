//! SQLite article repository

use async_trait::async_trait;
use imagestream_domain::{Article, ArticleRepository, NewArticle, RepositoryError};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;
use time::OffsetDateTime;
use uuid::Uuid;

type ArticleRow = (String, String, i64, String, String, String, String);

/// SQLite-backed article repository over the `message_posts` table
pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

impl SqliteArticleRepository {
    /// Create a new repository, initializing the database if needed
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let db_path = db_path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepositoryError::Database(format!("Failed to create directory: {}", e))
            })?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let repository = Self { pool };
        repository.run_migrations().await?;

        Ok(repository)
    }

    /// Create an in-memory repository (for testing)
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let repository = Self { pool };
        repository.run_migrations().await?;

        Ok(repository)
    }

    async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message_posts (
                id TEXT PRIMARY KEY,
                image_type TEXT NOT NULL,
                image_size INTEGER NOT NULL,
                image_name TEXT NOT NULL,
                message TEXT NOT NULL,
                short_url TEXT NOT NULL DEFAULT '',
                create_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        // Listings sort by create_date descending
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_message_posts_create_date
            ON message_posts(create_date)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}

fn article_from_row(row: ArticleRow) -> Result<Article, RepositoryError> {
    let (id, image_type, image_size, image_name, message, short_url, create_date_str) = row;

    let id = Uuid::parse_str(&id).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    let create_date = OffsetDateTime::parse(
        &create_date_str,
        &time::format_description::well_known::Rfc3339,
    )
    .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Article {
        id,
        image_type,
        image_size: image_size as u64,
        image_name,
        message,
        short_url,
        create_date,
    })
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, RepositoryError> {
        let id = Uuid::new_v4();
        let create_date_str = article
            .create_date
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO message_posts
            (id, image_type, image_size, image_name, message, short_url, create_date)
            VALUES (?, ?, ?, ?, ?, '', ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&article.image_type)
        .bind(article.image_size as i64)
        .bind(&article.image_name)
        .bind(&article.message)
        .bind(&create_date_str)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(Article {
            id,
            image_type: article.image_type,
            image_size: article.image_size,
            image_name: article.image_name,
            message: article.message,
            short_url: String::new(),
            create_date: article.create_date,
        })
    }

    async fn update_short_url(&self, id: Uuid, short_url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE message_posts SET short_url = ? WHERE id = ?")
            .bind(short_url)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        let row: Option<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, image_type, image_size, image_name, message, short_url, create_date
            FROM message_posts
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(article_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, image_type, image_size, image_name, message, short_url, create_date
            FROM message_posts
            ORDER BY create_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(article_from_row).collect()
    }
}
