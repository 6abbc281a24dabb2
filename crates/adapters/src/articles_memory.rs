//! In-memory article repository for testing

use async_trait::async_trait;
use imagestream_domain::{Article, ArticleRepository, NewArticle, RepositoryError};
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory article repository.
///
/// `failing_writes` makes `create` and `update_short_url` return database
/// errors, for exercising the hard-failure paths.
pub struct InMemoryArticleRepository {
    articles: RwLock<Vec<Article>>,
    fail_writes: bool,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(vec![]),
            fail_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            articles: RwLock::new(vec![]),
            fail_writes: true,
        }
    }
}

impl Default for InMemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, RepositoryError> {
        if self.fail_writes {
            return Err(RepositoryError::Database("insert failed".to_string()));
        }

        let article = Article {
            id: Uuid::new_v4(),
            image_type: article.image_type,
            image_size: article.image_size,
            image_name: article.image_name,
            message: article.message,
            short_url: String::new(),
            create_date: article.create_date,
        };

        let mut articles = self
            .articles
            .write()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        articles.push(article.clone());
        Ok(article)
    }

    async fn update_short_url(&self, id: Uuid, short_url: &str) -> Result<(), RepositoryError> {
        if self.fail_writes {
            return Err(RepositoryError::Database("update failed".to_string()));
        }

        let mut articles = self
            .articles
            .write()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        if let Some(article) = articles.iter_mut().find(|a| a.id == id) {
            article.short_url = short_url.to_string();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        let articles = self
            .articles
            .read()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let articles = self
            .articles
            .read()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        let mut listing = articles.clone();
        listing.sort_by(|a, b| b.create_date.cmp(&a.create_date));
        Ok(listing)
    }
}
