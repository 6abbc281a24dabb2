//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{Article, NewArticle, PublishedPost};

/// Error type for asset store operations
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for durable storage of uploaded image bytes
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Read the temporary upload into memory
    async fn read_upload(&self, temp_path: &Path) -> Result<Vec<u8>, AssetStoreError>;

    /// Write `content` under `computed_name` in the destination directory,
    /// then delete the temp upload best-effort (a failed delete is logged,
    /// never surfaced). Returns the final path.
    async fn store(
        &self,
        temp_path: &Path,
        computed_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, AssetStoreError>;
}

/// Error type for article repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting article metadata
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article, assigning its id
    async fn create(&self, article: NewArticle) -> Result<Article, RepositoryError>;

    /// Set the short URL on an existing article
    async fn update_short_url(&self, id: Uuid, short_url: &str) -> Result<(), RepositoryError>;

    /// Fetch a single article by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;

    /// All articles, newest first (create_date descending)
    async fn list(&self) -> Result<Vec<Article>, RepositoryError>;
}

/// Error type for URL-shortening operations
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
}

/// Port for the external URL-shortening service
#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Shorten `long_url`, returning the shortened URL
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;
}

/// Error type for social publishing operations
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// Port for the external social network
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    /// Post `status`, returning the platform post id and author handle
    async fn post(&self, status: &str) -> Result<PublishedPost, PublishError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
