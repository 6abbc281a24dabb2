//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted submission record: one uploaded image plus its message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque identifier, assigned by the repository on creation
    pub id: Uuid,
    /// MIME type reported for the upload
    pub image_type: String,
    /// Upload size in bytes
    pub image_size: u64,
    /// Content-addressed storage name (content hash + original extension)
    pub image_name: String,
    /// User-supplied text
    pub message: String,
    /// Shortened public URL; empty until enrichment succeeds
    pub short_url: String,
    /// Creation timestamp; sole sort key for listings (descending)
    #[serde(with = "time::serde::rfc3339")]
    pub create_date: OffsetDateTime,
}

/// Article fields known before the repository assigns an id
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub image_type: String,
    pub image_size: u64,
    pub image_name: String,
    pub message: String,
    pub create_date: OffsetDateTime,
}

/// An uploaded file as handed over by the inbound HTTP layer.
///
/// The temp file belongs to the request layer until the asset store copies
/// it; the copy is followed by a best-effort delete of the temp path.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Where the request layer spooled the upload
    pub temp_path: PathBuf,
    /// Filename as sent by the client, used for the extension only
    pub original_name: String,
    /// MIME type as sent by the client
    pub content_type: String,
    /// Upload size in bytes
    pub size: u64,
}

/// One submission as received from the client
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// The uploaded image, if any was present in the request
    pub upload: Option<UploadedFile>,
    /// Accompanying text
    pub message: String,
}

/// Client-facing view of a submission; transient, never persisted.
///
/// A superset of [`Article`]: the enrichment fields stay at their defaults
/// when enrichment is disabled or a downstream call fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: Uuid,
    /// Fully qualified public URL for the stored image
    pub image_url: String,
    pub image_name: String,
    pub image_size: u64,
    pub image_type: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub create_date: OffsetDateTime,
    /// Shortened post URL, empty when shortening was skipped or failed
    pub short_url: String,
    /// Public view URL of the social post, empty unless publishing succeeded
    pub tweet_url: String,
    /// Human-readable note about skipped or failed enrichment stages
    pub response_message: String,
    pub tweet_sent: bool,
}

impl ClientResponse {
    /// Build the initial response for a freshly persisted article, with all
    /// enrichment fields at their defaults.
    pub fn from_article(article: &Article, image_url: String) -> Self {
        Self {
            id: article.id,
            image_url,
            image_name: article.image_name.clone(),
            image_size: article.image_size,
            image_type: article.image_type.clone(),
            message: article.message.clone(),
            create_date: article.create_date,
            short_url: article.short_url.clone(),
            tweet_url: String::new(),
            response_message: String::new(),
            tweet_sent: false,
        }
    }
}

/// Result of a successful social post
#[derive(Debug, Clone)]
pub struct PublishedPost {
    /// Platform-specific post id
    pub post_id: String,
    /// Handle of the authoring account
    pub author_handle: String,
}
