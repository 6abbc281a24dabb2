//! Submission pipeline - stores the upload, persists the article, and
//! enriches the response with a short URL and a social post
//!
//! The stages run strictly in sequence. Upload absence, storage failure,
//! and persistence failure abort the pipeline; once the article is durably
//! persisted, every later failure only degrades the response. The caller
//! always learns that the asset was saved even when enrichment failed.

use std::sync::Arc;

use crate::{
    addressing::content_address,
    model::{ClientResponse, NewArticle, SubmitRequest, UploadedFile},
    ports::{ArticleRepository, AssetStore, Clock, LinkShortener, SocialPublisher},
    urls,
};

/// Configuration for the submission pipeline
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Public base URL of this service, used for image and post URLs
    pub base_url: String,
    /// Public path segment under which stored images are served
    pub public_image_root: String,
    /// Toggle for the shorten-then-publish enrichment chain
    pub enrichment_enabled: bool,
}

/// Hard failures of the submission pipeline.
///
/// Shortening and publishing failures are recovered inside the pipeline and
/// never appear here.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No file in the request, or a zero-size file
    #[error("no image upload present")]
    UploadMissing,
    /// Reading the temp upload or writing the stored asset failed
    #[error("failed to store upload: {0}")]
    Io(String),
    /// Inserting the article record failed
    #[error("failed to persist article: {0}")]
    Persist(String),
}

/// Submission pipeline orchestrator
#[derive(Clone)]
pub struct SubmitPipeline<A, R, L, P, C>
where
    A: AssetStore + ?Sized,
    R: ArticleRepository + ?Sized,
    L: LinkShortener + ?Sized,
    P: SocialPublisher + ?Sized,
    C: Clock + ?Sized,
{
    assets: Arc<A>,
    repository: Arc<R>,
    shortener: Arc<L>,
    publisher: Arc<P>,
    clock: Arc<C>,
    config: SubmitConfig,
}

impl<A, R, L, P, C> SubmitPipeline<A, R, L, P, C>
where
    A: AssetStore + ?Sized,
    R: ArticleRepository + ?Sized,
    L: LinkShortener + ?Sized,
    P: SocialPublisher + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(
        assets: Arc<A>,
        repository: Arc<R>,
        shortener: Arc<L>,
        publisher: Arc<P>,
        clock: Arc<C>,
        config: SubmitConfig,
    ) -> Self {
        Self {
            assets,
            repository,
            shortener,
            publisher,
            clock,
            config,
        }
    }

    /// Run one submission through the pipeline.
    ///
    /// Returns the consolidated client response regardless of which
    /// enrichment stages succeeded.
    pub async fn submit(&self, request: SubmitRequest) -> Result<ClientResponse, SubmitError> {
        let upload = match request.upload {
            Some(upload) if upload.size > 0 => upload,
            _ => return Err(SubmitError::UploadMissing),
        };

        let article = self.store_and_persist(&upload, request.message).await?;

        let image_url = urls::image_url(
            &self.config.base_url,
            &self.config.public_image_root,
            &article.image_name,
        );
        let mut response = ClientResponse::from_article(&article, image_url);

        // From here on the article is durable: failures degrade the
        // response instead of aborting it.
        if !self.config.enrichment_enabled {
            response.response_message = "API usage is disabled.".to_string();
            return Ok(response);
        }

        let long_url = urls::post_url(&self.config.base_url, &article.id);
        let short_url = match self.shortener.shorten(&long_url).await {
            Ok(short_url) => short_url,
            Err(error) => {
                tracing::warn!(long_url = %long_url, error = %error, "URL shortening failed");
                response.response_message = format!("Error shortening URL: {error}");
                return Ok(response);
            }
        };

        tracing::debug!(short_url = %short_url, "Shortened post URL");
        response.short_url = short_url.clone();

        // The response is already built from the in-memory article, so a
        // failed update must not fail the submission.
        if let Err(error) = self
            .repository
            .update_short_url(article.id, &short_url)
            .await
        {
            tracing::error!(
                article_id = %article.id,
                short_url = %short_url,
                error = %error,
                "Failed to persist short URL"
            );
        }

        let status = format!("{}\n{}", response.message, short_url);
        match self.publisher.post(&status).await {
            Ok(post) => {
                response.tweet_sent = true;
                response.tweet_url = format!(
                    "http://twitter.com/{}/statuses/{}",
                    post.author_handle, post.post_id
                );
            }
            Err(error) => {
                tracing::warn!(error = %error, "Social post failed");
                response.response_message = format!("Error posting status update: {error}");
            }
        }

        Ok(response)
    }

    /// The hard-failure prefix of the pipeline: address, store, persist.
    async fn store_and_persist(
        &self,
        upload: &UploadedFile,
        message: String,
    ) -> Result<crate::model::Article, SubmitError> {
        let content = self
            .assets
            .read_upload(&upload.temp_path)
            .await
            .map_err(|error| {
                tracing::error!(
                    path = %upload.temp_path.display(),
                    error = %error,
                    "Error reading uploaded image"
                );
                SubmitError::Io(error.to_string())
            })?;

        let image_name = content_address(&content, &upload.original_name);

        let stored_path = self
            .assets
            .store(&upload.temp_path, &image_name, &content)
            .await
            .map_err(|error| {
                tracing::error!(
                    image_name = %image_name,
                    error = %error,
                    "Error writing uploaded file"
                );
                SubmitError::Io(error.to_string())
            })?;

        tracing::debug!(path = %stored_path.display(), "Stored uploaded image");

        self.repository
            .create(NewArticle {
                image_type: upload.content_type.clone(),
                image_size: upload.size,
                image_name,
                message,
                create_date: self.clock.now(),
            })
            .await
            .map_err(|error| {
                tracing::error!(error = %error, "Error persisting article");
                SubmitError::Persist(error.to_string())
            })
    }
}
