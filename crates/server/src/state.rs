//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;

use imagestream_domain::usecases::SubmitPipeline;
use imagestream_domain::{ArticleRepository, AssetStore, Clock, LinkShortener, SocialPublisher};

/// The submission pipeline wired with trait-object service handles
pub type Pipeline = SubmitPipeline<
    dyn AssetStore,
    dyn ArticleRepository,
    dyn LinkShortener,
    dyn SocialPublisher,
    dyn Clock,
>;

/// Site-level settings the handlers need
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public base URL of this service
    pub base_url: String,
    /// Public path segment under which stored images are served
    pub public_image_root: String,
    /// Max posts per listing page
    pub post_limit: usize,
    /// Where multipart uploads are spooled
    pub upload_dir: PathBuf,
    /// Gates the manual upload form
    pub debug_enabled: bool,
}

/// Handler state: the pipeline plus the read-path repository handle
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub repository: Arc<dyn ArticleRepository>,
    pub site: Arc<SiteConfig>,
}
