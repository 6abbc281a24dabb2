//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub imagestream: ImagestreamConfig,

    #[serde(default)]
    pub bitly: BitlyConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Where multipart uploads are spooled before storage
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagestreamConfig {
    /// The public base URL of this service, handed to the shortener
    #[serde(default = "default_long_url")]
    pub long_url: String,

    /// Directory where uploaded images are stored
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,

    /// Public path segment under which stored images are served
    #[serde(default = "default_public_image_root")]
    pub public_image_root: String,

    /// Max number of posts per listing page
    #[serde(default = "default_post_limit")]
    pub post_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitlyConfig {
    #[serde(default = "default_bitly_login_env")]
    pub login_env: String,

    #[serde(default = "default_bitly_api_key_env")]
    pub api_key_env: String,

    /// Custom short domain; empty means the bit.ly default
    #[serde(default)]
    pub custom_domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "default_twitter_access_token_env")]
    pub access_token_env: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enables debug behavior, including the manual upload form
    #[serde(default)]
    pub enabled: bool,

    /// If false, Bit.ly and Twitter are not contacted
    #[serde(default)]
    pub api_usage: bool,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_upload_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./imagestream.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_long_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_image_path() -> PathBuf {
    PathBuf::from("./public/images/upload")
}

fn default_public_image_root() -> String {
    "/images/upload".to_string()
}

fn default_post_limit() -> usize {
    10
}

fn default_bitly_login_env() -> String {
    "BITLY_LOGIN".to_string()
}

fn default_bitly_api_key_env() -> String {
    "BITLY_API_KEY".to_string()
}

fn default_twitter_access_token_env() -> String {
    "TWITTER_ACCESS_TOKEN".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            db_path: default_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ImagestreamConfig {
    fn default() -> Self {
        Self {
            long_url: default_long_url(),
            image_path: default_image_path(),
            public_image_root: default_public_image_root(),
            post_limit: default_post_limit(),
        }
    }
}

impl Default for BitlyConfig {
    fn default() -> Self {
        Self {
            login_env: default_bitly_login_env(),
            api_key_env: default_bitly_api_key_env(),
            custom_domain: String::new(),
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            access_token_env: default_twitter_access_token_env(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("IMAGESTREAM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# imagestream configuration

[server]
host = "127.0.0.1"
port = 3000
# upload_dir = "/tmp"
db_path = "./imagestream.sqlite"
log_level = "info"

[imagestream]
# The public base URL handed to Bit.ly and used in image URLs.
long_url = "http://www.server.domain"
# Where uploaded images are stored.
image_path = "./public/images/upload"
# The public path the stored images are served under.
public_image_root = "/images/upload"
# Max number of posts per listing page.
post_limit = 10

[bitly]
login_env = "BITLY_LOGIN"
api_key_env = "BITLY_API_KEY"
# custom_domain = "exa.mpl"

[twitter]
access_token_env = "TWITTER_ACCESS_TOKEN"

[debug]
# Enables the manual upload form at /form.
enabled = false
# If false, Bit.ly and Twitter are not contacted.
api_usage = false
"#
        .to_string()
    }
}
