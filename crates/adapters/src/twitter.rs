//! Twitter publishing adapter

use async_trait::async_trait;
use imagestream_domain::{PublishError, PublishedPost, SocialPublisher};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

/// Twitter publisher posting status updates
pub struct TwitterPublisher {
    client: Client,
    access_token: SecretString,
    base_url: String,
    enabled: bool,
}

impl TwitterPublisher {
    pub fn new(access_token: SecretString) -> Self {
        Self::with_base_url(access_token, "https://api.twitter.com".to_string(), true)
    }

    pub fn with_base_url(access_token: SecretString, base_url: String, enabled: bool) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            access_token,
            base_url,
            enabled,
        }
    }

    /// Create a disabled publisher (when API usage is turned off)
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            access_token: SecretString::new("".into()),
            base_url: String::new(),
            enabled: false,
        }
    }
}

#[derive(Deserialize)]
struct StatusUpdateResponse {
    id_str: String,
    user: StatusUser,
}

#[derive(Deserialize)]
struct StatusUser {
    screen_name: String,
}

#[async_trait]
impl SocialPublisher for TwitterPublisher {
    async fn post(&self, status: &str) -> Result<PublishedPost, PublishError> {
        if !self.enabled {
            return Err(PublishError::Api("Publisher is disabled".to_string()));
        }

        let url = format!("{}/1.1/statuses/update.json", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.expose_secret()),
            )
            .form(&[("status", status)])
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        if response.status() == 401 {
            return Err(PublishError::Auth("Invalid access token".to_string()));
        }

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api(format!(
                "Failed to post status update: {}",
                body
            )));
        }

        let update: StatusUpdateResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Api(e.to_string()))?;

        Ok(PublishedPost {
            post_id: update.id_str,
            author_handle: update.user.screen_name,
        })
    }
}

/// Stub publisher for testing
pub struct StubPublisher {
    outcome: Option<PublishedPost>,
    posted: Mutex<Vec<String>>,
}

impl StubPublisher {
    pub fn returning(post_id: &str, author_handle: &str) -> Self {
        Self {
            outcome: Some(PublishedPost {
                post_id: post_id.to_string(),
                author_handle: author_handle.to_string(),
            }),
            posted: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: None,
            posted: Mutex::new(vec![]),
        }
    }

    /// Status texts this stub was asked to post
    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPublisher for StubPublisher {
    async fn post(&self, status: &str) -> Result<PublishedPost, PublishError> {
        self.posted.lock().unwrap().push(status.to_string());
        self.outcome
            .clone()
            .ok_or_else(|| PublishError::Api("over capacity".to_string()))
    }
}
