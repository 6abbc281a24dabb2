//! Bit.ly URL-shortening adapter (v3 legacy endpoint)

use async_trait::async_trait;
use imagestream_domain::{LinkShortener, ShortenError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

/// Bit.ly shortener using the legacy login/apiKey credentials
pub struct BitlyShortener {
    client: Client,
    login: String,
    api_key: SecretString,
    custom_domain: String,
    base_url: String,
    enabled: bool,
}

impl BitlyShortener {
    /// An empty custom domain falls back to `bit.ly`
    pub fn new(login: String, api_key: SecretString, custom_domain: String) -> Self {
        Self::with_base_url(
            login,
            api_key,
            custom_domain,
            "https://api-ssl.bitly.com".to_string(),
            true,
        )
    }

    pub fn with_base_url(
        login: String,
        api_key: SecretString,
        custom_domain: String,
        base_url: String,
        enabled: bool,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        let custom_domain = if custom_domain.is_empty() {
            "bit.ly".to_string()
        } else {
            custom_domain
        };

        Self {
            client,
            login,
            api_key,
            custom_domain,
            base_url,
            enabled,
        }
    }

    /// Create a disabled shortener (when API usage is turned off)
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            login: String::new(),
            api_key: SecretString::new("".into()),
            custom_domain: "bit.ly".to_string(),
            base_url: String::new(),
            enabled: false,
        }
    }
}

#[derive(Deserialize)]
struct ShortenResponse {
    status_code: i64,
    #[serde(default)]
    status_txt: String,
    #[serde(default)]
    data: Option<ShortenData>,
}

#[derive(Deserialize)]
struct ShortenData {
    url: Option<String>,
}

#[async_trait]
impl LinkShortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        if !self.enabled {
            return Err(ShortenError::Api("Shortener is disabled".to_string()));
        }

        let url = format!("{}/v3/shorten", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("login", self.login.as_str()),
                ("apiKey", self.api_key.expose_secret()),
                ("longUrl", long_url),
                ("domain", self.custom_domain.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ShortenError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShortenError::Api(format!("Failed to shorten URL: {}", body)));
        }

        let body: ShortenResponse = response
            .json()
            .await
            .map_err(|e| ShortenError::Api(e.to_string()))?;

        // Bit.ly reports errors inside a 200 body via status_code.
        if body.status_code != 200 {
            return Err(ShortenError::Api(format!(
                "Bit.ly status {}: {}",
                body.status_code, body.status_txt
            )));
        }

        body.data
            .and_then(|data| data.url)
            .ok_or_else(|| ShortenError::Api("Bit.ly response missing shortened URL".to_string()))
    }
}

/// Stub shortener for testing
pub struct StubShortener {
    short_url: Option<String>,
    shortened: Mutex<Vec<String>>,
}

impl StubShortener {
    pub fn returning(short_url: &str) -> Self {
        Self {
            short_url: Some(short_url.to_string()),
            shortened: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            short_url: None,
            shortened: Mutex::new(vec![]),
        }
    }

    /// Long URLs this stub was asked to shorten
    pub fn shortened(&self) -> Vec<String> {
        self.shortened.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkShortener for StubShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        self.shortened.lock().unwrap().push(long_url.to_string());
        self.short_url
            .clone()
            .ok_or_else(|| ShortenError::Network("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shortener(server: &MockServer, custom_domain: &str) -> BitlyShortener {
        BitlyShortener::with_base_url(
            "login".to_string(),
            SecretString::new("api-key".into()),
            custom_domain.to_string(),
            server.uri(),
            true,
        )
    }

    #[tokio::test]
    async fn shorten_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/shorten"))
            .and(query_param("login", "login"))
            .and(query_param("apiKey", "api-key"))
            .and(query_param("longUrl", "http://example.com/post/1"))
            .and(query_param("domain", "bit.ly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status_code": 200,
                "status_txt": "OK",
                "data": { "url": "http://bit.ly/abc" }
            })))
            .mount(&mock_server)
            .await;

        let short_url = shortener(&mock_server, "")
            .shorten("http://example.com/post/1")
            .await
            .unwrap();

        assert_eq!(short_url, "http://bit.ly/abc");
    }

    #[tokio::test]
    async fn shorten_passes_custom_domain() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/shorten"))
            .and(query_param("domain", "exa.mpl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status_code": 200,
                "data": { "url": "http://exa.mpl/abc" }
            })))
            .mount(&mock_server)
            .await;

        let short_url = shortener(&mock_server, "exa.mpl")
            .shorten("http://example.com/post/1")
            .await
            .unwrap();

        assert_eq!(short_url, "http://exa.mpl/abc");
    }

    #[tokio::test]
    async fn shorten_fails_on_in_body_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/shorten"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status_code": 500,
                "status_txt": "INVALID_LOGIN",
                "data": null
            })))
            .mount(&mock_server)
            .await;

        let result = shortener(&mock_server, "")
            .shorten("http://example.com/post/1")
            .await;

        assert!(matches!(result, Err(ShortenError::Api(_))));
    }

    #[tokio::test]
    async fn shorten_fails_on_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/shorten"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = shortener(&mock_server, "")
            .shorten("http://example.com/post/1")
            .await;

        assert!(matches!(result, Err(ShortenError::Api(_))));
    }

    #[tokio::test]
    async fn disabled_shortener_errors_without_a_request() {
        let result = BitlyShortener::disabled().shorten("http://example.com").await;
        assert!(matches!(result, Err(ShortenError::Api(_))));
    }
}
