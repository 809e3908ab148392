//! Outbound call to the shortening service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{error::ShortenError, protocol::ShortenResponse};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ServiceSettings;

#[async_trait]
pub trait ShortenService: Send + Sync {
    /// Maps `long_url` to a short link. The text is sent as given.
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;
}

#[derive(Clone)]
pub struct HttpShortenService {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpShortenService {
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ShortenError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ShortenError::NotConfigured {
                reason: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, ShortenError> {
        settings.validate()?;
        Self::new(
            settings.endpoint_url()?,
            settings.api_key()?,
            settings.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ShortenService for HttpShortenService {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        debug!(endpoint = %self.endpoint, "requesting short link");
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("api", self.api_key.as_str()), ("url", long_url)])
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "shortening service returned an error status");
            return Err(ShortenError::ServiceHttp {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(classify_transport_error)?;
        let short_url = ShortenResponse::from_json(&body)
            .and_then(ShortenResponse::into_short_url)
            .inspect_err(|err| warn!(error = %err, "shortening service rejected request"))?;
        info!(short_url = %short_url, "shortened url");
        Ok(short_url)
    }
}

// The request URL carries the credential, so it is stripped before logging.
fn classify_transport_error(err: reqwest::Error) -> ShortenError {
    let err = err.without_url();
    if err.is_timeout() {
        warn!(error = %err, "shortening request timed out");
        ShortenError::Timeout
    } else {
        warn!(error = %err, "shortening request failed at transport level");
        ShortenError::Connectivity
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
