//! HTTP client abstraction for testability

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::BotError;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Config(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

// Request URLs may carry secrets in the path (Telegram bot tokens), so only
// the host is ever logged and reqwest errors are stripped of their URL.
fn log_target(url: &Url) -> &str {
    url.host_str().unwrap_or("<no host>")
}

/// Render a reqwest error and every underlying cause, without the request URL
fn describe(e: reqwest::Error) -> String {
    let e = e.without_url();
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn parse_url(url: &str, query: &[(&str, &str)]) -> crate::Result<Url> {
    Url::parse_with_params(url, query)
        .map_err(|e| BotError::Transport(format!("Invalid request URL: {}", e)))
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let url = parse_url(url, query)?;
        let target = log_target(&url).to_string();
        tracing::debug!("GET {}", target);

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::Transport(format!("GET {} failed: {}", target, describe(e))))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Transport(format!("Reading response body: {}", describe(e))))?;

        tracing::debug!("GET {} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        let url = parse_url(url, &[])?;
        let target = log_target(&url).to_string();
        tracing::debug!("POST {}", target);

        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| BotError::Transport(format!("POST {} failed: {}", target, describe(e))))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Transport(format!("Reading response body: {}", describe(e))))?;

        tracing::debug!("POST {} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
