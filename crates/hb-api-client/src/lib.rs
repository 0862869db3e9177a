//! JSON-over-HTTP clients for the Healthy Bites backend.
//!
//! The wire is abstracted behind [`HttpTransport`] so the same clients run on
//! reqwest natively and on `fetch` in the browser.

pub mod admin;
pub mod storefront;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::error;

pub use admin::AdminClient;
pub use storefront::StorefrontClient;

/// Backend used in development and by the admin dashboard.
pub const DEV_BASE_URL: &str = "http://localhost:3000/api";
/// Same-origin backend used by the storefront in production.
pub const PRODUCTION_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Storefront only: replace failed calls with canned payloads.
    pub dev_mode: bool,
}

impl ClientConfig {
    pub fn admin() -> Self {
        Self {
            base_url: DEV_BASE_URL.to_owned(),
            dev_mode: false,
        }
    }

    pub fn storefront(dev_mode: bool) -> Self {
        let base_url = if dev_mode {
            DEV_BASE_URL
        } else {
            PRODUCTION_BASE_URL
        };
        Self {
            base_url: base_url.to_owned(),
            dev_mode,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange. Only transport-level failures are errors; any status
/// code comes back as a response.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// What to send with a request. `body` is serialised to JSON.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn with_body<T: serde::Serialize + ?Sized>(
        method: Method,
        body: &T,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            method: Some(method),
            body: Some(body),
        })
    }

    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
            body: None,
        }
    }
}

/// Send a JSON request and parse the JSON reply. An empty body reads as
/// `null`.
pub(crate) async fn send_json(
    transport: &dyn HttpTransport,
    url: String,
    headers: Vec<(String, String)>,
    options: RequestOptions,
) -> Result<Value, ApiError> {
    let request = ApiRequest {
        method: options.method.unwrap_or(Method::Get),
        url: url.clone(),
        headers,
        body: options.body.map(|b| b.to_string()),
    };
    let method = request.method;

    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(err) => {
            error!(%method, %url, "API request failed: {err:#}");
            return Err(ApiError::Transport {
                url,
                message: format!("{err:#}"),
            });
        }
    };

    if !response.is_success() {
        error!(%method, %url, status = response.status, "API request failed");
        return Err(ApiError::Status {
            status: response.status,
            url,
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| {
        error!(%url, "API response is not JSON: {e}");
        ApiError::Decode(e.to_string())
    })
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `encodeURIComponent`-style escaping for a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport {
    use super::{ApiRequest, ApiResponse, HttpTransport, Method};
    use anyhow::Context;
    use async_trait::async_trait;

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Patch => reqwest::Method::PATCH,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.http.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.context("transport")?;
            let status = response.status().as_u16();
            let body = response.text().await.context("read body")?;
            Ok(ApiResponse { status, body })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubTransport;
    use super::*;

    #[test]
    fn storefront_base_url_follows_mode() {
        assert_eq!(ClientConfig::storefront(true).base_url, DEV_BASE_URL);
        assert_eq!(ClientConfig::storefront(false).base_url, "/api");
        let custom = ClientConfig::admin().with_base_url("https://shop.test/api/");
        assert_eq!(custom.url("/menu"), "https://shop.test/api/menu");
    }

    #[test]
    fn path_segments_escape_like_the_browser() {
        assert_eq!(encode_path_segment("Green Smoothie"), "Green%20Smoothie");
        assert_eq!(encode_path_segment("a+b/c"), "a%2Bb%2Fc");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let stub = StubTransport::default();
        stub.reply(500, "boom");

        let err = send_json(&stub, "http://x/api/a".into(), vec![], RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn empty_body_reads_as_null() -> anyhow::Result<()> {
        let stub = StubTransport::default();
        stub.reply(204, "");
        let value = send_json(&stub, "u".into(), vec![], RequestOptions::method(Method::Delete)).await?;
        assert_eq!(value, Value::Null);
        assert_eq!(stub.last().method, Method::Delete);
        Ok(())
    }
}
