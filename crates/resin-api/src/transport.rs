// HTTP transport for the resin API.
//
// One `send` per call: builds the URL, attaches the session token, sends,
// and turns the response into either a parsed body or an `Error`. There is
// no retry and no backoff here; callers see every failure as it happened.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::TokenStore;
use crate::error::Error;
use crate::query::Request;

/// Byte stream returned by [`Transport::stream`].
pub type ByteStream = BoxStream<'static, Result<Bytes, Error>>;

/// Shared settings for building the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("resin/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(Error::Transport)
    }
}

/// Parsed response from [`Transport::send`].
///
/// JSON bodies are parsed; anything else is kept as a string value, and an
/// empty body becomes `Value::Null`.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

/// Authenticated HTTP transport bound to one API base URL.
///
/// Cheaply cloneable; clones share the connection pool and the token store.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<TokenStore>,
}

impl Transport {
    pub fn new(
        base_url: Url,
        token: Arc<TokenStore>,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url, token))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, token: Arc<TokenStore>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &Arc<TokenStore> {
        &self.token
    }

    /// Resolve an API path (e.g. `/ewa/device`) against the base URL,
    /// keeping any path prefix the base URL carries.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Send a request to an API path with an optional JSON body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, Error> {
        self.execute(&Request::action(method, path, body.cloned()))
            .await
    }

    /// Execute a rendered request descriptor.
    pub async fn execute(&self, request: &Request) -> Result<Response, Error> {
        let url = self.url(&request.path)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(auth) = self.token.authorization() {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    /// Open a streaming download of an absolute URL.
    ///
    /// The body is never buffered; chunks are yielded as they arrive.
    pub async fn stream(&self, method: Method, url: Url) -> Result<ByteStream, Error> {
        debug!(%method, %url, "opening stream");

        let mut builder = self.http.request(method, url);
        if let Some(auth) = self.token.authorization() {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        Ok(resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(Error::Transport))
            .boxed())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(resp: reqwest::Response) -> Result<Response, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let text = resp.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(Response { status, body })
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = if raw.trim().is_empty() {
            status.to_string()
        } else {
            raw.chars().take(500).collect()
        };

        if status == StatusCode::UNAUTHORIZED {
            Error::Authentication { message }
        } else {
            Error::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}
