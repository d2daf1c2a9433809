//! Transports that carry `HttpRequest`s to Brewfather.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `UreqTransport` does the
//! real round-trip with a blocking `ureq::Agent`; `BasicAuth` wraps any
//! transport, signs each request and turns error statuses into
//! `ApiError::Upstream`. Tests swap in in-memory transports.

use std::time::Duration;

use base64::Engine as _;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single GET and returns the raw response, whatever its status.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
///
/// The agent is configured to return 4xx/5xx responses as data so status
/// interpretation stays with `BasicAuth`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_options(None, None)
    }

    pub fn with_options(timeout: Option<Duration>, user_agent: Option<&str>) -> Self {
        let mut config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout);
        if let Some(ua) = user_agent {
            config = config.user_agent(ua);
        }
        Self {
            agent: config.build().new_agent(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Decorator adding `Authorization: Basic base64(user:key)` to every request.
///
/// Any response with a status above 299 has its body read and is returned as
/// `ApiError::Upstream`; other responses pass through untouched.
#[derive(Clone)]
pub struct BasicAuth<T> {
    inner: T,
    auth: String,
}

impl<T> BasicAuth<T> {
    pub fn new(inner: T, user_id: &str, api_key: &str) -> Self {
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{user_id}:{api_key}"));
        Self {
            inner,
            auth: format!("Basic {token}"),
        }
    }
}

// Hand-written so the credentials never end up in logs.
impl<T: std::fmt::Debug> std::fmt::Debug for BasicAuth<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("inner", &self.inner)
            .field("auth", &"Basic <redacted>")
            .finish()
    }
}

impl<T: Transport> Transport for BasicAuth<T> {
    fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request
            .headers
            .push(("Authorization".to_string(), self.auth.clone()));
        debug!(url = %request.url, "sending brewfather request");

        let response = self.inner.execute(request)?;
        if response.status > 299 {
            warn!(status = response.status, "brewfather returned an error");
            return Err(ApiError::Upstream {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}
