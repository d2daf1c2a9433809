//! Error types for the Brewfather client.
//!
//! # Design
//! Every variant names the stage that failed: URL parsing, request
//! construction, the network round-trip, the upstream answer, or decoding.
//! Non-2xx responses keep the raw status and body text so callers can see
//! what Brewfather actually said. Nothing here is retried; each error ends
//! the call that produced it.

use thiserror::Error;

/// Boxed source for transport failures, so any `Transport` can report its own error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API URL could not be parsed.
    #[error("failed to parse brewfather URL: {0}")]
    Url(#[from] url::ParseError),

    /// A well-formed URL that cannot be turned into a GET request.
    #[error("failed to create request to brewfather: {0}")]
    Request(String),

    /// The network round-trip failed, or the response body could not be read.
    #[error("failed to query the brewfather server: {0}")]
    Transport(#[source] BoxError),

    /// Brewfather answered with a status above 299.
    #[error("received error from brewfather (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    /// The response body did not match the expected JSON shape.
    #[error("failed to unmarshal response from brewfather: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// True when Brewfather reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Upstream { status: 404, .. })
    }

    /// HTTP status of an upstream error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_carries_body() {
        let err = ApiError::Upstream {
            status: 404,
            body: "not found".to_string(),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn url_error_names_stage() {
        let err: ApiError = url::Url::parse("::nope").unwrap_err().into();
        assert!(err.to_string().starts_with("failed to parse brewfather URL"));
        assert!(!err.is_not_found());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_error_names_stage() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("failed to unmarshal response"));
    }
}
