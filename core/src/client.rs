//! Blocking client for Brewfather's batch endpoints.
//!
//! # Design
//! `Client` holds only a transport and the API base URL and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; `batch` and `batches` chain the two through
//! the transport. The split keeps URL construction and decoding testable
//! without a network.

use std::time::Duration;

use serde::de::{Error as _, Unexpected};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::{self, ListOption};
use crate::transport::{BasicAuth, Transport, UreqTransport};
use crate::types::Batch;

pub const DEFAULT_BASE_URL: &str = "https://api.brewfather.app/v1";

/// Client for the Brewfather v1 API.
///
/// The default transport signs every request with HTTP Basic credentials and
/// sends it with `ureq`. Any other `Transport` can be plugged in through
/// [`Client::with_transport`].
#[derive(Debug, Clone)]
pub struct Client<T = BasicAuth<UreqTransport>> {
    transport: T,
    base_url: String,
}

impl Client {
    /// Client for the public API. Credentials are not validated until the
    /// first request.
    pub fn new(user_id: &str, api_key: &str) -> Self {
        Self::with_transport(
            BasicAuth::new(UreqTransport::new(), user_id, api_key),
            DEFAULT_BASE_URL,
        )
    }

    pub fn builder(user_id: &str, api_key: &str) -> ClientBuilder {
        ClientBuilder {
            user_id: user_id.to_string(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single batch by id.
    pub fn batch(&self, id: &str, opts: &[ListOption]) -> Result<Batch, ApiError> {
        let request = self.build_batch(id, opts)?;
        let response = self.transport.execute(request)?;
        self.parse_batch(response)
    }

    /// Fetch batches, in whatever order the server returns them.
    pub fn batches(&self, opts: &[ListOption]) -> Result<Vec<Batch>, ApiError> {
        let request = self.build_batches(opts)?;
        let response = self.transport.execute(request)?;
        self.parse_batches(response)
    }

    pub fn build_batch(&self, id: &str, opts: &[ListOption]) -> Result<HttpRequest, ApiError> {
        self.build_get(&format!("{}/batches/{id}", self.base_url), opts)
    }

    pub fn build_batches(&self, opts: &[ListOption]) -> Result<HttpRequest, ApiError> {
        self.build_get(&format!("{}/batches", self.base_url), opts)
    }

    pub fn parse_batch(&self, response: HttpResponse) -> Result<Batch, ApiError> {
        check_status(&response)?;
        let batch = decode_batch(serde_json::from_str(&response.body)?)?;
        debug!(id = %batch.id, "decoded brewfather batch");
        Ok(batch)
    }

    pub fn parse_batches(&self, response: HttpResponse) -> Result<Vec<Batch>, ApiError> {
        check_status(&response)?;
        let values: Vec<Value> = serde_json::from_str(&response.body)?;
        let batches = values
            .into_iter()
            .map(decode_batch)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = batches.len(), "decoded brewfather batches");
        Ok(batches)
    }

    fn build_get(&self, raw: &str, opts: &[ListOption]) -> Result<HttpRequest, ApiError> {
        let mut url = Url::parse(raw)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Request(format!(
                "unsupported URL scheme {:?}",
                url.scheme()
            )));
        }
        options::apply_all(&mut url, opts);
        Ok(HttpRequest::get(url))
    }
}

/// Only JSON objects are batches. Derived struct decoding would otherwise
/// accept a positional array as well.
fn decode_batch(value: Value) -> Result<Batch, serde_json::Error> {
    let kind = match &value {
        Value::Object(_) => return serde_json::from_value(value),
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    };
    Err(serde_json::Error::invalid_type(Unexpected::Other(kind), &"a batch object"))
}

/// Status check for responses that did not pass through `BasicAuth`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status > 299 {
        return Err(ApiError::Upstream {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(())
}

/// Configures the default `ureq`-backed client.
#[derive(Clone)]
pub struct ClientBuilder {
    user_id: String,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Overall deadline for each request, connect through body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Fails with `ApiError::Url` if the base URL does not parse.
    pub fn build(self) -> Result<Client, ApiError> {
        Url::parse(&self.base_url)?;
        let inner = UreqTransport::with_options(self.timeout, self.user_agent.as_deref());
        Ok(Client::with_transport(
            BasicAuth::new(inner, &self.user_id, &self.api_key),
            &self.base_url,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{complete, limit, offset, status};

    /// Answers every request with the same canned response.
    struct Fixed(HttpResponse);

    impl Transport for Fixed {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn client() -> Client<Fixed> {
        Client::with_transport(Fixed(ok("[]")), "http://localhost:3000/v1")
    }

    #[test]
    fn build_batches_produces_correct_url() {
        let req = client().build_batches(&[]).unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:3000/v1/batches");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_batch_appends_id_and_options() {
        let req = client().build_batch("abc123", &[complete(true)]).unwrap();
        assert_eq!(
            req.url.as_str(),
            "http://localhost:3000/v1/batches/abc123?complete=true"
        );
    }

    #[test]
    fn limit_then_offset_both_present() {
        let req = client().build_batches(&[limit(10), offset(5)]).unwrap();
        let query = req.url.query().unwrap();
        assert!(query.contains("limit=10"));
        assert!(query.contains("offset=5"));
    }

    #[test]
    fn options_keep_call_order() {
        let req = client()
            .build_batches(&[status("Completed"), limit(3)])
            .unwrap();
        assert_eq!(req.url.query(), Some("status=Completed&limit=3"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = Client::with_transport(Fixed(ok("[]")), "http://localhost:3000/v1/");
        let req = c.build_batches(&[]).unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:3000/v1/batches");
    }

    #[test]
    fn unparsable_base_is_url_error() {
        let c = Client::with_transport(Fixed(ok("[]")), "not a url");
        let err = c.build_batches(&[]).unwrap_err();
        assert!(matches!(err, ApiError::Url(_)));
    }

    #[test]
    fn non_http_scheme_is_request_error() {
        let c = Client::with_transport(Fixed(ok("[]")), "ftp://example.com");
        let err = c.build_batches(&[]).unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }

    #[test]
    fn parse_batches_success() {
        let batches = client()
            .parse_batches(ok(r#"[{"_id":"b1","measuredAbv":5.2},{"_id":"b2"}]"#))
            .unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].id, "b1");
        assert_eq!(batches[0].abv(), 5.2);
    }

    #[test]
    fn parse_batch_bad_json() {
        let err = client().parse_batch(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_batch_rejects_list_shape() {
        let err = client().parse_batch(ok("[]")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = client().parse_batch(ok(r#"["abc","Pils"]"#)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().contains("a batch object"));
    }

    #[test]
    fn parse_batch_rejects_scalars() {
        for body in ["null", "42", "\"b1\"", "true"] {
            let err = client().parse_batch(ok(body)).unwrap_err();
            assert!(matches!(err, ApiError::Decode(_)), "{body}");
        }
    }

    #[test]
    fn parse_batches_rejects_positional_elements() {
        let err = client()
            .parse_batches(ok(r#"[{"_id":"b1"},["b2","Pils"]]"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_batch_error_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_batch(response).unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 500, .. }));
    }

    #[test]
    fn batch_runs_through_transport() {
        let c = Client::with_transport(
            Fixed(ok(r#"{"_id":"b1","name":"Pils","batchNo":3}"#)),
            DEFAULT_BASE_URL,
        );
        let batch = c.batch("b1", &[]).unwrap();
        assert_eq!(batch.name, "Pils");
        assert_eq!(batch.batch_number, 3);
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let err = Client::builder("u", "k").base_url("::").build().unwrap_err();
        assert!(matches!(err, ApiError::Url(_)));
    }

    #[test]
    fn builder_defaults_to_public_api() {
        let c = Client::builder("u", "k")
            .timeout(Duration::from_secs(5))
            .user_agent("brewchild-test")
            .build()
            .unwrap();
        assert_eq!(c.base_url(), DEFAULT_BASE_URL);
        assert_eq!(Client::new("u", "k").base_url(), DEFAULT_BASE_URL);
    }
}
