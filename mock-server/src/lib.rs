use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

/// Credentials the server accepts and the batch documents it serves, in order.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub user_id: String,
    pub api_key: String,
    pub batches: Vec<Value>,
}

impl MockConfig {
    pub fn new(user_id: &str, api_key: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            api_key: api_key.to_string(),
            batches: seed(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub complete: Option<bool>,
    pub status: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

type Shared = Arc<MockConfig>;
type Rejection = (StatusCode, &'static str);

/// Fixture batches shared with the client's test vectors.
pub fn seed() -> Vec<Value> {
    // Compiled-in fixture; `seed_has_distinct_ids` fails first if it stops parsing.
    serde_json::from_str(include_str!("../../test-vectors/batches.json"))
        .expect("test-vectors/batches.json is valid JSON")
}

pub fn app(config: MockConfig) -> Router {
    Router::new()
        .route("/v1/batches", get(list_batches))
        .route("/v1/batches/{id}", get(get_batch))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn list_batches(
    State(config): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Value>>, Rejection> {
    authorize(&config, &headers)?;
    debug!(?params, "listing batches");
    Ok(Json(filter_batches(&config.batches, &params)))
}

async fn get_batch(
    State(config): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, Rejection> {
    authorize(&config, &headers)?;
    config
        .batches
        .iter()
        .find(|b| b["_id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "not found"))
}

/// Apply the list query the way Brewfather does: filter, then window.
pub fn filter_batches(batches: &[Value], params: &ListParams) -> Vec<Value> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    batches
        .iter()
        .filter(|b| params.complete != Some(true) || b["status"] == "Completed")
        .filter(|b| {
            params
                .status
                .as_deref()
                .map_or(true, |s| b["status"] == s)
        })
        .skip(params.offset.unwrap_or(0))
        .take(limit)
        .cloned()
        .collect()
}

fn authorize(config: &MockConfig, headers: &HeaderMap) -> Result<(), Rejection> {
    let unauthorized = (StatusCode::UNAUTHORIZED, "unauthorized");
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(unauthorized)?;
    let token = value.strip_prefix("Basic ").ok_or(unauthorized)?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(token)
        .map_err(|_| unauthorized)?;
    let expected = format!("{}:{}", config.user_id, config.api_key);
    if decoded != expected.as_bytes() {
        return Err(unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> ListParams {
        serde_json::from_value(serde_json::from_str(query).unwrap()).unwrap()
    }

    #[test]
    fn seed_has_distinct_ids() {
        let batches = seed();
        assert!(batches.len() >= 4);
        let mut ids: Vec<_> = batches.iter().map(|b| b["_id"].as_str().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), batches.len());
    }

    #[test]
    fn complete_keeps_only_completed() {
        let out = filter_batches(&seed(), &params(r#"{"complete": true}"#));
        assert!(!out.is_empty());
        assert!(out.iter().all(|b| b["status"] == "Completed"));
    }

    #[test]
    fn complete_false_does_not_filter() {
        let all = seed();
        let out = filter_batches(&all, &params(r#"{"complete": false}"#));
        assert_eq!(out.len(), all.len());
    }

    #[test]
    fn status_filters_exactly() {
        let out = filter_batches(&seed(), &params(r#"{"status": "Planning"}"#));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["name"], "Hefeweizen");
    }

    #[test]
    fn offset_and_limit_window() {
        let all = seed();
        let out = filter_batches(&all, &params(r#"{"offset": 1, "limit": 2}"#));
        assert_eq!(out, all[1..3].to_vec());
    }

    #[test]
    fn limit_is_capped() {
        let many: Vec<Value> = (0..80).map(|i| serde_json::json!({ "_id": i.to_string() })).collect();
        assert_eq!(filter_batches(&many, &params(r#"{"limit": 500}"#)).len(), MAX_LIMIT);
        assert_eq!(filter_batches(&many, &ListParams::default()).len(), DEFAULT_LIMIT);
    }
}
