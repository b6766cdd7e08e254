//! PostgREST client for the hosted store.
//!
//! Speaks the REST dialect exposed by Supabase: one resource per table under
//! `/rest/v1`, filters as `column=op.value` query parameters and procedures
//! under `/rest/v1/rpc`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use techhub_core::StoreError;
use techhub_core::ports::{Filter, Order, Query, RemoteStore, Row, Rows};

/// Hosted store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project URL (e.g., https://abc.supabase.co)
    pub url: String,
    /// Public API key, sent both as `apikey` and as the bearer token
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `SUPABASE_URL` and `SUPABASE_KEY` are set.
    pub fn from_env() -> Option<Self> {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Some(Self {
            url: non_empty("SUPABASE_URL")?,
            api_key: non_empty("SUPABASE_KEY")?,
            timeout: Duration::from_secs(
                std::env::var("STORE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// PostgREST-backed store.
pub struct PostgrestStore {
    client: Client,
    base_url: String,
}

impl PostgrestStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let invalid_key = |e: reqwest::header::InvalidHeaderValue| {
            StoreError::Transport(format!("Invalid API key: {e}"))
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.api_key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(invalid_key)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        tracing::info!(url = %config.url, "Hosted store configured");

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn select(&self, query: &Query) -> Result<Rows, StoreError> {
        let url = format!("{}/{}", self.base_url, query.table);
        let mut request = self.client.get(&url).query(&encode_query(query));
        if query.count {
            request = request.header("Prefer", "count=exact");
        }

        let response = request.send().await.map_err(transport)?;

        // An offset past the last match is answered with 416 and `*/N`.
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            let total = content_range_total(&response);
            tracing::debug!(table = %query.table, total = ?total, "Requested range is past the end");
            return Ok(Rows {
                rows: Vec::new(),
                total,
            });
        }
        let response = check_status(response).await?;

        let total = if query.count {
            content_range_total(&response)
        } else {
            None
        };

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        tracing::debug!(table = %query.table, rows = rows.len(), "Store select completed");

        Ok(Rows { rows, total })
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, StoreError> {
        let url = format!("{}/rpc/{}", self.base_url, function);
        let response = self
            .client
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::UnknownProcedure(function.to_string()));
        }
        let response = check_status(response).await?;

        let body = response.bytes().await.map_err(transport)?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

/// Error body PostgREST sends with non-2xx responses.
#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);

    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn content_range_total(response: &Response) -> Option<usize> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range)
}

/// `0-8/42` -> 42. An unknown total (`*`) yields `None`.
fn parse_content_range(raw: &str) -> Option<usize> {
    raw.rsplit_once('/')?.1.trim().parse().ok()
}

/// Translate a [`Query`] into PostgREST query parameters.
pub(crate) fn encode_query(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.clone())];

    params.extend(query.filters.iter().map(|f| encode_filter(f, false)));

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(encode_order)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }
    if let Some(offset) = query.offset {
        params.push(("offset".to_string(), offset.to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

/// Returns `(key, operator)`. Inside an `or=(..)` list values are quoted
/// when they contain PostgREST's reserved characters.
fn encode_filter(filter: &Filter, nested: bool) -> (String, String) {
    match filter {
        Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value_text(value, nested))),
        Filter::Neq { column, value } => {
            (column.clone(), format!("neq.{}", value_text(value, nested)))
        }
        Filter::ILike { column, needle } => {
            let pattern = format!("*{}*", escape_like(needle));
            (column.clone(), format!("ilike.{}", reserved(pattern, nested)))
        }
        Filter::Contains { column, values } => {
            let elements = values.iter().map(String::as_str).map(quoted).collect::<Vec<_>>().join(",");
            (column.clone(), format!("cs.{{{elements}}}"))
        }
        Filter::IsNull { column } => (column.clone(), "is.null".to_string()),
        Filter::Or(branches) => {
            let inner = branches
                .iter()
                .map(|branch| {
                    let (key, op) = encode_filter(branch, true);
                    match branch {
                        Filter::Or(_) => format!("{key}{op}"),
                        _ => format!("{key}.{op}"),
                    }
                })
                .collect::<Vec<_>>()
                .join(",");
            ("or".to_string(), format!("({inner})"))
        }
    }
}

fn encode_order(order: &Order) -> String {
    format!(
        "{}.{}.{}",
        order.column,
        if order.ascending { "asc" } else { "desc" },
        if order.nulls_first { "nullsfirst" } else { "nullslast" }
    )
}

fn value_text(value: &Value, nested: bool) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    reserved(text, nested)
}

fn reserved(text: String, nested: bool) -> String {
    if nested && text.contains([',', '(', ')', '"', '\\', ':']) {
        quoted(&text)
    } else {
        text
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// LIKE wildcards in user input match literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_encode_paginated_search() {
        let query = Query::table("posts")
            .filter(Filter::ilike("title", "rust"))
            .order(Order::desc("created_at"))
            .range(9, 17)
            .with_count();
        let params = encode_query(&query);

        assert_eq!(param(&params, "select"), Some("*"));
        assert_eq!(param(&params, "title"), Some("ilike.*rust*"));
        assert_eq!(param(&params, "order"), Some("created_at.desc.nullslast"));
        assert_eq!(param(&params, "offset"), Some("9"));
        assert_eq!(param(&params, "limit"), Some("9"));
    }

    #[test]
    fn test_encode_remote_rule() {
        let query = Query::table("jobs").filter(Filter::or(vec![
            Filter::ilike("location", "remote"),
            Filter::contains("tags", "remote"),
        ]));
        let params = encode_query(&query);

        assert_eq!(
            param(&params, "or"),
            Some(r#"(location.ilike.*remote*,tags.cs.{"remote"})"#)
        );
    }

    #[test]
    fn test_encode_scalars_and_nulls() {
        let query = Query::table("posts")
            .filter(Filter::eq("featured", true))
            .filter(Filter::or(vec![
                Filter::neq("type", "tutorial"),
                Filter::is_null("type"),
            ]))
            .order(Order::desc("views"))
            .order(Order::desc("created_at"));
        let params = encode_query(&query);

        assert_eq!(param(&params, "featured"), Some("eq.true"));
        assert_eq!(param(&params, "or"), Some("(type.neq.tutorial,type.is.null)"));
        assert_eq!(
            param(&params, "order"),
            Some("views.desc.nullslast,created_at.desc.nullslast")
        );
    }

    #[test]
    fn test_reserved_characters_are_quoted_inside_or() {
        let query = Query::table("jobs").filter(Filter::or(vec![
            Filter::ilike("location", "São Paulo, SP"),
            Filter::contains("tags", "c\"sharp"),
        ]));
        let params = encode_query(&query);

        assert_eq!(
            param(&params, "or"),
            Some(r#"(location.ilike."*São Paulo, SP*",tags.cs.{"c\"sharp"})"#)
        );
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        let params = encode_query(&Query::table("posts").filter(Filter::ilike("title", "100%_off")));
        assert_eq!(param(&params, "title"), Some(r"ilike.*100\%\_off*"));
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-8/42"), Some(42));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-8/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    async fn store(server: &MockServer) -> PostgrestStore {
        PostgrestStore::new(StoreConfig::new(server.uri(), "anon-key")).unwrap()
    }

    #[tokio::test]
    async fn test_select_sends_auth_and_reads_total() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("select", "*"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "9"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(header("prefer", "count=exact"))
            .respond_with(
                ResponseTemplate::new(206)
                    .insert_header("Content-Range", "0-1/42")
                    .set_body_json(json!([{ "id": 1, "title": "A" }, { "id": 2, "title": "B" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rows = store(&server)
            .await
            .select(&Query::table("posts").range(0, 8).with_count())
            .await
            .unwrap();

        assert_eq!(rows.rows.len(), 2);
        assert_eq!(rows.total, Some(42));
    }

    #[tokio::test]
    async fn test_range_past_the_end_is_an_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("offset", "45"))
            .respond_with(
                ResponseTemplate::new(416)
                    .insert_header("Content-Range", "*/42")
                    .set_body_json(json!({
                        "code": "PGRST103",
                        "message": "Requested range not satisfiable"
                    })),
            )
            .mount(&server)
            .await;

        let rows = store(&server)
            .await
            .select(&Query::table("posts").range(45, 53).with_count())
            .await
            .unwrap();

        assert!(rows.rows.is_empty());
        assert_eq!(rows.total, Some(42));
    }

    #[tokio::test]
    async fn test_select_surfaces_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "42P01",
                "message": "relation \"public.missing\" does not exist"
            })))
            .mount(&server)
            .await;

        let err = store(&server)
            .await
            .select(&Query::table("missing"))
            .await
            .unwrap_err();

        match err {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("does not exist"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rpc_posts_arguments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/increment_views"))
            .and(body_json(json!({ "table_name": "posts", "row_id": "7" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = store(&server)
            .await
            .rpc(
                "increment_views",
                json!({ "table_name": "posts", "row_id": "7" }),
            )
            .await
            .unwrap();

        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn test_rpc_unknown_function() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store(&server).await.rpc("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownProcedure(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let store = PostgrestStore::new(StoreConfig {
            timeout: Duration::from_millis(200),
            ..StoreConfig::new("http://127.0.0.1:9", "anon-key")
        })
        .unwrap();

        let err = store.select(&Query::table("posts")).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
