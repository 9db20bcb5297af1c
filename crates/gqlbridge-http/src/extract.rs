//! Extraction of a validated [`GqlRequest`] from a GET or POST request.
//!
//! - **POST**: headers, then the body is read (bounded) and decoded as a JSON
//!   object.
//! - **GET**: headers, then `query`, `operationName`, `variables` and
//!   `extensions` are read from the URL search parameters.
//!
//! Both paths end in the shape validator, so a request that leaves this module
//! always satisfies the same invariants. Method dispatch happens in
//! [`handle`](crate::service::handle); the extractors do not re-check it.

use bytes::Bytes;
use gqlbridge_model::error::{GqlHttpError, GqlHttpErrorCode};
use gqlbridge_model::request::GqlRequest;
use gqlbridge_model::response::GqlHttpStatus;
use http::request::Parts;
use http_body_util::{BodyExt, Limited};
use serde_json::{Map, Value};
use url::Url;

use crate::headers::{validate_get_headers, validate_post_headers};
use crate::shape::into_request;

/// Base used to resolve origin-form request targets (`/graphql?query=...`).
const ORIGIN_BASE: &str = "http://localhost";

/// Build the request from a POST body.
pub async fn extract_post<B>(
    parts: &Parts,
    body: B,
    max_body_size: usize,
) -> Result<GqlRequest, GqlHttpError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    validate_post_headers(&parts.headers)?;

    let bytes = collect_body(body, max_body_size).await?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        GqlHttpError::new(
            GqlHttpErrorCode::BodyDecodeFailure,
            format!("Failed to decode request body as JSON: {e}"),
        )
        .with_source(e)
    })?;

    let Value::Object(candidate) = value else {
        return Err(GqlHttpError::new(
            GqlHttpErrorCode::ShapeInvalid,
            "Request body is not a JSON object",
        ));
    };

    into_request(candidate).ok_or_else(shape_invalid)
}

/// Build the request from GET search parameters.
///
/// Any header failure is reported with the default 400 status, whatever
/// status the header check chose.
pub fn extract_get(parts: &Parts) -> Result<GqlRequest, GqlHttpError> {
    validate_get_headers(&parts.headers).map_err(|e| e.with_status(GqlHttpStatus::BadRequest))?;

    let url = request_url(&parts.uri).map_err(|e| {
        GqlHttpError::new(
            GqlHttpErrorCode::ParameterDecodeFailure,
            format!("Request target is not a valid URL: {}", parts.uri),
        )
        .with_source(e)
    })?;
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    let query = query_param(&params, "query").ok_or_else(|| {
        GqlHttpError::new(
            GqlHttpErrorCode::QueryParameterMissing,
            "Missing required search parameter: query",
        )
    })?;
    if !query.starts_with("query") {
        return Err(GqlHttpError::new(
            GqlHttpErrorCode::QueryNotAQuery,
            "Only query operations are allowed over GET",
        ));
    }

    let mut candidate = Map::new();
    candidate.insert("query".to_owned(), Value::String(query.to_owned()));

    if let Some(name) = query_param(&params, "operationName").filter(|n| !n.is_empty()) {
        candidate.insert("operationName".to_owned(), Value::String(name.to_owned()));
    }

    for key in ["variables", "extensions"] {
        let value = match query_param(&params, key).filter(|raw| !raw.is_empty()) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                GqlHttpError::new(
                    GqlHttpErrorCode::ParameterDecodeFailure,
                    format!("Search parameter {key} is not valid JSON: {e}"),
                )
                .with_source(e)
            })?,
            None => Value::Object(Map::new()),
        };
        candidate.insert(key.to_owned(), value);
    }

    into_request(candidate).ok_or_else(shape_invalid)
}

/// Collect the body, failing if it exceeds `limit` bytes or the read aborts.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, GqlHttpError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let mut err = GqlHttpError::new(
                GqlHttpErrorCode::BodyDecodeFailure,
                format!("Failed to read request body: {e}"),
            );
            err.source = Some(e);
            Err(err)
        }
    }
}

/// Resolve the request target to an absolute URL.
fn request_url(uri: &http::Uri) -> Result<Url, url::ParseError> {
    if uri.scheme().is_some() {
        return Url::parse(&uri.to_string());
    }
    let path = uri
        .path_and_query()
        .map_or("/", http::uri::PathAndQuery::as_str);
    Url::parse(&format!("{ORIGIN_BASE}{path}"))
}

/// First value of a search parameter.
fn query_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn shape_invalid() -> GqlHttpError {
    GqlHttpError::new(
        GqlHttpErrorCode::ShapeInvalid,
        "Request object does not match the GraphQL request shape",
    )
}
