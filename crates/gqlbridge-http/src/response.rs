//! Rendering of a [`GqlHttpResponse`] as an HTTP response.

use gqlbridge_model::response::{GqlHttpResponse, GqlHttpStatus};
use http::HeaderValue;
use http::header::CONTENT_TYPE;

use crate::body::GqlResponseBody;
use crate::headers::GRAPHQL_RESPONSE_MEDIA_TYPE;

/// Served when a response cannot be serialized.
const FALLBACK_BODY: &str = r#"{"errors":[{"message":"Bad Request"}]}"#;

/// Convert a [`GqlHttpResponse`] into an HTTP response with a JSON body and
/// `Content-Type: application/graphql-response+json`.
#[must_use]
pub fn into_http_response(
    response: &GqlHttpResponse,
    request_id: &str,
) -> http::Response<GqlResponseBody> {
    let (status, json) = match serde_json::to_vec(&response.response) {
        Ok(json) => (response.http.status, json),
        Err(e) => {
            tracing::error!(error = %e, request_id, "failed to serialize GraphQL response");
            (GqlHttpStatus::BadRequest, FALLBACK_BODY.as_bytes().to_vec())
        }
    };

    let mut http_response = http::Response::new(GqlResponseBody::from_bytes(json));
    *http_response.status_mut() = status.status_code();
    http_response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static(GRAPHQL_RESPONSE_MEDIA_TYPE),
    );
    http_response
}
