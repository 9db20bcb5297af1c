//! Integration tests for the gqlbridge server.
//!
//! These tests require a running `gqlbridge-server` at `localhost:4000`
//! (override with `GQLBRIDGE_ENDPOINT_URL`). They are marked `#[ignore]` so
//! they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p gqlbridge-integration -- --ignored
//! ```

use std::sync::Once;

use url::Url;

/// Media type every response is served with.
pub const GRAPHQL_RESPONSE: &str = "application/graphql-response+json";

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// GraphQL endpoint of the server under test.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("GQLBRIDGE_ENDPOINT_URL")
        .unwrap_or_else(|_| "http://localhost:4000/graphql".to_owned())
}

/// Create an HTTP client for the server under test.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Endpoint URL with the given search parameters appended.
pub fn get_url(params: &[(&str, &str)]) -> anyhow::Result<Url> {
    let mut url = Url::parse(&endpoint_url())?;
    url.query_pairs_mut().extend_pairs(params);
    tracing::debug!(%url, "built GET url");
    Ok(url)
}

/// Read a response body as JSON, asserting the GraphQL response media type.
pub async fn graphql_body(response: reqwest::Response) -> anyhow::Result<serde_json::Value> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some(GRAPHQL_RESPONSE));
    Ok(response.json().await?)
}

mod test_get;
mod test_post;
