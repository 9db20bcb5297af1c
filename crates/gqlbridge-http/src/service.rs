//! GraphQL-over-HTTP request pipeline and the hyper `Service` around it.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use hyper::body::Incoming;

use gqlbridge_model::error::GqlHttpError;
use gqlbridge_model::response::GqlHttpResponse;

use crate::body::GqlResponseBody;
use crate::dispatch::{GraphQLExecutor, execute_request};
use crate::extract::{extract_get, extract_post};
use crate::response::into_http_response;
use crate::status::map_response;

/// Default upper bound for a POST body: 1 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Configuration for the GraphQL-over-HTTP pipeline.
#[derive(Debug, Clone)]
pub struct GqlHttpConfig {
    /// Largest POST body, in bytes, that is read before the request is refused.
    pub max_body_size: usize,
}

impl Default for GqlHttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Run one HTTP request through the GraphQL-over-HTTP pipeline.
///
/// `POST` and `GET` are extracted into a validated request which is handed to
/// the executor; any other method is answered with 405. Extraction failures
/// are returned as-is without reaching the executor.
pub async fn handle<B, E>(
    req: http::Request<B>,
    executor: &E,
    config: &GqlHttpConfig,
) -> GqlHttpResponse
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    E: GraphQLExecutor + ?Sized,
{
    let (parts, body) = req.into_parts();

    let extracted = if parts.method == http::Method::POST {
        extract_post(&parts, body, config.max_body_size).await
    } else if parts.method == http::Method::GET {
        extract_get(&parts)
    } else {
        Err(GqlHttpError::method_not_allowed(&parts.method))
    };

    match extracted {
        Ok(request) => map_response(execute_request(executor, request).await),
        Err(err) => {
            tracing::debug!(
                method = %parts.method,
                code = err.code.as_str(),
                status = %err.status,
                detail = %err.detail,
                "rejected GraphQL request"
            );
            err.into_response()
        }
    }
}

/// Hyper `Service` implementation for GraphQL-over-HTTP.
///
/// Wraps a [`GraphQLExecutor`] and answers every incoming request with a
/// GraphQL response; transport failures never escape as service errors.
#[derive(Debug)]
pub struct GqlHttpService<E: GraphQLExecutor> {
    executor: Arc<E>,
    config: Arc<GqlHttpConfig>,
}

impl<E: GraphQLExecutor> GqlHttpService<E> {
    /// Create a new `GqlHttpService`.
    pub fn new(executor: E, config: GqlHttpConfig) -> Self {
        Self::from_shared(Arc::new(executor), config)
    }

    /// Create a service around an executor that is shared elsewhere.
    pub fn from_shared(executor: Arc<E>, config: GqlHttpConfig) -> Self {
        Self {
            executor,
            config: Arc::new(config),
        }
    }
}

impl<E: GraphQLExecutor> Clone for GqlHttpService<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: GraphQLExecutor> hyper::service::Service<http::Request<Incoming>> for GqlHttpService<E> {
    type Response = http::Response<GqlResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let executor = Arc::clone(&self.executor);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, executor.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Handle a request and render the result as an HTTP response.
async fn process_request<B, E>(
    req: http::Request<B>,
    executor: &E,
    config: &GqlHttpConfig,
    request_id: &str,
) -> http::Response<GqlResponseBody>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    E: GraphQLExecutor + ?Sized,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = handle(req, executor, config).await;

    tracing::info!(
        request_id,
        %method,
        %path,
        status = %response.http.status,
        "served GraphQL request"
    );
    into_http_response(&response, request_id)
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<GqlResponseBody>,
    request_id: &str,
) -> http::Response<GqlResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }
    headers.insert("server", http::HeaderValue::from_static("gqlbridge"));

    response
}
