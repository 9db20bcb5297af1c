//! The GraphQL executor seam.

use std::future::Future;
use std::pin::Pin;

use gqlbridge_model::request::GqlRequest;
use gqlbridge_model::response::GqlResponse;

/// Trait that the GraphQL execution engine must implement.
///
/// The executor receives a request that already passed header negotiation and
/// shape validation, and returns a well-formed response. Schema resolution,
/// document parsing and field execution all happen behind this boundary.
pub trait GraphQLExecutor: Send + Sync + 'static {
    /// Execute a validated request.
    fn execute(&self, request: GqlRequest) -> Pin<Box<dyn Future<Output = GqlResponse> + Send>>;
}

/// Run a validated request on the executor.
pub async fn execute_request<E: GraphQLExecutor + ?Sized>(
    executor: &E,
    request: GqlRequest,
) -> GqlResponse {
    tracing::debug!(
        operation_name = ?request.operation_name,
        variables = request.variables.len(),
        "executing GraphQL request"
    );
    executor.execute(request).await
}

/// Default executor that refuses every request.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedExecutor;

impl GraphQLExecutor for NotImplementedExecutor {
    fn execute(&self, _request: GqlRequest) -> Pin<Box<dyn Future<Output = GqlResponse> + Send>> {
        Box::pin(async { GqlResponse::request_error("GraphQL execution is not configured") })
    }
}
