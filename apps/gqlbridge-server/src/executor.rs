//! Built-in executor used when no GraphQL engine is linked in.

use std::future::Future;
use std::pin::Pin;

use gqlbridge_http::GraphQLExecutor;
use gqlbridge_model::request::GqlRequest;
use gqlbridge_model::response::GqlResponse;
use serde_json::{Value, json};

/// Executor that answers every request with the request it received.
///
/// Useful for checking the transport layer end to end: the `data` entry
/// holds the `query`, `operationName` and `variables` that passed validation.
#[derive(Debug, Clone, Default)]
pub struct EchoExecutor;

impl GraphQLExecutor for EchoExecutor {
    fn execute(&self, request: GqlRequest) -> Pin<Box<dyn Future<Output = GqlResponse> + Send>> {
        Box::pin(async move { GqlResponse::success(echo(request)) })
    }
}

fn echo(request: GqlRequest) -> Value {
    json!({
        "echo": {
            "query": request.query,
            "operationName": request.operation_name,
            "variables": request.variables,
        }
    })
}
