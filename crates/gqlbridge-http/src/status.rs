//! Assignment of the HTTP status for an executed response.

use gqlbridge_model::response::{GqlHttpResponse, GqlHttpStatus, GqlResponse, HttpResult};

/// Attach the HTTP result for a response returned by the executor.
///
/// A response with `data` (success or partial success) is served with 200; a
/// request error is served with 400. 5xx is never produced here. The message
/// is always `None`: textual detail lives in the GraphQL error list.
#[must_use]
pub fn map_response(response: GqlResponse) -> GqlHttpResponse {
    let status = if response.has_data() {
        GqlHttpStatus::Ok
    } else {
        GqlHttpStatus::BadRequest
    };
    GqlHttpResponse {
        response,
        http: HttpResult::new(status),
    }
}
