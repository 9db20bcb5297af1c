//! GraphQL-over-HTTP protocol engine for gqlbridge.
//!
//! This crate turns an HTTP request into a validated GraphQL request, hands it
//! to an executor, and turns the executor's answer back into an HTTP response:
//!
//! ```text
//!  http::Request
//!       |
//!       v
//!  service::handle ---- method? ---- other ----> 405
//!       |                  |
//!      POST               GET
//!       |                  |
//!  headers::validate_post  headers::validate_get (failures collapse to 400)
//!  extract::extract_post   extract::extract_get
//!       \                  /
//!        shape::into_request
//!               |
//!     dispatch::GraphQLExecutor
//!               |
//!      status::map_response
//!               |
//!   response::into_http_response
//! ```
//!
//! - **Media**: `Accept` / `Content-Type` parsing and matching
//! - **Headers**: per-method header negotiation
//! - **Shape**: structural validation of the request object
//! - **Executor trait**: the boundary between HTTP and GraphQL execution
//! - **Service**: the `handle` pipeline and its hyper `Service` wrapper

pub mod body;
pub mod dispatch;
pub mod extract;
pub mod headers;
pub mod media;
pub mod response;
pub mod service;
pub mod shape;
pub mod status;

pub use body::GqlResponseBody;
pub use dispatch::{GraphQLExecutor, NotImplementedExecutor};
pub use media::{MediaTypeError, include_media_type, parse_accept, parse_media_range, parse_media_type};
pub use service::{GqlHttpConfig, GqlHttpService, handle};
