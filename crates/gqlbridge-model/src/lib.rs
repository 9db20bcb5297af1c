//! GraphQL-over-HTTP model types for gqlbridge.
//!
//! This crate holds the values that flow through one request/response cycle:
//! parsed media ranges and media types, the validated [`GqlRequest`], the
//! [`GqlResponse`] sum type produced by an executor, and the error taxonomy
//! that pairs a request error with its HTTP status.
//!
//! Every value is built fresh for a single request and is never shared across
//! requests, so nothing here needs interior mutability.
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod media;
pub mod request;
pub mod response;

pub use error::{GqlHttpError, GqlHttpErrorCode};
pub use media::{MediaRange, MediaType};
pub use request::GqlRequest;
pub use response::{
    GqlError, GqlHttpResponse, GqlHttpStatus, GqlResponse, HttpResult, Location, PathSegment,
    RequestError,
};
