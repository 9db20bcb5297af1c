//! GraphQL responses and the HTTP status they are served with.
//!
//! The GraphQL-over-HTTP format tells a request error from an executed
//! response by the presence of `data`. [`GqlResponse`] carries that
//! distinction as an explicit variant so every consumer matches exhaustively.

use std::fmt;

use serde_json::{Map, Value};

/// A location in the GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

/// One segment of an error path: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Field name or alias.
    Key(String),
    /// List index.
    Index(usize),
}

/// A GraphQL error entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GqlError {
    /// Human-readable description.
    pub message: String,
    /// Document locations the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    /// Response path of the failing field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Implementation-specific details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GqlError {
    /// Create an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

/// A response that carries no `data`: the request never reached execution.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct RequestError {
    /// At least one error describing why the request was refused.
    pub errors: Vec<GqlError>,
    /// Protocol extensions.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl RequestError {
    /// A request error with a single message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![GqlError::new(message)],
            extensions: Map::new(),
        }
    }
}

/// A well-formed GraphQL response.
///
/// Serialized as the flat GraphQL response object. When deserializing, an
/// object with both `data` and `errors` is a [`PartialSuccess`](Self::PartialSuccess),
/// one with only `data` a [`Success`](Self::Success), and one with only
/// `errors` a [`RequestError`](Self::RequestError).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum GqlResponse {
    /// Execution produced data and field errors.
    PartialSuccess {
        /// Result data; `null` when a non-null field error bubbled to the root.
        data: Value,
        /// Field errors raised during execution.
        errors: Vec<GqlError>,
        /// Protocol extensions.
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        extensions: Map<String, Value>,
    },
    /// Execution completed without errors.
    Success {
        /// Result data.
        data: Value,
        /// Protocol extensions.
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        extensions: Map<String, Value>,
    },
    /// The request was refused before or instead of execution.
    RequestError(RequestError),
}

impl GqlResponse {
    /// A successful response with `data` and no extensions.
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self::Success {
            data,
            extensions: Map::new(),
        }
    }

    /// A request error with a single message.
    #[must_use]
    pub fn request_error(message: impl Into<String>) -> Self {
        Self::RequestError(RequestError::with_message(message))
    }

    /// Whether the response carries a `data` entry.
    #[must_use]
    pub fn has_data(&self) -> bool {
        match self {
            Self::Success { .. } | Self::PartialSuccess { .. } => true,
            Self::RequestError(_) => false,
        }
    }

    /// The errors carried by the response, empty for [`Success`](Self::Success).
    #[must_use]
    pub fn errors(&self) -> &[GqlError] {
        match self {
            Self::Success { .. } => &[],
            Self::PartialSuccess { errors, .. } | Self::RequestError(RequestError { errors, .. }) => {
                errors
            }
        }
    }
}

impl From<RequestError> for GqlResponse {
    fn from(err: RequestError) -> Self {
        Self::RequestError(err)
    }
}

/// The only HTTP statuses gqlbridge ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GqlHttpStatus {
    /// 200: a response with `data`.
    Ok,
    /// 400: any malformed request, and request errors from the executor.
    #[default]
    BadRequest,
    /// 405: unsupported method, or a non-query operation over GET.
    MethodNotAllowed,
    /// 406: the client does not accept `application/graphql-response+json`.
    NotAcceptable,
}

impl GqlHttpStatus {
    /// The corresponding [`http::StatusCode`].
    #[must_use]
    pub fn status_code(self) -> http::StatusCode {
        match self {
            Self::Ok => http::StatusCode::OK,
            Self::BadRequest => http::StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => http::StatusCode::NOT_ACCEPTABLE,
        }
    }

    /// The canonical reason phrase, e.g. `Bad Request`.
    #[must_use]
    pub fn reason(self) -> &'static str {
        self.status_code().canonical_reason().unwrap_or("Unknown")
    }
}

impl fmt::Display for GqlHttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code().as_u16(), self.reason())
    }
}

/// The HTTP outcome attached to a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    /// Status to send.
    pub status: GqlHttpStatus,
    /// Optional status message. Textual detail otherwise lives in the error list.
    pub message: Option<String>,
}

impl HttpResult {
    /// A result with `status` and no message.
    #[must_use]
    pub fn new(status: GqlHttpStatus) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

/// A GraphQL response paired with the HTTP result it is served with.
#[derive(Debug, Clone, PartialEq)]
pub struct GqlHttpResponse {
    /// The response body.
    pub response: GqlResponse,
    /// Status and message.
    pub http: HttpResult,
}
