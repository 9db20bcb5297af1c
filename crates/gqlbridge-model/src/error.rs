//! Validation error taxonomy.
//!
//! Every failure detected while negotiating headers or extracting a request
//! becomes a [`GqlHttpError`]: an error code, the HTTP status it is served
//! with, and log-only detail. The client only ever sees the status reason
//! phrase inside a GraphQL request error.

use std::fmt;

use crate::response::{GqlHttpResponse, GqlHttpStatus, GqlResponse, HttpResult, RequestError};

/// Reasons a request is refused before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GqlHttpErrorCode {
    /// A required header (`Accept`, `Content-Type`) is absent.
    HeaderMissing,
    /// A header value is not a valid media range / media type list.
    HeaderUnparsable,
    /// `Accept` does not admit the GraphQL response media type.
    MediaTypeUnacceptable,
    /// `Content-Type` names the wrong media type for the method.
    ContentTypeMismatch,
    /// `Content-Type` carries a charset other than `utf-8`.
    UnsupportedCharset,
    /// The POST body could not be read or is not JSON.
    BodyDecodeFailure,
    /// The candidate request object has the wrong keys or value types.
    ShapeInvalid,
    /// The GET `query` parameter is absent.
    QueryParameterMissing,
    /// The GET `query` parameter is not a query operation.
    QueryNotAQuery,
    /// A GET parameter (`variables`, `extensions`) or the URL is malformed.
    ParameterDecodeFailure,
    /// The HTTP method is neither GET nor POST.
    MethodNotAllowed,
}

impl GqlHttpErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "HeaderMissing",
            Self::HeaderUnparsable => "HeaderUnparsable",
            Self::MediaTypeUnacceptable => "MediaTypeUnacceptable",
            Self::ContentTypeMismatch => "ContentTypeMismatch",
            Self::UnsupportedCharset => "UnsupportedCharset",
            Self::BodyDecodeFailure => "BodyDecodeFailure",
            Self::ShapeInvalid => "ShapeInvalid",
            Self::QueryParameterMissing => "QueryParameterMissing",
            Self::QueryNotAQuery => "QueryNotAQuery",
            Self::ParameterDecodeFailure => "ParameterDecodeFailure",
            Self::MethodNotAllowed => "MethodNotAllowed",
        }
    }

    /// Returns the default HTTP status for this error.
    #[must_use]
    pub fn default_status(&self) -> GqlHttpStatus {
        match self {
            Self::MediaTypeUnacceptable => GqlHttpStatus::NotAcceptable,
            Self::QueryNotAQuery | Self::MethodNotAllowed => GqlHttpStatus::MethodNotAllowed,
            _ => GqlHttpStatus::BadRequest,
        }
    }
}

impl fmt::Display for GqlHttpErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refused request: the error code, the status it is served with, and
/// diagnostic detail that is logged but never sent to the client.
#[derive(Debug)]
pub struct GqlHttpError {
    /// The error code.
    pub code: GqlHttpErrorCode,
    /// The HTTP status.
    pub status: GqlHttpStatus,
    /// Diagnostic detail for logs.
    pub detail: String,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GqlHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GqlHttpError({}, {}): {}", self.code, self.status, self.detail)
    }
}

impl std::error::Error for GqlHttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl GqlHttpError {
    /// Create an error with the code's default status.
    #[must_use]
    pub fn new(code: GqlHttpErrorCode, detail: impl Into<String>) -> Self {
        Self {
            status: code.default_status(),
            detail: detail.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Override the HTTP status, keeping the code and detail.
    #[must_use]
    pub fn with_status(mut self, status: GqlHttpStatus) -> Self {
        self.status = status;
        self
    }

    /// The request error sent to the client: one error whose message is the
    /// status reason phrase.
    #[must_use]
    pub fn request_error(&self) -> RequestError {
        RequestError::with_message(self.status.reason())
    }

    /// The HTTP result for this error.
    #[must_use]
    pub fn http_result(&self) -> HttpResult {
        HttpResult {
            status: self.status,
            message: Some(self.status.reason().to_owned()),
        }
    }

    /// Pair the request error with its HTTP result.
    #[must_use]
    pub fn into_response(self) -> GqlHttpResponse {
        GqlHttpResponse {
            response: GqlResponse::RequestError(self.request_error()),
            http: self.http_result(),
        }
    }

    // -- Convenience constructors --

    /// A required header is absent.
    #[must_use]
    pub fn header_missing(name: &str) -> Self {
        Self::new(
            GqlHttpErrorCode::HeaderMissing,
            format!("Missing required header: {name}"),
        )
    }

    /// A header value could not be parsed.
    #[must_use]
    pub fn header_unparsable(name: &str) -> Self {
        Self::new(
            GqlHttpErrorCode::HeaderUnparsable,
            format!("Unparsable header: {name}"),
        )
    }

    /// The method is neither GET nor POST.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::new(
            GqlHttpErrorCode::MethodNotAllowed,
            format!("Method {method} is not allowed"),
        )
    }
}

impl From<GqlHttpError> for GqlHttpResponse {
    fn from(err: GqlHttpError) -> Self {
        err.into_response()
    }
}
