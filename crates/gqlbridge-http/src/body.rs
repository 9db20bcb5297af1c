//! GraphQL-over-HTTP response body type.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::Full;

/// Response body for GraphQL-over-HTTP responses.
///
/// Every response is a buffered JSON document.
#[derive(Debug, Default)]
pub struct GqlResponseBody(Full<Bytes>);

impl GqlResponseBody {
    /// Create a response body from raw bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self(Full::new(data.into()))
    }
}

impl http_body::Body for GqlResponseBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().0)
            .poll_frame(cx)
            .map_err(|never| match never {})
    }

    fn is_end_stream(&self) -> bool {
        self.0.is_end_stream()
    }

    fn size_hint(&self) -> http_body::SizeHint {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use http_body::Body as _;
    use http_body_util::BodyExt;

    use super::*;

    #[test]
    fn test_should_report_exact_size() {
        let body = GqlResponseBody::from_bytes(r#"{"data":{}}"#);
        assert_eq!(body.size_hint().exact(), Some(11));
        assert!(!body.is_end_stream());
    }

    #[test]
    fn test_should_yield_buffered_bytes() {
        let body = GqlResponseBody::from_bytes("abc");
        let collected = tokio_test::block_on(body.collect()).unwrap().to_bytes();
        assert_eq!(&collected[..], b"abc");
    }
}
