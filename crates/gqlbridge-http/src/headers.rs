//! `Accept` / `Content-Type` validation for GET and POST requests.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! ```text
//! Accept:       missing -> 400, unparsable -> 400, not admitting
//!               application/graphql-response+json -> 406
//! Content-Type: missing -> 400, unparsable -> 400, wrong media type -> 400,
//!               (POST only) charset other than utf-8 -> 400
//! ```

use gqlbridge_model::error::{GqlHttpError, GqlHttpErrorCode};
use gqlbridge_model::media::MediaType;
use http::HeaderMap;
use http::header::{ACCEPT, CONTENT_TYPE};

use crate::media::{include_media_type, parse_accept, parse_media_type};

/// Media type of every response body.
pub const GRAPHQL_RESPONSE_MEDIA_TYPE: &str = "application/graphql-response+json";

/// Media type of a POST request body.
pub const POST_REQUEST_MEDIA_TYPE: &str = "application/json";

/// Media type a GET request must declare.
pub const GET_REQUEST_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// The only charset accepted on POST bodies. Matched case-sensitively.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Validate headers of a POST request.
pub fn validate_post_headers(headers: &HeaderMap) -> Result<(), GqlHttpError> {
    validate_accept(headers)?;

    let content_type = content_type(headers)?;
    if !content_type.is(POST_REQUEST_MEDIA_TYPE) {
        return Err(content_type_mismatch(&content_type, POST_REQUEST_MEDIA_TYPE));
    }

    if let Some(charset) = content_type.parameter("charset") {
        if charset != DEFAULT_CHARSET {
            return Err(GqlHttpError::new(
                GqlHttpErrorCode::UnsupportedCharset,
                format!("Unsupported charset: {charset}"),
            ));
        }
    }

    Ok(())
}

/// Validate headers of a GET request.
pub fn validate_get_headers(headers: &HeaderMap) -> Result<(), GqlHttpError> {
    validate_accept(headers)?;

    let content_type = content_type(headers)?;
    if !content_type.is(GET_REQUEST_MEDIA_TYPE) {
        return Err(content_type_mismatch(&content_type, GET_REQUEST_MEDIA_TYPE));
    }

    Ok(())
}

/// `Accept` must be present, parse as a list of media ranges, and admit the
/// GraphQL response media type.
fn validate_accept(headers: &HeaderMap) -> Result<(), GqlHttpError> {
    let mut values = headers.get_all(ACCEPT).iter().peekable();
    if values.peek().is_none() {
        return Err(GqlHttpError::header_missing("Accept"));
    }

    let joined = values
        .map(http::HeaderValue::to_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| GqlHttpError::header_unparsable("Accept").with_source(e))?
        .join(",");

    let ranges =
        parse_accept(&joined).map_err(|e| GqlHttpError::header_unparsable("Accept").with_source(e))?;

    if !include_media_type(&ranges, GRAPHQL_RESPONSE_MEDIA_TYPE) {
        return Err(GqlHttpError::new(
            GqlHttpErrorCode::MediaTypeUnacceptable,
            format!("Accept does not admit {GRAPHQL_RESPONSE_MEDIA_TYPE}: {joined}"),
        ));
    }

    Ok(())
}

fn content_type(headers: &HeaderMap) -> Result<MediaType, GqlHttpError> {
    let value = headers
        .get(CONTENT_TYPE)
        .ok_or_else(|| GqlHttpError::header_missing("Content-Type"))?;

    let raw = value
        .to_str()
        .map_err(|e| GqlHttpError::header_unparsable("Content-Type").with_source(e))?;

    parse_media_type(raw)
        .map_err(|e| GqlHttpError::header_unparsable("Content-Type").with_source(e))
}

fn content_type_mismatch(actual: &MediaType, expected: &str) -> GqlHttpError {
    GqlHttpError::new(
        GqlHttpErrorCode::ContentTypeMismatch,
        format!("Expected Content-Type {expected}, got {}", actual.media_type),
    )
}

#[cfg(test)]
mod tests {
    use gqlbridge_model::response::GqlHttpStatus;
    use http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    fn post_err(pairs: &[(&'static str, &'static str)]) -> GqlHttpError {
        validate_post_headers(&headers(pairs)).unwrap_err()
    }

    #[test]
    fn test_should_accept_valid_post_headers() {
        let map = headers(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "application/json"),
        ]);
        assert!(validate_post_headers(&map).is_ok());

        let map = headers(&[
            ("accept", "*/*"),
            ("content-type", "application/json; charset=utf-8"),
        ]);
        assert!(validate_post_headers(&map).is_ok());
    }

    #[test]
    fn test_should_reject_missing_accept() {
        let err = post_err(&[("content-type", "application/json")]);
        assert_eq!(err.code, GqlHttpErrorCode::HeaderMissing);
        assert_eq!(err.status, GqlHttpStatus::BadRequest);
    }

    #[test]
    fn test_should_reject_unparsable_accept() {
        let err = post_err(&[
            ("accept", "application/graphql-response+json, */json"),
            ("content-type", "application/json"),
        ]);
        assert_eq!(err.code, GqlHttpErrorCode::HeaderUnparsable);
        assert_eq!(err.status, GqlHttpStatus::BadRequest);
    }

    #[test]
    fn test_should_reject_unacceptable_accept_with_406() {
        let err = post_err(&[
            ("accept", "application/json"),
            ("content-type", "application/json"),
        ]);
        assert_eq!(err.code, GqlHttpErrorCode::MediaTypeUnacceptable);
        assert_eq!(err.status, GqlHttpStatus::NotAcceptable);
    }

    #[test]
    fn test_should_join_multiple_accept_headers() {
        let map = headers(&[
            ("accept", "text/html"),
            ("accept", "application/*;q=0.2"),
            ("content-type", "application/json"),
        ]);
        assert!(validate_post_headers(&map).is_ok());
    }

    #[test]
    fn test_should_check_accept_before_content_type() {
        let err = post_err(&[("accept", "text/html")]);
        assert_eq!(err.code, GqlHttpErrorCode::MediaTypeUnacceptable);
    }

    #[test]
    fn test_should_reject_missing_content_type() {
        let err = post_err(&[("accept", "application/graphql-response+json")]);
        assert_eq!(err.code, GqlHttpErrorCode::HeaderMissing);
        assert_eq!(err.status, GqlHttpStatus::BadRequest);
    }

    #[test]
    fn test_should_reject_unparsable_content_type() {
        let err = post_err(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "application"),
        ]);
        assert_eq!(err.code, GqlHttpErrorCode::HeaderUnparsable);

        let err = post_err(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "application/*"),
        ]);
        assert_eq!(err.code, GqlHttpErrorCode::HeaderUnparsable);
    }

    #[test]
    fn test_should_reject_wrong_post_content_type() {
        let err = post_err(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "text/plain"),
        ]);
        assert_eq!(err.code, GqlHttpErrorCode::ContentTypeMismatch);
        assert_eq!(err.status, GqlHttpStatus::BadRequest);
    }

    #[test]
    fn test_should_reject_non_default_charset_case_sensitively() {
        for charset in [
            "application/json; charset=latin1",
            "application/json; charset=UTF-8",
        ] {
            let mut map = headers(&[("accept", "application/graphql-response+json")]);
            map.insert(CONTENT_TYPE, HeaderValue::from_static(charset));
            let err = validate_post_headers(&map).unwrap_err();
            assert_eq!(err.code, GqlHttpErrorCode::UnsupportedCharset, "{charset}");
            assert_eq!(err.status, GqlHttpStatus::BadRequest);
        }
    }

    #[test]
    fn test_should_accept_valid_get_headers() {
        let map = headers(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "application/x-www-form-urlencoded"),
        ]);
        assert!(validate_get_headers(&map).is_ok());
    }

    #[test]
    fn test_should_apply_accept_rules_to_get() {
        let err = validate_get_headers(&headers(&[(
            "content-type",
            "application/x-www-form-urlencoded",
        )]))
        .unwrap_err();
        assert_eq!(err.code, GqlHttpErrorCode::HeaderMissing);

        let err = validate_get_headers(&headers(&[
            ("accept", "application/json"),
            ("content-type", "application/x-www-form-urlencoded"),
        ]))
        .unwrap_err();
        assert_eq!(err.status, GqlHttpStatus::NotAcceptable);
    }

    #[test]
    fn test_should_reject_wrong_get_content_type() {
        let err = validate_get_headers(&headers(&[
            ("accept", "application/graphql-response+json"),
            ("content-type", "application/json"),
        ]))
        .unwrap_err();
        assert_eq!(err.code, GqlHttpErrorCode::ContentTypeMismatch);

        let err = validate_get_headers(&headers(&[("accept", "*/*")])).unwrap_err();
        assert_eq!(err.code, GqlHttpErrorCode::HeaderMissing);
    }
}
