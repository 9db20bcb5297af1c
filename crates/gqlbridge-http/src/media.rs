//! Media range parsing and matching.
//!
//! Grammar (RFC 9110 §5.6 / §12.5.1):
//!
//! ```text
//! media-range = ( "*/*" / ( type "/" "*" ) / ( type "/" subtype ) ) parameters
//! parameters  = *( OWS ";" OWS parameter )
//! parameter   = token "=" ( token / quoted-string )
//! ```
//!
//! `*/subtype` is rejected. The `q` parameter of a media range must be a
//! number in `[0, 1]`.

use gqlbridge_model::media::{MediaRange, MediaType, WILDCARD};

/// Why a header value is not a valid media range or media type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaTypeError {
    /// The value (or one comma segment) is empty.
    #[error("empty media type")]
    Empty,
    /// No `/` between type and subtype.
    #[error("missing '/' in media type: {0}")]
    MissingSlash(String),
    /// Type or subtype is not a token.
    #[error("invalid token in media type: {0:?}")]
    InvalidToken(String),
    /// `*/subtype`.
    #[error("wildcard type with concrete subtype: {0}")]
    WildcardType(String),
    /// A wildcard where a concrete media type is required.
    #[error("wildcard not allowed in media type: {0}")]
    WildcardNotAllowed(String),
    /// A parameter is not `token=value`.
    #[error("invalid parameter: {0:?}")]
    InvalidParameter(String),
    /// `q` is not a number in `[0, 1]`.
    #[error("invalid quality value: {0:?}")]
    InvalidQuality(String),
    /// A quoted-string is not terminated.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Parse one `Accept` alternative into a [`MediaRange`].
pub fn parse_media_range(raw: &str) -> Result<MediaRange, MediaTypeError> {
    let (type_, subtype, params) = parse_parts(raw)?;
    if type_ == WILDCARD && subtype != WILDCARD {
        return Err(MediaTypeError::WildcardType(raw.trim().to_owned()));
    }

    let mut range = MediaRange::new(type_, subtype);
    for (name, value) in params {
        if name == "q" {
            range.quality = parse_quality(&value)?;
        } else {
            set_parameter(&mut range.parameters, name, value);
        }
    }
    Ok(range)
}

/// Parse a concrete media type such as a `Content-Type` value.
pub fn parse_media_type(raw: &str) -> Result<MediaType, MediaTypeError> {
    let (type_, subtype, params) = parse_parts(raw)?;
    if type_ == WILDCARD || subtype == WILDCARD {
        return Err(MediaTypeError::WildcardNotAllowed(raw.trim().to_owned()));
    }

    let mut parameters = Vec::with_capacity(params.len());
    for (name, value) in params {
        set_parameter(&mut parameters, name, value);
    }
    Ok(MediaType {
        media_type: format!("{type_}/{subtype}"),
        parameters,
    })
}

/// Parse a full `Accept` header value. Every comma-separated segment must parse.
pub fn parse_accept(raw: &str) -> Result<Vec<MediaRange>, MediaTypeError> {
    split_unquoted(raw, ',')?
        .into_iter()
        .map(parse_media_range)
        .collect()
}

/// Whether any of `ranges` admits the concrete media type `target`
/// (`type/subtype`).
///
/// A range admits the target on exact type and subtype, on `type/*` with the
/// same type, or on `*/*`. Quality values are ignored: only one response media
/// type is ever produced, so there is nothing to rank.
#[must_use]
pub fn include_media_type(ranges: &[MediaRange], target: &str) -> bool {
    let Some((target_type, target_subtype)) = target.split_once('/') else {
        return false;
    };

    ranges.iter().any(|range| {
        range.is_any()
            || (range.type_.eq_ignore_ascii_case(target_type)
                && (range.subtype == WILDCARD
                    || range.subtype.eq_ignore_ascii_case(target_subtype)))
    })
}

type Parts = (String, String, Vec<(String, String)>);

/// Split `type/subtype;k=v;...` into lower-cased type, subtype and raw parameters.
fn parse_parts(raw: &str) -> Result<Parts, MediaTypeError> {
    let segments = split_unquoted(raw, ';')?;
    let Some((essence, params)) = segments.split_first() else {
        return Err(MediaTypeError::Empty);
    };

    let essence = essence.trim();
    if essence.is_empty() {
        return Err(MediaTypeError::Empty);
    }
    let (type_, subtype) = essence
        .split_once('/')
        .ok_or_else(|| MediaTypeError::MissingSlash(essence.to_owned()))?;
    if !is_token(type_) || !is_token(subtype) {
        return Err(MediaTypeError::InvalidToken(essence.to_owned()));
    }

    let params = params
        .iter()
        .copied()
        .map(parse_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((type_.to_ascii_lowercase(), subtype.to_ascii_lowercase(), params))
}

fn parse_parameter(segment: &str) -> Result<(String, String), MediaTypeError> {
    let segment = segment.trim();
    let (name, value) = segment
        .split_once('=')
        .ok_or_else(|| MediaTypeError::InvalidParameter(segment.to_owned()))?;
    if !is_token(name) {
        return Err(MediaTypeError::InvalidParameter(segment.to_owned()));
    }

    let value = if let Some(quoted) = value.strip_prefix('"') {
        unquote(quoted).ok_or_else(|| MediaTypeError::InvalidParameter(segment.to_owned()))?
    } else if is_token(value) {
        value.to_owned()
    } else {
        return Err(MediaTypeError::InvalidParameter(segment.to_owned()));
    };

    Ok((name.to_ascii_lowercase(), value))
}

/// Unescape the body of a quoted-string (after the opening quote). The closing
/// quote must be the last character.
fn unquote(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return chars.next().is_none().then_some(out),
            c => out.push(c),
        }
    }
    None
}

fn parse_quality(value: &str) -> Result<f32, MediaTypeError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|q| (0.0..=1.0).contains(q))
        .ok_or_else(|| MediaTypeError::InvalidQuality(value.to_owned()))
}

/// Insert a parameter; a repeated name replaces the earlier value in place.
fn set_parameter(parameters: &mut Vec<(String, String)>, name: String, value: String) {
    if let Some(slot) = parameters.iter_mut().find(|(k, _)| *k == name) {
        slot.1 = value;
    } else {
        parameters.push((name, value));
    }
}

/// Split on `delim` outside of quoted strings.
fn split_unquoted(raw: &str, delim: char) -> Result<Vec<&str>, MediaTypeError> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => {
                segments.push(&raw[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    if in_quotes {
        return Err(MediaTypeError::UnterminatedQuote);
    }
    segments.push(&raw[start..]);
    Ok(segments)
}

/// RFC 9110 `token`: one or more `tchar`.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}
