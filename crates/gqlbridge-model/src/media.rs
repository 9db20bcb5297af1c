//! Parsed media ranges and media types.
//!
//! A [`MediaRange`] is one alternative of an `Accept` header and may carry
//! wildcards and a quality value. A [`MediaType`] is a concrete
//! `type/subtype` as found in `Content-Type`.

use std::fmt;

/// The wildcard token allowed in media ranges.
pub const WILDCARD: &str = "*";

/// One comma-separated alternative of an `Accept`-like header.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    /// Top-level type, lower-cased. May be `*`.
    pub type_: String,
    /// Subtype, lower-cased. May be `*`.
    pub subtype: String,
    /// Parameters other than `q`, in header order. Names are lower-cased.
    pub parameters: Vec<(String, String)>,
    /// Quality value in `[0, 1]`, defaulting to 1.
    pub quality: f32,
}

impl MediaRange {
    /// Default quality when the `q` parameter is absent.
    pub const DEFAULT_QUALITY: f32 = 1.0;

    /// Create a range with no parameters and the default quality.
    #[must_use]
    pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            subtype: subtype.into(),
            parameters: Vec::new(),
            quality: Self::DEFAULT_QUALITY,
        }
    }

    /// Whether this range is `*/*`.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.type_ == WILDCARD && self.subtype == WILDCARD
    }

    /// Look up a parameter by name (case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        find_parameter(&self.parameters, name)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (name, value) in &self.parameters {
            write!(f, ";{name}={value}")?;
        }
        if (self.quality - Self::DEFAULT_QUALITY).abs() > f32::EPSILON {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

/// A concrete media type such as a `Content-Type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// `type/subtype`, lower-cased, never containing a wildcard.
    pub media_type: String,
    /// Parameters in header order. Names are lower-cased.
    pub parameters: Vec<(String, String)>,
}

impl MediaType {
    /// Look up a parameter by name (case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        find_parameter(&self.parameters, name)
    }

    /// Whether the essence (`type/subtype`) equals `essence`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, essence: &str) -> bool {
        self.media_type.eq_ignore_ascii_case(essence)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_type)?;
        for (name, value) in &self.parameters {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}

fn find_parameter<'a>(parameters: &'a [(String, String)], name: &str) -> Option<&'a str> {
    parameters
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
