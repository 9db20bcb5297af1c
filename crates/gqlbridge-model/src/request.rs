//! The validated GraphQL request.

use serde_json::{Map, Value};

/// A GraphQL request that passed shape validation.
///
/// `query` is opaque text; nothing in gqlbridge parses it. `operation_name` is
/// `None` when it was absent or empty, and both maps default to empty.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlRequest {
    /// The GraphQL document text.
    pub query: String,
    /// The operation to run when the document holds several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Variable values keyed by name.
    #[serde(default)]
    pub variables: Map<String, Value>,
    /// Protocol extensions.
    #[serde(default)]
    pub extensions: Map<String, Value>,
}

impl GqlRequest {
    /// Create a request for `query` with no operation name, variables or extensions.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set the operation name; an empty name is stored as `None`.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.operation_name = (!name.is_empty()).then_some(name);
        self
    }
}
