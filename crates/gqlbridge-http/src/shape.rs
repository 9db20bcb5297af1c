//! Structural validation of a candidate GraphQL request object.

use gqlbridge_model::request::GqlRequest;
use serde_json::{Map, Value};

const QUERY: &str = "query";
const OPERATION_NAME: &str = "operationName";
const VARIABLES: &str = "variables";
const EXTENSIONS: &str = "extensions";

/// Whether `candidate` is exactly a GraphQL request object.
///
/// Accepts iff it has one to four keys, `query` is a string, `operationName`
/// (if present) is a string, `variables` and `extensions` (if present) are
/// objects, and no other key is present. The query text itself is not
/// inspected.
#[must_use]
pub fn is_valid_request(candidate: &Map<String, Value>) -> bool {
    if candidate.is_empty() || candidate.len() > 4 {
        return false;
    }

    let mut recognized = 0;

    match candidate.get(QUERY) {
        Some(Value::String(_)) => recognized += 1,
        _ => return false,
    }

    match candidate.get(OPERATION_NAME) {
        Some(Value::String(_)) => recognized += 1,
        Some(_) => return false,
        None => {}
    }

    for key in [VARIABLES, EXTENSIONS] {
        match candidate.get(key) {
            Some(Value::Object(_)) => recognized += 1,
            Some(_) => return false,
            None => {}
        }
    }

    recognized == candidate.len()
}

/// Validate `candidate` and build the [`GqlRequest`] it describes.
///
/// An empty `operationName` becomes `None`; missing `variables` and
/// `extensions` become empty maps.
#[must_use]
pub fn into_request(mut candidate: Map<String, Value>) -> Option<GqlRequest> {
    if !is_valid_request(&candidate) {
        return None;
    }

    let Some(Value::String(query)) = candidate.remove(QUERY) else {
        return None;
    };
    let operation_name = match candidate.remove(OPERATION_NAME) {
        Some(Value::String(name)) if !name.is_empty() => Some(name),
        _ => None,
    };

    Some(GqlRequest {
        query,
        operation_name,
        variables: take_object(&mut candidate, VARIABLES),
        extensions: take_object(&mut candidate, EXTENSIONS),
    })
}

fn take_object(candidate: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match candidate.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
