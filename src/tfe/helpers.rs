//! Path and payload helpers shared by resource clients

use serde_json::{json, Map, Value};

use crate::error::{Result, TfeError};

/// Build an API path from segments, url-encoding each one
///
/// `api_path(&["organizations", "my org", "teams"])` gives
/// `/organizations/my%20org/teams`.
pub(crate) fn api_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}

/// `{"data": {"type": kind, "attributes": attributes}}`
pub(crate) fn resource_payload(kind: &str, attributes: Value) -> Value {
    json!({
        "data": {
            "type": kind,
            "attributes": attributes,
        }
    })
}

/// Merge caller-supplied attributes over a base object
///
/// Keys use the API's dashed spelling; underscores are converted.
pub(crate) fn merge_attributes(mut base: Map<String, Value>, extra: &Map<String, Value>) -> Value {
    for (key, value) in extra {
        base.insert(key.replace('_', "-"), value.clone());
    }
    Value::Object(base)
}

/// Reject an `include` value outside the endpoint's allowed set
pub(crate) fn validate_include(include: Option<&str>, allowed: &[&str]) -> Result<()> {
    match include {
        Some(value) if !value.split(',').all(|item| allowed.contains(&item.trim())) => {
            Err(TfeError::invalid_param("include", value, allowed))
        }
        _ => Ok(()),
    }
}
