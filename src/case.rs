//! Case handling for resource selection and input binding: query values are normalized into
//! registry path segments, body/query keys are lower-cased for case-insensitive field matching.

use crate::resource::QueryParams;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A query value that should be treated as absent: empty, or the lone string "0".
pub fn is_blank(s: &str) -> bool {
    s.is_empty() || s == "0"
}

/// Normalize the `resourceDir` parameter: lower-cased, otherwise untouched.
/// e.g. "Shop" -> "shop", "Back-Office" -> "back-office"
pub fn normalize_dir(s: &str) -> String {
    s.to_lowercase()
}

/// Normalize the `resourceName` parameter: lower-cased, first character upper-cased, hyphens removed.
/// e.g. "order" -> "Order", "ORDER-ITEM" -> "Orderitem"
pub fn normalize_name(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    capitalized.replace('-', "")
}

/// Lower-case all keys of a JSON object. When two keys collide, the one written last in the
/// document wins (`Map` keeps document order).
pub fn object_keys_to_lowercase(obj: Map<String, Value>) -> HashMap<String, Value> {
    obj.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

/// Lower-case all query keys. When two keys collide, the one appearing last in the URI wins.
pub fn query_keys_to_lowercase(query: &QueryParams) -> HashMap<String, String> {
    query
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_string()))
        .collect()
}
