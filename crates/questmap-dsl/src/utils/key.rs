use lazy_static::lazy_static;
use regex::Regex;

use questmap_core::NodeId;

lazy_static! {
    // Lower-case ASCII, digits, '_' and '-', not starting with a separator
    static ref KEY_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("key pattern compiles");
}

/// Whether a node key has the accepted format.
///
/// Valid keys include `fe_root`, `be-python` and `2d-graphics`.
pub fn is_valid_key(key: &str) -> bool {
    KEY_REGEX.is_match(key)
}

/// Key under which export writes a node
pub fn export_key(id: NodeId) -> String {
    format!("node_{}", id)
}
