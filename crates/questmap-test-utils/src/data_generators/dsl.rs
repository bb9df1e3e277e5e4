//! Generators for roadmap and progress document text.

/// Creates a minimal valid roadmap document with one direction and one node.
pub fn create_minimal_roadmap_yaml() -> String {
    r#"
format_version: "1.0"
directions:
  - name: general
    nodes:
      - key: start
        title: Start Here
"#
    .to_string()
}

/// Creates a roadmap document whose single direction is a chain of `length`
/// nodes keyed `<direction>_0`, `<direction>_1`, ...
///
/// # Arguments
///
/// * `direction` - Direction name, also used as the key prefix
/// * `length` - Number of nodes in the chain
pub fn create_chain_roadmap_yaml(direction: &str, length: usize) -> String {
    let mut yaml = format!("format_version: \"1.0\"\ndirections:\n  - name: {}\n    nodes:\n", direction);
    for i in 0..length {
        yaml.push_str(&format!("      - key: {}_{}\n", direction, i));
        if i > 0 {
            yaml.push_str(&format!("        parent: {}_{}\n", direction, i - 1));
        }
        yaml.push_str(&format!("        title: Step {}\n", i + 1));
    }
    yaml
}

/// Creates a progress document from `(key, status, score)` entries.
///
/// # Arguments
///
/// * `entries` - Node key, status (`completed`, `in_progress`, `not_started`) and score
pub fn create_progress_yaml(entries: &[(&str, &str, u32)]) -> String {
    let mut yaml = String::from("records:\n");
    for (key, status, score) in entries {
        yaml.push_str(&format!(
            "  - node: {}\n    status: {}\n    score: {}\n",
            key, status, score
        ));
    }
    yaml
}
