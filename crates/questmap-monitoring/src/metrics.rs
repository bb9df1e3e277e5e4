//! Metrics recorded as structured tracing events.
//!
//! Every event is emitted on the `questmap::metrics` target so it can be
//! filtered separately, e.g. `RUST_LOG=warn,questmap::metrics=info`.

use tracing::info;

/// Roadmap document metrics
pub struct DocumentMetrics;

impl DocumentMetrics {
    /// Record a roadmap load
    pub fn record_roadmap_load(source: &str, node_count: usize, duration_ms: f64, success: bool) {
        info!(
            target: "questmap::metrics",
            source,
            node_count,
            duration_ms,
            success,
            "Roadmap load"
        );
    }

    /// Record a progress snapshot load
    pub fn record_progress_load(source: &str, record_count: usize, unmatched: usize) {
        info!(
            target: "questmap::metrics",
            source,
            record_count,
            unmatched,
            "Progress load"
        );
    }
}

/// Layout metrics
pub struct LayoutMetrics;

impl LayoutMetrics {
    /// Record a layout pass
    pub fn record_layout(direction: &str, placed: usize, total: usize, crowded: usize, duration_ms: f64) {
        info!(
            target: "questmap::metrics",
            direction,
            placed,
            total,
            crowded,
            duration_ms,
            "Layout computed"
        );
    }
}

/// Progress metrics
pub struct ProgressMetrics;

impl ProgressMetrics {
    /// Record a progress summary
    pub fn record_summary(direction: &str, completed: usize, total: usize, locked: usize, experience: u32) {
        info!(
            target: "questmap::metrics",
            direction,
            completed,
            total,
            locked,
            experience,
            "Progress summary"
        );
    }
}
