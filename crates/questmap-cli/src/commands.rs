//! Subcommand implementations. Each returns the text to print on stdout.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, info_span};

use questmap_core::{
    compose, Layout, NodeId, OutlineRenderer, ProgressSummary, Renderer, RoadmapView, ViewOptions, Viewport,
    Visibility,
};
use questmap_dsl::{ResolvedRoadmap, RoadmapDocument};
use questmap_monitoring::metrics::{DocumentMetrics, LayoutMetrics, ProgressMetrics};

use crate::cli::{Commands, LayoutFormat, RoadmapArgs, StatusFormat, ViewArgs};
use crate::config::CliConfig;
use crate::loader::{load_progress, load_roadmap};

const ALL_DIRECTIONS: &str = "*";

/// JSON/YAML shape of the `layout` command
#[derive(Debug, Serialize)]
pub struct LayoutOutput<'a> {
    /// Canvas that fits the layout
    pub viewport: Viewport,
    /// Placed nodes and connectors
    pub layout: &'a Layout,
}

/// JSON shape of the `status` command
#[derive(Debug, Serialize)]
pub struct StatusOutput<'a> {
    /// Direction in view, if filtered
    pub direction: Option<&'a str>,
    /// Totals, experience and badges
    #[serde(flatten)]
    pub summary: &'a ProgressSummary,
    /// Progress records naming no node
    pub unmatched: &'a [NodeId],
}

/// Run a parsed command
pub fn run(command: Commands, config: &CliConfig) -> Result<String> {
    match command {
        Commands::Validate { roadmap } => validate(&roadmap),
        Commands::Directions { roadmap } => directions(&roadmap),
        Commands::Layout { view, expand, format } => layout(&view, &expand, format, config),
        Commands::Status { view, format } => status(&view, format, config),
        Commands::Export { roadmap, output } => export(&roadmap, output.as_deref()),
    }
}

/// Parse and validate, then report counts
pub fn validate(args: &RoadmapArgs) -> Result<String> {
    let roadmap = load_roadmap(args.roadmap.as_deref())?;
    let forest = roadmap.forest()?;
    Ok(format!(
        "Roadmap is valid: {} nodes, {} roots, {} directions\n",
        forest.len(),
        forest.roots().count(),
        forest.directions().len()
    ))
}

/// One line per direction with its node count
pub fn directions(args: &RoadmapArgs) -> Result<String> {
    let forest = load_roadmap(args.roadmap.as_deref())?.forest()?;
    let mut out = String::new();
    for direction in forest.directions() {
        let count = forest.for_direction(&direction).len();
        let _ = writeln!(out, "{}\t{} nodes", direction, count);
    }
    Ok(out)
}

fn compose_view(args: &ViewArgs, visibility: Visibility, config: &CliConfig) -> Result<RoadmapView> {
    let roadmap = load_roadmap(args.roadmap.roadmap.as_deref())?;
    check_direction(&roadmap, args.direction.as_deref())?;
    let records = load_progress(args.progress.as_deref(), &roadmap)?;
    let record_count = records.len();

    let mut options = ViewOptions::default()
        .with_visibility(visibility)
        .with_lock_policy(config.lock_policy)
        .with_layout(config.layout.clone());
    if let Some(direction) = &args.direction {
        options = options.with_direction(direction.clone());
    }

    let view = compose(roadmap.into_nodes(), records, &options).context("Failed to compose roadmap view")?;

    if let Some(path) = &args.progress {
        DocumentMetrics::record_progress_load(&path.display().to_string(), record_count, view.unmatched.len());
    }
    if !view.unmatched.is_empty() {
        info!(unmatched = ?view.unmatched, "Progress records without a matching node");
    }
    Ok(view)
}

fn check_direction(roadmap: &ResolvedRoadmap, direction: Option<&str>) -> Result<()> {
    let Some(direction) = direction else {
        return Ok(());
    };
    let known = roadmap.forest()?.directions();
    if known.iter().any(|name| name == direction) {
        return Ok(());
    }
    bail!("Unknown direction '{}'; known directions: {}", direction, known.join(", "))
}

/// Lay out the roadmap and print it in the requested format
pub fn layout(args: &ViewArgs, expand: &[i64], format: LayoutFormat, config: &CliConfig) -> Result<String> {
    let span = info_span!("layout_command", direction = args.direction.as_deref().unwrap_or(ALL_DIRECTIONS));
    let _guard = span.enter();

    let visibility = if expand.is_empty() {
        Visibility::All
    } else {
        Visibility::expanded(expand.iter().copied().map(NodeId))
    };

    let start = Instant::now();
    let view = compose_view(args, visibility, config)?;
    LayoutMetrics::record_layout(
        args.direction.as_deref().unwrap_or(ALL_DIRECTIONS),
        view.layout.len(),
        view.forest.len(),
        view.layout.crowded.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    let output = LayoutOutput {
        viewport: view.layout.viewport(Viewport::PADDING_X, Viewport::PADDING_Y),
        layout: &view.layout,
    };
    match format {
        LayoutFormat::Json => {
            let mut json = serde_json::to_string_pretty(&output).context("Failed to serialize layout")?;
            json.push('\n');
            Ok(json)
        }
        LayoutFormat::Yaml => serde_yaml::to_string(&output).context("Failed to serialize layout"),
        LayoutFormat::Outline => Ok(OutlineRenderer::new().render(&view.layout)),
    }
}

/// Summarize progress, experience and badges
pub fn status(args: &ViewArgs, format: StatusFormat, config: &CliConfig) -> Result<String> {
    let view = compose_view(args, Visibility::All, config)?;
    let summary = view.summary(&config.xp);
    let direction = args.direction.as_deref();

    ProgressMetrics::record_summary(
        direction.unwrap_or(ALL_DIRECTIONS),
        summary.completed,
        summary.total,
        summary.locked,
        summary.experience,
    );

    match format {
        StatusFormat::Json => {
            let output = StatusOutput {
                direction,
                summary: &summary,
                unmatched: &view.unmatched,
            };
            let mut json = serde_json::to_string_pretty(&output).context("Failed to serialize summary")?;
            json.push('\n');
            Ok(json)
        }
        StatusFormat::Text => Ok(status_text(direction, &summary, &view.unmatched)),
    }
}

fn status_text(direction: Option<&str>, summary: &ProgressSummary, unmatched: &[NodeId]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Direction:   {}", direction.unwrap_or("all"));
    let _ = writeln!(
        out,
        "Completed:   {}/{} ({:.1}%)",
        summary.completed, summary.total, summary.completion_percent
    );
    let _ = writeln!(out, "In progress: {}", summary.in_progress);
    let _ = writeln!(out, "Not started: {}", summary.not_started);
    let _ = writeln!(out, "Locked:      {}", summary.locked);
    let _ = writeln!(
        out,
        "Checkpoints: {}/{}",
        summary.checkpoints_completed, summary.checkpoints
    );
    let _ = writeln!(out, "Score:       {}", summary.total_score);
    let _ = writeln!(out, "Experience:  {} XP", summary.experience);

    let badges: Vec<&str> = summary.badges.iter().map(|b| b.name()).collect();
    let _ = writeln!(
        out,
        "Badges:      {}",
        if badges.is_empty() { "none".to_string() } else { badges.join(", ") }
    );

    if !unmatched.is_empty() {
        let ids: Vec<String> = unmatched.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Unmatched:   {}", ids.join(", "));
    }
    out
}

/// Write the roadmap as a canonical document
pub fn export(args: &RoadmapArgs, output: Option<&Path>) -> Result<String> {
    let roadmap = load_roadmap(args.roadmap.as_deref())?;
    let document = RoadmapDocument::from_nodes(roadmap.nodes());
    // titles and ids the document format rejects stop the export here
    document
        .resolve()
        .context("Roadmap cannot be written as a valid document")?;
    let yaml = document.to_yaml().context("Failed to serialize roadmap")?;

    match output {
        Some(path) => {
            fs::write(path, &yaml).with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(format!("Wrote {} nodes to {}\n", roadmap.nodes().len(), path.display()))
        }
        None => Ok(yaml),
    }
}
