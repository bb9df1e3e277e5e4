//! End-to-end runs of the built-in roadmap through documents, progress,
//! locking, layout and summary.

use pretty_assertions::assert_eq;
use questmap_core::{compose, Badge, LockPolicy, OpenOutcome, ViewOptions, Visibility, XpRules};
use questmap_dsl::{
    default_roadmap, nodes_to_api_json, parse_and_resolve_roadmap, parse_api_nodes, sample_progress, ResolvedRoadmap,
    RoadmapDocument,
};
use questmap_test_utils::assertions::{assert_level_spacing, assert_levels_descend, assert_lock_rule};

#[test]
fn test_builtin_roadmap_with_sample_progress() {
    let roadmap = default_roadmap().unwrap();
    let records = sample_progress(&roadmap).unwrap();

    let view = compose(roadmap.nodes().to_vec(), records, &ViewOptions::default()).unwrap();
    let summary = view.summary(&XpRules::default());

    assert_eq!(summary.total, 17);
    assert_eq!(summary.completed, 9);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.not_started, 7);
    // dev_linux, dev_docker and career_lead
    assert_eq!(summary.locked, 3);
    assert_eq!(summary.experience, 374);
    assert_eq!(summary.badges, vec![Badge::Apprentice, Badge::Journeyman]);
    assert!(view.unmatched.is_empty());

    assert_lock_rule(&view.forest).unwrap();
    assert_level_spacing(&view.layout, 120.0).unwrap();
    assert_levels_descend(&view.layout).unwrap();
}

#[test]
fn test_locked_nodes_do_not_open() {
    let roadmap = default_roadmap().unwrap();
    let records = sample_progress(&roadmap).unwrap();
    let view = compose(roadmap.nodes().to_vec(), records, &ViewOptions::default()).unwrap();

    let docker = roadmap.id_of("dev_docker").unwrap();
    let react = roadmap.id_of("fe_react").unwrap();

    assert!(matches!(view.layout.open(docker), OpenOutcome::Locked(id) if id == docker));
    assert!(matches!(view.layout.open(react), OpenOutcome::Opened(node) if node.id() == react));
}

#[test]
fn test_direction_view_and_collapsed_tree() {
    let roadmap = default_roadmap().unwrap();
    let be_root = roadmap.id_of("be_root").unwrap();
    let be_python = roadmap.id_of("be_python").unwrap();
    let be_fastapi = roadmap.id_of("be_fastapi").unwrap();

    let options = ViewOptions::default()
        .with_direction("backend")
        .with_visibility(Visibility::expanded([be_root]));
    let view = compose(roadmap.nodes().to_vec(), Vec::new(), &options).unwrap();

    // the whole direction is enriched, only the expanded part is placed
    assert_eq!(view.forest.len(), 4);
    assert_eq!(view.layout.len(), 3);
    assert!(view.layout.get(be_python).is_some());
    assert!(view.layout.get(be_fastapi).is_none());
    assert!(view.forest.get(be_fastapi).map(|n| n.locked).unwrap_or(false));
}

#[test]
fn test_export_round_trip_keeps_layout() {
    let roadmap = default_roadmap().unwrap();
    let records = sample_progress(&roadmap).unwrap();

    let yaml = RoadmapDocument::from_nodes(roadmap.nodes()).to_yaml().unwrap();
    let reparsed = parse_and_resolve_roadmap(&yaml).unwrap();

    let original = compose(roadmap.nodes().to_vec(), records.clone(), &ViewOptions::default()).unwrap();
    let restored = compose(reparsed.into_nodes(), records, &ViewOptions::default()).unwrap();
    assert_eq!(original.layout, restored.layout);
}

#[test]
fn test_api_snapshot_matches_document() {
    let roadmap = default_roadmap().unwrap();
    let json = nodes_to_api_json(roadmap.nodes()).unwrap();

    let from_api = ResolvedRoadmap::from_nodes(parse_api_nodes(&json).unwrap()).unwrap();
    assert_eq!(from_api.nodes(), roadmap.nodes());
}

#[test]
fn test_unrestricted_view_matches_positions() {
    let roadmap = default_roadmap().unwrap();
    let records = sample_progress(&roadmap).unwrap();

    let locked = compose(roadmap.nodes().to_vec(), records.clone(), &ViewOptions::default()).unwrap();
    let open = compose(
        roadmap.nodes().to_vec(),
        records,
        &ViewOptions::default().with_lock_policy(LockPolicy::Unrestricted),
    )
    .unwrap();

    assert_eq!(open.summary(&XpRules::default()).locked, 0);
    let xy = |v: &questmap_core::RoadmapView| v.layout.nodes.iter().map(|n| (n.x, n.y)).collect::<Vec<_>>();
    assert_eq!(xy(&locked), xy(&open));
}
