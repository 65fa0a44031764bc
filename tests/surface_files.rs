#![warn(clippy::pedantic)]

use wingfail::{compose, FailureAggregation, StageKind, StageRole, StressModel, SurfaceConfig};

fn load(text: &str) -> SurfaceConfig {
    SurfaceConfig::from_json_str(text).expect("demo surface parses")
}

#[test]
fn tube_demo_composes_smooth_constraint() {
    let config = load(include_str!("../demos/surfaces/tube.json"));
    let graph = compose(&config).expect("valid configuration");
    assert!(graph.contains_kind(StageKind::ThicknessFeasibility));
    assert!(graph.contains_kind(StageKind::FailureAggregator(
        FailureAggregation::SmoothAggregated
    )));
    assert_eq!(config.field("num_y"), Some(&serde_json::json!(7)));
}

#[test]
fn aluminum_wingbox_demo_composes_exact_constraint() {
    let config = load(include_str!("../demos/surfaces/aluminum_wingbox.json"));
    let graph = compose(&config).expect("valid configuration");
    assert!(graph.contains_kind(StageKind::StressRecovery(StressModel::IsotropicWingbox)));
    assert!(graph.contains_kind(StageKind::FailureAggregator(FailureAggregation::Exact)));
}

#[test]
fn composite_demo_uses_host_flag_spelling() {
    let config = load(include_str!("../demos/surfaces/composite_wingbox.json"));
    assert!(config.uses_composite());
    let graph = compose(&config).expect("valid configuration");
    let stress = graph
        .stage_by_role(StageRole::StressRecovery)
        .expect("stress recovery present");
    assert_eq!(
        stress.kind(),
        StageKind::StressRecovery(StressModel::CompositeWingbox)
    );
    assert_eq!(graph.failure_signal(), Some("tsaiwu_sr"));
}

#[test]
fn summaries_serialize_for_tooling() {
    let config = load(include_str!("../demos/surfaces/composite_wingbox.json"));
    let summary = compose(&config).expect("valid configuration").summary();
    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert_eq!(json["stages"][0]["name"], "tsaiwu_sr");
    assert_eq!(json["stages"][0]["kind"], "CompositeWingboxStress");
    assert_eq!(json["stages"][1]["inputs"][0], "tsaiwu_sr");
    assert_eq!(json["promoted_outputs"][1], "failure");
}
