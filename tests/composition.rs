#![warn(clippy::pedantic)]

use wingfail::{
    compose, ComposeError, FailureAggregation, StageKind, StageRole, StressModel,
    StructuralFailureComposer, SubsystemSpec, SurfaceConfig,
};

const WINGBOX_INPUTS: [&str; 10] = [
    "Qz",
    "J",
    "A_enc",
    "spar_thickness",
    "htop",
    "hbottom",
    "hfront",
    "hrear",
    "nodes",
    "disp",
];

fn stage_names(config: &SurfaceConfig) -> Vec<String> {
    compose(config)
        .expect("valid configuration")
        .stages()
        .map(|stage| stage.name().to_string())
        .collect()
}

fn aggregator(config: &SurfaceConfig) -> SubsystemSpec {
    compose(config)
        .expect("valid configuration")
        .stage_by_role(StageRole::FailureAggregator)
        .cloned()
        .expect("every graph ends with an aggregator")
}

#[test]
fn tube_graph_matches_declared_signals() {
    let graph = compose(&SurfaceConfig::tube("wing")).expect("valid configuration");
    assert_eq!(graph.stage_count(), 3);

    let thickness = graph
        .stage("thicknessconstraint")
        .expect("thickness check present");
    assert_eq!(thickness.kind(), StageKind::ThicknessFeasibility);
    assert_eq!(thickness.inputs(), ["thickness", "radius"]);
    assert_eq!(thickness.outputs(), ["thickness_intersects"]);

    let stress = graph.stage("vonmises").expect("stress recovery present");
    assert_eq!(
        stress.kind(),
        StageKind::StressRecovery(StressModel::IsotropicTube)
    );
    assert_eq!(stress.inputs(), ["radius", "nodes", "disp"]);
    assert_eq!(stress.outputs(), ["vonmises"]);

    let failure = graph.stage("failure").expect("aggregator present");
    assert_eq!(failure.inputs(), ["vonmises"]);
    assert_eq!(failure.outputs(), ["failure"]);
}

#[test]
fn wingbox_graphs_match_declared_signals() {
    for (config, output) in [
        (SurfaceConfig::wingbox("wing"), "vonmises"),
        (
            SurfaceConfig::wingbox("wing").with_composite(true),
            "tsaiwu_sr",
        ),
    ] {
        let graph = compose(&config).expect("valid configuration");
        assert_eq!(graph.stage_count(), 2);
        let stress = graph
            .stage_by_role(StageRole::StressRecovery)
            .expect("stress recovery present");
        assert_eq!(stress.inputs(), WINGBOX_INPUTS);
        assert_eq!(stress.outputs(), [output]);
        assert_eq!(graph.external_inputs(), WINGBOX_INPUTS);
        assert_eq!(graph.promoted_outputs(), [output, "failure"]);
    }
}

#[test]
fn unknown_model_type_is_rejected() {
    let error = compose(&SurfaceConfig::new("wing", "foo")).expect_err("no graph for `foo`");
    assert_eq!(
        error,
        ComposeError::InvalidModelType {
            value: "foo".to_string()
        }
    );
    let message = error.to_string();
    assert!(message.contains("foo"));
    assert!(message.contains("tube"));
    assert!(message.contains("wingbox"));
}

#[test]
fn thickness_check_is_exclusive_to_tubes() {
    for exact in [false, true] {
        let tube = compose(&SurfaceConfig::tube("wing").with_exact_failure_constraint(exact))
            .expect("valid configuration");
        assert!(tube.contains_kind(StageKind::ThicknessFeasibility));
        assert!(tube.producer_of("thickness_intersects").is_some());

        for composite in [false, true] {
            let wingbox = compose(
                &SurfaceConfig::wingbox("wing")
                    .with_composite(composite)
                    .with_exact_failure_constraint(exact),
            )
            .expect("valid configuration");
            assert!(!wingbox.contains_kind(StageKind::ThicknessFeasibility));
            assert!(wingbox.producer_of("thickness_intersects").is_none());
        }
    }
}

#[test]
fn absent_composite_flag_matches_false() {
    let absent = compose(&SurfaceConfig::wingbox("wing")).expect("valid configuration");
    let explicit = compose(&SurfaceConfig::wingbox("wing").with_composite(false))
        .expect("valid configuration");
    assert_eq!(absent, explicit);
    assert!(absent.contains_kind(StageKind::StressRecovery(StressModel::IsotropicWingbox)));
    assert_eq!(absent.failure_signal(), Some("vonmises"));
}

#[test]
fn composite_failure_binds_to_tsai_wu_ratio() {
    let graph = compose(&SurfaceConfig::wingbox("wing").with_composite(true))
        .expect("valid configuration");
    let bindings = graph.bindings();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].signal, "tsaiwu_sr");
    assert_eq!(bindings[0].producer, "tsaiwu_sr");
    assert_eq!(bindings[0].consumer, "failure");
    assert!(graph.producer_of("vonmises").is_none());
    assert!(graph.consumers_of("vonmises").is_empty());
}

#[test]
fn exact_flag_changes_only_the_aggregator_kind() {
    let bases = [
        SurfaceConfig::tube("wing"),
        SurfaceConfig::wingbox("wing"),
        SurfaceConfig::wingbox("wing").with_composite(true),
    ];
    for base in bases {
        let exact = aggregator(&base.clone().with_exact_failure_constraint(true));
        let smooth = aggregator(&base.clone().with_exact_failure_constraint(false));
        let default = aggregator(&base);

        assert_eq!(
            exact.kind(),
            StageKind::FailureAggregator(FailureAggregation::Exact)
        );
        assert_eq!(
            smooth.kind(),
            StageKind::FailureAggregator(FailureAggregation::SmoothAggregated)
        );
        assert_eq!(default, smooth);
        assert_eq!(exact.name(), smooth.name());
        assert_eq!(exact.inputs(), smooth.inputs());
        assert_eq!(exact.outputs(), ["failure"]);
        assert_eq!(smooth.outputs(), ["failure"]);
    }
}

#[test]
fn composing_twice_yields_identical_graphs() {
    let composer = StructuralFailureComposer::new();
    let config = SurfaceConfig::tube("wing").with_exact_failure_constraint(true);
    let first = composer.compose(&config).expect("valid configuration");
    let second = composer.compose(&config).expect("valid configuration");
    assert_eq!(first, second);
    assert_eq!(first.summary(), second.summary());
    assert_eq!(stage_names(&config), ["thicknessconstraint", "vonmises", "failure"]);
}

#[test]
fn thickness_check_runs_independently_of_stress_recovery() {
    let graph = compose(&SurfaceConfig::tube("wing")).expect("valid configuration");
    assert!(!graph
        .depends_on("vonmises", "thicknessconstraint")
        .expect("known stages"));
    assert!(!graph
        .depends_on("failure", "thicknessconstraint")
        .expect("known stages"));
    assert!(graph.depends_on("failure", "vonmises").expect("known stages"));
    assert_eq!(
        graph
            .evaluation_levels()
            .expect("composed graphs are acyclic")
            .len(),
        2
    );
}

#[test]
fn different_configurations_yield_different_graphs() {
    let tube = compose(&SurfaceConfig::tube("wing")).expect("valid configuration");
    let wingbox = compose(&SurfaceConfig::wingbox("wing")).expect("valid configuration");
    assert_ne!(tube, wingbox);
}
