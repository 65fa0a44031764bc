//! Selection and wiring of the failure-evaluation stages for a surface.

use tracing::{debug, warn};

use crate::config::{FemModelType, SurfaceConfig};
use crate::errors::{ComposeError, CompositionError};
use crate::graph::{CompositionGraph, GraphBuilder};
use crate::stage::{FailureAggregation, StressModel, SubsystemSpec};

/// Builds the failure-evaluation graph for a surface configuration.
///
/// The composer holds no state; every call is independent and yields the same graph for
/// the same configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralFailureComposer;

impl StructuralFailureComposer {
    /// Create a composer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compose the stages for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidModelType`] when `fem_model_type` is neither `tube`
    /// nor `wingbox`. No graph is produced in that case.
    ///
    /// # Examples
    /// ```
    /// use wingfail::{StructuralFailureComposer, SurfaceConfig};
    ///
    /// let graph = StructuralFailureComposer::new()
    ///     .compose(&SurfaceConfig::wingbox("wing").with_composite(true))
    ///     .expect("valid configuration");
    /// assert_eq!(graph.stage_count(), 2);
    /// assert_eq!(graph.failure_signal(), Some("tsaiwu_sr"));
    /// ```
    pub fn compose(&self, config: &SurfaceConfig) -> Result<CompositionGraph, ComposeError> {
        let model_type = config.model_type()?;
        let mut builder = GraphBuilder::new();

        if model_type == FemModelType::Tube {
            if config.uses_composite() {
                warn!(
                    surface = config.name(),
                    "use_composite has no effect on tube models"
                );
            }
            builder.add_stage(SubsystemSpec::thickness_feasibility())?;
        }

        let stress = SubsystemSpec::stress_recovery(select_stress_model(
            model_type,
            config.uses_composite(),
        ));
        let failure_signal = failure_signal_of(&stress)?;
        debug!(
            surface = config.name(),
            kind = %stress.kind(),
            failure_signal = %failure_signal,
            "selected stress recovery"
        );
        builder.add_stage(stress)?;

        let aggregation = FailureAggregation::from_exact_flag(config.exact_failure_constraint());
        let aggregator = SubsystemSpec::failure_aggregator(aggregation, &failure_signal);
        debug!(
            surface = config.name(),
            kind = %aggregator.kind(),
            "selected failure aggregator"
        );
        builder.add_stage(aggregator)?;

        Ok(builder.build())
    }
}

/// Compose the stages for `config` with a default [`StructuralFailureComposer`].
///
/// # Errors
///
/// See [`StructuralFailureComposer::compose`].
pub fn compose(config: &SurfaceConfig) -> Result<CompositionGraph, ComposeError> {
    StructuralFailureComposer::new().compose(config)
}

/// Name of the failure field a stress-recovery stage hands to the aggregator.
///
/// # Errors
///
/// Returns [`CompositionError::MultipleOutputs`] when the stage does not declare exactly one
/// output.
pub fn failure_signal_of(stress: &SubsystemSpec) -> Result<String, CompositionError> {
    stress
        .sole_output()
        .map(str::to_string)
        .ok_or_else(|| CompositionError::MultipleOutputs {
            stage: stress.name().to_string(),
            count: stress.outputs().len(),
        })
}

/// Pick the stress-recovery kernel for a model type and material flag.
///
/// The composite flag only applies to wingbox models.
#[must_use]
pub fn select_stress_model(model_type: FemModelType, use_composite: bool) -> StressModel {
    match (model_type, use_composite) {
        (FemModelType::Tube, _) => StressModel::IsotropicTube,
        (FemModelType::Wingbox, false) => StressModel::IsotropicWingbox,
        (FemModelType::Wingbox, true) => StressModel::CompositeWingbox,
    }
}
