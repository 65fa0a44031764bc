//! Stage kinds and the subsystem descriptors emitted for them.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::signals;

/// Stress-recovery kernel selected for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StressModel {
    /// Von Mises stress in an isotropic tube spar.
    IsotropicTube,
    /// Von Mises stress in an isotropic wingbox.
    IsotropicWingbox,
    /// Tsai–Wu strength ratio in a composite wingbox.
    CompositeWingbox,
}

impl StressModel {
    /// Signals the kernel consumes, in declaration order.
    #[must_use]
    pub fn inputs(self) -> &'static [&'static str] {
        match self {
            Self::IsotropicTube => &[signals::RADIUS, signals::NODES, signals::DISP],
            Self::IsotropicWingbox | Self::CompositeWingbox => &signals::WINGBOX_STRESS_INPUTS,
        }
    }

    /// Failure field the kernel produces.
    #[must_use]
    pub fn output(self) -> &'static str {
        match self {
            Self::IsotropicTube | Self::IsotropicWingbox => signals::VONMISES,
            Self::CompositeWingbox => signals::TSAIWU_SR,
        }
    }
}

/// Strategy used to turn per-element failure values into optimizer constraints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailureAggregation {
    /// One constraint per structural element and load case.
    Exact,
    /// A single Kreisselmeier–Steinhauser aggregate of all elements.
    #[default]
    SmoothAggregated,
}

impl FailureAggregation {
    /// Select the aggregation strategy from the exact-constraint flag.
    #[must_use]
    pub fn from_exact_flag(exact: bool) -> Self {
        if exact {
            Self::Exact
        } else {
            Self::SmoothAggregated
        }
    }
}

/// The part a stage plays in the failure evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    /// Geometric feasibility check independent of the structural solution.
    Feasibility,
    /// Recovers a stress or failure-index field from displacements.
    StressRecovery,
    /// Reduces the failure field to optimizer constraints.
    FailureAggregator,
}

/// Every subsystem kind the composer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Tube wall thickness must not exceed the element radius.
    ThicknessFeasibility,
    /// Stress recovery with the given kernel.
    StressRecovery(StressModel),
    /// Failure aggregation with the given strategy.
    FailureAggregator(FailureAggregation),
}

impl StageKind {
    /// Return the role this kind plays in the graph.
    #[must_use]
    pub fn role(self) -> StageRole {
        match self {
            Self::ThicknessFeasibility => StageRole::Feasibility,
            Self::StressRecovery(_) => StageRole::StressRecovery,
            Self::FailureAggregator(_) => StageRole::FailureAggregator,
        }
    }

    /// Name the owning model registers the subsystem under.
    #[must_use]
    pub fn default_name(self) -> &'static str {
        match self {
            Self::ThicknessFeasibility => "thicknessconstraint",
            Self::StressRecovery(model) => model.output(),
            Self::FailureAggregator(_) => signals::FAILURE,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ThicknessFeasibility => "ThicknessFeasibility",
            Self::StressRecovery(StressModel::IsotropicTube) => "IsotropicTubeStress",
            Self::StressRecovery(StressModel::IsotropicWingbox) => "IsotropicWingboxStress",
            Self::StressRecovery(StressModel::CompositeWingbox) => "CompositeWingboxStress",
            Self::FailureAggregator(FailureAggregation::Exact) => "ExactFailureConstraint",
            Self::FailureAggregator(FailureAggregation::SmoothAggregated) => {
                "SmoothAggregatedFailureConstraint"
            }
        };
        f.write_str(name)
    }
}

impl Serialize for StageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Descriptor of one subsystem in a composition graph.
///
/// # Examples
/// ```
/// use wingfail::{StageKind, StressModel, SubsystemSpec};
///
/// let stage = SubsystemSpec::stress_recovery(StressModel::CompositeWingbox);
/// assert_eq!(stage.name(), "tsaiwu_sr");
/// assert_eq!(stage.outputs(), ["tsaiwu_sr"]);
/// assert_eq!(stage.kind(), StageKind::StressRecovery(StressModel::CompositeWingbox));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubsystemSpec {
    /// Name the subsystem is registered under.
    name: String,
    /// Kind of subsystem to instantiate.
    kind: StageKind,
    /// Signals consumed, in declaration order.
    inputs: Vec<String>,
    /// Signals produced, in declaration order.
    outputs: Vec<String>,
}

impl SubsystemSpec {
    /// Create a descriptor with explicit signal lists.
    #[must_use]
    pub fn new<I, O>(name: impl Into<String>, kind: StageKind, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Thickness feasibility check for tube spars.
    #[must_use]
    pub fn thickness_feasibility() -> Self {
        let kind = StageKind::ThicknessFeasibility;
        Self::new(
            kind.default_name(),
            kind,
            [signals::THICKNESS, signals::RADIUS],
            [signals::THICKNESS_INTERSECTS],
        )
    }

    /// Stress recovery with the supplied kernel.
    #[must_use]
    pub fn stress_recovery(model: StressModel) -> Self {
        let kind = StageKind::StressRecovery(model);
        Self::new(
            kind.default_name(),
            kind,
            model.inputs().iter().copied(),
            [model.output()],
        )
    }

    /// Failure aggregator consuming `failure_signal`.
    #[must_use]
    pub fn failure_aggregator(aggregation: FailureAggregation, failure_signal: &str) -> Self {
        let kind = StageKind::FailureAggregator(aggregation);
        Self::new(
            kind.default_name(),
            kind,
            [failure_signal],
            [signals::FAILURE],
        )
    }

    /// Registered subsystem name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of subsystem to instantiate.
    #[must_use]
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Role of the subsystem.
    #[must_use]
    pub fn role(&self) -> StageRole {
        self.kind.role()
    }

    /// Declared inputs in order.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Declared outputs in order.
    #[must_use]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Return the only output, or `None` when the stage declares several or none.
    #[must_use]
    pub fn sole_output(&self) -> Option<&str> {
        match self.outputs.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// Whether the stage consumes `signal`.
    #[must_use]
    pub fn consumes(&self, signal: &str) -> bool {
        self.inputs.iter().any(|input| input == signal)
    }

    /// Whether the stage produces `signal`.
    #[must_use]
    pub fn produces(&self, signal: &str) -> bool {
        self.outputs.iter().any(|output| output == signal)
    }
}
