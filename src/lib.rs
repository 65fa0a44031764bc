#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod composer;
pub mod config;
pub mod errors;
pub mod graph;
pub mod signals;
pub mod stage;

pub use composer::{compose, failure_signal_of, select_stress_model, StructuralFailureComposer};
pub use config::{FemModelType, SurfaceConfig};
pub use errors::{ComposeError, CompositionError, ConfigError};
pub use graph::{Binding, CompositionGraph, GraphBuilder, GraphSummary};
pub use stage::{FailureAggregation, StageKind, StageRole, StressModel, SubsystemSpec};
