//! Error types produced while loading surface configurations or composing failure graphs.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a surface configuration cannot be turned into a composition graph.
///
/// # Examples
///
/// ```
/// use wingfail::{compose, ComposeError, SurfaceConfig};
///
/// let config = SurfaceConfig::new("wing", "foo");
/// let error = compose(&config).expect_err("unknown model type is rejected");
/// assert_eq!(
///     error,
///     ComposeError::InvalidModelType {
///         value: "foo".to_string()
///     }
/// );
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    /// Returned when `fem_model_type` names neither supported structural model.
    #[error("invalid fem_model_type `{value}`: expected either `tube` or `wingbox`")]
    InvalidModelType {
        /// The rejected model type exactly as supplied.
        value: String,
    },
    /// Returned when the selected stages violate a graph invariant.
    #[error("failed to assemble composition graph: {0}")]
    Composition(#[from] CompositionError),
}

/// Error returned when a stage cannot be added to a [`CompositionGraph`](crate::CompositionGraph).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    /// Returned when two stages share a name.
    #[error("stage `{name}` is already part of this graph")]
    DuplicateStage {
        /// Name shared by both stages.
        name: String,
    },
    /// Returned when two stages promote the same output signal.
    #[error("signal `{signal}` is produced by both `{first}` and `{second}`")]
    OutputCollision {
        /// The colliding signal name.
        signal: String,
        /// Stage that already produces the signal.
        first: String,
        /// Stage that attempted to produce it again.
        second: String,
    },
    /// Returned when a stage consumes a signal that a later stage produces.
    #[error("stage `{stage}` consumes `{signal}` before `{producer}` produces it")]
    ForwardReference {
        /// Consuming stage.
        stage: String,
        /// Signal consumed too early.
        signal: String,
        /// Later stage producing the signal.
        producer: String,
    },
    /// Returned when a stress-recovery stage does not expose exactly one failure signal.
    #[error("stage `{stage}` must expose exactly one output, found {count}")]
    MultipleOutputs {
        /// Offending stage.
        stage: String,
        /// Number of declared outputs.
        count: usize,
    },
    /// Returned when stages depend on each other circularly.
    #[error("stage `{stage}` is part of a dependency cycle")]
    Cycle {
        /// A stage on the cycle.
        stage: String,
    },
    /// Returned when a query names a stage that is not part of the graph.
    #[error("stage `{name}` does not exist in this graph")]
    UnknownStage {
        /// Requested stage name.
        name: String,
    },
}

/// Error returned when a surface configuration cannot be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read from disk.
    #[error("failed to read surface configuration `{}`", .path.display())]
    Io {
        /// Location of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the configuration text is not a valid surface description.
    #[error("malformed surface configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
