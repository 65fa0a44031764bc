//! Ordered stage lists with explicit signal bindings.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use crate::errors::CompositionError;
use crate::stage::{StageKind, StageRole, SubsystemSpec};

/// Connection from one stage's output to a later stage's input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Name of the promoted signal.
    pub signal: String,
    /// Stage producing the signal.
    pub producer: String,
    /// Stage consuming the signal.
    pub consumer: String,
}

/// Serializable snapshot of a [`CompositionGraph`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Stages in evaluation order.
    pub stages: Vec<SubsystemSpec>,
    /// Inter-stage bindings.
    pub bindings: Vec<Binding>,
    /// Signals the owning model must supply.
    pub external_inputs: Vec<String>,
    /// Signals produced by the stages.
    pub promoted_outputs: Vec<String>,
}

/// Incrementally assembles a [`CompositionGraph`] while enforcing its invariants.
///
/// Stages are appended in evaluation order. Each input is bound to the earlier stage
/// producing it, or recorded as an external input when no earlier stage does.
///
/// # Examples
/// ```
/// use wingfail::{GraphBuilder, StressModel, SubsystemSpec, CompositionError};
///
/// let mut builder = GraphBuilder::new();
/// builder
///     .add_stage(SubsystemSpec::stress_recovery(StressModel::IsotropicTube))
///     .expect("first stage accepted");
/// let error = builder
///     .add_stage(SubsystemSpec::stress_recovery(StressModel::IsotropicWingbox))
///     .expect_err("stage name `vonmises` is already taken");
/// assert!(matches!(error, CompositionError::DuplicateStage { .. }));
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Stages added so far, connected by signal edges.
    graph: Graph<SubsystemSpec, Binding>,
    /// Producing stage for every promoted output.
    producers: HashMap<String, NodeIndex>,
    /// Inputs with no producer, in first-use order.
    external_inputs: Vec<String>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage after every stage already added.
    ///
    /// The builder is left untouched when the stage is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::DuplicateStage`] when the name is taken,
    /// [`CompositionError::OutputCollision`] when an output is already produced and
    /// [`CompositionError::ForwardReference`] when an earlier stage already consumed one of
    /// the outputs as an external input.
    pub fn add_stage(&mut self, stage: SubsystemSpec) -> Result<NodeIndex, CompositionError> {
        if self.find(stage.name()).is_some() {
            return Err(CompositionError::DuplicateStage {
                name: stage.name().to_string(),
            });
        }
        self.check_outputs(&stage)?;

        let name = stage.name().to_string();
        let outputs = stage.outputs().to_vec();
        let inputs = stage.inputs().to_vec();
        let node = self.graph.add_node(stage);
        for input in inputs {
            match self.producers.get(&input) {
                Some(&producer) => {
                    let binding = Binding {
                        producer: self.graph[producer].name().to_string(),
                        consumer: name.clone(),
                        signal: input,
                    };
                    self.graph.add_edge(producer, node, binding);
                }
                None => {
                    if !self.external_inputs.contains(&input) {
                        self.external_inputs.push(input);
                    }
                }
            }
        }
        for output in outputs {
            self.producers.insert(output, node);
        }
        Ok(node)
    }

    /// Finish assembly.
    #[must_use]
    pub fn build(self) -> CompositionGraph {
        debug_assert!(!petgraph::algo::is_cyclic_directed(&self.graph));
        CompositionGraph {
            graph: self.graph,
            producers: self.producers,
            external_inputs: self.external_inputs,
        }
    }

    /// Validate the outputs of a candidate stage against the stages already present.
    fn check_outputs(&self, stage: &SubsystemSpec) -> Result<(), CompositionError> {
        let mut seen = HashSet::new();
        for output in stage.outputs() {
            if !seen.insert(output.as_str()) {
                return Err(CompositionError::OutputCollision {
                    signal: output.clone(),
                    first: stage.name().to_string(),
                    second: stage.name().to_string(),
                });
            }
            if let Some(&producer) = self.producers.get(output) {
                return Err(CompositionError::OutputCollision {
                    signal: output.clone(),
                    first: self.graph[producer].name().to_string(),
                    second: stage.name().to_string(),
                });
            }
            let early_consumer = self
                .graph
                .node_weights()
                .find(|existing| existing.consumes(output))
                .or_else(|| stage.consumes(output).then_some(stage));
            if let Some(consumer) = early_consumer {
                return Err(CompositionError::ForwardReference {
                    stage: consumer.name().to_string(),
                    signal: output.clone(),
                    producer: stage.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Locate a stage by name.
    fn find(&self, name: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&node| self.graph[node].name() == name)
    }
}

/// Immutable, validated dependency graph of failure-evaluation stages.
///
/// Each edge carries the [`Binding`] it represents. Graphs produced by [`GraphBuilder`] list
/// stages in a valid evaluation order and are acyclic.
#[derive(Clone, Debug)]
pub struct CompositionGraph {
    /// Stages connected by the signals they exchange.
    graph: Graph<SubsystemSpec, Binding>,
    /// Producing stage for every promoted output.
    producers: HashMap<String, NodeIndex>,
    /// Inputs the owning model must supply, in first-use order.
    external_inputs: Vec<String>,
}

impl CompositionGraph {
    /// Iterate over the stages in evaluation order.
    pub fn stages(&self) -> impl Iterator<Item = &SubsystemSpec> + '_ {
        self.graph.node_weights()
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Look up a stage by name.
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&SubsystemSpec> {
        self.stages().find(|stage| stage.name() == name)
    }

    /// First stage playing `role`.
    #[must_use]
    pub fn stage_by_role(&self, role: StageRole) -> Option<&SubsystemSpec> {
        self.stages().find(|stage| stage.role() == role)
    }

    /// Whether any stage is of `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: StageKind) -> bool {
        self.stages().any(|stage| stage.kind() == kind)
    }

    /// Inter-stage bindings in the order they were created.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        self.graph.edge_weights().cloned().collect()
    }

    /// Signals no stage produces and the owning model must supply.
    #[must_use]
    pub fn external_inputs(&self) -> &[String] {
        &self.external_inputs
    }

    /// Every signal produced by a stage, in evaluation order.
    #[must_use]
    pub fn promoted_outputs(&self) -> Vec<&str> {
        self.stages()
            .flat_map(|stage| stage.outputs().iter().map(String::as_str))
            .collect()
    }

    /// Stage producing `signal`.
    #[must_use]
    pub fn producer_of(&self, signal: &str) -> Option<&SubsystemSpec> {
        self.producers.get(signal).map(|&node| &self.graph[node])
    }

    /// Stages consuming `signal`, in evaluation order.
    #[must_use]
    pub fn consumers_of(&self, signal: &str) -> Vec<&SubsystemSpec> {
        self.stages().filter(|stage| stage.consumes(signal)).collect()
    }

    /// Signal consumed by the failure aggregator.
    #[must_use]
    pub fn failure_signal(&self) -> Option<&str> {
        self.stage_by_role(StageRole::FailureAggregator)
            .and_then(|stage| stage.inputs().first())
            .map(String::as_str)
    }

    /// Whether `stage` needs a result from `upstream`, directly or transitively.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::UnknownStage`] when either name is not in the graph.
    pub fn depends_on(&self, stage: &str, upstream: &str) -> Result<bool, CompositionError> {
        let target = self.index_of(stage)?;
        let source = self.index_of(upstream)?;
        if source == target {
            return Ok(false);
        }
        Ok(has_path_connecting(&self.graph, source, target, None))
    }

    /// Group stages into levels whose members do not depend on each other.
    ///
    /// Every stage in a level depends only on stages in earlier levels, so an executor may
    /// evaluate each level concurrently. Stages within a level keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::Cycle`] when the stages depend on each other circularly.
    pub fn evaluation_levels(&self) -> Result<Vec<Vec<&SubsystemSpec>>, CompositionError> {
        let order = toposort(&self.graph, None).map_err(|cycle| CompositionError::Cycle {
            stage: self.graph[cycle.node_id()].name().to_string(),
        })?;

        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        let mut levels: Vec<Vec<NodeIndex>> = Vec::new();
        for node in order {
            let level = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .filter_map(|upstream| depth.get(&upstream))
                .map(|upstream_level| upstream_level + 1)
                .max()
                .unwrap_or(0);
            depth.insert(node, level);
            if levels.len() <= level {
                levels.resize_with(level + 1, Vec::new);
            }
            levels[level].push(node);
        }

        Ok(levels
            .into_iter()
            .map(|mut level| {
                level.sort_unstable();
                level.into_iter().map(|node| &self.graph[node]).collect()
            })
            .collect())
    }

    /// Snapshot the graph for serialization.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            stages: self.stages().cloned().collect(),
            bindings: self.bindings(),
            external_inputs: self.external_inputs.clone(),
            promoted_outputs: self
                .promoted_outputs()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Resolve a stage name to its node.
    fn index_of(&self, name: &str) -> Result<NodeIndex, CompositionError> {
        self.graph
            .node_indices()
            .find(|&node| self.graph[node].name() == name)
            .ok_or_else(|| CompositionError::UnknownStage {
                name: name.to_string(),
            })
    }
}

impl PartialEq for CompositionGraph {
    fn eq(&self, other: &Self) -> bool {
        self.stages().eq(other.stages())
            && self.bindings() == other.bindings()
            && self.external_inputs == other.external_inputs
    }
}

impl Eq for CompositionGraph {}
