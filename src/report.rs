use std::fmt::Write;

use wingfail::{CompositionGraph, SurfaceConfig};

/// Render a textual description of the stages composed for a surface.
#[must_use]
pub fn render_graph(config: &SurfaceConfig, graph: &CompositionGraph) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Surface `{}` ({} model, composite = {}, exact failure = {})",
        config.name(),
        config.fem_model_type(),
        config.uses_composite(),
        config.exact_failure_constraint()
    )
    .expect("writing to string cannot fail");

    for (position, stage) in graph.stages().enumerate() {
        writeln!(
            &mut output,
            "  {}. {} [{}]: ({}) -> ({})",
            position + 1,
            stage.name(),
            stage.kind(),
            stage.inputs().join(", "),
            stage.outputs().join(", ")
        )
        .expect("writing to string cannot fail");
    }

    for binding in graph.bindings() {
        writeln!(
            &mut output,
            "  binding: {}.{} -> {}",
            binding.producer, binding.signal, binding.consumer
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "  external inputs: {}",
        graph.external_inputs().join(", ")
    )
    .expect("writing to string cannot fail");

    output
}
