mod report;
mod scenarios;

use std::path::PathBuf;
use std::process::ExitCode;

use report::render_graph;
use scenarios::load_surfaces;
use tracing::error;
use tracing_subscriber::EnvFilter;
use wingfail::StructuralFailureComposer;

fn main() -> ExitCode {
    // Diagnostics go to stderr so `--json` output stays machine readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    let composer = StructuralFailureComposer::new();
    let mut failed = false;
    for surface in load_surfaces(&paths) {
        let config = match surface {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                failed = true;
                continue;
            }
        };
        let graph = match composer.compose(&config) {
            Ok(graph) => graph,
            Err(err) => {
                error!(surface = config.name(), "{err}");
                failed = true;
                continue;
            }
        };
        if json {
            match serde_json::to_string_pretty(&graph.summary()) {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    error!(surface = config.name(), "{err}");
                    failed = true;
                }
            }
        } else {
            println!("{}", render_graph(&config, &graph));
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
