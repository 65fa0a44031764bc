use std::path::PathBuf;

use wingfail::{ConfigError, SurfaceConfig};

/// Built-in surfaces covering every branch of the stage selection.
#[must_use]
pub fn builtin_surfaces() -> Vec<SurfaceConfig> {
    let mut surfaces = Vec::new();
    for exact in [false, true] {
        surfaces.push(
            SurfaceConfig::tube("tube_wing")
                .with_exact_failure_constraint(exact)
                .with_field("num_y", 7),
        );
        surfaces.push(SurfaceConfig::wingbox("metal_wingbox").with_exact_failure_constraint(exact));
        surfaces.push(
            SurfaceConfig::wingbox("composite_wingbox")
                .with_composite(true)
                .with_exact_failure_constraint(exact),
        );
    }
    surfaces
}

/// Load every surface named on the command line, or fall back to the built-in set.
///
/// A file that cannot be read is returned as an error in its slot so the remaining files
/// are still processed.
pub fn load_surfaces(paths: &[PathBuf]) -> Vec<Result<SurfaceConfig, ConfigError>> {
    if paths.is_empty() {
        return builtin_surfaces().into_iter().map(Ok).collect();
    }
    paths.iter().map(SurfaceConfig::from_path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_surfaces_cover_every_combination() {
        let surfaces = builtin_surfaces();
        assert_eq!(surfaces.len(), 6);
        assert_eq!(
            surfaces
                .iter()
                .filter(|surface| surface.exact_failure_constraint())
                .count(),
            3
        );
        assert_eq!(
            surfaces
                .iter()
                .filter(|surface| surface.uses_composite())
                .count(),
            2
        );
    }

    #[test]
    fn empty_path_list_uses_builtins() {
        let surfaces = load_surfaces(&[]);
        assert!(surfaces.iter().all(Result::is_ok));
        assert_eq!(surfaces.len(), builtin_surfaces().len());
    }

    #[test]
    fn missing_files_do_not_hide_other_results() {
        let surfaces = load_surfaces(&[PathBuf::from("missing.json")]);
        assert!(matches!(surfaces[0], Err(ConfigError::Io { .. })));
    }
}
