//! Orchestrator: one generation pass from resolved paths to written files.

use super::discovery::discover_generators;
use super::dispatch::{GenerationReport, Maker};
use crate::config::MakerConfig;
use crate::error::{MakerError, PathError, Result};
use crate::model::{load_codebase, verify_validators, CodeBase};
use crate::paths::{resolve_generators, templates_paths, validate_templates_folder, TemplatePaths};
use std::env;
use std::fs;
use std::path::Path;

/// Resolve everything from `config` and the current directory, load the model, and run
/// [`generate_codebase`].
pub fn generate_from_env(config: &MakerConfig) -> Result<GenerationReport> {
    let work_dir =
        env::current_dir().map_err(|e| MakerError::io("failed to read current folder", e))?;
    tracing::info!("Current folder: {}", work_dir.display());

    let paths = templates_paths(config)?;
    validate_templates_folder(&paths)?;
    let codebase = load_codebase(&paths.class_definitions())?;
    generate_codebase(config, &paths, codebase, &work_dir)
}

/// Generate every output for `codebase`.
///
/// 1. the templates root must contain `classDefinitions/`
/// 2. enum validators are checked against `work_dir`
/// 3. the generated root is created
/// 4. generators are discovered and dispatched in sorted order
///
/// Destinations are written relative to `work_dir`.
pub fn generate_codebase(
    config: &MakerConfig,
    paths: &TemplatePaths,
    codebase: CodeBase,
    work_dir: &Path,
) -> Result<GenerationReport> {
    let class_definitions = paths.class_definitions();
    if !class_definitions.is_dir() {
        return Err(PathError::ClassDefinitionsNotFound(
            paths.templates_root().display().to_string(),
        )
        .into());
    }

    verify_validators(&codebase, work_dir)?;

    let generated = paths.generated_root();
    fs::create_dir_all(&generated).map_err(|e| MakerError::io_at("create", &generated, e))?;

    let generators_root = resolve_generators(config.generators_path.as_deref(), work_dir)?;
    let generators = discover_generators(&generators_root, config.generator_filter.as_deref())?;

    let mut maker = Maker::new(codebase, &generators_root, paths.templates_root(), work_dir)
        .with_single(config.maker_single.clone());
    for generator in &generators {
        maker.dispatch(generator)?;
    }

    let report = maker.report();
    tracing::debug!(
        rendered = report.rendered,
        written = report.written,
        unchanged = report.unchanged,
        skipped = report.skipped,
        "generation finished"
    );
    Ok(report)
}
