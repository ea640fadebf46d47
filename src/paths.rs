//! # Path Resolver
//!
//! Locates the **templates root** (which must contain `classDefinitions/`) and the
//! **generators root** (the template tree walked by discovery), and derives the
//! generated-output root from the folder enclosing the templates.
//!
//! ## Resolution Rules
//!
//! Templates root:
//! 1. If `TB_TEMPLATES_PATH` is set it must end with `templates/`, exist, and contain
//!    `classDefinitions/`. Its enclosing folder becomes the configured root.
//! 2. Otherwise the first of [`TEMPLATE_CANDIDATES`] with a `classDefinitions/` subfolder
//!    wins.
//! 3. Otherwise resolution fails, listing every candidate.
//!
//! The process-wide lookup ([`templates_paths`]) runs exactly once; success and failure
//! are both cached.
//!
//! Generators root: `TB_GENERATORS_PATH` (must exist and end with `generators/`), else the
//! first existing entry of [`GENERATOR_CANDIDATES`].

use crate::config::MakerConfig;
use crate::error::PathError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Candidate templates folders, relative to the working directory, in priority order.
pub const TEMPLATE_CANDIDATES: [&str; 3] = [
    "./code_gen/templates",
    "../dev-tools/goMaker/templates",
    "./dev-tools/goMaker/templates",
];

/// Candidate generators folders, relative to the working directory, in priority order.
pub const GENERATOR_CANDIDATES: [&str; 3] = [
    "./code_gen/templates/generators",
    "../dev-tools/goMaker/templates/generators",
    "./dev-tools/goMaker/templates/generators",
];

const CLASS_DEFINITIONS: &str = "classDefinitions";

static TEMPLATE_PATHS: OnceLock<Result<TemplatePaths, PathError>> = OnceLock::new();

/// A resolved templates folder and the root folder that encloses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    templates: PathBuf,
    root: PathBuf,
}

impl TemplatePaths {
    /// The templates folder itself (`.../templates`).
    pub fn templates_root(&self) -> &Path {
        &self.templates
    }

    /// The folder enclosing `templates/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn class_definitions(&self) -> PathBuf {
        self.templates.join(CLASS_DEFINITIONS)
    }

    /// `${root}/generated/`
    pub fn generated_root(&self) -> PathBuf {
        self.root.join("generated")
    }
}

/// Process-wide, memoized templates-root resolution relative to the working directory.
///
/// The first call decides the outcome for the lifetime of the process; later calls
/// (whatever `config` they pass) observe the same result.
pub fn templates_paths(config: &MakerConfig) -> Result<TemplatePaths, PathError> {
    memoized_templates(&TEMPLATE_PATHS, config, Path::new("."))
}

fn memoized_templates(
    cell: &OnceLock<Result<TemplatePaths, PathError>>,
    config: &MakerConfig,
    base: &Path,
) -> Result<TemplatePaths, PathError> {
    cell.get_or_init(|| resolve_templates(config.templates_path.as_deref(), base))
        .clone()
}

/// Resolve the templates root without memoization.
///
/// `env_path` is the value of `TB_TEMPLATES_PATH`; candidates are looked up beneath `base`.
pub fn resolve_templates(env_path: Option<&str>, base: &Path) -> Result<TemplatePaths, PathError> {
    if let Some(raw) = env_path.filter(|p| !p.is_empty()) {
        let env_path = with_trailing_slash(raw);
        if !env_path.ends_with("templates/") {
            return Err(PathError::TemplatesSuffix(env_path));
        }
        let templates = base.join(&env_path);
        if !templates.is_dir() {
            return Err(PathError::TemplatesMissing(env_path));
        }
        if !templates.join(CLASS_DEFINITIONS).is_dir() {
            return Err(PathError::ClassDefinitionsMissing(env_path));
        }
        let root = base.join(env_path.strip_suffix("templates/").unwrap_or(&env_path));
        return Ok(TemplatePaths { templates, root });
    }

    for candidate in TEMPLATE_CANDIDATES {
        let templates = base.join(candidate);
        if templates.join(CLASS_DEFINITIONS).is_dir() {
            let root = base.join(candidate.strip_suffix("templates").unwrap_or(candidate));
            return Ok(TemplatePaths { templates, root });
        }
    }

    Err(PathError::TemplatesNotFound(TEMPLATE_CANDIDATES.join(", ")))
}

/// Resolve the generators root. Not memoized; discovery asks once per run.
pub fn resolve_generators(env_path: Option<&str>, base: &Path) -> Result<PathBuf, PathError> {
    if let Some(raw) = env_path.filter(|p| !p.is_empty()) {
        let env_path = with_trailing_slash(raw);
        let generators = base.join(&env_path);
        if !generators.is_dir() {
            return Err(PathError::GeneratorsMissing(env_path));
        }
        if !env_path.ends_with("generators/") {
            return Err(PathError::GeneratorsSuffix(env_path));
        }
        return Ok(generators);
    }

    GENERATOR_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_dir())
        .ok_or_else(|| PathError::GeneratorsNotFound(GENERATOR_CANDIDATES.join(", ")))
}

/// A templates folder that exists but holds nothing is a setup error.
pub fn validate_templates_folder(paths: &TemplatePaths) -> Result<(), PathError> {
    let has_entries = fs::read_dir(paths.templates_root())
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    if has_entries {
        Ok(())
    } else {
        Err(PathError::EmptyTemplatesFolder(
            paths.templates_root().display().to_string(),
        ))
    }
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
