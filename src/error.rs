//! Error kinds raised while resolving paths, loading the model and generating code.

use std::path::Path;
use thiserror::Error;

/// Failures of the Path Resolver and the templates-folder checks.
///
/// `Clone` so that the memoized templates-root lookup can hand the same failure to every
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("TB_TEMPLATES_PATH must end with 'templates/', got: {0}")]
    TemplatesSuffix(String),

    #[error("TB_TEMPLATES_PATH environment variable points to non-existent directory: {0}")]
    TemplatesMissing(String),

    #[error("TB_TEMPLATES_PATH points to {0} but classDefinitions subfolder does not exist")]
    ClassDefinitionsMissing(String),

    #[error("templates folder {0} has no classDefinitions subfolder")]
    ClassDefinitionsNotFound(String),

    #[error("could not find the templates directory with classDefinitions subfolder in any of: {0}")]
    TemplatesNotFound(String),

    #[error("templates folder is empty: {0}")]
    EmptyTemplatesFolder(String),

    #[error("TB_GENERATORS_PATH must end with 'generators/', got: {0}")]
    GeneratorsSuffix(String),

    #[error("TB_GENERATORS_PATH env variable points to non-existent folder: {0}")]
    GeneratorsMissing(String),

    #[error("could not find generators directory in any of: {0}")]
    GeneratorsNotFound(String),
}

/// Library error type.
#[derive(Debug, Error)]
pub enum MakerError {
    /// Missing or malformed templates/generators roots.
    #[error(transparent)]
    Config(#[from] PathError),

    #[error("template {path} has {count} '// EXISTING_CODE' markers, but must have an even number")]
    OddMarkers { path: String, count: usize },

    #[error("old style templates should be gone: {0} has no metadata block with an output path")]
    MissingMetadata(String),

    #[error("unknown against value: {0}")]
    UnknownCategory(String),

    #[error("generated path {dest} from {template} still contains a placeholder token")]
    ResidualPlaceholder { template: String, dest: String },

    #[error("file does not exist {0}")]
    TemplateMissing(String),

    #[error("Missing enum validator ({wanted}) for {path}")]
    MissingEnumValidator { wanted: String, path: String },

    #[error("could not parse {path}: {message}")]
    Model { path: String, message: String },

    #[error("could not read template file: {0}")]
    EmptyTemplate(String),

    #[error("failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl MakerError {
    /// User-facing configuration problems get the requirements banner and exit 1.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MakerError::Config(_))
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        MakerError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn io_at(action: &str, path: &Path, source: std::io::Error) -> Self {
        MakerError::Io {
            context: format!("failed to {action} {}", path.display()),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MakerError>;
