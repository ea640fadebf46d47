//! Template discovery: walk the generators root and group templates by category.
//!
//! ```text
//! generators/
//! ├── codebase/
//! │   └── version.go.tmpl
//! ├── groups/
//! │   └── readme.md.tmpl
//! ├── routes/
//! │   ├── cmd.go.tmpl
//! │   └── sdk_python.py.tmpl
//! └── types/
//!     ├── types.go.tmpl
//!     └── header.partial.tmpl     # never a generator
//! ```

use crate::error::{MakerError, PathError, Result};
use crate::verbose_log;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;
use walkdir::WalkDir;

pub const TEMPLATE_SUFFIX: &str = ".tmpl";
pub const PARTIAL_SUFFIX: &str = ".partial.tmpl";

/// What a generator's templates are rendered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Codebase,
    Groups,
    Routes,
    Types,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Codebase => "codebase",
            Category::Groups => "groups",
            Category::Routes => "routes",
            Category::Types => "types",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MakerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "codebase" => Ok(Category::Codebase),
            "groups" => Ok(Category::Groups),
            "routes" => Ok(Category::Routes),
            "types" => Ok(Category::Types),
            other => Err(MakerError::UnknownCategory(other.to_string())),
        }
    }
}

/// One category folder and its templates, relative to that folder and sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generator {
    pub against: String,
    pub templates: Vec<String>,
}

impl Generator {
    pub fn category(&self) -> Result<Category> {
        self.against.parse()
    }
}

/// Walk `generators_root` and return one [`Generator`] per category folder found.
///
/// Admits files ending in `.tmpl` but not `.partial.tmpl`; when `filter` is non-empty only
/// paths containing it are admitted. Files directly under the root are ignored. The result
/// is sorted by category and each template list is sorted lexicographically.
pub fn discover_generators(generators_root: &Path, filter: Option<&str>) -> Result<Vec<Generator>> {
    if !generators_root.is_dir() {
        return Err(PathError::GeneratorsMissing(generators_root.display().to_string()).into());
    }
    verbose_log!("Looking for templates in: {}", generators_root.display());

    let filter = filter.filter(|f| !f.is_empty());
    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for entry in WalkDir::new(generators_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            MakerError::io(
                format!("failed to walk {}", generators_root.display()),
                e.into(),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let full = path.to_string_lossy();
        if filter.is_some_and(|f| !full.contains(f)) {
            continue;
        }
        if !full.ends_with(TEMPLATE_SUFFIX) || full.ends_with(PARTIAL_SUFFIX) {
            continue;
        }
        verbose_log!("  Found template: {}", full);

        let Ok(relative) = path.strip_prefix(generators_root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.len() < 2 {
            continue;
        }
        by_category
            .entry(parts[0].clone())
            .or_default()
            .push(parts[1..].join("/"));
    }

    Ok(by_category
        .into_iter()
        .map(|(against, mut templates)| {
            templates.sort();
            verbose_log!("  Creating generator for: {} with templates: {:?}", against, templates);
            Generator { against, templates }
        })
        .collect())
}
