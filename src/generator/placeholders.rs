//! Placeholder substitution for destination paths and template bodies.
//!
//! Destination paths may contain `[[Route]]`, `[[Type]]`, `[[Group]]`, `[[Reason]]`
//! (proper-cased) and their lowercase forms `[[route]]`, `[[type]]`, `[[group]]`,
//! `[[reason]]`. Template bodies may contain `[{GROUP}]` and `[{REASON}]`, replaced with the
//! literal strings. A destination containing the `/-facet-/` segment fans out to one file
//! per facet of the structure being rendered.

use super::helpers::{lower, proper};
use once_cell::sync::Lazy;
use regex::Regex;

/// Destination segment that requests one output per facet.
pub const FACET_MARKER: &str = "/-facet-/";

/// Companion segment replaced by the facet's name as written in the model.
pub const FACET_NAME_MARKER: &str = "/-Facet-/";

/// Token replaced by the facet name inside rendered facet output.
pub const FACET_BODY_TOKEN: &str = "--Facet--";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\]]*\]\]").expect("placeholder regex should be valid"));

/// The second selector used by `groups` templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Readme,
    Model,
}

impl Reason {
    /// Both reasons, in the order groups are generated.
    pub const ALL: [Reason; 2] = [Reason::Readme, Reason::Model];

    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Readme => "readme",
            Reason::Model => "model",
        }
    }

    /// Destination tree substituted for the `[[reason]]_` prefix token.
    pub fn prefix_folder(self) -> &'static str {
        match self {
            Reason::Readme => "chifra/",
            Reason::Model => "data-model/",
        }
    }
}

/// Names substituted into a destination path. Empty strings are valid and substitute
/// as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTags<'a> {
    pub route: &'a str,
    pub type_name: &'a str,
    pub group: &'a str,
    pub reason: &'a str,
}

/// Apply the reason-conditioned `[[reason]]_` prefix substitution to a raw template.
pub fn apply_reason_prefix(content: &str, reason: Option<Reason>) -> String {
    match reason {
        Some(reason) => content.replace("[[reason]]_", reason.prefix_folder()),
        None => content.to_string(),
    }
}

/// Expand every path placeholder in a metadata `output` value.
pub fn expand_output_path(output: &str, tags: &PathTags<'_>) -> String {
    output
        .replace("[[Route]]", &proper(tags.route))
        .replace("[[Type]]", &proper(tags.type_name))
        .replace("[[Group]]", &proper(tags.group))
        .replace("[[Reason]]", &proper(tags.reason))
        .replace("[[route]]", &lower(tags.route))
        .replace("[[type]]", &lower(tags.type_name))
        .replace("[[group]]", &lower(tags.group))
        .replace("[[reason]]", &lower(tags.reason))
}

/// Body-only substitutions.
pub fn substitute_body(body: &str, group: &str, reason: &str) -> String {
    body.replace("[{GROUP}]", group).replace("[{REASON}]", reason)
}

/// The first `[[...]]` token left in a path, if any.
pub fn residual_placeholder(path: &str) -> Option<&str> {
    PLACEHOLDER_RE.find(path).map(|m| m.as_str())
}

pub fn has_facet_marker(dest: &str) -> bool {
    dest.contains(FACET_MARKER)
}

/// Folder name a facet maps to; `index` becomes `indexdata`.
pub fn facet_folder(facet_name: &str) -> String {
    let folder = lower(facet_name);
    if folder == "index" {
        "indexdata".to_string()
    } else {
        folder
    }
}

/// Destination of one facet's expansion of a fan-out path.
pub fn facet_destination(dest: &str, facet_name: &str) -> String {
    dest.replace(FACET_MARKER, &format!("/{}/", facet_folder(facet_name)))
        .replace(FACET_NAME_MARKER, &format!("/{facet_name}/"))
}
