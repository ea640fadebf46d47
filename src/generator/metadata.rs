//! Template metadata block and `// EXISTING_CODE` marker validation.
//!
//! A template starts with a comment block naming its destination:
//!
//! ```text
//! /*
//! output: src/apps/chifra/pkg/types/types_[[type]].go
//! scope: go
//! */
//! ```
//!
//! Only `output` is required. Unknown keys are ignored.

use super::placeholders::{apply_reason_prefix, Reason};
use crate::error::{MakerError, Result};
use serde::{Deserialize, Serialize};

/// Marks the start and end of a hand-edited region; pairs are matched by position.
pub const EXISTING_CODE_MARKER: &str = "// EXISTING_CODE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub output: String,
    #[serde(default)]
    pub scope: String,
}

/// Parse the leading metadata block after applying the reason prefix substitution.
///
/// Returns `None` when the block is absent, never closed, or has an empty `output`.
pub fn parse_metadata_block(content: &str, reason: Option<Reason>) -> Option<TemplateMetadata> {
    let content = apply_reason_prefix(content, reason);
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() < 3 || lines[0].trim_end_matches('\r') != "/*" {
        return None;
    }

    let mut metadata = TemplateMetadata::default();
    let mut closed = false;
    for line in &lines[1..] {
        let line = line.trim();
        if line == "*/" {
            closed = true;
            break;
        }
        if let Some(value) = line.strip_prefix("output:") {
            metadata.output = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("scope:") {
            metadata.scope = value.trim().to_string();
        }
    }

    if !closed || metadata.output.is_empty() {
        return None;
    }
    Some(metadata)
}

/// Remove the metadata block (opening `/*` through closing `*/`), trim, and end with one
/// newline. Content without a well-formed block is returned unchanged.
pub fn strip_metadata(content: &str) -> String {
    if !content.starts_with("/*\n") && !content.starts_with("/*\r\n") {
        return content.to_string();
    }
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() < 3 {
        return content.to_string();
    }
    match lines.iter().skip(1).position(|l| l.trim() == "*/") {
        Some(offset) => {
            let remaining = lines[offset + 2..].join("\n");
            format!("{}\n", remaining.trim())
        }
        None => content.to_string(),
    }
}

/// Number of lines carrying the preservation marker.
pub fn count_markers(content: &str) -> usize {
    content
        .lines()
        .filter(|line| line.contains(EXISTING_CODE_MARKER))
        .count()
}

/// Templates and rendered files must carry an even number of markers (zero included).
pub fn validate_template(content: &str, path: &str) -> Result<()> {
    let count = count_markers(content);
    if count % 2 != 0 {
        return Err(MakerError::OddMarkers {
            path: path.to_string(),
            count,
        });
    }
    Ok(())
}
