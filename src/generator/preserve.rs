//! # Preservation Writer
//!
//! Writes freshly rendered output to disk while keeping the hand-edited regions of the
//! file it replaces.
//!
//! ## Regions
//!
//! Lines containing `// EXISTING_CODE` come in pairs. The text between the *i*-th pair is
//! the *i*-th preservation region. When a file is regenerated, the *i*-th region of the new
//! output is replaced with the *i*-th region of the file already on disk:
//!
//! ```text
//! existing file            new render               written
//! ─────────────            ──────────               ───────
//! package x                package x                package x
//! // EXISTING_CODE         // EXISTING_CODE         // EXISTING_CODE
//! import "fmt"             // EXISTING_CODE         import "fmt"
//! // EXISTING_CODE         func New() {}            // EXISTING_CODE
//! func Old() {}            // EXISTING_CODE         func New() {}
//! // EXISTING_CODE         // EXISTING_CODE         // EXISTING_CODE
//! func mine() {}                                    func mine() {}
//! // EXISTING_CODE                                  // EXISTING_CODE
//! ```
//!
//! Pairs match by ordinal position, never by surrounding text. Surplus pairs in the new
//! output keep their rendered content; surplus pairs in the old file are dropped.
//!
//! ## Writes
//!
//! Unchanged results are not written at all. Changed results go to a temporary file in the
//! destination folder which is then renamed over the destination.

use super::metadata::{count_markers, validate_template, EXISTING_CODE_MARKER};
use crate::error::{MakerError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Merge `new_content` with the file at `dest` and write it if anything changed.
///
/// Returns `Ok(true)` when the file was (re)written, `Ok(false)` when it already held the
/// merged result. New content with an odd marker count is rejected before touching disk;
/// an existing file with an odd count is overwritten without carrying regions forward.
pub fn write_code(dest: &Path, new_content: &str) -> Result<bool> {
    let dest_name = dest.display().to_string();
    validate_template(new_content, &dest_name)?;

    let existing = if dest.is_file() {
        Some(fs::read_to_string(dest).map_err(|e| MakerError::io_at("read", dest, e))?)
    } else {
        None
    };

    let merged = match existing.as_deref() {
        Some(old) if count_markers(old) % 2 != 0 => {
            tracing::warn!(
                path = %dest_name,
                markers = count_markers(old),
                "existing file has an odd number of EXISTING_CODE markers; overwriting"
            );
            new_content.to_string()
        }
        Some(old) => merge_existing(old, new_content),
        None => new_content.to_string(),
    };

    if existing.as_deref() == Some(merged.as_str()) {
        return Ok(false);
    }

    write_atomically(dest, &merged)?;
    Ok(true)
}

/// Splice the preservation regions of `existing` into `new_content` by ordinal position.
///
/// Both inputs are expected to have an even marker count.
pub fn merge_existing(existing: &str, new_content: &str) -> String {
    let preserved = preserved_regions(existing);
    let mut out = String::with_capacity(new_content.len().max(existing.len()));
    let mut marker_index = 0usize;
    let mut replacing = false;

    for line in new_content.split_inclusive('\n') {
        if line.contains(EXISTING_CODE_MARKER) {
            let opening = marker_index % 2 == 0;
            if opening {
                out.push_str(line);
                if let Some(region) = preserved.get(marker_index / 2) {
                    out.push_str(region);
                    replacing = true;
                }
            } else {
                replacing = false;
                out.push_str(line);
            }
            marker_index += 1;
        } else if !replacing {
            out.push_str(line);
        }
    }
    out
}

/// The text strictly between each marker pair, in order.
pub fn preserved_regions(content: &str) -> Vec<String> {
    let mut regions = Vec::new();
    let mut current: Option<String> = None;
    for line in content.split_inclusive('\n') {
        if line.contains(EXISTING_CODE_MARKER) {
            match current.take() {
                Some(region) => regions.push(region),
                None => current = Some(String::new()),
            }
        } else if let Some(region) = current.as_mut() {
            region.push_str(line);
        }
    }
    regions
}

fn write_atomically(dest: &Path, contents: &str) -> Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| MakerError::io_at("create", parent, e))?;

    let existing = fs::metadata(dest).ok().map(|meta| meta.permissions());
    let mut tmp =
        temp_file_in(parent).map_err(|e| MakerError::io_at("create temp file in", parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| MakerError::io_at("write temp file for", dest, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| MakerError::io_at("copy permissions of", dest, e))?;
    }
    tmp.persist(dest)
        .map_err(|e| MakerError::io_at("rename temp file onto", dest, e.error))?;
    Ok(())
}

/// Temp files are private by default; a new destination gets the mode `fs::write` would
/// give it (0666 less the umask).
#[cfg(unix)]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(parent)
}

#[cfg(not(unix))]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(parent)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use tempfile::TempDir;

    const M: &str = "// EXISTING_CODE\n";

    fn doc(parts: &[&str]) -> String {
        parts.concat()
    }

    #[test]
    fn test_preserved_regions() {
        let content = doc(&["head\n", M, "one\n", M, "mid\n", M, M, "tail\n"]);
        assert_eq!(preserved_regions(&content), vec!["one\n".to_string(), String::new()]);
    }

    #[test]
    fn test_merge_keeps_old_region() {
        let old = doc(&["a\n", M, "OLD\n", M]);
        let new = doc(&["b\n", M, "NEW\n", M]);
        assert_eq!(merge_existing(&old, &new), doc(&["b\n", M, "OLD\n", M]));
    }

    #[test]
    fn test_merge_surplus_new_pairs_keep_render() {
        let old = doc(&[M, "kept\n", M]);
        let new = doc(&[M, "x\n", M, "between\n", M, "fresh\n", M]);
        assert_eq!(
            merge_existing(&old, &new),
            doc(&[M, "kept\n", M, "between\n", M, "fresh\n", M])
        );
    }

    #[test]
    fn test_merge_surplus_old_pairs_dropped() {
        let old = doc(&[M, "one\n", M, M, "two\n", M]);
        let new = doc(&[M, M, "end\n"]);
        assert_eq!(merge_existing(&old, &new), doc(&[M, "one\n", M, "end\n"]));
    }

    #[test]
    fn test_marker_may_be_indented_or_trailing() {
        let old = "\t// EXISTING_CODE\n\tuser()\n\t// EXISTING_CODE\n";
        let new = "\t// EXISTING_CODE\n\t// EXISTING_CODE\n";
        assert_eq!(merge_existing(old, new), old);
    }

    #[test]
    fn test_last_line_without_newline() {
        let old = doc(&[M, "mine\n", "// EXISTING_CODE"]);
        let new = doc(&["x\n", M, "// EXISTING_CODE"]);
        assert_eq!(
            merge_existing(&old, &new),
            doc(&["x\n", M, "mine\n", "// EXISTING_CODE"])
        );
    }

    #[test]
    fn test_write_code_creates_then_noop() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("deep/nested/out.go");
        let content = doc(&["package x\n", M, M]);

        assert!(write_code(&dest, &content).unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), content);
        assert!(!write_code(&dest, &content).unwrap());
    }

    #[test]
    fn test_write_code_rejects_odd_new_content() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out.go");
        let err = write_code(&dest, &doc(&[M, M, M])).unwrap_err();
        assert!(err.to_string().contains("must have an even number"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_write_code_overwrites_odd_existing() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out.go");
        fs::write(&dest, doc(&[M, "stale\n"])).unwrap();
        let content = doc(&[M, "fresh\n", M]);
        assert!(write_code(&dest, &content).unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), content);
    }

    #[test]
    fn test_write_code_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out.go");
        write_code(&dest, "one\n").unwrap();
        write_code(&dest, "two\n").unwrap();
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.go".to_string()]);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_write_code_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("run.sh");
        fs::write(&dest, "#!/bin/sh\necho old\n").unwrap();
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(write_code(&dest, "#!/bin/sh\necho new\n").unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "#!/bin/sh\necho new\n");
        assert_eq!(mode(&dest), 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_code_new_file_mode_matches_plain_write() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain.go");
        fs::write(&plain, "x\n").unwrap();

        let dest = tmp.path().join("out.go");
        assert!(write_code(&dest, "x\n").unwrap());
        assert_eq!(mode(&dest), mode(&plain));
    }
}
