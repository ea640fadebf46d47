use super::types::{CodeBase, CommandOption};
use crate::error::{MakerError, Result};
use crate::verbose_log;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a command's hand-written validator lives, relative to the working directory.
pub fn validator_path(work_dir: &Path, route: &str) -> PathBuf {
    work_dir
        .join("chifra")
        .join("internal")
        .join(route)
        .join("validate.go")
}

/// Every enumerated option domain must be checked by the command's validator.
///
/// Commands without a validator file are not checked. The first domain missing from a
/// validator aborts the run.
pub fn verify_validators(codebase: &CodeBase, work_dir: &Path) -> Result<()> {
    for command in &codebase.commands {
        let path = validator_path(work_dir, &command.route);
        if !path.is_file() {
            continue;
        }
        verbose_log!("Verifying enum validators in {}", path.display());
        let source = fs::read_to_string(&path).map_err(|e| MakerError::io_at("read", &path, e))?;
        for option in &command.options {
            if let Some(wanted) = missing_enum(&source, option) {
                return Err(MakerError::MissingEnumValidator {
                    wanted: wanted.to_string(),
                    path: path.display().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn missing_enum<'a>(source: &str, option: &'a CommandOption) -> Option<&'a str> {
    option
        .enums
        .iter()
        .map(String::as_str)
        .find(|domain| !source.contains(domain))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::Command;
    use tempfile::TempDir;

    fn codebase_with_enum(domain: &str) -> CodeBase {
        CodeBase {
            commands: vec![Command {
                route: "chunks".into(),
                options: vec![CommandOption {
                    long_name: "mode".into(),
                    enums: vec![domain.into()],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            structures: vec![],
        }
    }

    #[test]
    fn test_missing_validator_file_is_fine() {
        let tmp = TempDir::new().unwrap();
        assert!(verify_validators(&codebase_with_enum("[a|b]"), tmp.path()).is_ok());
    }

    #[test]
    fn test_referenced_enum_passes() {
        let tmp = TempDir::new().unwrap();
        let path = validator_path(tmp.path(), "chunks");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "validate.ValidateEnum(\"--mode\", opts.Mode, \"[a|b]\")\n").unwrap();
        assert!(verify_validators(&codebase_with_enum("[a|b]"), tmp.path()).is_ok());
    }

    #[test]
    fn test_unreferenced_enum_fails() {
        let tmp = TempDir::new().unwrap();
        let path = validator_path(tmp.path(), "chunks");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "package chunksPkg\n").unwrap();
        let err = verify_validators(&codebase_with_enum("[a|b]"), tmp.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Missing enum validator ([a|b]) for "), "{msg}");
        assert!(msg.ends_with("validate.go"));
    }
}
