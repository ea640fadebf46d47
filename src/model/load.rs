use super::types::{CodeBase, Command, Structure};
use crate::error::{MakerError, Result};
use crate::generator::helpers::proper;
use crate::verbose_log;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional command list inside `classDefinitions/`.
pub const COMMANDS_FILE: &str = "commands.yaml";

#[derive(Debug, Deserialize)]
struct CommandsFile {
    #[serde(default)]
    commands: Vec<Command>,
}

/// Load the data model from a `classDefinitions/` folder.
///
/// Every `*.toml` file directly inside the folder describes one structure; files are read
/// in name order so the model order is stable. `commands.yaml`, when present, lists the
/// commands.
pub fn load_codebase(class_definitions: &Path) -> Result<CodeBase> {
    verbose_log!("Loading class definitions from {}", class_definitions.display());

    let mut structures = Vec::new();
    for path in toml_files(class_definitions)? {
        let content =
            fs::read_to_string(&path).map_err(|e| MakerError::io_at("read", &path, e))?;
        structures.push(parse_structure(&path, &content)?);
    }

    let commands_path = class_definitions.join(COMMANDS_FILE);
    let commands = if commands_path.is_file() {
        let content = fs::read_to_string(&commands_path)
            .map_err(|e| MakerError::io_at("read", &commands_path, e))?;
        parse_commands(&commands_path, &content)?
    } else {
        Vec::new()
    };

    verbose_log!(
        "Loaded {} structures and {} commands",
        structures.len(),
        commands.len()
    );
    Ok(CodeBase {
        commands,
        structures,
    })
}

fn toml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MakerError::io_at("list", dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| MakerError::io_at("list", dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn parse_structure(path: &Path, content: &str) -> Result<Structure> {
    let mut structure: Structure = toml::from_str(content).map_err(|e| MakerError::Model {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    structure.class = structure.class.to_ascii_lowercase();
    if structure.name.is_empty() {
        structure.name = proper(&structure.class);
    }
    Ok(structure)
}

pub(crate) fn parse_commands(path: &Path, content: &str) -> Result<Vec<Command>> {
    let file: CommandsFile = serde_yaml::from_str(content).map_err(|e| MakerError::Model {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(file
        .commands
        .into_iter()
        .map(|mut c| {
            c.route = c.route.to_ascii_lowercase();
            c
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
class = "Manifest"
route = "scrape"
group = "Admin"
description = "The manifest"

[[members]]
name = "version"
type = "string"

[[members]]
name = "chain"
type = "string"
doc_order = 1

[[facets]]
name = "Index"

[[facets]]
name = "Stats"
"#;

    const COMMANDS: &str = r#"
commands:
  - route: Scrape
    group: Admin
    options:
      - long_name: mode
        enums: ["[run|stop]"]
  - route: daemon
"#;

    #[test]
    fn test_parse_structure_defaults_name() {
        let s = parse_structure(Path::new("manifest.toml"), MANIFEST).unwrap();
        assert_eq!(s.class, "manifest");
        assert_eq!(s.name, "Manifest");
        assert_eq!(s.route, "scrape");
        assert_eq!(s.members.len(), 2);
        assert_eq!(s.members[0].type_name, "string");
        assert_eq!(s.facets.len(), 2);
        assert!(!s.disable_go);
    }

    #[test]
    fn test_parse_structure_error_names_file() {
        let err = parse_structure(Path::new("broken.toml"), "class = ").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_commands_lowercases_route() {
        let commands = parse_commands(Path::new("commands.yaml"), COMMANDS).unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].route, "scrape");
        assert_eq!(commands[0].options[0].enums, vec!["[run|stop]".to_string()]);
        assert_eq!(commands[1].readme_name(), "daemon.md");
    }

    #[test]
    fn test_load_codebase_in_file_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b_manifest.toml"), MANIFEST).unwrap();
        fs::write(tmp.path().join("a_block.toml"), "class = \"block\"\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();
        fs::write(tmp.path().join(COMMANDS_FILE), COMMANDS).unwrap();

        let codebase = load_codebase(tmp.path()).unwrap();
        let names: Vec<_> = codebase.structures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Block", "Manifest"]);
        assert_eq!(codebase.commands.len(), 2);
    }

    #[test]
    fn test_load_codebase_without_commands() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("block.toml"), "class = \"block\"\n").unwrap();
        let codebase = load_codebase(tmp.path()).unwrap();
        assert!(codebase.commands.is_empty());
        assert_eq!(codebase.structures[0].route_tag(), "block");
    }
}
