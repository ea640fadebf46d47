use serde::{Deserialize, Serialize};

/// The root aggregate: every command and structure the templates can see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBase {
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub structures: Vec<Structure>,
}

impl CodeBase {
    /// Groups derived from the structures, in order of first appearance.
    ///
    /// Structures without a group do not contribute one. Each group also collects the
    /// commands that name it.
    pub fn group_list(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for structure in self.structures.iter().filter(|s| !s.group.is_empty()) {
            match groups.iter_mut().find(|g| g.name == structure.group) {
                Some(group) => group.structures.push(structure.clone()),
                None => groups.push(Group {
                    name: structure.group.clone(),
                    structures: vec![structure.clone()],
                    commands: Vec::new(),
                }),
            }
        }
        for group in &mut groups {
            group.commands = self
                .commands
                .iter()
                .filter(|c| c.group == group.name)
                .cloned()
                .collect();
        }
        groups
    }
}

/// A command, identified by its lowercase route slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub route: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl Command {
    pub fn readme_name(&self) -> String {
        format!("{}.md", self.route)
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// One command-line option of a [`Command`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    pub long_name: String,
    #[serde(default)]
    pub hot_key: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub description: String,
    /// Enumerated domains (e.g. `[index|blooms|all]`) the command's validator must mention.
    #[serde(default)]
    pub enums: Vec<String>,
}

/// A data structure, identified by its proper-cased name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    #[serde(default)]
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: String,
    /// Structures flagged this way are never emitted by `types` templates.
    #[serde(default)]
    pub disable_go: bool,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

impl Structure {
    /// The route used in destination paths: the explicit route, else the lowercase class.
    pub fn route_tag(&self) -> String {
        if self.route.is_empty() {
            self.class.to_ascii_lowercase()
        } else {
            self.route.clone()
        }
    }

    pub fn sort_members(&mut self) {
        self.members.sort_by_key(Member::sort_name);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub doc_order: usize,
}

impl Member {
    /// Doc order first, then name; members without a doc order sort by name alone.
    pub fn sort_name(&self) -> String {
        format!("{:04}-{}", self.doc_order, self.name.to_lowercase())
    }
}

/// A view of a structure rendered through its own template binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub description: String,
}

/// Derived from the structure list; see [`CodeBase::group_list`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub structures: Vec<Structure>,
    pub commands: Vec<Command>,
}

impl Group {
    pub fn group_name(&self) -> &str {
        &self.name
    }
}
