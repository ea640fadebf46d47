//! Renderer: evaluates a stripped template body against one model binding.
//!
//! Bodies use minijinja syntax. Every binding exposes its entity's fields at the top
//! level (`{{ name }}`, `{% for m in members %}`), plus `kind` naming the binding. Partial
//! templates are reachable with `{% include "types/header.partial.tmpl" %}`, resolved
//! against the generators root.

use super::helpers::register_helpers;
use super::placeholders::Reason;
use crate::error::{MakerError, Result};
use crate::model::{CodeBase, Command, Facet, Group, Structure};
use minijinja::value::Value;
use minijinja::{context, path_loader, AutoEscape, Environment};
use std::collections::HashSet;
use std::path::Path;

/// The entity a template is rendered against.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    CodeBase(&'a CodeBase),
    Command {
        command: &'a Command,
        help_notes: &'a str,
    },
    Structure(&'a Structure),
    Facet {
        facet: &'a Facet,
        structure: &'a Structure,
    },
    Group {
        group: &'a Group,
        reason: Reason,
    },
}

impl Binding<'_> {
    /// Template kind tag: `codebase`, `command`, `structure`, `facet` or `group`.
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::CodeBase(_) => "codebase",
            Binding::Command { .. } => "command",
            Binding::Structure(_) => "structure",
            Binding::Facet { .. } => "facet",
            Binding::Group { .. } => "group",
        }
    }

    fn context(&self) -> Value {
        let kind = self.kind();
        match *self {
            Binding::CodeBase(codebase) => context! {
                kind => kind,
                groups => Value::from_serialize(codebase.group_list()),
                ..Value::from_serialize(codebase)
            },
            Binding::Command {
                command,
                help_notes,
            } => context! {
                kind => kind,
                readme_name => command.readme_name(),
                has_notes => command.has_notes(),
                help_notes => help_notes,
                ..Value::from_serialize(command)
            },
            Binding::Structure(structure) => context! {
                kind => kind,
                route_tag => structure.route_tag(),
                ..Value::from_serialize(structure)
            },
            Binding::Facet { facet, structure } => context! {
                kind => kind,
                structure => Value::from_serialize(structure),
                ..Value::from_serialize(facet)
            },
            Binding::Group { group, reason } => context! {
                kind => kind,
                reason => reason.as_str(),
                ..Value::from_serialize(group)
            },
        }
    }
}

/// Wraps one template environment for the whole run; compiled templates are cached by
/// their unique name.
pub struct Renderer {
    env: Environment<'static>,
    loaded: HashSet<String>,
}

impl Renderer {
    pub fn new(generators_root: &Path) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_loader(path_loader(generators_root));
        register_helpers(&mut env);
        Self {
            env,
            loaded: HashSet::new(),
        }
    }

    /// Render `body` with `binding`. `name` must be unique per distinct body; the first
    /// body registered under a name is the one used for later calls.
    pub fn render(&mut self, binding: Binding<'_>, name: &str, body: &str) -> Result<String> {
        let render_err = |source: minijinja::Error| MakerError::Render {
            name: name.to_string(),
            source,
        };
        if !self.loaded.contains(name) {
            self.env
                .add_template_owned(name.to_string(), body.to_string())
                .map_err(render_err)?;
            self.loaded.insert(name.to_string());
        }
        let template = self.env.get_template(name).map_err(render_err)?;
        template.render(binding.context()).map_err(render_err)
    }
}
