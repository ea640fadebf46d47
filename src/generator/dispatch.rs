//! Entity Dispatcher: fans each generator out over the model entities of its category.
//!
//! | category   | binding     | entity tag      | iteration                               |
//! |------------|-------------|-----------------|-----------------------------------------|
//! | `codebase` | `CodeBase`  | `codebase`      | once per template                       |
//! | `groups`   | `Group`     | group name      | per reason, per template, per group     |
//! | `routes`   | `Command`   | command route   | per template, per command               |
//! | `types`    | `Structure` | structure class | per template, per enabled structure     |
//!
//! `types` destinations containing `/-facet-/` render once per facet instead, with the
//! `Facet` binding.

use super::discovery::{Category, Generator};
use super::gate::should_process;
use super::metadata::{parse_metadata_block, strip_metadata, validate_template};
use super::placeholders::{
    expand_output_path, facet_destination, has_facet_marker, residual_placeholder,
    substitute_body, PathTags, Reason, FACET_BODY_TOKEN,
};
use super::preserve::write_code;
use super::render::{Binding, Renderer};
use crate::error::{MakerError, Result};
use crate::model::{CodeBase, Command, Group};
use crate::verbose_log;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder under the templates root holding per-command help notes.
pub const README_INTROS: &str = "readme-intros";

/// Counts collected over one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Outputs produced by the renderer.
    pub rendered: usize,
    /// Files created or rewritten.
    pub written: usize,
    /// Files whose merged contents matched what was on disk.
    pub unchanged: usize,
    /// Template/entity pairs rejected by the gate.
    pub skipped: usize,
}

/// The terminal line of a run.
impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done... {} written, {} unchanged, {} skipped",
            self.written, self.unchanged, self.skipped
        )
    }
}

/// Owns the model and the render state for one run.
pub struct Maker {
    codebase: CodeBase,
    groups: Vec<Group>,
    emitter: Emitter,
}

/// Everything a single template/entity pair needs besides the model.
struct Emitter {
    generators_root: PathBuf,
    templates_root: PathBuf,
    work_dir: PathBuf,
    maker_single: Option<String>,
    renderer: Renderer,
    report: GenerationReport,
    /// Rendered help notes by route, filled on first use.
    notes: HashMap<String, String>,
    emitted: Vec<String>,
}

/// One template rendered against one entity.
struct Job<'a> {
    category: Category,
    template: &'a str,
    tag: &'a str,
    binding: Binding<'a>,
    tags: PathTags<'a>,
    reason: Option<Reason>,
}

impl Maker {
    /// Prepare a run over `codebase`.
    ///
    /// Structure members are sorted by their sort name up front and groups are derived
    /// once. Output paths are resolved against `work_dir`.
    pub fn new(
        mut codebase: CodeBase,
        generators_root: &Path,
        templates_root: &Path,
        work_dir: &Path,
    ) -> Self {
        for structure in &mut codebase.structures {
            structure.sort_members();
        }
        let groups = codebase.group_list();
        Self {
            codebase,
            groups,
            emitter: Emitter {
                generators_root: generators_root.to_path_buf(),
                templates_root: templates_root.to_path_buf(),
                work_dir: work_dir.to_path_buf(),
                maker_single: None,
                renderer: Renderer::new(generators_root),
                report: GenerationReport::default(),
                notes: HashMap::new(),
                emitted: Vec::new(),
            },
        }
    }

    /// Restrict processing to templates whose path contains `single` (`TB_MAKER_SINGLE`).
    pub fn with_single(mut self, single: Option<String>) -> Self {
        self.emitter.maker_single = single.filter(|s| !s.is_empty());
        self
    }

    pub fn codebase(&self) -> &CodeBase {
        &self.codebase
    }

    pub fn report(&self) -> GenerationReport {
        self.emitter.report
    }

    /// Destinations in the order they were rendered, relative to the work dir.
    pub fn emitted(&self) -> &[String] {
        &self.emitter.emitted
    }

    /// Render every template of `generator` against the entities of its category.
    pub fn dispatch(&mut self, generator: &Generator) -> Result<()> {
        let category = generator.category()?;
        verbose_log!(
            "Processing {} with {} templates",
            category,
            generator.templates.len()
        );
        match category {
            Category::Codebase => self.process_codebase(&generator.templates),
            Category::Groups => self.process_groups(&generator.templates),
            Category::Routes => self.process_routes(&generator.templates),
            Category::Types => self.process_types(&generator.templates),
        }
    }

    fn process_codebase(&mut self, templates: &[String]) -> Result<()> {
        for template in templates {
            self.emitter.process(Job {
                category: Category::Codebase,
                template,
                tag: "codebase",
                binding: Binding::CodeBase(&self.codebase),
                tags: PathTags::default(),
                reason: None,
            })?;
        }
        Ok(())
    }

    fn process_groups(&mut self, templates: &[String]) -> Result<()> {
        for reason in Reason::ALL {
            for template in templates {
                for group in &self.groups {
                    self.emitter.process(Job {
                        category: Category::Groups,
                        template,
                        tag: &group.name,
                        binding: Binding::Group { group, reason },
                        tags: PathTags {
                            group: &group.name,
                            reason: reason.as_str(),
                            ..PathTags::default()
                        },
                        reason: Some(reason),
                    })?;
                }
            }
        }
        Ok(())
    }

    fn process_routes(&mut self, templates: &[String]) -> Result<()> {
        for template in templates {
            for command in &self.codebase.commands {
                self.emitter.process(Job {
                    category: Category::Routes,
                    template,
                    tag: &command.route,
                    binding: Binding::Command {
                        command,
                        help_notes: "",
                    },
                    tags: PathTags {
                        route: &command.route,
                        ..PathTags::default()
                    },
                    reason: None,
                })?;
            }
        }
        Ok(())
    }

    fn process_types(&mut self, templates: &[String]) -> Result<()> {
        for template in templates {
            for structure in self.codebase.structures.iter().filter(|s| !s.disable_go) {
                let route = structure.route_tag();
                self.emitter.process(Job {
                    category: Category::Types,
                    template,
                    tag: &structure.class,
                    binding: Binding::Structure(structure),
                    tags: PathTags {
                        route: &route,
                        type_name: &structure.name,
                        ..PathTags::default()
                    },
                    reason: None,
                })?;
            }
        }
        Ok(())
    }
}

impl Emitter {
    fn process(&mut self, job: Job<'_>) -> Result<()> {
        let template_path = self
            .generators_root
            .join(job.category.as_str())
            .join(job.template);
        if !should_process(
            &template_path,
            job.category,
            job.tag,
            self.maker_single.as_deref(),
        )? {
            self.report.skipped += 1;
            return Ok(());
        }

        let source_name = template_path.display().to_string();
        let source = fs::read_to_string(&template_path)
            .map_err(|e| MakerError::io_at("read template", &template_path, e))?;
        validate_template(&source, &source_name)?;

        let metadata = parse_metadata_block(&source, job.reason)
            .ok_or_else(|| MakerError::MissingMetadata(source_name.clone()))?;
        let dest = expand_output_path(&metadata.output, &job.tags);
        if residual_placeholder(&dest).is_some() {
            return Err(MakerError::ResidualPlaceholder {
                template: source_name,
                dest,
            });
        }

        let body = substitute_body(&strip_metadata(&source), job.tags.group, job.tags.reason);
        let name = format!("{}{}{}", source_name, job.tags.group, job.tags.reason);

        // Notes are rendered only for commands that get past the gate.
        let notes;
        let binding = match job.binding {
            Binding::Command { command, .. } => {
                notes = self.help_notes(command)?;
                Binding::Command {
                    command,
                    help_notes: &notes,
                }
            }
            binding => binding,
        };

        match binding {
            Binding::Structure(structure) if has_facet_marker(&dest) => {
                for facet in &structure.facets {
                    let rendered = self.renderer.render(
                        Binding::Facet { facet, structure },
                        &format!("{name}{}", facet.name),
                        &body,
                    )?;
                    let rendered = rendered.replace(FACET_BODY_TOKEN, &facet.name);
                    self.emit(&facet_destination(&dest, &facet.name), &rendered)?;
                }
                Ok(())
            }
            binding => {
                let rendered = self.renderer.render(binding, &name, &body)?;
                self.emit(&dest, &rendered)
            }
        }
    }

    fn emit(&mut self, dest: &str, rendered: &str) -> Result<()> {
        self.report.rendered += 1;
        self.emitted.push(dest.to_string());
        if write_code(&self.work_dir.join(dest), rendered)? {
            self.report.written += 1;
            tracing::info!("Wrote {}", dest);
        } else {
            self.report.unchanged += 1;
            verbose_log!("  Unchanged {}", dest);
        }
        Ok(())
    }

    fn help_notes(&mut self, command: &Command) -> Result<String> {
        if let Some(notes) = self.notes.get(&command.route) {
            return Ok(notes.clone());
        }
        let notes = self.render_notes(command)?;
        self.notes.insert(command.route.clone(), notes.clone());
        Ok(notes)
    }

    /// Rendered `readme-intros/<route>.notes.md`, prefixed with a blank line, or empty
    /// when the command has no notes file.
    fn render_notes(&mut self, command: &Command) -> Result<String> {
        let path = self
            .templates_root
            .join(README_INTROS)
            .join(format!("{}.notes.md", command.route));
        if !path.is_file() {
            return Ok(String::new());
        }

        let display = path.display().to_string();
        let source =
            fs::read_to_string(&path).map_err(|e| MakerError::io_at("read notes", &path, e))?;
        if source.is_empty() {
            return Err(MakerError::EmptyTemplate(display));
        }
        validate_template(&source, &display)?;

        let rendered = self.renderer.render(
            Binding::Command {
                command,
                help_notes: "",
            },
            &format!("Notes{}", command.readme_name()),
            &source,
        )?;
        Ok(format!(
            "\n\n{}",
            rendered.trim_matches(|c| matches!(c, '\n' | '\r' | '\t'))
        ))
    }
}
