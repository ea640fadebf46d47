//! # tbmaker
//!
//! **tbmaker** regenerates a source tree from a repository of templates and a structured
//! description of a target API (commands, structures, groups and facets). Every run
//! re-evaluates every template; files whose contents did not change are left untouched,
//! and regions that users edited by hand inside generated files survive regeneration.
//!
//! ## Overview
//!
//! - **[`paths`]** - Locates the templates root and the generators root, honoring
//!   `TB_TEMPLATES_PATH` / `TB_GENERATORS_PATH`
//! - **[`model`]** - The in-memory data model plus the class-definition loader
//! - **[`generator`]** - Discovery, metadata, placeholders, gating, rendering, dispatch and
//!   the preservation writer
//! - **[`config`]** - Environment-driven configuration
//! - **[`logging`]** - `tracing` setup and the process-wide verbose flag
//! - **[`cli`]** - The `tbmaker` binary's flag handling
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(tbmaker)
//!     participant Paths as paths
//!     participant Model as model::load_codebase
//!     participant Disc as generator::discovery
//!     participant Maker as generator::dispatch
//!     participant Render as generator::render
//!     participant Writer as generator::preserve
//!     participant FS as File System
//!
//!     User->>CLI: tbmaker
//!     CLI->>Paths: templates_paths(&config)
//!     Paths-->>CLI: TemplatePaths (memoized)
//!     CLI->>Model: load_codebase(classDefinitions/)
//!     Model-->>CLI: CodeBase
//!     CLI->>Disc: discover_generators(generators/)
//!     Disc-->>CLI: Vec<Generator> (sorted)
//!     loop every generator × template × entity
//!         CLI->>Maker: dispatch(generator)
//!         Maker->>Maker: should_process (gate)
//!         Maker->>Render: render(binding, name, body)
//!         Render-->>Maker: rendered text
//!         Maker->>Writer: write_code(dest, rendered)
//!         Writer->>FS: read prior file, splice EXISTING_CODE regions
//!         Writer->>FS: temp file + rename (only when changed)
//!     end
//!     CLI-->>User: Done
//! ```
//!
//! ## Templates
//!
//! Templates live under `<generators>/<category>/` where the category is one of
//! `codebase`, `groups`, `routes` or `types`. Each template starts with a metadata block:
//!
//! ```text
//! /*
//! output: pkg/types/[[route]]/[[Type]].go
//! scope: go
//! */
//! package types
//!
//! type {{ name }} struct {
//! {%- for m in members %}
//!     {{ m.name | go_name }} {{ m.type }}
//! {%- endfor %}
//! }
//!
//! // EXISTING_CODE
//! // EXISTING_CODE
//! ```
//!
//! Text that users place between a pair of `// EXISTING_CODE` lines in the generated file is
//! carried over, pair by pair, into every later regeneration.
//!
//! ## Determinism
//!
//! Generation is single-threaded. Generators are visited in category order, templates in
//! lexicographic order and entities in model order, so identical inputs produce identical
//! outputs written in the same sequence.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod paths;

pub use config::MakerConfig;
pub use error::{MakerError, PathError, Result};
pub use generator::{
    discover_generators, generate_codebase, generate_from_env, write_code, GenerationReport,
    Generator, Maker,
};
pub use model::{load_codebase, CodeBase, Command, Facet, Group, Member, Structure};
pub use paths::{templates_paths, TemplatePaths};
