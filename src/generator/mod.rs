//! # Generator Module
//!
//! Turns the template tree under the generators root into files on disk.
//!
//! ## Architecture
//!
//! ```text
//! generators/ → Discovery → Dispatcher ─┬─ Gate
//!                                       ├─ Metadata + Placeholders → destination
//!                                       ├─ Renderer (minijinja)    → contents
//!                                       └─ Preservation Writer     → disk
//! ```
//!
//! 1. **Discovery** ([`discover_generators`]) groups `*.tmpl` files by their category folder
//! 2. **Dispatch** ([`Maker`]) iterates each category's entities in model order
//! 3. **Gate** ([`should_process`]) drops excluded template/entity pairs
//! 4. **Metadata** ([`parse_metadata_block`]) yields the destination, expanded by
//!    [`expand_output_path`]
//! 5. **Rendering** ([`Renderer`]) evaluates the stripped body against a [`Binding`]
//! 6. **Writing** ([`write_code`]) keeps `// EXISTING_CODE` regions and skips no-op writes
//!
//! ## Template Format
//!
//! ```text
//! /*
//! output: src/apps/chifra/internal/[[route]]/output.go
//! */
//! package {{ route }}
//! // EXISTING_CODE
//! // EXISTING_CODE
//! func Run{{ route | proper }}() {}
//! ```
//!
//! The block is removed before rendering. Path placeholders only apply to `output`; the
//! body is plain minijinja with the helper filters from [`helpers`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tbmaker::{generate_from_env, MakerConfig};
//!
//! let report = generate_from_env(&MakerConfig::from_env())?;
//! println!("{} files written", report.written);
//! ```

mod discovery;
mod dispatch;
mod gate;
mod generate;
pub mod helpers;
mod metadata;
mod placeholders;
mod preserve;
mod render;


pub use discovery::{discover_generators, Category, Generator, PARTIAL_SUFFIX, TEMPLATE_SUFFIX};
pub use dispatch::{GenerationReport, Maker, README_INTROS};
pub use gate::should_process;
pub use generate::{generate_codebase, generate_from_env};
pub use metadata::{
    count_markers, parse_metadata_block, strip_metadata, validate_template, TemplateMetadata,
    EXISTING_CODE_MARKER,
};
pub use placeholders::{
    apply_reason_prefix, expand_output_path, facet_destination, facet_folder, has_facet_marker,
    residual_placeholder, substitute_body, PathTags, Reason, FACET_BODY_TOKEN, FACET_MARKER,
    FACET_NAME_MARKER,
};
pub use preserve::{merge_existing, preserved_regions, write_code};
pub use render::{Binding, Renderer};
