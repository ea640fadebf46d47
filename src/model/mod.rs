//! # Model Module
//!
//! The data model the templates are rendered against.
//!
//! ## Entities
//!
//! - [`CodeBase`] - root aggregate owning the ordered [`Command`] and [`Structure`] lists
//! - [`Command`] - identified by its route; owns its [`CommandOption`]s
//! - [`Structure`] - identified by its proper-cased name; owns [`Member`]s and [`Facet`]s
//! - [`Group`] - a derived view over the structures (see [`CodeBase::group_list`])
//!
//! The model is loaded once at startup by [`load_codebase`]. The only mutation the
//! generator performs is sorting a structure's members before rendering it.
//!
//! ## Class Definitions
//!
//! ```text
//! templates/classDefinitions/
//! ├── commands.yaml     # optional `commands:` list
//! ├── manifest.toml     # one structure per file
//! └── block.toml
//! ```

mod load;
mod types;
mod validators;

pub use load::{load_codebase, COMMANDS_FILE};
pub use types::{CodeBase, Command, CommandOption, Facet, Group, Member, Structure};
pub use validators::{validator_path, verify_validators};
