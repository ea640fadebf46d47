//! # CLI Module
//!
//! Command-line front end of the `tbmaker` binary.
//!
//! ## Flags
//!
//! | Flag | Spellings | Effect |
//! |---|---|---|
//! | help | `--help`, `-h`, `-help`, `help` | print help and exit 0 |
//! | verbose | `--verbose`, `-v`, `-verbose` | log every template considered |
//! | version | `--version` | print version and build time, exit 0 |
//!
//! Anything else prints `Error: Unknown option '<arg>'` with the list of valid options
//! and exits 1. With no flags the binary runs one generation pass from the current
//! folder.
//!
//! ## Exit Codes
//!
//! - `0` - generation finished, or help/version printed
//! - `1` - unknown option, configuration error (followed by the requirements banner), or
//!   any generation failure
//!
//! ## Usage from Code
//!
//! ```rust
//! use tbmaker::cli::parse_args;
//!
//! let cli = parse_args(["tbmaker", "-help", "-verbose"]).unwrap();
//! assert!(cli.help && cli.verbose);
//! ```

mod commands;


pub use commands::{
    help_text, normalize_args, parse_args, run_cli, version_text, Cli, UnknownOption,
    VALID_OPTIONS,
};
