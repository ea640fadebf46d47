use crate::config::MakerConfig;
use crate::generator::generate_from_env;
use crate::logging::{init_logging, is_verbose, set_verbose};
use clap::Parser;
use std::process::ExitCode;

const HELP: &str = include_str!("help.txt");
const HELP_VERBOSE: &str = include_str!("help_verbose.txt");

/// Every spelling accepted on the command line, as listed after an unknown option.
pub const VALID_OPTIONS: [&str; 8] = [
    "--help", "-h", "-help", "help", "--verbose", "-v", "-verbose", "--version",
];

/// Command-line interface for tbmaker
///
/// Only informational flags exist; running without any flag performs a generation pass.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "tbmaker")]
#[command(about = "Template-driven code generator", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Show help and exit
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Enable verbose logging (same as TB_VERBOSE=true)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show version and build time, then exit
    #[arg(long)]
    pub version: bool,
}

/// An argument that is not one of [`VALID_OPTIONS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

/// Map legacy spellings onto their clap form and drop duplicates.
///
/// The first item is the program name and is passed through.
pub fn normalize_args<I, T>(args: I) -> Result<Vec<String>, UnknownOption>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<String> = args.next().into_iter().collect();
    for arg in args {
        let Some(flag) = canonical_flag(&arg) else {
            return Err(UnknownOption(arg));
        };
        if !normalized.iter().skip(1).any(|seen| seen == flag) {
            normalized.push(flag.to_string());
        }
    }
    Ok(normalized)
}

fn canonical_flag(arg: &str) -> Option<&'static str> {
    match arg {
        "--help" | "-h" | "-help" | "help" => Some("--help"),
        "--verbose" | "-v" | "-verbose" => Some("--verbose"),
        "--version" => Some("--version"),
        _ => None,
    }
}

/// Normalize and parse a full argument list (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Cli, UnknownOption>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let normalized = normalize_args(args)?;
    Cli::try_parse_from(&normalized)
        .map_err(|_| UnknownOption(normalized.get(1..).unwrap_or_default().join(" ")))
}

/// Help text for the current verbosity.
pub fn help_text() -> &'static str {
    if is_verbose() {
        HELP_VERBOSE
    } else {
        HELP
    }
}

pub fn version_text() -> String {
    format!(
        "Version:  v{}\nCompiled: {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("TB_MAKER_COMPILE_TIME").unwrap_or("unknown")
    )
}

fn print_unknown_option(option: &UnknownOption) {
    eprintln!("Error: Unknown option '{}'", option.0);
    eprintln!("Valid options:");
    for valid in VALID_OPTIONS {
        eprintln!("  {valid}");
    }
}

/// Entry point of the `tbmaker` binary.
///
/// Loads `.env`, reads the `TB_*` configuration, installs logging, then either prints
/// version/help or runs one generation pass.
pub fn run_cli() -> ExitCode {
    dotenvy::dotenv().ok();
    let config = MakerConfig::from_env();
    set_verbose(config.verbose);

    let cli = match parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(unknown) => {
            print_unknown_option(&unknown);
            return ExitCode::FAILURE;
        }
    };
    if cli.verbose {
        set_verbose(true);
    }

    if cli.version {
        println!("{}", version_text());
        return ExitCode::SUCCESS;
    }
    if cli.help {
        print!("{}", help_text());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(config.log_format) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match generate_from_env(&config) {
        Ok(report) => {
            // Printed outside tracing so a RUST_LOG filter cannot hide it.
            eprintln!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_configuration() => {
            eprintln!("Error: {e}");
            eprintln!("\nHere are the requirements to run tbmaker:");
            set_verbose(false);
            eprint!("{}", help_text());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
