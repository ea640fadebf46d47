use std::process::ExitCode;

fn main() -> ExitCode {
    tbmaker::cli::run_cli()
}
