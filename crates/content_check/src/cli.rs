//! Command-line parsing and help output.

use crate::runtime::error::{CheckError, CheckResult};
use std::path::PathBuf;

/// What the binary was asked to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliCommand {
    Check(CheckOptions),
    Help,
}

/// Options for a validation run. Every field is optional.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckOptions {
    /// Repository root; defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Explicit config file, relative to the root unless absolute.
    pub config: Option<PathBuf>,
    /// Where to write the JSON summary, if anywhere.
    pub output: Option<PathBuf>,
}

/// Parse raw command-line arguments (without the program name).
pub fn parse(args: Vec<String>) -> CheckResult<CliCommand> {
    let mut options = CheckOptions::default();

    let mut i = 0usize;
    while i < args.len() {
        let slot = match args[i].as_str() {
            "help" | "--help" | "-h" => return Ok(CliCommand::Help),
            "--root" => &mut options.root,
            "--config" => &mut options.config,
            "--output" => &mut options.output,
            other => {
                return Err(CheckError::validation(format!(
                    "unsupported argument: {other}"
                ))
                .with_hint("run with --help for usage"))
            }
        };
        let Some(value) = args.get(i + 1) else {
            return Err(CheckError::validation(format!(
                "missing value for `{}`",
                args[i]
            )));
        };
        *slot = Some(PathBuf::from(value));
        i += 2;
    }

    Ok(CliCommand::Check(options))
}

/// Print the usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: content-check [options]\n\
         \n\
         Validates the article registry and the per-locale article sources of the repository\n\
         in the current directory.\n\
         \n\
         Options:\n\
           --root <path>       Repository root (default: current directory)\n\
           --config <path>     Layout config (default: content-check.toml when present)\n\
           --output <path>     Also write a JSON summary of the run\n\
           -h, --help          Show this help\n\
         \n\
         Exit status: 0 when no errors were found (warnings allowed), 1 on validation errors,\n\
         2 on usage or configuration problems.\n"
    );
}
