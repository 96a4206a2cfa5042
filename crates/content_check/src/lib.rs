//! Content-integrity checker for a multi-locale article repository.
//!
//! The crate is a thin CLI layer over the validation pipeline in [`check`]. The pipeline
//! confirms that the article registry is well-formed and free of duplicate identifiers, that
//! every article source file carries a valid metadata block whose slug matches its file name,
//! and that registry and disk agree. Findings accumulate in a [`check::Report`]; the verdict is
//! decided once, after every step has run. [`runtime`] owns configuration, the shared context,
//! and operational errors.

pub mod check;
pub mod cli;
pub mod runtime;

use crate::check::{audit, pipeline, Report, Verdict};
use crate::cli::{CheckOptions, CliCommand};
use crate::runtime::config::CheckConfig;
use crate::runtime::context::CheckContext;
use crate::runtime::error::{CheckError, CheckResult};
use std::process::ExitCode;

/// Run the checker using the current process arguments.
///
/// Returns `None` when only the usage text was requested.
pub fn execute_from_env() -> CheckResult<Option<Verdict>> {
    match cli::parse(std::env::args().skip(1).collect())? {
        CliCommand::Help => {
            cli::print_usage();
            Ok(None)
        }
        CliCommand::Check(options) => execute(options).map(Some),
    }
}

/// Resolve config, run the pipeline with a printing report, and print the verdict.
pub fn execute(options: CheckOptions) -> CheckResult<Verdict> {
    let root = match options.root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|err| {
            CheckError::io(format!("failed to resolve current directory: {err}"))
        })?,
    };
    if !root.is_dir() {
        return Err(
            CheckError::validation("repository root is not a directory").with_path(&root),
        );
    }

    let config = CheckConfig::resolve(&root, options.config.as_deref())?;
    let ctx = CheckContext::new(root, config);
    let mut report = Report::printing();

    let stats = pipeline::run(&ctx, &mut report);
    if let Some(output) = &options.output {
        audit::write_summary(&ctx, &report, &stats, output)?;
    }
    Ok(pipeline::finish(&report))
}

/// Map a run result to the process exit code.
///
/// Validation errors exit with `1`. Operational failures are printed to stderr and exit with `2`.
pub fn exit_code(result: CheckResult<Option<Verdict>>) -> ExitCode {
    match result {
        Ok(Some(verdict)) if !verdict.is_success() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
