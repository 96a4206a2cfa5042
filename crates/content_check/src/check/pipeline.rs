//! Step ordering and the final verdict.

use crate::check::audit::RunStats;
use crate::check::crossref::cross_reference;
use crate::check::metadata::validate_articles;
use crate::check::registry::load_registry;
use crate::check::structure::check_structure;
use crate::check::{Report, Verdict};
use crate::runtime::context::CheckContext;

const STEP_COUNT: usize = 4;

/// Run every step in order: structure, registry, article metadata, cross-reference.
///
/// Cross-referencing needs registry entries and is skipped when the registry could not be
/// loaded. Every other step always runs.
pub fn run(ctx: &CheckContext, report: &mut Report) -> RunStats {
    report.banner(format!(
        "Validating article content in {}",
        ctx.root().display()
    ));

    report.step(1, STEP_COUNT, "Repository structure");
    let present = check_structure(ctx, report);

    report.step(2, STEP_COUNT, "Article registry");
    let entries = load_registry(ctx, report);

    report.step(3, STEP_COUNT, "Article metadata");
    let discovered = validate_articles(ctx, &present, report);

    report.step(4, STEP_COUNT, "Registry cross-reference");
    match &entries {
        Some(entries) => cross_reference(ctx, entries, &discovered, report),
        None => report.info("skipped: registry could not be loaded"),
    }

    RunStats::new(entries.as_ref().map(Vec::len), &discovered)
}

/// Print the summary and return the verdict. The verdict line is always the last output.
pub fn finish(report: &Report) -> Verdict {
    let verdict = report.verdict();
    let errors = report.error_count();
    let warnings = report.warning_count();
    let line = match verdict {
        Verdict::Failed => format!("FAILED: {errors} error(s), {warnings} warning(s)"),
        Verdict::PassedWithWarnings => format!("PASSED with {warnings} warning(s)"),
        Verdict::Passed => "PASSED: all content checks succeeded".to_string(),
    };
    report.emit("");
    report.emit(&line);
    verdict
}
