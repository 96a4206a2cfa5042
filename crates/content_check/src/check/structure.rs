//! Articles root and locale directory layout.

use crate::check::{IssueKind, Report};
use crate::runtime::context::CheckContext;

/// Confirm the articles root and at least one locale directory exist.
///
/// Returns the locales whose directory is present, in configured order. A partial set is
/// normal: absent locales are reported as information only.
pub fn check_structure(ctx: &CheckContext, report: &mut Report) -> Vec<String> {
    let articles_root = ctx.articles_root();
    let rel_root = ctx.display_path(&articles_root);
    if !articles_root.is_dir() {
        report.error(
            IssueKind::Structural,
            format!("articles directory `{rel_root}` not found"),
        );
        return Vec::new();
    }

    let mut present = Vec::new();
    for locale in ctx.locales() {
        if ctx.locale_dir(locale).is_dir() {
            present.push(locale.clone());
        } else {
            report.info(format!("no `{rel_root}/{locale}` directory"));
        }
    }

    if present.is_empty() {
        report.error(
            IssueKind::Structural,
            format!(
                "`{rel_root}` has none of the locale directories: {}",
                ctx.locales().join(", ")
            ),
        );
    } else {
        report.success(format!("locale directories present: {}", present.join(", ")));
    }
    present
}
