//! Registry loading, schema validation, and duplicate detection.

use crate::check::schema::{self, RegistryEntry};
use crate::check::{IssueKind, Report};
use crate::runtime::context::CheckContext;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;

/// Load and validate the registry.
///
/// Returns `None` when the file is missing, unparseable, or schema-invalid; later steps that
/// need registry entries are skipped in that case. Duplicate slugs and routes are reported but
/// do not discard the entries.
pub fn load_registry(ctx: &CheckContext, report: &mut Report) -> Option<Vec<RegistryEntry>> {
    let path = ctx.registry_path();
    let rel = ctx.display_path(&path);
    if !path.is_file() {
        report.error(
            IssueKind::Structural,
            format!("registry file `{rel}` not found"),
        );
        return None;
    }

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            report.error(IssueKind::Parse, format!("failed to read `{rel}`: {err}"));
            return None;
        }
    };
    let raw: Value = match serde_json::from_str(&text) {
        Ok(raw) => raw,
        Err(err) => {
            report.error(IssueKind::Parse, format!("failed to parse `{rel}`: {err}"));
            return None;
        }
    };

    let registry = match schema::validate_registry(&raw, ctx.locales()) {
        Ok(registry) => registry,
        Err(issues) => {
            for issue in issues {
                report.error(IssueKind::Schema, format!("{rel}: {issue}"));
            }
            return None;
        }
    };

    report.success(format!(
        "`{rel}` matches the registry schema ({} article(s))",
        registry.articles.len()
    ));
    check_duplicates(&registry.articles, report);
    Some(registry.articles)
}

/// Report every repeated slug and every repeated route, one error per repeat instance.
pub fn check_duplicates(entries: &[RegistryEntry], report: &mut Report) {
    let mut seen_slugs: HashSet<&str> = HashSet::new();
    let mut seen_routes: HashSet<&str> = HashSet::new();
    let mut clean = true;

    for (idx, entry) in entries.iter().enumerate() {
        if !seen_slugs.insert(entry.slug.as_str()) {
            clean = false;
            report.error(
                IssueKind::Identity,
                format!("duplicate slug \"{}\" (articles[{idx}])", entry.slug),
            );
        }
        if !seen_routes.insert(entry.route.as_str()) {
            clean = false;
            report.error(
                IssueKind::Identity,
                format!("duplicate route \"{}\" (articles[{idx}])", entry.route),
            );
        }
    }

    if clean {
        report.success("no duplicate slugs or routes");
    }
}
