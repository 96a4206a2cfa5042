//! Optional machine-readable run summary.

use crate::check::metadata::DiscoveredFile;
use crate::check::{IssueKind, Level, Report};
use crate::runtime::context::CheckContext;
use crate::runtime::error::{CheckError, CheckResult};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Inventory figures gathered by the pipeline.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// `None` when the registry could not be loaded.
    pub registry_entries: Option<usize>,
    pub discovered_files: usize,
    pub distinct_slugs: usize,
}

impl RunStats {
    pub fn new(registry_entries: Option<usize>, discovered: &[DiscoveredFile]) -> Self {
        let distinct: BTreeSet<&str> = discovered.iter().map(|f| f.slug.as_str()).collect();
        Self {
            registry_entries,
            discovered_files: discovered.len(),
            distinct_slugs: distinct.len(),
        }
    }
}

/// Build the JSON summary for a finished run.
pub fn summary(ctx: &CheckContext, report: &Report, stats: &RunStats) -> Value {
    let mut issue_counts = Map::new();
    for kind in IssueKind::ALL {
        issue_counts.insert(kind.as_str().to_string(), json!(report.count_kind(kind)));
    }

    let issues: Vec<Value> = report
        .issues()
        .map(|entry| {
            json!({
                "level": if entry.level == Level::Error { "error" } else { "warning" },
                "kind": entry.kind.map(IssueKind::as_str),
                "message": entry.message,
            })
        })
        .collect();

    json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "root": ctx.root().display().to_string(),
        "locales": ctx.locales(),
        "registry_entries": stats.registry_entries,
        "discovered_files": stats.discovered_files,
        "distinct_slugs": stats.distinct_slugs,
        "errors": report.error_count(),
        "warnings": report.warning_count(),
        "issue_counts": issue_counts,
        "status": report.verdict().as_str(),
        "issues": issues,
    })
}

/// Write the summary as pretty JSON, creating parent directories.
pub fn write_summary(
    ctx: &CheckContext,
    report: &Report,
    stats: &RunStats,
    output: &Path,
) -> CheckResult<()> {
    let output = if output.is_absolute() {
        output.to_path_buf()
    } else {
        ctx.root().join(output)
    };
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            CheckError::io(format!("failed to create {}: {err}", parent.display()))
                .with_operation("write summary")
        })?;
    }
    let body = serde_json::to_string_pretty(&summary(ctx, report, stats)).map_err(|err| {
        CheckError::io(format!("failed to serialize summary: {err}"))
            .with_operation("write summary")
    })?;
    fs::write(&output, format!("{body}\n")).map_err(|err| {
        CheckError::io(format!("failed to write {}: {err}", output.display()))
            .with_operation("write summary")
            .with_path(&output)
    })?;
    report.emit(&format!("\nWrote summary: {}", output.display()));
    Ok(())
}
