//! Content validation pipeline.
//!
//! Every step receives the shared [`CheckContext`](crate::runtime::context::CheckContext) and a
//! mutable [`Report`]. Steps never return findings as errors: they record them in the report
//! and move on to the next independent item, so a single run yields the full diagnosis. The
//! [`pipeline`] module decides the verdict once every step has run.

pub mod audit;
pub mod crossref;
pub mod frontmatter;
pub mod metadata;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod structure;

use std::fmt::{self, Display, Formatter};

/// Transcript line level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// Banner or step header.
    Header,
    /// Neutral information.
    Info,
    /// A check passed.
    Success,
    /// Non-blocking finding.
    Warning,
    /// Blocking finding.
    Error,
}

/// Category of a warning or error.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum IssueKind {
    /// A required file or directory is absent.
    Structural,
    /// File contents could not be read or parsed.
    Parse,
    /// Parsed data does not match the expected shape.
    Schema,
    /// Duplicate identifiers or a slug/filename mismatch.
    Identity,
    /// Registry and disk disagree.
    Referential,
}

impl IssueKind {
    /// Every kind, in reporting order.
    pub const ALL: [IssueKind; 5] = [
        IssueKind::Structural,
        IssueKind::Parse,
        IssueKind::Schema,
        IssueKind::Identity,
        IssueKind::Referential,
    ];

    /// Stable lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::Structural => "structural",
            IssueKind::Parse => "parse",
            IssueKind::Schema => "schema",
            IssueKind::Identity => "identity",
            IssueKind::Referential => "referential",
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded transcript line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportEntry {
    pub level: Level,
    /// Set for warnings and errors only.
    pub kind: Option<IssueKind>,
    pub message: String,
}

/// Final outcome of a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl Verdict {
    /// Whether the run should exit successfully. Warnings never change this.
    pub fn is_success(self) -> bool {
        !matches!(self, Verdict::Failed)
    }

    /// Stable name used in the JSON summary.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Passed => "passed",
            Verdict::PassedWithWarnings => "passed_with_warnings",
            Verdict::Failed => "failed",
        }
    }
}

/// Accumulates transcript lines and the error/warning counters for one run.
///
/// `Report::default()` only records. [`Report::printing`] also echoes each line to stdout as
/// soon as it is recorded, which is what the binary uses.
#[derive(Clone, Debug, Default)]
pub struct Report {
    entries: Vec<ReportEntry>,
    errors: usize,
    warnings: usize,
    echo: bool,
}

impl Report {
    /// A report that prints every line as it is recorded.
    pub fn printing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Record the run banner.
    pub fn banner(&mut self, text: impl Into<String>) {
        self.push(Level::Header, None, text.into());
    }

    /// Record a numbered step header.
    pub fn step(&mut self, index: usize, total: usize, title: &str) {
        self.push(Level::Header, None, format!("\n[{index}/{total}] {title}"));
    }

    /// Record a neutral note that affects neither counter.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, None, message.into());
    }

    /// Record an item that passed its check.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, None, message.into());
    }

    /// Record a warning. Warnings alone never fail the run.
    pub fn warn(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.warnings += 1;
        self.push(Level::Warning, Some(kind), message.into());
    }

    /// Record an error of the given kind.
    pub fn error(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.errors += 1;
        self.push(Level::Error, Some(kind), message.into());
    }

    /// Print a line that is not part of the findings, such as the summary.
    pub fn emit(&self, line: &str) {
        if self.echo {
            println!("{line}");
        }
    }

    /// Errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Every recorded line, in order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Warnings and errors, in the order they were recorded.
    pub fn issues(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.level, Level::Warning | Level::Error))
    }

    /// Number of warnings and errors of one kind.
    pub fn count_kind(&self, kind: IssueKind) -> usize {
        self.issues().filter(|entry| entry.kind == Some(kind)).count()
    }

    /// Errors fail the run; warnings alone still pass.
    pub fn verdict(&self) -> Verdict {
        if self.errors > 0 {
            Verdict::Failed
        } else if self.warnings > 0 {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }

    fn push(&mut self, level: Level, kind: Option<IssueKind>, message: String) {
        if self.echo {
            print_entry(level, &message);
        }
        self.entries.push(ReportEntry {
            level,
            kind,
            message,
        });
    }
}

fn print_entry(level: Level, message: &str) {
    match level {
        Level::Header => println!("{message}"),
        Level::Info => println!("  info  {message}"),
        Level::Success => println!("  ok    {message}"),
        Level::Warning => println!("  warn  {message}"),
        Level::Error => println!("  error {message}"),
    }
}
