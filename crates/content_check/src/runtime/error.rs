//! Operational failures of the checker.
//!
//! Anything wrong with the content itself lands in the [`Report`](crate::check::Report) and
//! never becomes a `CheckError`. This type is reserved for the cases where the tool cannot do
//! its job at all: an argument it does not understand, a layout config it cannot read, a
//! repository root that is not a directory, or a summary file it cannot write. Any of these
//! exits with status 2.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Which part of the run gave up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckErrorCategory {
    /// `content-check.toml` (or the `--config` file) is missing, malformed, or declares an
    /// unusable layout.
    Config,
    /// Reading the working directory or writing the summary failed.
    Io,
    /// The command line or repository root was rejected before any check ran.
    Validation,
}

/// An operational failure plus the context gathered on its way up to [`exit_code`](crate::exit_code).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckError {
    pub category: CheckErrorCategory,
    /// Printed first, on its own.
    pub message: String,
    /// What the checker was doing, e.g. `load config` or `write summary`.
    pub operation: Option<String>,
    /// File or directory involved, as given or resolved.
    pub target: Option<String>,
    /// Suggested fix shown to the user.
    pub hint: Option<String>,
}

pub type CheckResult<T> = Result<T, CheckError>;

impl CheckError {
    pub fn new(category: CheckErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Shorthand for a [`CheckErrorCategory::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Config, message)
    }

    /// Shorthand for a [`CheckErrorCategory::Io`] error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Io, message)
    }

    /// Shorthand for a [`CheckErrorCategory::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Validation, message)
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// `message [operation: ..] [target: ..] [hint: ..]`, omitting the parts that are unset.
impl Display for CheckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

impl From<std::io::Error> for CheckError {
    fn from(value: std::io::Error) -> Self {
        CheckError::io(value.to_string())
    }
}
