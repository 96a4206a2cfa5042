//! Shared runtime services: errors, configuration, and the check context.

pub mod config;
pub mod context;
pub mod error;
