//! Output formatters for strata verification results.
//!
//! Provides two output modes:
//! - **JSON**: Machine-readable structured output
//! - **Human**: Compiler-style diagnostics for terminal users

pub mod human;
pub(crate) mod human_helpers;
pub mod json;
pub mod report;

pub use report::{DependencySummary, ModuleSummary, VerificationReport};

pub trait OutputFormatter {
    fn format_report(&self, report: &VerificationReport) -> String;
    fn format_modules(&self, modules: &[ModuleSummary]) -> String;
}
