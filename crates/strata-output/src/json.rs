use crate::report::{ModuleSummary, VerificationReport};
use crate::OutputFormatter;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &VerificationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_modules(&self, modules: &[ModuleSummary]) -> String {
        serde_json::to_string_pretty(modules).unwrap_or_default()
    }
}
