use crate::human_helpers::{format_module_human, format_violation_human};
use crate::report::{ModuleSummary, VerificationReport};
use crate::OutputFormatter;

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &VerificationReport) -> String {
        if report.is_clean() {
            return String::new(); // Clean verification = empty stdout
        }

        let mut out = String::new();

        for v in &report.errors {
            out.push_str(&format_violation_human(v));
        }
        for v in &report.warnings {
            out.push_str(&format_violation_human(v));
        }

        out.push_str(&format!(
            "\n{} error(s), {} warning(s) in {} module(s)\n",
            report.errors.len(),
            report.warnings.len(),
            report.modules.len(),
        ));

        out
    }

    fn format_modules(&self, modules: &[ModuleSummary]) -> String {
        let mut out = String::new();
        for m in modules {
            out.push_str(&format_module_human(m));
        }
        out
    }
}
