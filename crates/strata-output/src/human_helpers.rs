use strata_enforce::{Severity, Violation};

use crate::report::ModuleSummary;

pub(crate) fn format_violation_human(v: &Violation) -> String {
    let severity_label = match v.severity() {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };

    let mut lines = v.message.lines();
    let mut out = format!(
        "{}[{}]: {}\n",
        severity_label,
        v.code(),
        lines.next().unwrap_or_default(),
    );
    for detail in lines {
        out.push_str(&format!("   | {}\n", detail.trim_start()));
    }

    if let Some(module) = &v.module {
        out.push_str(&format!("  --> module {}\n", module));
    }

    if let Some(fix) = &v.fix_hint {
        out.push_str(&format!("   = fix: {}\n", fix));
    }

    out
}

pub(crate) fn format_module_human(m: &ModuleSummary) -> String {
    let mut out = format!(
        "{} ({}) [{} qualifying symbol(s)]\n",
        m.display_name, m.namespace, m.qualifying_symbols,
    );
    if m.name != m.display_name {
        out.push_str(&format!("  name: {}\n", m.name));
    }
    out.push_str(&format!("  interfaces: {}\n", m.named_interfaces.join(", ")));
    if !m.allowed_dependencies.is_empty() {
        out.push_str(&format!("  allowed: {}\n", m.allowed_dependencies.join(", ")));
    }
    for d in &m.dependencies {
        out.push_str(&format!(
            "  -> {} {} x{}\n",
            d.module, d.dependency_type, d.count
        ));
    }
    out
}
