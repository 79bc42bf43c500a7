use std::collections::HashMap;

use console::style;

use crate::models::{Priority, Vulnerability};
use crate::pipeline::RunReport;

/// Renders the per-priority summary table printed after a conversion.
pub fn format_summary(vulnerabilities: &[Vulnerability], report: &RunReport) -> String {
    let mut counts: HashMap<Priority, usize> = HashMap::new();
    for vuln in vulnerabilities {
        *counts.entry(vuln.priority).or_insert(0) += 1;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style("Conversion summary").bold().underlined()
    ));
    if let Some(build_id) = &report.scan.build_id {
        out.push_str(&format!("  Image: {}", build_id));
        if let Some(label) = &report.scan.scan_label {
            out.push_str(&format!(":{}", label));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "  Findings: {} ({} skipped, {} merged)\n",
        report.findings_seen, report.skipped, report.merged
    ));

    for priority in [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ] {
        let count = counts.get(&priority).copied().unwrap_or(0);
        let label = match priority {
            Priority::Critical => style(priority.as_str()).red().bold(),
            Priority::High => style(priority.as_str()).red(),
            Priority::Medium => style(priority.as_str()).yellow(),
            Priority::Low => style(priority.as_str()).dim(),
        };
        out.push_str(&format!("  {:<10} {}\n", label, count));
    }
    out.push_str(&format!("  {:<10} {}\n", style("Total").bold(), vulnerabilities.len()));
    out
}
