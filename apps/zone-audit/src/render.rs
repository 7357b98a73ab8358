//! Report rendering for stdout

use std::fmt::Write;

use clap::ValueEnum;
use shared_types::{ThreatReport, Violation};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact `{threats, total_count}` JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable listing per rule
    Summary,
}

pub fn render(report: &ThreatReport, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Pretty => report.to_json_pretty()?,
        OutputFormat::Summary => summary(report),
    })
}

/// One count line per rule with its findings listed beneath, then a total line
pub fn summary(report: &ThreatReport) -> String {
    let mut out = String::new();

    for (rule, violations) in &report.threats {
        let _ = writeln!(
            out,
            "{}: {} issue{}",
            rule.title(),
            violations.len(),
            plural(violations.len())
        );
        for violation in violations {
            let _ = writeln!(out, "  - {}", entities(violation));
            let _ = writeln!(out, "    fix: {}", violation.remediation);
        }
    }

    if report.is_clean() {
        out.push_str("No security violations found.\n");
    }
    let _ = write!(
        out,
        "Total: {} violation{}, score {}",
        report.total_count,
        plural(report.total_count),
        report.security_score()
    );
    out
}

fn entities(violation: &Violation) -> String {
    let mut parts = Vec::new();
    if let Some(system) = &violation.system {
        parts.push(format!("system {}", system));
    }
    if let Some(connection) = &violation.connection {
        parts.push(format!("connection {}", connection));
    }
    if let Some(data) = &violation.data {
        parts.push(format!("data {}", data));
    }
    parts.join(", ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
