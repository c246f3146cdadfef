use std::fmt::Write as _;

use verifix_core::Enforcement;
use verifix_eval::Report;

/// Plain text projection of a report: one line per check, artifact records,
/// summary counts, critical section. Pure function of the report.
pub fn render_transcript(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "suite {} (run {})", report.suite, report.run_id);
    let _ = writeln!(out, "suite hash {}", report.suite_hash);
    out.push('\n');

    for result in &report.results {
        let advisory = if result.enforcement == Enforcement::Advisory {
            " (advisory)"
        } else {
            ""
        };
        if result.details.is_empty() {
            let _ = writeln!(out, "[{}] {}{}", result.status, result.name, advisory);
        } else {
            let _ = writeln!(
                out,
                "[{}] {}{} - {}",
                result.status, result.name, advisory, result.details
            );
        }
    }

    out.push('\n');
    let _ = writeln!(out, "artifacts:");
    for artifact in &report.artifacts {
        match (&artifact.digest, &artifact.error) {
            (Some(digest), _) => {
                let _ = writeln!(out, "  {} {} sha256:{}", artifact.id, artifact.path, digest);
            }
            (None, Some(error)) => {
                let _ = writeln!(out, "  {} {} error: {}", artifact.id, artifact.path, error);
            }
            (None, None) => {
                let _ = writeln!(out, "  {} {}", artifact.id, artifact.path);
            }
        }
    }

    out.push('\n');
    let s = &report.summary;
    let _ = writeln!(
        out,
        "summary: {} checks, {} passed, {} failed, {} warned ({:.1}% success)",
        s.total,
        s.passed,
        s.failed,
        s.warned,
        s.success_rate * 100.0
    );

    if !report.critical.is_empty() {
        let _ = writeln!(out, "critical failures:");
        for result in &report.critical {
            if result.details.is_empty() {
                let _ = writeln!(out, "  - {}", result.name);
            } else {
                let _ = writeln!(out, "  - {} ({})", result.name, result.details);
            }
        }
    }

    out
}

pub fn render_json(report: &Report) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
