use crate::types::AnalysisReport;

/// Format byte counts as B/KB/MB
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format an analysis report as human-readable markdown
pub fn format_report_readable(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str("## Swing Analysis\n\n");
    output.push_str(report.analysis.trim());
    output.push_str("\n\n");

    output.push_str("## Areas for Improvement\n\n");
    for (i, issue) in report.issues.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, issue));
    }
    output.push('\n');

    output.push_str("## Recommended Drills\n\n");
    for drill in &report.drills {
        output.push_str(&format!("### {}\n\n", drill.name));
        output.push_str(&format!("_{}_\n\n", drill.purpose));
        output.push_str("Steps:\n");
        for (i, step) in drill.steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, step));
        }
        output.push_str(&format!("\n**Practice:** {}\n\n", drill.frequency));
    }

    output
}
