//! Locates the JSON report embedded in a free-text provider reply.
//!
//! Candidate documents are found with a balanced-brace scan that ignores
//! braces inside string literals, so narrative text containing `{` or `}`
//! does not truncate the document. Candidates are tried in order of their
//! opening brace and the first one that decodes into a valid
//! [`AnalysisReport`] wins.

use tracing::debug;

use crate::{
    error::{AnalysisError, Result},
    types::AnalysisReport,
};

/// Parse the first valid report document found in `raw`.
pub fn extract_report(raw: &str) -> Result<AnalysisReport> {
    let mut first_error: Option<serde_json::Error> = None;
    let mut candidates = 0usize;

    for span in balanced_spans(raw) {
        candidates += 1;
        match serde_json::from_str::<AnalysisReport>(span) {
            Ok(report) => {
                debug!(
                    candidates,
                    issues = report.issues.len(),
                    drills = report.drills.len(),
                    "report extracted"
                );
                return Ok(report);
            }
            Err(e) => {
                // keep the first data error over syntax errors from prose braces
                let replace = match &first_error {
                    None => true,
                    Some(prev) => prev.is_syntax() && !e.is_syntax(),
                };
                if replace {
                    first_error = Some(e);
                }
            }
        }
    }

    let reason = match first_error {
        Some(e) => format!("no valid report document in reply: {e}"),
        None => "no JSON object found in reply".to_string(),
    };
    Err(AnalysisError::ExtractionFailed { reason })
}

/// Every balanced `{...}` span in `text`, ordered by where it opens.
///
/// One pass with a stack of open positions. Spans may nest; an unterminated
/// opening brace yields nothing. Quotes only start a string inside an open
/// object, so prose around the document cannot flip the string state.
pub fn balanced_spans(text: &str) -> impl Iterator<Item = &str> {
    let mut spans = Vec::new();
    let mut open = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(i),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i + c.len_utf8()));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans.into_iter().map(move |(start, end)| &text[start..end])
}
