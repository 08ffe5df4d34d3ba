//! Rendering of find results.

use logfind::FindResult;
use serde::Serialize;

use crate::cli::Format;

#[derive(Debug, Serialize)]
struct Report<'a> {
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [String]>,
}

/// Renders `result` for stdout. Events are only included when `verbose`.
pub fn render(result: &FindResult, format: Format, verbose: bool) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(render_text(result, verbose)),
        Format::Json => {
            let report = Report {
                count: result.count,
                events: verbose.then_some(result.events.as_slice()),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn render_text(result: &FindResult, verbose: bool) -> String {
    let mut out = format!("count: {}\n", result.count);
    if verbose {
        for event in &result.events {
            out.push_str(event);
            out.push('\n');
        }
    }
    out
}
