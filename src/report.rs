//! Report rendering: the bordered summary table, the DETAILS listing,
//! and the process exit code.
//!
//! Output is fully determined by the check results, so two runs over
//! unchanged inputs produce byte-identical reports.

use crate::checks::{CheckResult, CheckStatus};
use colored::Colorize;
use std::fmt::Write;

/// Minimum name-column width.
const MIN_NAME_WIDTH: usize = 12;
/// Status column is `" PASS   "` wide.
const STATUS_WIDTH: usize = 6;

/// Render the complete report.
///
/// `used_heuristics` appends the informational note about the missing
/// DOM parser.
pub fn render(results: &[CheckResult], used_heuristics: bool) -> String {
    let mut out = String::new();
    writeln!(out, "POLISH CHECK").ok();
    for line in build_table(results) {
        writeln!(out, "{line}").ok();
    }

    let failures: Vec<&CheckResult> = results
        .iter()
        .filter(|result| result.status != CheckStatus::Pass)
        .collect();
    if !failures.is_empty() {
        writeln!(out, "\nDETAILS").ok();
        for failure in failures {
            writeln!(out, "- {}", failure.name).ok();
            for detail in &failure.details {
                writeln!(out, "  • {detail}").ok();
            }
            if failure.details.is_empty() {
                writeln!(out, "  • No further detail available.").ok();
            }
        }
    }

    if used_heuristics {
        writeln!(
            out,
            "\nNote: dom feature disabled; DOM-dependent checks used static parsing heuristics."
        )
        .ok();
    }
    out
}

/// 0 when every check passed, 1 otherwise.
pub fn exit_code(results: &[CheckResult]) -> i32 {
    if results.iter().all(|r| r.status == CheckStatus::Pass) {
        0
    } else {
        1
    }
}

fn build_table(results: &[CheckResult]) -> Vec<String> {
    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    let bar = "─".repeat(name_width);
    let header = format!("┌─{bar}─┬────────┐");
    let divider = format!("├─{bar}─┼────────┤");
    let footer = format!("└─{bar}─┴────────┘");

    let mut rows = results.iter().map(|result| {
        let status = pad(result.status.label(), STATUS_WIDTH);
        let status = match result.status {
            CheckStatus::Pass => status.green().to_string(),
            CheckStatus::Fail => status.red().to_string(),
        };
        format!("│ {} │ {status} │", pad(result.name, name_width))
    });

    let mut lines = vec![header];
    if let Some(first) = rows.next() {
        lines.push(first);
        lines.push(divider);
        lines.extend(rows);
    }
    lines.push(footer);
    lines
}

/// Right-pad by character count (names carry non-ASCII like `≤`).
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}
