//! The design-rule battery.
//!
//! Eight independent checks, each a pure function of the index,
//! resolver, and loaded HTML. They run in a fixed sequence and only
//! ever report data; missing declarations and unresolvable expressions
//! are skipped assertions, never panics.

mod layout;
mod markup;
mod theme;
mod typography;

use crate::css::{CssIndex, Declaration, Resolver};
use crate::html::{DomParser, HtmlFile};

/// Representative viewport widths every numeric check sweeps.
pub const VIEWPORT_WIDTHS: [u32; 6] = [320, 390, 768, 1024, 1280, 1440];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
        }
    }
}

/// Outcome of one rule check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    /// Human-readable issue strings, each optionally carrying a
    /// `[file:line]` hint.
    pub details: Vec<String>,
}

impl CheckResult {
    /// PASS unless at least one concrete violation was collected.
    fn from_issues(name: &'static str, issues: Vec<String>) -> Self {
        let status = if issues.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };
        Self {
            name,
            status,
            details: issues,
        }
    }
}

/// Run the full battery in report order.
pub fn run_all(
    index: &CssIndex,
    html_files: &[HtmlFile],
    parser: &dyn DomParser,
) -> Vec<CheckResult> {
    let resolver = Resolver::new(index);
    vec![
        layout::check_overflow(&resolver),
        layout::check_nav(index, &resolver),
        typography::check_type_scale(&resolver),
        layout::check_section_rhythm(index, &resolver),
        markup::check_contact(index, html_files),
        layout::check_buttons(index, &resolver),
        theme::check_contrast(&resolver),
        markup::check_hero(html_files, parser),
    ]
}

/// `message [hint]`, or the bare message when no hint exists.
fn fail_detail(message: &str, hint: &str) -> String {
    if hint.is_empty() {
        message.to_string()
    } else {
        format!("{message} [{hint}]")
    }
}

/// `file:line` provenance hint.
fn hint(file: &str, line: usize) -> String {
    if file.is_empty() {
        String::new()
    } else {
        format!("{file}:{line}")
    }
}

/// Best-effort hint for a declaration.
///
/// A lookup hit carries provenance already; otherwise scan the raw
/// sources for the selector text followed by the property text.
fn hint_for_declaration(
    decl: Option<&Declaration>,
    index: &CssIndex,
    selector: &str,
    property: &str,
) -> String {
    if let Some(decl) = decl {
        return hint(&decl.file, decl.line);
    }
    if selector.is_empty() || property.is_empty() {
        return String::new();
    }
    for (file, content) in index.sources() {
        let Some(selector_at) = content.find(selector) else {
            continue;
        };
        let Some(property_at) = content[selector_at..].find(property) else {
            continue;
        };
        let offset = selector_at + property_at;
        let line = content[..offset].matches('\n').count() + 1;
        return hint(file, line);
    }
    String::new()
}
