//! Markup-facing checks: contact-row resiliency and hero responsive
//! parity across the two locale home pages.

use super::{CheckResult, fail_detail, hint};
use crate::css::CssIndex;
use crate::html::{DomParser, HtmlFile};

/// Contact row must wrap, contact links must break anywhere, and the
/// channel markup must actually exist in the rendered HTML.
pub fn check_contact(index: &CssIndex, html_files: &[HtmlFile]) -> CheckResult {
    let mut issues = Vec::new();

    let contact = index.declaration(".contact", "flex-wrap");
    if contact.as_ref().is_none_or(|d| d.value.trim() != "wrap") {
        let h = contact.as_ref().map(|d| hint(&d.file, d.line)).unwrap_or_default();
        issues.push(fail_detail("contact row must declare flex-wrap: wrap", &h));
    }

    let links = index.declaration(".contact__channels a", "overflow-wrap");
    if links.as_ref().is_none_or(|d| d.value.trim() != "anywhere") {
        let h = links.as_ref().map(|d| hint(&d.file, d.line)).unwrap_or_default();
        issues.push(fail_detail("contact links should set overflow-wrap:anywhere", &h));
    }

    let has_markup = html_files
        .iter()
        .any(|file| file.content.contains(r#"class="contact__channels""#));
    if !has_markup {
        issues.push("contact channels markup missing from HTML".to_string());
    }

    CheckResult::from_issues("Contact row resiliency", issues)
}

/// Locale home pages whose hero check runs.
const HERO_LOCALES: [(&str, &str); 2] = [("index.html", "EN"), ("fr/index.html", "FR")];

/// Both locale heroes need a responsive `<picture>` and identical
/// element sequences.
pub fn check_hero(html_files: &[HtmlFile], parser: &dyn DomParser) -> CheckResult {
    let mut issues = Vec::new();
    let mut sequences: Vec<(&'static str, Vec<String>)> = Vec::new();

    for (path, label) in HERO_LOCALES {
        let Some(file) = html_files.iter().find(|f| f.path == path) else {
            continue;
        };
        let Some(snapshot) = parser.hero_snapshot(&file.content) else {
            issues.push(format!("hero section missing in {path}"));
            continue;
        };
        sequences.push((label, snapshot.tags));
        let Some(picture) = snapshot.picture else {
            issues.push(format!("hero picture missing in {path}"));
            continue;
        };
        if picture.source_count < 1 {
            issues.push(format!("hero picture needs ≥1 source ({path})"));
        }
        if !picture.multi_candidate_srcset {
            issues.push(format!(
                "hero picture should expose multiple candidates in srcset ({path})"
            ));
        }
        if !picture.has_sizes {
            issues.push(format!("hero responsive sizes missing ({path})"));
        }
    }

    if let [(first_label, first_tags), (second_label, second_tags)] = sequences.as_slice() {
        if first_tags != second_tags {
            issues.push(format!(
                "hero element parity mismatch between {first_label} and {second_label}"
            ));
        }
    }

    CheckResult::from_issues("Hero responsive parity", issues)
}
