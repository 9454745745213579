//! WCAG AA contrast check over the theme token pairs.

use super::{CheckResult, fail_detail, hint};
use crate::css::color::contrast_ratio;
use crate::css::{ROOT_SCOPE, Resolver};

/// AA threshold for body text.
const MIN_CONTRAST: f64 = 4.5;

struct ThemeScope {
    label: &'static str,
    selectors: &'static [&'static str],
}

const SCOPES: [ThemeScope; 2] = [
    ThemeScope { label: "light", selectors: ROOT_SCOPE },
    ThemeScope { label: "dark", selectors: &["html[data-theme='dark']", ":root"] },
];

/// Resolved `text-primary` on `surface-900` must clear 4.5:1 in both
/// theme scopes. The dark scope falls back to root tokens for values
/// the theme does not override.
pub fn check_contrast(resolver: &Resolver) -> CheckResult {
    let mut issues = Vec::new();
    for scope in &SCOPES {
        let Some(background) = resolver.resolve_var("surface-900", 1280, scope.selectors)
        else {
            continue;
        };
        let Some(text) = resolver.resolve_var("text-primary", 1280, scope.selectors) else {
            continue;
        };
        let ratio = contrast_ratio(&text.value, &background.value);
        if ratio.is_none_or(|r| r < MIN_CONTRAST) {
            let source_hint = [&background.definition, &text.definition]
                .iter()
                .map(|def| hint(&def.file, def.line))
                .collect::<Vec<_>>()
                .join(", ");
            let shown = ratio.map_or("N/A".to_string(), |r| format!("{r:.2}"));
            issues.push(fail_detail(
                &format!(
                    "{} theme foreground contrast {} (<4.5)",
                    scope.label, shown
                ),
                &source_hint,
            ));
        }
    }
    CheckResult::from_issues("Theme contrast tokens", issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use crate::css::CssIndex;

    fn index_of(css: &str) -> CssIndex {
        CssIndex::build(vec![("themes.css".to_string(), css.to_string())])
    }

    #[test]
    fn test_maximal_contrast_passes() {
        let css = ":root { --text-primary: #ffffff; --surface-900: #000000; }";
        let index = index_of(css);
        let result = check_contrast(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_near_identical_grays_fail_with_ratio_and_theme() {
        let css = ":root { --text-primary: #777777; --surface-900: #888888; }";
        let index = index_of(css);
        let result = check_contrast(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Fail);
        // Both scopes resolve to the same root tokens and fail.
        assert_eq!(result.details.len(), 2);
        assert!(result.details[0].starts_with("light theme foreground contrast 1."));
        assert!(result.details[1].starts_with("dark theme foreground contrast 1."));
        assert!(result.details[0].contains("(<4.5)"));
        assert!(result.details[0].contains("themes.css:1"));
    }

    #[test]
    fn test_dark_override_checked_separately() {
        let css = ":root { --text-primary: #111111; --surface-900: #fafafa; }\n\
                   html[data-theme='dark'] { --text-primary: #333333; --surface-900: #222222; }";
        let index = index_of(css);
        let result = check_contrast(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.details.len(), 1);
        assert!(result.details[0].starts_with("dark theme"));
    }

    #[test]
    fn test_unparsable_color_reports_na() {
        let css = ":root { --text-primary: oklch(0.2 0 0); --surface-900: #ffffff; }";
        let index = index_of(css);
        let result = check_contrast(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("contrast N/A"));
    }

    #[test]
    fn test_missing_tokens_skip() {
        let index = index_of(":root { --something: 1px; }");
        let result = check_contrast(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
