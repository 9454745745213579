//! Type-scale check: step tokens and line-height tokens measured at
//! the desktop reference viewport.

use super::{CheckResult, fail_detail, hint};
use crate::css::{ROOT_SCOPE, Resolver};
use crate::utils::format_px;

/// Reference viewport for the type ramp.
const REFERENCE_WIDTH: u32 = 1280;

struct StepExpectation {
    token: &'static str,
    expected: f64,
    tolerance: f64,
    label: &'static str,
}

const STEPS: [StepExpectation; 4] = [
    StepExpectation { token: "step-0", expected: 16.0, tolerance: 0.75, label: "body" },
    StepExpectation { token: "step-1", expected: 22.0, tolerance: 1.0, label: "h3" },
    StepExpectation { token: "step-2", expected: 28.0, tolerance: 1.0, label: "h2" },
    StepExpectation { token: "step-3", expected: 36.0, tolerance: 1.0, label: "h1" },
];

/// Step tokens must land near their target sizes and the two leading
/// tokens near 1.25 / 1.50.
pub fn check_type_scale(resolver: &Resolver) -> CheckResult {
    let mut issues = Vec::new();

    for step in &STEPS {
        let Some(resolved) = resolver.resolve_var(step.token, REFERENCE_WIDTH, ROOT_SCOPE)
        else {
            continue;
        };
        let pixels = resolver
            .evaluate_length(&resolved.value, REFERENCE_WIDTH, ROOT_SCOPE)
            .pixels;
        if !pixels.is_finite() {
            continue;
        }
        if (pixels - step.expected).abs() > step.tolerance {
            issues.push(fail_detail(
                &format!(
                    "{} step resolves to {} (expected ≈{}px)",
                    step.label,
                    format_px(pixels),
                    step.expected
                ),
                &hint(&resolved.definition.file, resolved.definition.line),
            ));
        }
    }

    for (token, expected, label) in [
        ("leading-tight", 1.25, "tight"),
        ("leading-standard", 1.5, "standard"),
    ] {
        let Some(resolved) = resolver.resolve_var(token, REFERENCE_WIDTH, ROOT_SCOPE) else {
            continue;
        };
        let value = resolver
            .evaluate_length(&resolved.value, REFERENCE_WIDTH, ROOT_SCOPE)
            .pixels;
        if (value - expected).abs() > 0.05 {
            issues.push(fail_detail(
                &format!("{label} line-height resolves to {value:.2} (expected {expected:.2})"),
                &hint(&resolved.definition.file, resolved.definition.line),
            ));
        }
    }

    CheckResult::from_issues("Type ramp baseline", issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use crate::css::CssIndex;

    fn index_of(css: &str) -> CssIndex {
        CssIndex::build(vec![("test.css".to_string(), css.to_string())])
    }

    #[test]
    fn test_ramp_within_tolerance_passes() {
        let css = ":root {\n\
                     --step-0: 1rem;\n\
                     --step-1: clamp(1.25rem, 1.1rem + 0.5vw, 1.4rem);\n\
                     --step-2: 1.75rem;\n\
                     --step-3: 2.25rem;\n\
                     --leading-tight: 1.25;\n\
                     --leading-standard: 1.5;\n\
                   }";
        let index = index_of(css);
        let result = check_type_scale(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
    }

    #[test]
    fn test_step_outside_tolerance_fails() {
        let css = ":root { --step-0: 1.25rem; }";
        let index = index_of(css);
        let result = check_type_scale(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("body step resolves to 20px"));
        assert!(result.details[0].contains("test.css:1"));
    }

    #[test]
    fn test_leading_outside_tolerance_fails() {
        let css = ":root { --leading-tight: 1.4; }";
        let index = index_of(css);
        let result = check_type_scale(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("tight line-height resolves to 1.40"));
    }

    #[test]
    fn test_missing_tokens_are_skipped() {
        let index = index_of(":root { --unrelated: 1px; }");
        let result = check_type_scale(&Resolver::new(&index));
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.details.is_empty());
    }
}
