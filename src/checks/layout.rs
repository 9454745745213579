//! Layout checks: overflow budget, navigation height, spacing rhythm,
//! and button sizing.

use super::{CheckResult, VIEWPORT_WIDTHS, fail_detail, hint, hint_for_declaration};
use crate::css::{CssIndex, ROOT_SCOPE, Resolver};
use crate::utils::{distance_from_multiple, format_px};

/// Total horizontal padding (`gutter × 2`) must stay within 40% of
/// every viewport width.
pub fn check_overflow(resolver: &Resolver) -> CheckResult {
    let gutter_hint = resolver
        .definition("gutter", 1280, ROOT_SCOPE)
        .map(|def| hint(&def.file, def.line))
        .unwrap_or_default();
    let mut issues = Vec::new();
    for width in VIEWPORT_WIDTHS {
        let Some(resolved) = resolver.resolve_var("gutter", width, ROOT_SCOPE) else {
            continue;
        };
        let pixels = resolver.evaluate_length(&resolved.value, width, ROOT_SCOPE).pixels;
        if !pixels.is_finite() {
            continue;
        }
        let total_padding = pixels * 2.0;
        if total_padding > width as f64 * 0.4 {
            issues.push(fail_detail(
                &format!(
                    "viewport {width}px uses total horizontal padding {}",
                    format_px(total_padding)
                ),
                &gutter_hint,
            ));
        }
    }
    CheckResult::from_issues("Horizontal overflow @ key widths", issues)
}

/// Header row (`padding-block × 2` plus the taller of brand mark and
/// nav toggle) must fit in 64px, and the nav list must not wrap.
pub fn check_nav(index: &CssIndex, resolver: &Resolver) -> CheckResult {
    let padding_decl = index.declaration(".site-header__inner", "padding-block");
    let brand_decl = index.declaration(".brand__mark", "height");
    let toggle_decl = index.declaration(".nav-toggle", "height");
    let mut issues = Vec::new();

    for width in VIEWPORT_WIDTHS {
        let eval = |decl: &Option<crate::css::Declaration>| {
            decl.as_ref()
                .map(|d| resolver.evaluate_length(&d.value, width, ROOT_SCOPE).pixels)
                .unwrap_or(0.0)
        };
        let padding = eval(&padding_decl);
        let brand = eval(&brand_decl);
        let toggle = eval(&toggle_decl);
        if padding.is_nan() || brand.is_nan() || toggle.is_nan() {
            continue;
        }
        let row_height = padding * 2.0 + brand.max(toggle);
        if row_height > 64.0 {
            let hint = [
                hint_for_declaration(
                    padding_decl.as_ref(),
                    index,
                    ".site-header__inner",
                    "padding-block",
                ),
                hint_for_declaration(brand_decl.as_ref(), index, ".brand__mark", "height"),
            ]
            .into_iter()
            .filter(|h| !h.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
            issues.push(fail_detail(
                &format!(
                    "width {width}px nav row measures {} (>64px)",
                    format_px(row_height)
                ),
                &hint,
            ));
        }
    }

    if let Some(wrap) = index.declaration(".site-nav__list", "flex-wrap") {
        if wrap.value.trim() != "nowrap" {
            issues.push(fail_detail(
                "Primary nav list allows wrapping; expected nowrap",
                &hint(&wrap.file, wrap.line),
            ));
        }
    }

    CheckResult::from_issues("Navigation height ≤64px", issues)
}

/// `.section` vertical padding: ≤80px on desktop, ≤40px on mobile,
/// and on the 8px spacing grid at every viewport.
pub fn check_section_rhythm(index: &CssIndex, resolver: &Resolver) -> CheckResult {
    let mut issues = Vec::new();
    if let Some(decl) = index.declaration(".section", "padding-block") {
        let decl_hint = hint_for_declaration(Some(&decl), index, ".section", "padding-block");
        for width in VIEWPORT_WIDTHS {
            let px = resolver.evaluate_length(&decl.value, width, ROOT_SCOPE).pixels;
            if !px.is_finite() {
                continue;
            }
            if width >= 1024 && px > 80.0 + 0.1 {
                issues.push(fail_detail(
                    &format!("desktop padding at {width}px is {} (>80px)", format_px(px)),
                    &decl_hint,
                ));
            }
            if width <= 390 && px > 40.0 + 0.1 {
                issues.push(fail_detail(
                    &format!("mobile padding at {width}px is {} (>40px)", format_px(px)),
                    &decl_hint,
                ));
            }
            if distance_from_multiple(px, 8.0) > 0.25 {
                issues.push(fail_detail(
                    &format!("padding {} is off 8px rhythm", format_px(px)),
                    &decl_hint,
                ));
            }
        }
    }
    CheckResult::from_issues("Section spacing rhythm", issues)
}

/// Buttons must offer a ≥40px touch target and a global
/// `:focus-visible` outline must exist.
pub fn check_buttons(index: &CssIndex, resolver: &Resolver) -> CheckResult {
    let mut issues = Vec::new();
    match index.declaration(".btn", "min-height") {
        Some(decl) => {
            let height = resolver.evaluate_length(&decl.value, 1280, ROOT_SCOPE).pixels;
            if !height.is_finite() || height < 40.0 {
                issues.push(fail_detail(
                    &format!("button min-height is {} (<40px)", format_px(height)),
                    &hint(&decl.file, decl.line),
                ));
            }
        }
        None => issues.push("button min-height missing".to_string()),
    }
    if index.declaration(":focus-visible", "outline").is_none() {
        issues.push("global :focus-visible outline missing".to_string());
    }
    CheckResult::from_issues("Buttons sizing & focus", issues)
}
