//! Variable resolution against the cascade index.
//!
//! Turns a token name into its applicable definition for a viewport
//! and selector scope, substitutes `var()` chains (fallback-aware,
//! cycle-safe), and evaluates the result to pixels.

use super::eval;
use super::index::{CssIndex, VarDefinition};
use super::media::media_matches;
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Default lookup scope when a check does not name one.
pub const ROOT_SCOPE: &[&str] = &[":root"];

/// A fully substituted variable value with its definition site.
#[derive(Debug, Clone)]
pub struct ResolvedVar<'a> {
    /// Value text with every `var()` substituted, units intact.
    pub value: String,
    pub definition: &'a VarDefinition,
}

/// A fully evaluated length for one `(expression, viewport)` pair.
///
/// `pixels` is `NaN` when the expression could not be evaluated;
/// checks treat that as "skip the assertion".
#[derive(Debug, Clone)]
pub struct ResolvedValue {
    pub pixels: f64,
    pub resolved_text: String,
}

fn var_reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"var\((--[\w-]+)(?:,\s*([^)]+))?\)").unwrap())
}

/// Read-only resolution facade over a [`CssIndex`].
pub struct Resolver<'a> {
    index: &'a CssIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a CssIndex) -> Self {
        Self { index }
    }

    /// The applicable definition of `name` at `viewport` under the
    /// given selector scope.
    ///
    /// Candidates must intersect the requested selectors and have all
    /// enclosing media constraints match; among survivors the last in
    /// source order wins, mirroring equal-specificity cascade order.
    /// A scoped lookup with no candidate falls back to `:root`.
    pub fn definition(
        &self,
        name: &str,
        viewport: u32,
        selectors: &[&str],
    ) -> Option<&'a VarDefinition> {
        let mut chosen = None;
        for def in self.index.definitions_of(name) {
            let in_scope = selectors
                .iter()
                .any(|sel| def.selectors.iter().any(|s| s == sel));
            if !in_scope {
                continue;
            }
            if !media_matches(&def.media, viewport) {
                continue;
            }
            chosen = Some(def);
        }
        if chosen.is_none() && !selectors.contains(&":root") {
            return self.definition(name, viewport, ROOT_SCOPE);
        }
        chosen
    }

    /// Resolve a variable to its substituted value text.
    pub fn resolve_var(
        &self,
        name: &str,
        viewport: u32,
        selectors: &[&str],
    ) -> Option<ResolvedVar<'a>> {
        let mut visited = FxHashSet::default();
        self.resolve_var_inner(name, viewport, selectors, &mut visited)
    }

    fn resolve_var_inner(
        &self,
        name: &str,
        viewport: u32,
        selectors: &[&str],
        visited: &mut FxHashSet<String>,
    ) -> Option<ResolvedVar<'a>> {
        let definition = self.definition(name, viewport, selectors)?;
        if visited.contains(name) {
            // Reference cycle. Degrade to zero rather than recursing.
            return Some(ResolvedVar {
                value: "0".to_string(),
                definition,
            });
        }
        visited.insert(name.to_string());
        let value = self.substitute(&definition.value, viewport, selectors, visited);
        visited.remove(name);
        Some(ResolvedVar { value, definition })
    }

    /// Substitute every `var(--x)` / `var(--x, fallback)` occurrence.
    ///
    /// Unresolvable references take their fallback (itself
    /// substituted) or `"0"`.
    fn substitute(
        &self,
        value: &str,
        viewport: u32,
        selectors: &[&str],
        visited: &mut FxHashSet<String>,
    ) -> String {
        var_reference_pattern()
            .replace_all(value, |caps: &Captures| {
                let name = caps[1].trim_start_matches("--").to_string();
                if let Some(resolved) =
                    self.resolve_var_inner(&name, viewport, selectors, visited)
                {
                    return resolved.value;
                }
                match caps.get(2) {
                    Some(fallback) => {
                        self.substitute(fallback.as_str(), viewport, selectors, visited)
                    }
                    None => "0".to_string(),
                }
            })
            .into_owned()
    }

    /// Substitute variables in an arbitrary expression and evaluate it
    /// to pixels for one viewport.
    pub fn evaluate_length(
        &self,
        expression: &str,
        viewport: u32,
        selectors: &[&str],
    ) -> ResolvedValue {
        let mut visited = FxHashSet::default();
        let resolved_text = self.substitute(expression, viewport, selectors, &mut visited);
        ResolvedValue {
            pixels: eval::evaluate(&resolved_text, viewport as f64),
            resolved_text,
        }
    }
}
