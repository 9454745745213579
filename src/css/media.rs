//! Width-based media query matching.
//!
//! Only `(min|max)-width: Npx` clauses are modeled. Other media
//! features (orientation, `prefers-*`, `print`) are outside what a
//! static viewport sweep can decide, so clauses carrying them are
//! skipped; a query with no recognizable width clause at all never
//! matches.

use regex::Regex;
use std::sync::OnceLock;

fn width_clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(min|max)-width\s*:\s*(\d+)px").unwrap())
}

/// Whether a definition scoped under `queries` applies at `viewport`.
///
/// An empty list means the definition has no media constraint and
/// always applies. Otherwise every enclosing query must match.
pub fn media_matches(queries: &[String], viewport: u32) -> bool {
    queries.iter().all(|query| query_matches(query, viewport))
}

/// Match a single media-feature string against a viewport width.
///
/// Boundaries are inclusive on both ends, mirroring CSS range
/// semantics: `min-width: 768px` holds at exactly 768.
fn query_matches(query: &str, viewport: u32) -> bool {
    let query = query.to_lowercase();
    let mut found_width_clause = false;
    for clause in query.split("and") {
        let Some(captures) = width_clause_pattern().captures(clause.trim()) else {
            continue;
        };
        found_width_clause = true;
        let bound: u32 = match captures[2].parse() {
            Ok(value) => value,
            Err(_) => continue,
        };
        match &captures[1] {
            "min" if viewport < bound => return false,
            "max" if viewport > bound => return false,
            _ => {}
        }
    }
    found_width_clause
}
