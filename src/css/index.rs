//! CSS cascade indexing.
//!
//! Builds the custom-property definition table from raw CSS text and
//! serves lazy `(selector, property)` declaration lookups. Scoping is
//! recovered textually: for every `--name: value;` match the indexer
//! walks backward through the buffer counting braces, collecting the
//! header text in front of each unmatched `{` as an enclosing context.
//!
//! Brace counting is purely textual. A literal `{` or `}` inside a
//! comment or string corrupts the nesting for that file; the fixture
//! CSS this tool targets does not contain such content.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::sync::OnceLock;

/// One definition site of a CSS custom property.
///
/// The same name may be defined many times under different selector
/// and media scopes; definitions are kept in source order.
#[derive(Debug, Clone)]
pub struct VarDefinition {
    pub name: String,
    /// Raw declaration value, variables unresolved.
    pub value: String,
    pub file: String,
    pub line: usize,
    /// Every enclosing selector context at the definition site.
    pub selectors: Vec<String>,
    /// Feature text of every enclosing `@media` block, prefix stripped.
    pub media: Vec<String>,
}

/// A `(selector, property)` lookup hit with provenance.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub value: String,
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone)]
struct RuleBlock {
    body: String,
    /// Byte offset of the body within the file text.
    body_start: usize,
}

/// Variable-definition table plus declaration lookup over a fixed,
/// ordered set of CSS sources.
pub struct CssIndex {
    sources: Vec<(String, String)>,
    definitions: FxHashMap<String, Vec<VarDefinition>>,
    /// Memoized rule extraction per `(file, selector)`, scoped to this
    /// index instance so independent runs never share state.
    rule_cache: RefCell<FxHashMap<(String, String), Option<RuleBlock>>>,
}

fn custom_property_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"--([\w-]+)\s*:\s*([^;]+);").unwrap())
}

impl CssIndex {
    /// Index an ordered list of `(path, content)` CSS sources.
    pub fn build(sources: Vec<(String, String)>) -> Self {
        let mut definitions: FxHashMap<String, Vec<VarDefinition>> = FxHashMap::default();
        for (path, content) in &sources {
            for captures in custom_property_pattern().captures_iter(content) {
                let whole = captures.get(0).unwrap();
                let name = captures[1].to_string();
                let value = captures[2].trim().to_string();
                let contexts = contexts_for_offset(content, whole.start());
                if contexts.is_empty() {
                    // Top-level or malformed custom property, no scope
                    // to attach it to. Dropped by policy.
                    continue;
                }
                let (selectors, media) = split_contexts(&contexts);
                definitions.entry(name.clone()).or_default().push(VarDefinition {
                    name,
                    value,
                    file: path.clone(),
                    line: line_at_offset(content, whole.start()),
                    selectors,
                    media,
                });
            }
        }
        Self {
            sources,
            definitions,
            rule_cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// The indexed sources, in lookup order.
    pub fn sources(&self) -> &[(String, String)] {
        &self.sources
    }

    /// All definition sites of a variable name, in source order.
    pub fn definitions_of(&self, name: &str) -> &[VarDefinition] {
        self.definitions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a property inside the first rule block matching `selector`.
    ///
    /// Files are scanned in source-set order; within a file the FIRST
    /// brace-balanced block whose header is exactly `selector` wins.
    /// Selector matching is verbatim text, not CSS-aware.
    pub fn declaration(&self, selector: &str, property: &str) -> Option<Declaration> {
        let property_pattern =
            Regex::new(&format!(r"{}\s*:\s*([^;]+);", regex::escape(property))).ok()?;
        for (path, content) in &self.sources {
            let key = (path.clone(), selector.to_string());
            let cached = self
                .rule_cache
                .borrow_mut()
                .entry(key)
                .or_insert_with(|| extract_rule(content, selector))
                .clone();
            let Some(rule) = cached else { continue };
            let Some(captures) = property_pattern.captures(&rule.body) else {
                continue;
            };
            let offset = rule.body_start + captures.get(0).unwrap().start();
            return Some(Declaration {
                value: captures[1].trim().to_string(),
                file: path.clone(),
                line: line_at_offset(content, offset),
            });
        }
        None
    }
}

/// 1-based line number of a byte offset.
fn line_at_offset(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Walk backward from `offset`, collecting the header text of every
/// unmatched `{` until file depth 0. Innermost context first.
fn contexts_for_offset(content: &str, offset: usize) -> Vec<String> {
    let bytes = content.as_bytes();
    let mut contexts = Vec::new();
    let mut depth: i32 = 0;
    let mut i = offset as i64;
    while i >= 0 {
        match bytes[i as usize] {
            b'}' => depth += 1,
            b'{' => {
                depth -= 1;
                // An unmatched `{` means this offset sits inside the
                // block it opens; a matched one is a closed sibling.
                if depth < 0 {
                    // Header text sits between the previous brace (or
                    // file start) and this `{`, trailing space trimmed.
                    let mut end = i - 1;
                    while end >= 0 && (bytes[end as usize] as char).is_ascii_whitespace() {
                        end -= 1;
                    }
                    let mut start = end;
                    while start >= 0
                        && bytes[start as usize] != b'{'
                        && bytes[start as usize] != b'}'
                    {
                        start -= 1;
                    }
                    if end >= 0 {
                        let header = String::from_utf8_lossy(
                            &bytes[(start + 1) as usize..=(end as usize)],
                        )
                        .trim()
                        .to_string();
                        if !header.is_empty() {
                            contexts.push(header);
                        }
                    }
                    depth = depth.max(0);
                }
            }
            _ => {}
        }
        i -= 1;
    }
    contexts
}

/// Partition raw contexts into selector contexts and media features.
fn split_contexts(contexts: &[String]) -> (Vec<String>, Vec<String>) {
    let mut selectors = Vec::new();
    let mut media = Vec::new();
    for context in contexts {
        if context.starts_with('@') {
            if context.to_lowercase().starts_with("@media") {
                media.push(context["@media".len()..].trim().to_string());
            }
        } else {
            selectors.push(context.clone());
        }
    }
    (selectors, media)
}

/// Locate the first `selector {` occurrence and extract its balanced
/// body by forward brace counting.
fn extract_rule(content: &str, selector: &str) -> Option<RuleBlock> {
    let pattern = Regex::new(&format!(
        r"(?m)(^|[\s}}]){}\s*\{{",
        regex::escape(selector)
    ))
    .ok()?;
    let captures = pattern.captures(content)?;
    let start = captures.get(0)?.start() + captures.get(1)?.len();
    let after_selector = content.get(start + selector.len()..)?;
    let brace = after_selector.find('{')? + start + selector.len();

    let bytes = content.as_bytes();
    let mut depth = 1;
    let mut i = brace + 1;
    while depth > 0 && i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    Some(RuleBlock {
        body: String::from_utf8_lossy(&bytes[brace + 1..i.saturating_sub(1)]).into_owned(),
        body_start: brace + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(css: &str) -> CssIndex {
        CssIndex::build(vec![("test.css".to_string(), css.to_string())])
    }

    #[test]
    fn test_root_and_media_scoped_definitions() {
        let index =
            index_of(":root{--a:1px;} @media (min-width:768px){ .x{--a:2px;} }");
        let defs = index.definitions_of("a");
        assert_eq!(defs.len(), 2);

        assert_eq!(defs[0].value, "1px");
        assert_eq!(defs[0].selectors, vec![":root"]);
        assert!(defs[0].media.is_empty());

        assert_eq!(defs[1].value, "2px");
        assert_eq!(defs[1].selectors, vec![".x"]);
        assert_eq!(defs[1].media, vec!["(min-width:768px)"]);
    }

    #[test]
    fn test_unscoped_definition_is_dropped() {
        let index = index_of("--orphan: 4px;\n:root { --kept: 8px; }");
        assert!(index.definitions_of("orphan").is_empty());
        assert_eq!(index.definitions_of("kept").len(), 1);
    }

    #[test]
    fn test_definition_line_numbers() {
        let index = index_of(":root {\n  --first: 1px;\n  --second: 2px;\n}\n");
        assert_eq!(index.definitions_of("first")[0].line, 2);
        assert_eq!(index.definitions_of("second")[0].line, 3);
    }

    #[test]
    fn test_declaration_lookup_with_provenance() {
        let index = index_of(".btn {\n  min-height: 44px;\n  color: red;\n}\n");
        let decl = index.declaration(".btn", "min-height").unwrap();
        assert_eq!(decl.value, "44px");
        assert_eq!(decl.file, "test.css");
        assert_eq!(decl.line, 2);
    }

    #[test]
    fn test_declaration_first_block_wins() {
        let index = index_of(".a { gap: 1px; }\n.a { gap: 2px; }");
        assert_eq!(index.declaration(".a", "gap").unwrap().value, "1px");
    }

    #[test]
    fn test_declaration_selector_boundary() {
        // `.btn` must not match inside `.btn--ghost`... but verbatim
        // text preceded by whitespace or `}` does match `.btn {`.
        let index = index_of(".btn--ghost { min-height: 1px; }\n.btn { min-height: 44px; }");
        assert_eq!(index.declaration(".btn", "min-height").unwrap().value, "44px");
    }

    #[test]
    fn test_declaration_with_regex_special_selector() {
        let index = index_of("html[data-theme='dark'] { color: #fff; }");
        assert_eq!(
            index
                .declaration("html[data-theme='dark']", "color")
                .unwrap()
                .value,
            "#fff"
        );
    }

    #[test]
    fn test_declaration_missing_returns_none() {
        let index = index_of(".a { gap: 1px; }");
        assert!(index.declaration(".missing", "gap").is_none());
        assert!(index.declaration(".a", "missing-prop").is_none());
    }

    #[test]
    fn test_declaration_scans_files_in_order() {
        let index = CssIndex::build(vec![
            ("one.css".to_string(), ".x { gap: 1px; }".to_string()),
            ("two.css".to_string(), ".x { gap: 2px; }".to_string()),
        ]);
        let decl = index.declaration(".x", "gap").unwrap();
        assert_eq!(decl.value, "1px");
        assert_eq!(decl.file, "one.css");
    }

    #[test]
    fn test_nested_media_contexts_stack() {
        let css = "@media screen { @media (min-width:768px) { .y { --z: 3px; } } }";
        let index = index_of(css);
        let defs = index.definitions_of("z");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].selectors, vec![".y"]);
        // Innermost context discovered first during the backward walk.
        assert_eq!(defs[0].media, vec!["(min-width:768px)", "screen"]);
    }
}
