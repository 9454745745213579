//! HTML collection and hero-section inspection.
//!
//! The hero parity check consumes a [`HeroSnapshot`] produced by a
//! [`DomParser`]. Two implementations exist: an event-based parser on
//! quick-xml (cargo feature `dom`, default) and a regex-heuristic
//! fallback used when the feature is compiled out. The check itself is
//! coded only against the trait.

#[cfg(feature = "dom")]
pub mod dom;
pub mod heuristic;

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

/// One loaded HTML page, path relative to the project root.
#[derive(Debug, Clone)]
pub struct HtmlFile {
    pub path: String,
    pub content: String,
}

/// What the parity check needs to know about one hero section.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSnapshot {
    /// Opening-tag names inside the hero section, document order.
    pub tags: Vec<String>,
    /// The first `<picture>` element, if any.
    pub picture: Option<PictureProfile>,
}

/// Responsive-image surface of a `<picture>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureProfile {
    pub source_count: usize,
    /// Some `srcset` lists at least two comma-separated candidates.
    pub multi_candidate_srcset: bool,
    pub has_sizes: bool,
}

/// Strategy seam for hero-section parsing.
pub trait DomParser {
    /// Extract the hero snapshot from a full page, or `None` when the
    /// page has no `<section id="hero">`.
    fn hero_snapshot(&self, html: &str) -> Option<HeroSnapshot>;

    /// Whether this implementation is a real parser or a heuristic.
    fn is_heuristic(&self) -> bool;
}

/// Select the best available parser at startup.
#[cfg(feature = "dom")]
pub fn select_parser() -> Box<dyn DomParser> {
    Box::new(dom::EventParser)
}

#[cfg(not(feature = "dom"))]
pub fn select_parser() -> Box<dyn DomParser> {
    Box::new(heuristic::HeuristicParser)
}

fn hero_section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<section[^>]+id="hero"[^>]*>.+?</section>"#).unwrap()
    })
}

/// The raw `<section id="hero">…</section>` block of a page.
///
/// Textual isolation is shared by both parser strategies; only the
/// inspection of the isolated block differs.
pub fn isolate_hero(html: &str) -> Option<&str> {
    hero_section_pattern().find(html).map(|m| m.as_str())
}

/// Load every `.html` file reachable from the configured targets.
///
/// Directory targets are walked recursively in sorted order so the
/// resulting file list (and therefore the report) is deterministic.
pub fn collect_html(root: &Path, targets: &[String]) -> Result<Vec<HtmlFile>> {
    let mut files = Vec::new();
    for target in targets {
        let absolute = root.join(target);
        if !absolute.exists() {
            anyhow::bail!("HTML target `{}` does not exist", absolute.display());
        }
        if absolute.is_dir() {
            for entry in WalkDir::new(&absolute)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "html")
                {
                    files.push(load_html(root, entry.path())?);
                }
            }
        } else if absolute.extension().is_some_and(|ext| ext == "html") {
            files.push(load_html(root, &absolute)?);
        }
    }
    Ok(files)
}

fn load_html(root: &Path, path: &Path) -> Result<HtmlFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read HTML file `{}`", path.display()))?;
    let relative = path.strip_prefix(root).unwrap_or(path);
    Ok(HtmlFile {
        path: relative.to_string_lossy().replace('\\', "/"),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_isolate_hero_finds_section() {
        let html = r#"<body><section class="a" id="hero"><h1>Hi</h1></section><p>after</p></body>"#;
        let hero = isolate_hero(html).unwrap();
        assert!(hero.starts_with("<section"));
        assert!(hero.ends_with("</section>"));
        assert!(hero.contains("<h1>Hi</h1>"));
        assert!(!hero.contains("after"));
    }

    #[test]
    fn test_isolate_hero_none_without_id() {
        assert!(isolate_hero("<section><h1>Hi</h1></section>").is_none());
    }

    #[test]
    fn test_collect_html_walks_directories_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("projects/inner")).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::write(root.join("projects/b.html"), "b").unwrap();
        fs::write(root.join("projects/a.html"), "a").unwrap();
        fs::write(root.join("projects/inner/c.html"), "c").unwrap();
        fs::write(root.join("projects/notes.txt"), "skip").unwrap();

        let targets = vec!["index.html".to_string(), "projects".to_string()];
        let files = collect_html(root, &targets).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "index.html",
                "projects/a.html",
                "projects/b.html",
                "projects/inner/c.html"
            ]
        );
    }

    #[test]
    fn test_collect_html_missing_target_errors() {
        let dir = tempdir().unwrap();
        let targets = vec!["missing.html".to_string()];
        let err = collect_html(dir.path(), &targets).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_collect_html_skips_non_html_file_target() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        let targets = vec!["notes.txt".to_string()];
        assert!(collect_html(dir.path(), &targets).unwrap().is_empty());
    }
}
