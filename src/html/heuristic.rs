//! Regex-heuristic hero parsing.
//!
//! Used when the `dom` feature is compiled out. Good enough for the
//! well-formed pages this tool targets, but it reads markup as text:
//! tags inside comments or attribute values would be miscounted.

use super::{DomParser, HeroSnapshot, PictureProfile, isolate_hero};
use regex::Regex;
use std::sync::OnceLock;

pub struct HeuristicParser;

fn opening_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<([a-z0-9-]+)[\s>]").unwrap())
}

fn picture_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<picture>.*?</picture>").unwrap())
}

fn multi_srcset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"srcset="[^"]*,\s*[^"]+""#).unwrap())
}

impl DomParser for HeuristicParser {
    fn hero_snapshot(&self, html: &str) -> Option<HeroSnapshot> {
        let hero = isolate_hero(html)?;
        let tags = opening_tag_pattern()
            .captures_iter(hero)
            .map(|caps| caps[1].to_lowercase())
            .collect();
        let picture = picture_pattern().find(hero).map(|m| {
            let picture = m.as_str();
            PictureProfile {
                source_count: picture.to_lowercase().matches("<source ").count(),
                multi_candidate_srcset: multi_srcset_pattern().is_match(picture),
                has_sizes: picture.contains("sizes=\""),
            }
        });
        Some(HeroSnapshot { tags, picture })
    }

    fn is_heuristic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<section id="hero">
  <h1>Title</h1>
  <picture>
    <source type="image/avif" srcset="hero-640.avif 640w, hero-1280.avif 1280w" sizes="100vw">
    <img src="hero.jpg" alt="">
  </picture>
  <p>Lead</p>
</section>
</body></html>"#;

    #[test]
    fn test_tag_sequence_in_document_order() {
        let snapshot = HeuristicParser.hero_snapshot(PAGE).unwrap();
        assert_eq!(snapshot.tags, vec!["section", "h1", "picture", "source", "img", "p"]);
    }

    #[test]
    fn test_picture_profile() {
        let snapshot = HeuristicParser.hero_snapshot(PAGE).unwrap();
        let picture = snapshot.picture.unwrap();
        assert_eq!(picture.source_count, 1);
        assert!(picture.multi_candidate_srcset);
        assert!(picture.has_sizes);
    }

    #[test]
    fn test_no_hero_returns_none() {
        assert!(HeuristicParser.hero_snapshot("<html><body></body></html>").is_none());
    }

    #[test]
    fn test_single_candidate_srcset_not_multi() {
        let page = r#"<section id="hero"><picture>
<source srcset="one.avif" sizes="100vw"><img src="x.jpg"></picture></section>"#;
        let picture = HeuristicParser.hero_snapshot(page).unwrap().picture.unwrap();
        assert!(!picture.multi_candidate_srcset);
        assert_eq!(picture.source_count, 1);
    }
}
