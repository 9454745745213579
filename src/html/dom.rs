//! Event-based hero parsing on quick-xml.
//!
//! Walks the isolated hero markup as a start/empty/end event stream,
//! which keeps tags inside comments or text out of the tag sequence.
//! End-name checking is disabled because HTML void elements (`<img>`,
//! `<source>`) are not closed. Markup that quick-xml cannot tokenize
//! degrades to the regex heuristics rather than failing the run.

use super::heuristic::HeuristicParser;
use super::{DomParser, HeroSnapshot, PictureProfile, isolate_hero};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

pub struct EventParser;

impl DomParser for EventParser {
    fn hero_snapshot(&self, html: &str) -> Option<HeroSnapshot> {
        let hero = isolate_hero(html)?;
        parse_hero(hero).or_else(|| HeuristicParser.hero_snapshot(html))
    }

    fn is_heuristic(&self) -> bool {
        false
    }
}

fn parse_hero(hero: &str) -> Option<HeroSnapshot> {
    let mut reader = Reader::from_str(hero);
    reader.config_mut().check_end_names = false;

    let mut tags = Vec::new();
    let mut picture: Option<PictureProfile> = None;
    let mut in_picture = false;
    let mut current = PictureProfile {
        source_count: 0,
        multi_candidate_srcset: false,
        has_sizes: false,
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) | Ok(Event::Empty(elem)) => {
                let name = String::from_utf8_lossy(elem.name().as_ref()).to_lowercase();
                tags.push(name.clone());
                if name == "picture" && picture.is_none() && !in_picture {
                    in_picture = true;
                } else if in_picture {
                    if name == "source" {
                        current.source_count += 1;
                    }
                    inspect_attributes(&elem, &mut current);
                }
            }
            Ok(Event::End(elem)) => {
                if in_picture && elem.name().as_ref().eq_ignore_ascii_case(b"picture") {
                    in_picture = false;
                    picture = Some(current.clone());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            // Tokenizer error: hand the page to the heuristics.
            Err(_) => return None,
        }
    }

    // Unclosed <picture> still counts with whatever was collected.
    if picture.is_none() && in_picture {
        picture = Some(current);
    }
    Some(HeroSnapshot { tags, picture })
}

fn inspect_attributes(elem: &BytesStart<'_>, profile: &mut PictureProfile) {
    for attr in elem.attributes().flatten() {
        match attr.key.as_ref() {
            b"srcset" => {
                let value = String::from_utf8_lossy(&attr.value).into_owned();
                let candidates = value.split(',').filter(|c| !c.trim().is_empty()).count();
                if candidates >= 2 {
                    profile.multi_candidate_srcset = true;
                }
            }
            b"sizes" => profile.has_sizes = true,
            _ => {}
        }
    }
}
