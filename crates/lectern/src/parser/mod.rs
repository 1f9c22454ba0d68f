pub mod blocks;
pub mod frontmatter;
pub mod inline;
pub mod splitter;

pub use blocks::Block;
pub use frontmatter::DeckMeta;
pub use inline::Inline;

use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone)]
pub struct Slide {
    /// Stable identifier for outline navigation and scroll anchoring.
    pub section_id: String,
    /// Display title: the first heading, or a positional fallback.
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Slide {
    /// A slide that is nothing but a single heading (a section divider).
    pub fn is_divider(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Heading { .. }])
    }
}

pub fn parse(content: &str) -> Deck {
    let (meta, body) = frontmatter::extract(content);
    let raw_slides = splitter::split(&body);

    let mut used_ids: HashSet<String> = HashSet::new();
    let slides = raw_slides
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let blocks = blocks::parse(raw);
            let title = blocks
                .iter()
                .find_map(|block| match block {
                    Block::Heading { inlines, .. } => Some(inline::to_text(inlines)),
                    _ => None,
                })
                .unwrap_or_else(|| format!("Slide {}", index + 1));
            let section_id = unique_slug(&title, &mut used_ids);
            Slide {
                section_id,
                title,
                blocks,
            }
        })
        .collect();

    Deck { meta, slides }
}

/// Lowercased, hyphen-separated identifier derived from a title.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_hyphen = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "section".to_string()
    } else {
        trimmed.to_string()
    }
}

fn unique_slug(title: &str, used: &mut HashSet<String>) -> String {
    let base = slug(title);
    let mut candidate = base.clone();
    let mut counter = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_parses() {
        let content = "---\ntitle: Programming Lectures\ntheme: dark\nfooter: CS 101\n---\n\n\
                       # Introduction\n\nWelcome\n\n---\n\n# Variables\n\n- `int`\n- `double`\n\n\
                       ---\n\n# Loops\n\n```cpp\nfor (;;) {}\n```\n";
        let deck = parse(content);
        assert_eq!(deck.meta.title.as_deref(), Some("Programming Lectures"));
        assert_eq!(deck.meta.theme.as_deref(), Some("dark"));
        assert_eq!(deck.meta.footer.as_deref(), Some("CS 101"));
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.slides[0].section_id, "introduction");
        assert_eq!(deck.slides[1].title, "Variables");
        assert_eq!(deck.slides[2].section_id, "loops");
    }

    #[test]
    fn slug_normalizes_punctuation() {
        assert_eq!(slug("Data Structures & Algorithms!"), "data-structures-algorithms");
        assert_eq!(slug("  C++  Basics "), "c-basics");
        assert_eq!(slug("???"), "section");
    }

    #[test]
    fn duplicate_titles_get_distinct_ids() {
        let deck = parse("# Review\n\ncontent\n\n---\n\n# Review\n\nmore\n\n---\n\n# Review\n\nend");
        let ids: Vec<&str> = deck.slides.iter().map(|s| s.section_id.as_str()).collect();
        assert_eq!(ids, vec!["review", "review-2", "review-3"]);
    }

    #[test]
    fn headingless_slide_gets_positional_title() {
        let deck = parse("just a paragraph");
        assert_eq!(deck.slides[0].title, "Slide 1");
        assert_eq!(deck.slides[0].section_id, "slide-1");
    }

    #[test]
    fn divider_detection() {
        let deck = parse("# Part One\n\n---\n\n# Part Two\n\nwith content");
        assert!(deck.slides[0].is_divider());
        assert!(!deck.slides[1].is_divider());
    }

    #[test]
    fn empty_document_has_no_slides() {
        let deck = parse("");
        assert!(deck.slides.is_empty());
    }
}
