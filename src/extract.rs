use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

use crate::models::{Block, MediaKind};

// ── Allowlist ────────────────────────────────────────────────────────────────

static ALLOWLIST_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, p, ul, ol, img, audio, video").unwrap()
});

/// Every tag kind that produces output. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Heading(u8),
    Paragraph,
    UnorderedList,
    OrderedList,
    Media(MediaKind),
}

impl TagKind {
    pub fn from_name(name: &str) -> Option<TagKind> {
        let kind = match name {
            "h1" => TagKind::Heading(1),
            "h2" => TagKind::Heading(2),
            "h3" => TagKind::Heading(3),
            "h4" => TagKind::Heading(4),
            "p" => TagKind::Paragraph,
            "ul" => TagKind::UnorderedList,
            "ol" => TagKind::OrderedList,
            "img" => TagKind::Media(MediaKind::Image),
            "audio" => TagKind::Media(MediaKind::Audio),
            "video" => TagKind::Media(MediaKind::Video),
            _ => return None,
        };
        Some(kind)
    }

    fn blocks(self, el: ElementRef<'_>) -> Vec<Block> {
        match self {
            TagKind::Heading(level) => vec![Block::Heading {
                level,
                text: element_text(el),
            }],
            TagKind::Paragraph => vec![Block::Paragraph(element_text(el))],
            TagKind::UnorderedList => list_items(el).map(Block::Bullet).collect(),
            TagKind::OrderedList => list_items(el)
                .enumerate()
                .map(|(i, text)| Block::Numbered { index: i + 1, text })
                .collect(),
            TagKind::Media(kind) => vec![Block::Media {
                kind,
                src: media_src(el, kind),
            }],
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Walk the allowlisted elements in document order and map each to its blocks.
pub fn extract_blocks(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);
    document
        .select(&ALLOWLIST_SEL)
        .filter_map(|el| TagKind::from_name(el.value().name()).map(|kind| (kind, el)))
        .flat_map(|(kind, el)| kind.blocks(el))
        .collect()
}

// ── Element rules ────────────────────────────────────────────────────────────

fn element_text(el: ElementRef<'_>) -> String {
    normalize_text(collect_text(el))
}

/// Text of each direct `li` child, empty items included so numbering stays
/// aligned with the source. Nested lists are emitted on their own.
fn list_items<'a>(el: ElementRef<'a>) -> impl Iterator<Item = String> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(element_text)
}

fn media_src(el: ElementRef<'_>, kind: MediaKind) -> Option<String> {
    let own = non_empty_attr(el, "src");
    if own.is_some() || kind == MediaKind::Image {
        return own;
    }
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "source")
        .find_map(|source| non_empty_attr(source, "src"))
}

fn non_empty_attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ── DOM utility helpers ──────────────────────────────────────────────────────

/// Recursively collect all text from an element and its descendants.
fn collect_text(el: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => parts.push((&*text.text).to_string()),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    parts.push(collect_text(child_el));
                }
            }
            _ => {}
        }
    }
    parts.join("")
}

fn normalize_text(text: String) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
