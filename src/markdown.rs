//! Markdown helpers shared by the scan and generate stages.
//!
//! Three concerns live here:
//!
//! - **Image syntax**: extracting `![alt](src "caption")` pairs for the
//!   carousel, stripping them from a body before prose rendering, and
//!   rewriting relative srcs against the markdown file's directory. These
//!   are textual rewrites over the raw source so the surrounding prose
//!   survives untouched.
//! - **HTML rendering**: markdown to HTML via pulldown-cmark.
//! - **Block model**: a flat block list (headings, paragraphs, lists of
//!   links or text) that the section extractors pattern-match against,
//!   replacing DOM-walking with data.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd, html as md_html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `![alt](src "caption")` — caption optional.
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(\s*([^)\s"]*)(?:\s+"([^"]*)")?\s*\)"#).expect("valid regex")
});

/// `[label](href)` — matched only where image syntax has been excluded.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// An image lifted out of markdown image syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownImage {
    pub src: String,
    pub caption: String,
}

/// Extract all images from a markdown body, in document order.
pub fn extract_images(md: &str) -> Vec<MarkdownImage> {
    IMAGE_RE
        .captures_iter(md)
        .map(|cap| MarkdownImage {
            src: cap.get(2).map_or("", |m| m.as_str()).to_string(),
            caption: cap.get(3).map_or("", |m| m.as_str()).to_string(),
        })
        .collect()
}

/// Remove all image syntax from a markdown body.
pub fn strip_images(md: &str) -> String {
    IMAGE_RE.replace_all(md, "").into_owned()
}

/// Rewrite relative image srcs so they resolve from the site root.
///
/// `md_rel_path` is the markdown file's path relative to the site root
/// (e.g. `content/projects/alpha.md`). Absolute paths and `http(s)` URLs
/// are left alone.
pub fn resolve_image_paths(md: &str, md_rel_path: &str) -> String {
    let base = match md_rel_path.rfind('/') {
        Some(pos) => &md_rel_path[..=pos],
        None => "",
    };
    IMAGE_RE
        .replace_all(md, |cap: &Captures| {
            let src = cap.get(2).map_or("", |m| m.as_str());
            if src.starts_with("http://") || src.starts_with("https://") || src.starts_with('/') {
                return cap.get(0).map_or("", |m| m.as_str()).to_string();
            }
            let alt = cap.get(1).map_or("", |m| m.as_str());
            match cap.get(3) {
                Some(caption) => format!("![{alt}]({base}{src} \"{}\")", caption.as_str()),
                None => format!("![{alt}]({base}{src})"),
            }
        })
        .into_owned()
}

/// Extract `[label](href)` links from a text fragment.
///
/// Callers are expected to have excluded image syntax first (the
/// certification parser skips `![...]` lines before calling this).
pub fn extract_links(text: &str) -> Vec<Link> {
    LINK_RE
        .captures_iter(text)
        .map(|cap| Link {
            label: cap.get(1).map_or("", |m| m.as_str()).to_string(),
            href: cap.get(2).map_or("", |m| m.as_str()).to_string(),
        })
        .collect()
}

/// Render markdown to an HTML string.
pub fn render_html(md: &str) -> String {
    let parser = Parser::new(md);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Render a project body for the modal: images stripped (the carousel owns
/// them) and a now-empty literal `### Screenshots` heading dropped.
pub fn render_body_html(md: &str) -> String {
    let stripped = strip_images(md);
    let without_heading: String = stripped
        .lines()
        .filter(|line| line.trim() != "### Screenshots")
        .collect::<Vec<_>>()
        .join("\n");
    render_html(&without_heading)
}

// ============================================================================
// Block model
// ============================================================================

/// A hyperlink captured from a markdown inline link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// One list item: its plain text and the first link inside it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub text: String,
    pub link: Option<Link>,
}

/// A flattened top-level markdown block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<ListItem> },
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Parse markdown into the flat block list the section extractors consume.
///
/// Inline formatting collapses to plain text; nested lists flatten into
/// their parent. That is all the section formats need.
pub fn parse_blocks(md: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    let mut heading: Option<(u8, String)> = None;
    let mut paragraph: Option<String> = None;
    let mut items: Option<Vec<ListItem>> = None;
    let mut item: Option<ListItem> = None;
    let mut link: Option<Link> = None;
    let mut list_depth = 0usize;

    for event in Parser::new(md) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((heading_level(level), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    blocks.push(Block::Heading {
                        level,
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::Start(Tag::Paragraph) if item.is_none() => {
                paragraph = Some(String::new());
            }
            Event::End(TagEnd::Paragraph) if item.is_none() => {
                if let Some(text) = paragraph.take() {
                    blocks.push(Block::Paragraph {
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::Start(Tag::List(_)) => {
                if list_depth == 0 {
                    items = Some(Vec::new());
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0
                    && let Some(collected) = items.take()
                {
                    blocks.push(Block::List { items: collected });
                }
            }
            Event::Start(Tag::Item) => {
                // Flush a parent item interrupted by a nested list
                if let Some(current) = item.take()
                    && let Some(collected) = items.as_mut()
                {
                    collected.push(finish_item(current));
                }
                item = Some(ListItem {
                    text: String::new(),
                    link: None,
                });
            }
            Event::End(TagEnd::Item) => {
                if let Some(current) = item.take()
                    && let Some(collected) = items.as_mut()
                {
                    collected.push(finish_item(current));
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) if item.is_some() => {
                link = Some(Link {
                    label: String::new(),
                    href: dest_url.to_string(),
                });
            }
            Event::End(TagEnd::Link) => {
                if let (Some(done), Some(current)) = (link.take(), item.as_mut())
                    && current.link.is_none()
                {
                    current.link = Some(Link {
                        label: done.label.trim().to_string(),
                        href: done.href,
                    });
                }
            }
            Event::Text(text) | Event::Code(text) => {
                let text = text.as_ref();
                if let Some(pending) = link.as_mut() {
                    pending.label.push_str(text);
                }
                if let Some(current) = item.as_mut() {
                    current.text.push_str(text);
                } else if let Some((_, buffer)) = heading.as_mut() {
                    buffer.push_str(text);
                } else if let Some(buffer) = paragraph.as_mut() {
                    buffer.push_str(text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(current) = item.as_mut() {
                    current.text.push(' ');
                } else if let Some((_, buffer)) = heading.as_mut() {
                    buffer.push(' ');
                } else if let Some(buffer) = paragraph.as_mut() {
                    buffer.push(' ');
                }
            }
            _ => {}
        }
    }

    blocks
}

fn finish_item(item: ListItem) -> ListItem {
    ListItem {
        text: item.text.trim().to_string(),
        link: item.link,
    }
}
