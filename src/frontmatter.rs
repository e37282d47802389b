//! Frontmatter parsing for markdown content files.
//!
//! A content file may open with a `---`-delimited metadata block:
//!
//! ```text
//! ---
//! id: alpha
//! title: "Project Alpha"
//! tech:
//!   - Rust
//!   - WebGL
//! links:
//!   repo: https://example.com/alpha
//! ---
//! Body starts here.
//! ```
//!
//! Parsing is a small explicit line grammar rather than position-dependent
//! string checks. Each line is classified into a token first, then a tiny
//! state machine (the currently open collection, if any) decides what the
//! token means:
//!
//! - `key: value` at the top level sets a scalar; matching surrounding
//!   quotes are stripped
//! - `key:` with no value opens a collection; the first indented line fixes
//!   whether it is a list (`- item` lines) or a map (`key: value` lines)
//! - lines that fit nowhere are skipped, never an error
//!
//! Parsing never fails: a file without a frontmatter block is all body
//! with empty metadata, and a malformed block degrades to whatever lines
//! made sense. Deciding whether the result is *usable* is the
//! validator's job, not the parser's.

use std::collections::BTreeMap;

/// A parsed frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Parsed metadata: top-level keys to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: BTreeMap<String, Value>,
}

impl Frontmatter {
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_scalar)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).and_then(Value::as_list)
    }

    pub fn map(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.fields.get(key).and_then(Value::as_map)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A content file split into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub data: Frontmatter,
    pub body: String,
}

/// One classified line of a frontmatter block.
#[derive(Debug, PartialEq)]
enum Token<'a> {
    Blank,
    /// Indented `- item`
    ListItem(&'a str),
    /// Indented `key: value`
    NestedPair(&'a str, &'a str),
    /// Top-level `key: value`
    Pair(&'a str, &'a str),
    /// Top-level `key:` with empty value — opens a collection
    OpenCollection(&'a str),
    /// Anything that fits no rule; skipped
    Junk,
}

fn classify(line: &str) -> Token<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Token::Blank;
    }

    let indented = line.starts_with(' ') || line.starts_with('\t');
    if indented {
        if let Some(rest) = trimmed.strip_prefix('-') {
            return Token::ListItem(rest.trim());
        }
        if let Some((key, value)) = split_pair(trimmed) {
            return Token::NestedPair(key, value);
        }
        return Token::Junk;
    }

    match split_pair(trimmed) {
        Some((key, "")) => Token::OpenCollection(key),
        Some((key, value)) => Token::Pair(key, value),
        None => Token::Junk,
    }
}

/// Split `key: value` on the first colon. Returns None for lines without
/// a colon or with an empty key.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Strip one layer of matching single or double quotes.
fn clean_value(raw: &str) -> String {
    let v = raw.trim();
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        v[1..v.len() - 1].to_string()
    } else {
        v.to_string()
    }
}

/// An open collection whose kind hasn't been fixed yet, or a list/map being
/// filled in.
enum Open {
    Undecided(String),
    List(String, Vec<String>),
    Map(String, BTreeMap<String, String>),
}

/// Parse a content file into frontmatter and body.
///
/// If the input does not start with a `---` line, or the closing `---` is
/// missing, the whole input is body with empty metadata. The body is
/// returned trimmed, matching what the renderer expects.
pub fn parse(raw: &str) -> Document {
    let Some((block, body)) = split_block(raw) else {
        return Document {
            data: Frontmatter::default(),
            body: raw.trim().to_string(),
        };
    };

    let mut fields = BTreeMap::new();
    let mut open: Option<Open> = None;

    for line in block.lines() {
        match classify(line) {
            Token::Blank | Token::Junk => {}
            Token::Pair(key, value) => {
                close_collection(&mut fields, open.take());
                fields.insert(key.to_string(), Value::Scalar(clean_value(value)));
            }
            Token::OpenCollection(key) => {
                close_collection(&mut fields, open.take());
                open = Some(Open::Undecided(key.to_string()));
            }
            Token::ListItem(item) => {
                open = match open.take() {
                    Some(Open::Undecided(key)) => {
                        Some(Open::List(key, vec![clean_value(item)]))
                    }
                    Some(Open::List(key, mut items)) => {
                        items.push(clean_value(item));
                        Some(Open::List(key, items))
                    }
                    // List item into a map, or with no collection open: skip
                    other => other,
                };
            }
            Token::NestedPair(key, value) => {
                open = match open.take() {
                    Some(Open::Undecided(parent)) => {
                        let mut entries = BTreeMap::new();
                        entries.insert(key.to_string(), clean_value(value));
                        Some(Open::Map(parent, entries))
                    }
                    Some(Open::Map(parent, mut entries)) => {
                        entries.insert(key.to_string(), clean_value(value));
                        Some(Open::Map(parent, entries))
                    }
                    other => other,
                };
            }
        }
    }
    close_collection(&mut fields, open);

    Document {
        data: Frontmatter { fields },
        body: body.trim().to_string(),
    }
}

/// Detach the leading `---` block. Returns (block, body) or None when there
/// is no complete block at the very start of the input.
fn split_block(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    // The block closes at the next line that is exactly `---`
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']).trim() == "---" && offset > 0 {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }
    // No closing fence
    None
}

fn close_collection(fields: &mut BTreeMap<String, Value>, open: Option<Open>) {
    match open {
        None => {}
        // A key that opened a collection but got no items: empty list,
        // matching the shape a `tech:` with no entries should validate as
        Some(Open::Undecided(key)) => {
            fields.insert(key, Value::List(Vec::new()));
        }
        Some(Open::List(key, items)) => {
            fields.insert(key, Value::List(items));
        }
        Some(Open::Map(key, entries)) => {
            fields.insert(key, Value::Map(entries));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "---
id: alpha
title: \"Project Alpha\"
summary: A small thing
thumbnail: shots/thumb.png
order: 2
tech:
  - Rust
  - WebGL
links:
  repo: https://example.com/alpha
  video: https://example.com/demo
---

# Alpha
Body text.
";

    #[test]
    fn no_block_is_all_body() {
        let doc = parse("# Just markdown\n\nNo metadata here.");
        assert!(doc.data.is_empty());
        assert_eq!(doc.body, "# Just markdown\n\nNo metadata here.");
    }

    #[test]
    fn unterminated_block_is_all_body() {
        let raw = "---\nid: alpha\ntitle: Alpha\n\nBody without closing fence";
        let doc = parse(raw);
        assert!(doc.data.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn scalars_parsed() {
        let doc = parse(WELL_FORMED);
        assert_eq!(doc.data.scalar("id"), Some("alpha"));
        assert_eq!(doc.data.scalar("summary"), Some("A small thing"));
        assert_eq!(doc.data.scalar("order"), Some("2"));
    }

    #[test]
    fn quotes_stripped_from_scalars() {
        let doc = parse(WELL_FORMED);
        assert_eq!(doc.data.scalar("title"), Some("Project Alpha"));

        let doc = parse("---\ntitle: 'Single Quoted'\n---\nbody");
        assert_eq!(doc.data.scalar("title"), Some("Single Quoted"));
    }

    #[test]
    fn mismatched_quotes_kept() {
        let doc = parse("---\ntitle: \"half quoted\n---\nbody");
        assert_eq!(doc.data.scalar("title"), Some("\"half quoted"));
    }

    #[test]
    fn list_collected() {
        let doc = parse(WELL_FORMED);
        assert_eq!(
            doc.data.list("tech"),
            Some(&["Rust".to_string(), "WebGL".to_string()][..])
        );
    }

    #[test]
    fn map_collected() {
        let doc = parse(WELL_FORMED);
        let links = doc.data.map("links").unwrap();
        assert_eq!(links.get("repo").unwrap(), "https://example.com/alpha");
        assert_eq!(links.get("video").unwrap(), "https://example.com/demo");
    }

    #[test]
    fn body_preserved_and_trimmed() {
        let doc = parse(WELL_FORMED);
        assert!(doc.body.starts_with("# Alpha"));
        assert!(doc.body.ends_with("Body text."));
    }

    #[test]
    fn scalar_value_with_colons() {
        let doc = parse("---\nrepo: https://example.com/x\n---\nbody");
        assert_eq!(doc.data.scalar("repo"), Some("https://example.com/x"));
    }

    #[test]
    fn empty_collection_becomes_empty_list() {
        let doc = parse("---\ntech:\nid: alpha\n---\nbody");
        assert_eq!(doc.data.list("tech"), Some(&[][..]));
        assert_eq!(doc.data.scalar("id"), Some("alpha"));
    }

    #[test]
    fn first_indented_line_fixes_collection_kind() {
        // A map entry arriving after list items is skipped, not mixed in
        let doc = parse("---\ntech:\n  - Rust\n  repo: nope\n---\nbody");
        assert_eq!(doc.data.list("tech"), Some(&["Rust".to_string()][..]));
    }

    #[test]
    fn stray_indented_lines_skipped() {
        let doc = parse("---\n  - floating item\nid: alpha\n   junk without colon\n---\nbody");
        assert_eq!(doc.data.scalar("id"), Some("alpha"));
        assert_eq!(doc.data.fields.len(), 1);
    }

    #[test]
    fn sloppy_indentation_tolerated() {
        // One space, four spaces, a tab: all count as indented
        let doc = parse("---\ntech:\n - One\n    - Two\n\t- Three\n---\nbody");
        assert_eq!(
            doc.data.list("tech"),
            Some(&["One".to_string(), "Two".to_string(), "Three".to_string()][..])
        );
    }

    #[test]
    fn quoted_list_items_cleaned() {
        let doc = parse("---\ntech:\n  - \"C++\"\n  - 'Go'\n---\nbody");
        assert_eq!(
            doc.data.list("tech"),
            Some(&["C++".to_string(), "Go".to_string()][..])
        );
    }

    #[test]
    fn blank_lines_inside_block_ignored() {
        let doc = parse("---\nid: alpha\n\ntitle: Alpha\n---\nbody");
        assert_eq!(doc.data.scalar("id"), Some("alpha"));
        assert_eq!(doc.data.scalar("title"), Some("Alpha"));
    }

    #[test]
    fn later_scalar_closes_open_collection() {
        let doc = parse("---\ntech:\n  - Rust\nthumbnail: t.png\n---\nbody");
        assert_eq!(doc.data.list("tech"), Some(&["Rust".to_string()][..]));
        assert_eq!(doc.data.scalar("thumbnail"), Some("t.png"));
    }
}
