//! Project records and frontmatter validation.
//!
//! A project markdown file carries two views of its metadata:
//!
//! - the **manifest entry**, built at scan time with lenient fallbacks so
//!   the manifest can always be generated (`id` falls back to the file
//!   stem, `order` to the file's position), and
//! - the **full record**, built at generate time under strict validation:
//!   a project that is missing required fields stops the build with a
//!   diagnostic naming every problem at once.
//!
//! The split mirrors how the site uses them: the manifest only drives grid
//! ordering and the JSON index, while cards and the modal need every field
//! present and well-typed.

use crate::frontmatter::{Frontmatter, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One entry of `data/projects.json`.
///
/// Immutable after generation; the array is serialized sorted by `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub title: String,
    pub tech: Vec<String>,
    pub thumbnail: String,
    pub order: u32,
}

impl ManifestEntry {
    /// Build a manifest entry with fallbacks.
    ///
    /// `stem` is the markdown filename without extension; `position` is the
    /// 1-based position of the file in directory order, used when `order`
    /// is absent or not a number.
    pub fn from_frontmatter(data: &Frontmatter, stem: &str, position: u32) -> Self {
        let id = data
            .scalar("id")
            .filter(|s| !s.is_empty())
            .unwrap_or(stem)
            .to_string();
        let title = data
            .scalar("title")
            .filter(|s| !s.is_empty())
            .unwrap_or("Untitled")
            .to_string();
        let tech = data.list("tech").unwrap_or_default().to_vec();
        let thumbnail = data.scalar("thumbnail").unwrap_or_default().to_string();
        let order = data
            .scalar("order")
            .and_then(|s| s.parse().ok())
            .unwrap_or(position);

        Self {
            id,
            title,
            tech,
            thumbnail,
            order,
        }
    }
}

/// Validated project metadata, as cards and the modal consume it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFrontmatter {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub tech: Vec<String>,
    pub thumbnail: String,
    pub links: BTreeMap<String, String>,
}

/// A fully loaded project: validated metadata plus markdown body.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub data: ProjectFrontmatter,
    pub body: String,
}

/// Every frontmatter violation for one source file, reported together.
#[derive(Error, Debug)]
#[error("invalid frontmatter in {source_id}:{}", .problems.iter().map(|p| format!("\n- {p}")).collect::<String>())]
pub struct ValidationError {
    pub source_id: String,
    pub problems: Vec<String>,
}

impl ProjectFrontmatter {
    /// Validate parsed frontmatter and convert it into a typed record.
    ///
    /// Collects every violation rather than failing on the first, so one
    /// build run surfaces everything wrong with a file. `source_id` names
    /// the file in the diagnostic.
    pub fn from_frontmatter(
        data: &Frontmatter,
        source_id: &str,
    ) -> Result<Self, ValidationError> {
        let mut problems = Vec::new();

        let required = |key: &str, problems: &mut Vec<String>| -> String {
            match data.scalar(key).filter(|s| !s.is_empty()) {
                Some(v) => v.to_string(),
                None => {
                    problems.push(format!("missing `{key}`"));
                    String::new()
                }
            }
        };

        let id = required("id", &mut problems);
        let title = required("title", &mut problems);
        let summary = required("summary", &mut problems);
        let thumbnail = required("thumbnail", &mut problems);

        let tech = match data.fields.get("tech") {
            Some(Value::List(items)) => items.clone(),
            _ => {
                problems.push("`tech` must be a list".to_string());
                Vec::new()
            }
        };

        let links = match data.fields.get("links") {
            None => BTreeMap::new(),
            Some(Value::Map(entries)) => entries.clone(),
            Some(_) => {
                problems.push("`links` must be a map".to_string());
                BTreeMap::new()
            }
        };

        if !problems.is_empty() {
            return Err(ValidationError {
                source_id: source_id.to_string(),
                problems,
            });
        }

        Ok(Self {
            id,
            title,
            summary,
            tech,
            thumbnail,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;

    const WELL_FORMED: &str = "---
id: alpha
title: Project Alpha
summary: A small thing
thumbnail: shots/thumb.png
tech:
  - Rust
links:
  repo: https://example.com/alpha
---
body";

    #[test]
    fn parse_then_validate_round_trips_required_fields() {
        let doc = frontmatter::parse(WELL_FORMED);
        let data = ProjectFrontmatter::from_frontmatter(&doc.data, "alpha.md").unwrap();

        assert_eq!(data.id, "alpha");
        assert_eq!(data.title, "Project Alpha");
        assert_eq!(data.summary, "A small thing");
        assert_eq!(data.thumbnail, "shots/thumb.png");
        assert_eq!(data.tech, vec!["Rust".to_string()]);
        assert_eq!(
            data.links.get("repo").unwrap(),
            "https://example.com/alpha"
        );
    }

    #[test]
    fn all_violations_reported_at_once() {
        let doc = frontmatter::parse("---\ntech: not-a-list\n---\nbody");
        let err = ProjectFrontmatter::from_frontmatter(&doc.data, "bad.md").unwrap_err();

        assert_eq!(err.source_id, "bad.md");
        assert_eq!(
            err.problems,
            vec![
                "missing `id`",
                "missing `title`",
                "missing `summary`",
                "missing `thumbnail`",
                "`tech` must be a list",
            ]
        );
    }

    #[test]
    fn diagnostic_names_source_and_every_field() {
        let doc = frontmatter::parse("no frontmatter at all");
        let err = ProjectFrontmatter::from_frontmatter(&doc.data, "empty.md").unwrap_err();
        let message = err.to_string();

        assert!(message.contains("empty.md"));
        assert!(message.contains("missing `id`"));
        assert!(message.contains("missing `summary`"));
        assert!(message.contains("`tech` must be a list"));
    }

    #[test]
    fn links_optional_but_must_be_map() {
        let doc = frontmatter::parse(
            "---\nid: a\ntitle: A\nsummary: s\nthumbnail: t.png\ntech:\n  - Rust\nlinks: nope\n---\n",
        );
        let err = ProjectFrontmatter::from_frontmatter(&doc.data, "a.md").unwrap_err();
        assert_eq!(err.problems, vec!["`links` must be a map"]);
    }

    #[test]
    fn empty_tech_list_is_valid() {
        let doc = frontmatter::parse(
            "---\nid: a\ntitle: A\nsummary: s\nthumbnail: t.png\ntech:\n---\n",
        );
        let data = ProjectFrontmatter::from_frontmatter(&doc.data, "a.md").unwrap();
        assert!(data.tech.is_empty());
        assert!(data.links.is_empty());
    }

    #[test]
    fn manifest_entry_uses_frontmatter_when_present() {
        let doc = frontmatter::parse(
            "---\nid: alpha\ntitle: Alpha\nthumbnail: t.png\norder: 7\ntech:\n  - Rust\n---\n",
        );
        let entry = ManifestEntry::from_frontmatter(&doc.data, "001-alpha", 3);

        assert_eq!(entry.id, "alpha");
        assert_eq!(entry.title, "Alpha");
        assert_eq!(entry.order, 7);
        assert_eq!(entry.tech, vec!["Rust".to_string()]);
    }

    #[test]
    fn manifest_entry_fallbacks() {
        let doc = frontmatter::parse("just a body");
        let entry = ManifestEntry::from_frontmatter(&doc.data, "beta", 3);

        assert_eq!(entry.id, "beta");
        assert_eq!(entry.title, "Untitled");
        assert!(entry.tech.is_empty());
        assert_eq!(entry.thumbnail, "");
        assert_eq!(entry.order, 3);
    }

    #[test]
    fn manifest_entry_order_fallback_when_not_numeric() {
        let doc = frontmatter::parse("---\nid: g\norder: soon\n---\n");
        let entry = ManifestEntry::from_frontmatter(&doc.data, "g", 5);
        assert_eq!(entry.order, 5);
    }
}
