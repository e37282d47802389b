//! Static section extraction.
//!
//! The non-project sections of the site (intro, skills, experience,
//! certifications, meta) each impose a small format on their markdown
//! file. This module turns each file into a typed structure that the
//! generator renders, so the formats are testable without any HTML in
//! sight.
//!
//! Formats:
//!
//! - `meta.md` — first `# h1` is the page title, first paragraph the
//!   meta description
//! - `intro.md` — `# h1` + first paragraph as the hero; a list of links
//!   becomes the contact row; an optional `## Download` heading followed
//!   by a list becomes CTA buttons
//! - `skills.md` — each `### category` with its following list becomes a
//!   pill group
//! - `experience.md` — each `##`/`###` heading starts a timeline entry;
//!   everything up to the next heading is its description; an entry
//!   mentioning `Present` is marked current
//! - `certifications.md` — `### ` blocks with a title line, an optional
//!   `![icon](...)` image, a meta line, an optional `Skills: a, b` line,
//!   and `[label](url)` links split into credential vs PDF

use crate::markdown::{self, Block, Link};

/// Page title and meta description from `meta.md`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Hero section from `intro.md`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intro {
    pub heading: String,
    pub tagline: String,
    pub contacts: Vec<Contact>,
    pub downloads: Vec<Link>,
}

/// One contact row link with its icon class.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub label: String,
    pub href: String,
    pub icon: &'static str,
}

/// One titled pill group from `skills.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

/// One timeline entry from `experience.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceEntry {
    pub heading: String,
    /// Rendered HTML of everything between this heading and the next.
    pub description_html: String,
    /// True when the entry mentions `Present` — gets the live marker.
    pub current: bool,
}

/// One certification card from `certifications.md`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Certification {
    pub title: String,
    pub icon: Option<String>,
    pub meta: String,
    pub skills: Vec<String>,
    pub credential: Option<Link>,
    pub pdf: Option<Link>,
}

/// Pick a contact icon class from the link target.
pub fn contact_icon(href: &str) -> &'static str {
    if href.starts_with("mailto:") {
        "fa-solid fa-envelope"
    } else if href.contains("github.com") {
        "fa-brands fa-github"
    } else if href.contains("linkedin.com") {
        "fa-brands fa-linkedin"
    } else if href.contains("itch.io") {
        "fa-brands fa-itch-io"
    } else if href.contains("wa.me") || href.contains("whatsapp") {
        "fa-brands fa-whatsapp"
    } else {
        "fa-solid fa-link"
    }
}

pub fn parse_meta(md: &str) -> Meta {
    let blocks = markdown::parse_blocks(md);
    Meta {
        title: blocks.iter().find_map(|b| match b {
            Block::Heading { level: 1, text } => Some(text.clone()),
            _ => None,
        }),
        description: blocks.iter().find_map(|b| match b {
            Block::Paragraph { text } => Some(text.clone()),
            _ => None,
        }),
    }
}

pub fn parse_intro(md: &str) -> Intro {
    let blocks = markdown::parse_blocks(md);

    let heading = blocks
        .iter()
        .find_map(|b| match b {
            Block::Heading { level: 1, text } => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_default();

    let tagline = blocks
        .iter()
        .find_map(|b| match b {
            Block::Paragraph { text } => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_default();

    // The list right after a `## Download` heading holds the CTA buttons;
    // the first other list is the contact row.
    let download_list_idx = blocks
        .iter()
        .position(|b| {
            matches!(b, Block::Heading { level: 2, text } if text.eq_ignore_ascii_case("download"))
        })
        .and_then(|heading_idx| match blocks.get(heading_idx + 1) {
            Some(Block::List { .. }) => Some(heading_idx + 1),
            _ => None,
        });

    let downloads = download_list_idx
        .and_then(|idx| match &blocks[idx] {
            Block::List { items } => Some(items.iter().filter_map(|i| i.link.clone()).collect()),
            _ => None,
        })
        .unwrap_or_default();

    let contacts = blocks
        .iter()
        .enumerate()
        .find_map(|(idx, b)| match b {
            Block::List { items } if Some(idx) != download_list_idx => Some(items),
            _ => None,
        })
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.link.as_ref())
                .map(|link| Contact {
                    label: link.label.clone(),
                    href: link.href.clone(),
                    icon: contact_icon(&link.href),
                })
                .collect()
        })
        .unwrap_or_default();

    Intro {
        heading,
        tagline,
        contacts,
        downloads,
    }
}

pub fn parse_skills(md: &str) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for block in markdown::parse_blocks(md) {
        match block {
            Block::Heading { level: 3, text } => groups.push(SkillGroup {
                category: text,
                skills: Vec::new(),
            }),
            Block::List { items } => {
                if let Some(group) = groups.last_mut() {
                    group.skills.extend(items.into_iter().map(|i| i.text));
                }
            }
            _ => {}
        }
    }
    groups
}

pub fn parse_experience(md: &str) -> Vec<ExperienceEntry> {
    let mut entries: Vec<(String, String)> = Vec::new();

    for line in md.lines() {
        let trimmed = line.trim_start();
        let heading = trimmed
            .strip_prefix("### ")
            .or_else(|| trimmed.strip_prefix("## "));
        if let Some(title) = heading {
            entries.push((title.trim().to_string(), String::new()));
        } else if let Some((_, body)) = entries.last_mut() {
            body.push_str(line);
            body.push('\n');
        }
        // Content before the first heading is dropped
    }

    entries
        .into_iter()
        .map(|(heading, body)| ExperienceEntry {
            current: body.contains("Present"),
            description_html: markdown::render_html(body.trim()),
            heading,
        })
        .collect()
}

pub fn parse_certifications(md: &str) -> Vec<Certification> {
    let mut cert_blocks: Vec<String> = Vec::new();
    for line in md.lines() {
        if let Some(title) = line.strip_prefix("### ") {
            cert_blocks.push(format!("{title}\n"));
        } else if let Some(block) = cert_blocks.last_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }

    cert_blocks.iter().map(|block| parse_cert_block(block)).collect()
}

fn parse_cert_block(block: &str) -> Certification {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let title = lines.first().copied().unwrap_or_default().to_string();

    let icon = lines
        .iter()
        .find(|l| l.starts_with("![icon]"))
        .and_then(|l| markdown::extract_images(l).into_iter().next())
        .map(|img| img.src);

    let meta = lines
        .iter()
        .skip(1)
        .find(|l| !l.starts_with("![") && !l.starts_with('[') && !l.starts_with("Skills:"))
        .copied()
        .unwrap_or_default()
        .to_string();

    let skills = lines
        .iter()
        .find_map(|l| l.strip_prefix("Skills:"))
        .map(|rest| {
            rest.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    // Inline links, excluding image syntax lines (the icon)
    let links: Vec<Link> = lines
        .iter()
        .filter(|l| !l.starts_with('!'))
        .flat_map(|l| markdown::extract_links(l))
        .collect();

    let credential = links
        .iter()
        .find(|l| !l.label.to_lowercase().contains("pdf"))
        .cloned();
    let pdf = links
        .iter()
        .find(|l| l.label.to_lowercase().contains("pdf"))
        .cloned();

    Certification {
        title,
        icon,
        meta,
        skills,
        credential,
        pdf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRO: &str = "\
# Jane Doe

Game developer and tools programmer.

- [jane@example.com](mailto:jane@example.com)
- [GitHub](https://github.com/jane)
- [LinkedIn](https://www.linkedin.com/in/jane)

## Download

- [Resume (PDF)](files/resume.pdf)
- [Portfolio deck](files/deck.pdf)
";

    #[test]
    fn intro_hero_extracted() {
        let intro = parse_intro(INTRO);
        assert_eq!(intro.heading, "Jane Doe");
        assert_eq!(intro.tagline, "Game developer and tools programmer.");
    }

    #[test]
    fn intro_contacts_with_icons() {
        let intro = parse_intro(INTRO);
        assert_eq!(intro.contacts.len(), 3);
        assert_eq!(intro.contacts[0].icon, "fa-solid fa-envelope");
        assert_eq!(intro.contacts[1].icon, "fa-brands fa-github");
        assert_eq!(intro.contacts[2].icon, "fa-brands fa-linkedin");
    }

    #[test]
    fn intro_downloads_separate_from_contacts() {
        let intro = parse_intro(INTRO);
        assert_eq!(intro.downloads.len(), 2);
        assert_eq!(intro.downloads[0].label, "Resume (PDF)");
        assert_eq!(intro.downloads[0].href, "files/resume.pdf");
        // Download links must not leak into the contact row
        assert!(intro.contacts.iter().all(|c| !c.href.ends_with(".pdf")));
    }

    #[test]
    fn intro_without_download_section() {
        let intro = parse_intro("# Jane\n\nHi.\n\n- [GitHub](https://github.com/jane)\n");
        assert!(intro.downloads.is_empty());
        assert_eq!(intro.contacts.len(), 1);
    }

    #[test]
    fn contact_icon_fallback() {
        assert_eq!(contact_icon("https://example.com"), "fa-solid fa-link");
        assert_eq!(contact_icon("https://wa.me/123"), "fa-brands fa-whatsapp");
    }

    #[test]
    fn skills_grouped_by_h3() {
        let groups = parse_skills(
            "### Languages\n\n- Rust\n- C#\n\n### Engines\n\n- Unity\n- Godot\n",
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Languages");
        assert_eq!(groups[0].skills, vec!["Rust", "C#"]);
        assert_eq!(groups[1].category, "Engines");
        assert_eq!(groups[1].skills, vec!["Unity", "Godot"]);
    }

    #[test]
    fn skills_list_without_heading_dropped() {
        let groups = parse_skills("- stray\n\n### Real\n\n- Rust\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].skills, vec!["Rust"]);
    }

    #[test]
    fn experience_entries_split_on_headings() {
        let entries = parse_experience(
            "## Studio A — Lead\n\n2021 - Present\n\nShipped **two** titles.\n\n## Studio B\n\n2018 - 2021\n",
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].heading, "Studio A — Lead");
        assert!(entries[0].current);
        assert!(entries[0].description_html.contains("<strong>two</strong>"));
        assert!(!entries[1].current);
    }

    #[test]
    fn experience_h3_also_starts_entry() {
        let entries = parse_experience("### Freelance\n\nVarious clients.\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].heading, "Freelance");
    }

    #[test]
    fn certification_block_fully_parsed() {
        let certs = parse_certifications(
            "### Certified Kubernetes Administrator\n\n\
![icon](assets/icons/cka.png)\n\n\
Linux Foundation, 2023\n\n\
Skills: Orchestration, Networking\n\n\
[Credential](https://example.com/verify/123)\n\
[Certificate PDF](files/cka.pdf)\n",
        );

        assert_eq!(certs.len(), 1);
        let cert = &certs[0];
        assert_eq!(cert.title, "Certified Kubernetes Administrator");
        assert_eq!(cert.icon.as_deref(), Some("assets/icons/cka.png"));
        assert_eq!(cert.meta, "Linux Foundation, 2023");
        assert_eq!(cert.skills, vec!["Orchestration", "Networking"]);
        assert_eq!(
            cert.credential.as_ref().unwrap().href,
            "https://example.com/verify/123"
        );
        assert_eq!(cert.pdf.as_ref().unwrap().href, "files/cka.pdf");
    }

    #[test]
    fn certification_icon_never_mistaken_for_credential() {
        let certs = parse_certifications(
            "### Cert\n\n![icon](assets/icons/x.png)\n\nIssuer, 2020\n",
        );
        assert!(certs[0].credential.is_none());
        assert_eq!(certs[0].icon.as_deref(), Some("assets/icons/x.png"));
    }

    #[test]
    fn certification_without_icon_or_skills() {
        let certs = parse_certifications("### Bare Cert\n\nIssuer, 2019\n");
        let cert = &certs[0];
        assert_eq!(cert.title, "Bare Cert");
        assert!(cert.icon.is_none());
        assert!(cert.skills.is_empty());
        assert_eq!(cert.meta, "Issuer, 2019");
    }

    #[test]
    fn meta_title_and_description() {
        let meta = parse_meta("# Jane Doe — Portfolio\n\nGames, tools, and experiments.\n");
        assert_eq!(meta.title.as_deref(), Some("Jane Doe — Portfolio"));
        assert_eq!(
            meta.description.as_deref(),
            Some("Games, tools, and experiments.")
        );
    }
}
