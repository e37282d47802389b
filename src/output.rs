//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary
//! display for every entity (project, section) is its semantic identity,
//! title plus positional index, with filesystem paths shown as secondary
//! context via indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 Asteroid Run (Rust, WebGL)
//!     Source: projects/asteroid-run.md
//! 002 Home Server
//!     Source: projects/home-server.md
//!
//! Sections
//!     meta.md
//!     intro.md
//!     skills.md
//!     experience.md
//!     certifications.md
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Site → index.html
//! Data → data/projects.json
//! Generated 2 projects, 7 slides, 14 assets → dist
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::scan::{self, Manifest};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a project header: positional index + title, with its tech list.
///
/// ```text
/// 001 Asteroid Run (Rust, WebGL)
/// 002 Home Server
/// ```
fn project_header(index: usize, title: &str, tech: &[String]) -> String {
    if tech.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} ({})", format_index(index), title, tech.join(", "))
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered content structure.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Projects".to_string());
    for (i, project) in manifest.projects.iter().enumerate() {
        lines.push(project_header(i + 1, &project.title, &project.tech));
        lines.push(format!("    Source: projects/{}.md", project.id));
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    for section in scan::SECTION_FILES {
        lines.push(format!("    {section}"));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing what was written.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    vec![
        "Site \u{2192} index.html".to_string(),
        "Data \u{2192} data/projects.json".to_string(),
        format!(
            "Generated {} projects, {} slides, {} assets \u{2192} {}",
            summary.projects, summary.slides, summary.assets_copied, summary.output_dir
        ),
    ]
}

/// Print generate output to stdout.
pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::project::ManifestEntry;

    fn manifest() -> Manifest {
        Manifest {
            projects: vec![
                ManifestEntry {
                    id: "asteroid-run".to_string(),
                    title: "Asteroid Run".to_string(),
                    tech: vec!["Rust".to_string(), "WebGL".to_string()],
                    thumbnail: "projects/shots/ar.png".to_string(),
                    order: 1,
                },
                ManifestEntry {
                    id: "home-server".to_string(),
                    title: "Home Server".to_string(),
                    tech: vec![],
                    thumbnail: String::new(),
                    order: 2,
                },
            ],
            config: SiteConfig::default(),
        }
    }

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn project_header_with_and_without_tech() {
        assert_eq!(
            project_header(1, "Asteroid Run", &["Rust".to_string()]),
            "001 Asteroid Run (Rust)"
        );
        assert_eq!(project_header(2, "Bare", &[]), "002 Bare");
    }

    #[test]
    fn scan_output_lists_projects_with_sources() {
        let tmp = tempfile::TempDir::new().unwrap();
        let lines = format_scan_output(&manifest(), tmp.path());

        assert_eq!(lines[0], "Projects");
        assert_eq!(lines[1], "001 Asteroid Run (Rust, WebGL)");
        assert_eq!(lines[2], "    Source: projects/asteroid-run.md");
        assert_eq!(lines[3], "002 Home Server");
    }

    #[test]
    fn scan_output_notes_missing_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let lines = format_scan_output(&manifest(), tmp.path());
        assert!(lines.contains(&"    (defaults)".to_string()));

        std::fs::write(tmp.path().join("config.toml"), "").unwrap();
        let lines = format_scan_output(&manifest(), tmp.path());
        assert!(lines.contains(&"    config.toml".to_string()));
    }

    #[test]
    fn generate_output_reports_counts() {
        let summary = GenerateSummary {
            projects: 2,
            slides: 7,
            assets_copied: 14,
            output_dir: "dist".to_string(),
        };
        let lines = format_generate_output(&summary);
        assert_eq!(lines[0], "Site \u{2192} index.html");
        assert_eq!(
            lines[2],
            "Generated 2 projects, 7 slides, 14 assets \u{2192} dist"
        );
    }
}
