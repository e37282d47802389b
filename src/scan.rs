//! Content scanning and manifest generation.
//!
//! Stage 1 of the folio build pipeline. Walks the content root, checks
//! that every section file is present, and reads the project frontmatter
//! into a manifest that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! folio expects a specific content layout:
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── meta.md                      # Page title + description
//! ├── intro.md                     # Hero: name, tagline, contacts, downloads
//! ├── skills.md                    # Skill groups (### category + list)
//! ├── experience.md                # Work history (## / ### entries)
//! ├── certifications.md            # Certifications (### blocks)
//! ├── projects/
//! │   ├── asteroid-run.md          # One project per file, frontmatter + body
//! │   └── home-server.md
//! └── assets/                      # Images referenced from the markdown
//! ```
//!
//! ## Ordering
//!
//! Project files are read in filename order; the manifest is then sorted
//! by the `order` frontmatter field. The sort is stable, so projects with
//! equal `order` keep their filename order. A missing or non-numeric
//! `order` falls back to the file's position in the directory listing.
//!
//! ## Leniency
//!
//! Scanning is lenient on purpose: a project missing `id` or `title`
//! still lands in the manifest with fallbacks, so a half-written file
//! never blocks the scan stage. Strict validation happens at generate
//! time, where the full record is needed.

use crate::config::{self, SiteConfig};
use crate::frontmatter;
use crate::project::{ManifestEntry, ProjectFrontmatter, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Missing required content file: {0}")]
    MissingSection(String),
    #[error("Missing projects directory: {0}")]
    MissingProjectsDir(PathBuf),
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Section files that must exist in the content root.
pub const SECTION_FILES: &[&str] = &[
    "meta.md",
    "intro.md",
    "skills.md",
    "experience.md",
    "certifications.md",
];

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub projects: Vec<ManifestEntry>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    for section in SECTION_FILES {
        if !root.join(section).is_file() {
            return Err(ScanError::MissingSection(section.to_string()));
        }
    }

    let projects = scan_projects(root)?;

    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    Ok(Manifest { projects, config })
}

/// Read every project file into a manifest entry, sorted by `order`.
fn scan_projects(root: &Path) -> Result<Vec<ManifestEntry>, ScanError> {
    let dir = root.join("projects");
    if !dir.is_dir() {
        return Err(ScanError::MissingProjectsDir(dir));
    }

    let mut md_files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p.file_name().unwrap_or_default().to_string_lossy();
            p.is_file()
                && !name.starts_with('.')
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();

    let mut projects = Vec::new();
    for (idx, md_path) in md_files.iter().enumerate() {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let content = fs::read_to_string(md_path)?;
        let doc = frontmatter::parse(&content);
        projects.push(ManifestEntry::from_frontmatter(
            &doc.data,
            &stem,
            idx as u32 + 1,
        ));
    }

    // Stable: equal orders keep filename order
    projects.sort_by_key(|p| p.order);
    Ok(projects)
}

/// Run generate-grade frontmatter validation without building anything.
/// Backs the `check` command; the first invalid file aborts with a
/// diagnostic naming all of its problems.
pub fn check_projects(root: &Path, manifest: &Manifest) -> Result<(), ScanError> {
    for entry in &manifest.projects {
        let rel = format!("projects/{}.md", entry.id);
        let content = fs::read_to_string(root.join(&rel))?;
        let doc = frontmatter::parse(&content);
        ProjectFrontmatter::from_frontmatter(&doc.data, &rel)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_sections(root: &Path) {
        fs::write(root.join("meta.md"), "# Jo Doe\n\nPortfolio of Jo Doe.\n").unwrap();
        fs::write(root.join("intro.md"), "# Jo Doe\n\nI build things.\n").unwrap();
        fs::write(root.join("skills.md"), "### Languages\n\n- Rust\n").unwrap();
        fs::write(root.join("experience.md"), "## Acme\n\nShipped stuff.\n").unwrap();
        fs::write(root.join("certifications.md"), "### Cert\n\nIssued 2024\n").unwrap();
    }

    fn write_project(root: &Path, file: &str, frontmatter: &str) {
        let dir = root.join("projects");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), format!("---\n{frontmatter}---\n\nBody.\n")).unwrap();
    }

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_sections(tmp.path());
        fs::create_dir_all(tmp.path().join("projects")).unwrap();
        tmp
    }

    #[test]
    fn missing_section_file_is_error() {
        let tmp = setup();
        fs::remove_file(tmp.path().join("skills.md")).unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingSection(ref s) if s == "skills.md"));
    }

    #[test]
    fn missing_projects_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        write_sections(tmp.path());

        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingProjectsDir(_)));
    }

    #[test]
    fn empty_projects_dir_yields_empty_manifest() {
        let tmp = setup();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.projects.is_empty());
    }

    #[test]
    fn projects_sorted_by_order_field() {
        let tmp = setup();
        write_project(tmp.path(), "alpha.md", "id: alpha\ntitle: Alpha\norder: 2\n");
        write_project(tmp.path(), "beta.md", "id: beta\ntitle: Beta\norder: 1\n");
        write_project(tmp.path(), "gamma.md", "id: gamma\ntitle: Gamma\norder: 3\n");

        let manifest = scan(tmp.path()).unwrap();
        let ids: Vec<&str> = manifest.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn equal_orders_keep_filename_order() {
        let tmp = setup();
        write_project(tmp.path(), "b.md", "id: b\ntitle: B\norder: 1\n");
        write_project(tmp.path(), "a.md", "id: a\ntitle: A\norder: 1\n");
        write_project(tmp.path(), "c.md", "id: c\ntitle: C\norder: 1\n");

        let manifest = scan(tmp.path()).unwrap();
        let ids: Vec<&str> = manifest.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_order_falls_back_to_position() {
        let tmp = setup();
        write_project(tmp.path(), "a.md", "id: a\ntitle: A\n");
        write_project(tmp.path(), "b.md", "id: b\ntitle: B\norder: 1\n");

        let manifest = scan(tmp.path()).unwrap();
        // a.md is first in the listing so its fallback order is 1; the
        // stable sort keeps it ahead of b
        let ids: Vec<&str> = manifest.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(manifest.projects[0].order, 1);
    }

    #[test]
    fn half_written_project_still_scans() {
        let tmp = setup();
        fs::write(
            tmp.path().join("projects/draft.md"),
            "No frontmatter here yet.\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.projects.len(), 1);
        assert_eq!(manifest.projects[0].id, "draft");
        assert_eq!(manifest.projects[0].title, "Untitled");
    }

    #[test]
    fn non_markdown_and_hidden_files_skipped() {
        let tmp = setup();
        write_project(tmp.path(), "real.md", "id: real\ntitle: Real\n");
        fs::write(tmp.path().join("projects/.draft.md"), "hidden").unwrap();
        fs::write(tmp.path().join("projects/notes.txt"), "notes").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.projects.len(), 1);
    }

    #[test]
    fn check_rejects_what_scan_tolerated() {
        let tmp = setup();
        fs::write(
            tmp.path().join("projects/draft.md"),
            "No frontmatter here yet.\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let err = check_projects(tmp.path(), &manifest).unwrap_err();
        assert!(err.to_string().contains("projects/draft.md"));
        assert!(err.to_string().contains("missing `summary`"));
    }

    #[test]
    fn check_passes_valid_content() {
        let tmp = setup();
        write_project(
            tmp.path(),
            "alpha.md",
            "id: alpha\ntitle: Alpha\nsummary: s\nthumbnail: t.png\ntech:\n  - Rust\n",
        );

        let manifest = scan(tmp.path()).unwrap();
        check_projects(tmp.path(), &manifest).unwrap();
    }

    #[test]
    fn config_loaded_into_manifest() {
        let tmp = setup();
        fs::write(
            tmp.path().join("config.toml"),
            "[toast]\nduration_ms = 2000\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.toast.duration_ms, 2000);
    }
}
