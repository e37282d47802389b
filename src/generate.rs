//! HTML site generation.
//!
//! Stage 2 of the folio build pipeline. Takes the manifest from the scan
//! stage, loads and validates every content file, and renders the final
//! single-page site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # The whole site, one page
//! ├── data/
//! │   └── projects.json          # Project index for the runtime script
//! └── content/                   # Non-markdown content files, copied
//!     ├── assets/
//!     └── projects/shots/
//! ```
//!
//! Every project's modal markup is emitted into an inert `<template>`
//! element; the runtime script clones it on open, so the page works
//! without any client-side fetching of markdown.
//!
//! ## Validation
//!
//! Generation is strict where scanning was lenient: a project with
//! invalid frontmatter stops the build with a diagnostic naming every
//! problem in the file.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: layout, themes, carousel and modal styles
//! - `static/app.js`: filtering, modal/history sync, carousel, theme
//!
//! Runtime tunables (carousel delays, toast duration, fallback images)
//! travel as `data-` attributes on `<body>`, so the script never needs a
//! separate config fetch.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::SiteConfig;
use crate::frontmatter;
use crate::loader::{ContentLoader, LoadError};
use crate::markdown::{self, MarkdownImage};
use crate::project::{ProjectFrontmatter, ProjectRecord, ValidationError};
use crate::scan::Manifest;
use crate::sections::{
    self, Certification, ExperienceEntry, Intro, Meta, SkillGroup,
};
use crate::state::filter;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/app.js");

/// What the generate stage produced, for reporting.
#[derive(Debug)]
pub struct GenerateSummary {
    pub projects: usize,
    pub slides: usize,
    pub assets_copied: usize,
    pub output_dir: String,
}

/// Everything the page renderer needs, loaded and validated.
#[derive(Debug)]
struct SiteData {
    meta: Meta,
    intro: Intro,
    skills: Vec<SkillGroup>,
    experience: Vec<ExperienceEntry>,
    certifications: Vec<Certification>,
    projects: Vec<ProjectView>,
    tags: BTreeSet<String>,
}

/// One project ready to render: validated metadata, carousel slides, and
/// the prose body as HTML.
#[derive(Debug)]
struct ProjectView {
    data: ProjectFrontmatter,
    slides: Vec<MarkdownImage>,
    body_html: String,
}

pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let mut loader = ContentLoader::new(source_root);
    let site = load_site(&manifest, &mut loader)?;

    fs::create_dir_all(output_dir)?;

    let page = render_page(&site, &manifest.config);
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let data_dir = output_dir.join("data");
    fs::create_dir_all(&data_dir)?;
    fs::write(
        data_dir.join("projects.json"),
        serde_json::to_string_pretty(&manifest.projects)?,
    )?;

    let assets_copied = copy_content_assets(source_root, &output_dir.join("content"))?;

    Ok(GenerateSummary {
        projects: site.projects.len(),
        slides: site.projects.iter().map(|p| p.slides.len()).sum(),
        assets_copied,
        output_dir: output_dir.display().to_string(),
    })
}

/// Load every section and project named by the manifest. Projects are
/// validated strictly here; the first invalid file aborts with a
/// diagnostic listing all of its problems.
fn load_site(manifest: &Manifest, loader: &mut ContentLoader) -> Result<SiteData, GenerateError> {
    let meta = sections::parse_meta(loader.load("meta.md")?);
    let intro = sections::parse_intro(loader.load("intro.md")?);
    let skills = sections::parse_skills(loader.load("skills.md")?);
    let experience = sections::parse_experience(loader.load("experience.md")?);
    let certifications = sections::parse_certifications(loader.load("certifications.md")?);

    let mut projects = Vec::new();
    for entry in &manifest.projects {
        let rel = format!("projects/{}.md", entry.id);
        let content = loader.load(&rel)?.to_string();
        let doc = frontmatter::parse(&content);
        let record = ProjectRecord {
            data: ProjectFrontmatter::from_frontmatter(&doc.data, &rel)?,
            // Image srcs in the body are relative to the markdown file; the
            // generated page lives at the site root
            body: markdown::resolve_image_paths(&doc.body, &format!("content/{rel}")),
        };
        let slides = markdown::extract_images(&record.body);
        let body_html = markdown::render_body_html(&record.body);

        projects.push(ProjectView {
            data: record.data,
            slides,
            body_html,
        });
    }

    let tags = filter::collect_tags(&manifest.projects);

    Ok(SiteData {
        meta,
        intro,
        skills,
        experience,
        certifications,
        projects,
        tags,
    })
}

/// Copy every non-markdown content file into the output, preserving the
/// directory layout. Returns the number of files copied.
fn copy_content_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in walkdir::WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if name.starts_with('.') || name == "config.toml" {
            continue;
        }
        if path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
        {
            continue;
        }
        let rel = path.strip_prefix(src).expect("walked under src");
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
        copied += 1;
    }
    Ok(copied)
}

/// Resolve a content-root-relative asset path for the generated page.
/// Remote and absolute srcs pass through; empty paths get the fallback.
fn resolve_asset(path: &str, fallback: &str) -> String {
    let path = if path.is_empty() { fallback } else { path };
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("content/{path}")
    }
}

/// Pick an icon class for a project link from its label.
fn link_icon(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("play store") || label.contains("playstore") {
        "fa-brands fa-google-play"
    } else if label.contains("app store") || label.contains("appstore") {
        "fa-brands fa-apple"
    } else if label.contains("video") {
        "fa-solid fa-video"
    } else if label.contains("repo") || label.contains("source") || label.contains("github") {
        "fa-brands fa-git-alt"
    } else if label.contains("itch") {
        "fa-brands fa-itch-io"
    } else {
        "fa-solid fa-link"
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_page(site: &SiteData, config: &SiteConfig) -> Markup {
    let title = site
        .meta
        .title
        .clone()
        .unwrap_or_else(|| site.intro.heading.clone());
    let fallback_image = resolve_asset("", &config.assets.fallback_image);
    let fallback_cert_icon = resolve_asset("", &config.assets.fallback_cert_icon);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = &site.meta.description {
                    meta name="description" content=(description);
                }
                title { (title) }
                link rel="stylesheet"
                    href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css";
                style { (PreEscaped(CSS)) }
            }
            body
                data-autoplay-delay=(config.carousel.autoplay_delay_ms)
                data-resume-delay=(config.carousel.resume_delay_ms)
                data-swipe-threshold=(config.carousel.swipe_threshold_px)
                data-toast-duration=(config.toast.duration_ms)
                data-fallback-image=(fallback_image)
            {
                (render_header(&title))
                main {
                    (render_intro(&site.intro))
                    (render_projects(site, &config.assets.fallback_image))
                    (render_skills(&site.skills))
                    (render_experience(&site.experience))
                    (render_certifications(&site.certifications, &fallback_cert_icon))
                }
                @for project in &site.projects {
                    (render_project_template(project, &config.assets.fallback_image))
                }
                (render_modal_root())
                div #toast .toast hidden {}
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn render_header(title: &str) -> Markup {
    html! {
        header.site-header {
            span.site-title { (title) }
            button #theme-toggle .theme-toggle aria-label="Toggle theme" {
                i.fa-solid.fa-moon aria-hidden="true" {}
            }
        }
    }
}

fn render_intro(intro: &Intro) -> Markup {
    html! {
        section #intro .hero {
            h1 { (intro.heading) }
            p.tagline { (intro.tagline) }
            @if !intro.contacts.is_empty() {
                div.contact-row {
                    @for contact in &intro.contacts {
                        a.contact-link href=(contact.href) target="_blank" rel="noopener" {
                            i class=(contact.icon) aria-hidden="true" {}
                            span { (contact.label) }
                        }
                    }
                }
            }
            @if !intro.downloads.is_empty() {
                div.download-row {
                    @for download in &intro.downloads {
                        a.download-btn href=(download.href) download {
                            i.fa-solid.fa-download aria-hidden="true" {}
                            span { (download.label) }
                        }
                    }
                }
            }
        }
    }
}

fn render_projects(site: &SiteData, fallback_image: &str) -> Markup {
    html! {
        section #projects {
            h2 { "Projects" }
            (render_filter_bar(&site.tags))
            div.project-grid {
                @for project in &site.projects {
                    (render_project_card(project, fallback_image))
                }
            }
        }
    }
}

fn render_filter_bar(tags: &BTreeSet<String>) -> Markup {
    html! {
        nav.filter-bar aria-label="Filter projects by technology" {
            button.filter-btn.active data-tag=(filter::ALL) { (filter::ALL) }
            @for tag in tags {
                button.filter-btn data-tag=(tag) { (tag) }
            }
        }
    }
}

fn render_project_card(project: &ProjectView, fallback_image: &str) -> Markup {
    let data = &project.data;
    let thumbnail = resolve_asset(&data.thumbnail, fallback_image);
    html! {
        article.project-card data-project=(data.id) data-tech=(data.tech.join(",")) {
            img.card-thumb src=(thumbnail) alt=(data.title) loading="lazy";
            div.card-body {
                h3 { (data.title) }
                p.card-summary { (data.summary) }
                div.card-tags {
                    @for tag in &data.tech {
                        span.tag { (tag) }
                    }
                }
            }
        }
    }
}

/// The modal content for one project, emitted as an inert template that
/// the runtime script clones on open.
fn render_project_template(project: &ProjectView, fallback_image: &str) -> Markup {
    let data = &project.data;
    html! {
        template id={ "project-" (data.id) } {
            div.modal-project {
                (render_carousel(project, fallback_image))
                div.project-info {
                    h2 { (data.title) }
                    div.card-tags {
                        @for tag in &data.tech {
                            span.tag { (tag) }
                        }
                    }
                    div.project-body {
                        (PreEscaped(project.body_html.clone()))
                    }
                    @if !data.links.is_empty() {
                        div.project-links {
                            @for (label, href) in &data.links {
                                a.project-link href=(href) target="_blank" rel="noopener" {
                                    i class=(link_icon(label)) aria-hidden="true" {}
                                    span { (label) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_carousel(project: &ProjectView, fallback_image: &str) -> Markup {
    let data = &project.data;
    // A project with no screenshots still gets one slide so the layout holds
    let fallback_slide = [MarkdownImage {
        src: String::new(),
        caption: String::new(),
    }];
    let slides: &[MarkdownImage] = if project.slides.is_empty() {
        &fallback_slide
    } else {
        &project.slides
    };
    let multi = slides.len() > 1;

    html! {
        div.carousel data-count=(slides.len()) {
            div.carousel-track {
                @for (idx, slide) in slides.iter().enumerate() {
                    figure.carousel-slide data-index=(idx) {
                        img src=(resolve_asset(&slide.src, fallback_image))
                            alt=(if slide.caption.is_empty() { &data.title } else { &slide.caption })
                            loading="lazy";
                        @if !slide.caption.is_empty() {
                            figcaption { (slide.caption) }
                        }
                    }
                }
            }
            button.carousel-fullscreen aria-label="Toggle fullscreen" {
                i.fa-solid.fa-expand aria-hidden="true" {}
            }
            @if multi {
                button.carousel-prev aria-label="Previous image" {
                    i.fa-solid.fa-chevron-left aria-hidden="true" {}
                }
                button.carousel-next aria-label="Next image" {
                    i.fa-solid.fa-chevron-right aria-hidden="true" {}
                }
                div.carousel-dots {
                    @for idx in 0..slides.len() {
                        button.carousel-dot data-index=(idx) aria-label={ "Image " (idx + 1) } {}
                    }
                }
            }
        }
    }
}

fn render_skills(groups: &[SkillGroup]) -> Markup {
    html! {
        section #skills {
            h2 { "Skills" }
            div.skill-groups {
                @for group in groups {
                    div.skill-group {
                        h3 { (group.category) }
                        div.pills {
                            @for skill in &group.skills {
                                span.pill { (skill) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_experience(entries: &[ExperienceEntry]) -> Markup {
    html! {
        section #experience {
            h2 { "Experience" }
            div.timeline {
                @for entry in entries {
                    article.timeline-entry.current[entry.current] {
                        h3 { (entry.heading) }
                        div.entry-body {
                            (PreEscaped(entry.description_html.clone()))
                        }
                    }
                }
            }
        }
    }
}

fn render_certifications(certs: &[Certification], fallback_icon: &str) -> Markup {
    html! {
        section #certifications {
            h2 { "Certifications" }
            div.cert-grid {
                @for cert in certs {
                    article.cert-card {
                        img.cert-icon
                            src=(cert.icon.as_deref().map(|i| resolve_asset(i, "")).unwrap_or_else(|| fallback_icon.to_string()))
                            alt=(cert.title);
                        div.cert-body {
                            h3 { (cert.title) }
                            p.cert-meta { (cert.meta) }
                            @if !cert.skills.is_empty() {
                                div.pills {
                                    @for skill in &cert.skills {
                                        span.pill { (skill) }
                                    }
                                }
                            }
                            div.cert-links {
                                @if let Some(credential) = &cert.credential {
                                    a href=(credential.href) target="_blank" rel="noopener" {
                                        (credential.label)
                                    }
                                }
                                @if let Some(pdf) = &cert.pdf {
                                    a href=(pdf.href) target="_blank" rel="noopener" {
                                        (pdf.label)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_modal_root() -> Markup {
    html! {
        div #modal .modal hidden {
            div.modal-backdrop {}
            div.modal-dialog role="dialog" aria-modal="true" {
                button.modal-close aria-label="Close" { "×" }
                div.modal-content {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
