//! # folio
//!
//! A minimal static site generator for personal developer portfolios.
//! Markdown files are the data source: five section files shape the page,
//! and each file under `projects/` becomes a card in the project grid with
//! a screenshot carousel in its detail view.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! folio processes content through two independent stages joined by a JSON
//! manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (frontmatter → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site + projects.json)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Two-speed validation**: scanning is lenient so a half-written project
//!   never blocks an inventory; generation is strict so a broken project
//!   never ships.
//! - **Testability**: generation is a function of the manifest plus content
//!   files, so pipeline logic is exercised without a browser in sight.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — checks section files, reads project frontmatter, produces the manifest |
//! | [`generate`] | Stage 2 — loads and validates content, renders the site with Maud |
//! | [`config`] | `config.toml` loading and validation |
//! | [`frontmatter`] | Line-oriented frontmatter parser (scalars, lists, maps) |
//! | [`project`] | Project metadata: lenient manifest entries, strict validated records |
//! | [`sections`] | Typed extraction of the intro/skills/experience/certification formats |
//! | [`markdown`] | Image syntax handling, HTML rendering, and the flat block model |
//! | [`loader`] | Cached content file reading |
//! | [`state`] | Browser-side behavior as DOM-free, unit-tested state machines |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//!
//! # Design Decisions
//!
//! ## One Page, Inert Templates
//!
//! The whole site is a single `index.html`. Every project's modal markup is
//! pre-rendered into a `<template>` element at build time; the runtime
//! script clones it on open. Visitors never wait on a markdown fetch, and
//! the modal content is indexable HTML rather than client-rendered text.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and all
//! interpolation is auto-escaped.
//!
//! ## Behavior as State Machines
//!
//! The interactive parts of the page — tag filtering, the modal's URL and
//! history sync, the carousel's autoplay, the theme toggle — are specified
//! in [`state`] as plain Rust state machines over small abstractions
//! (a `History` trait, a `ThemeStore` trait, explicit `now` timestamps).
//! The shipped script is thin glue over the same transitions, and every
//! edge case (back/forward reentrancy, stale timers, unknown project ids)
//! has a unit test instead of a manual browser check.
//!
//! ## Frontmatter Without a YAML Dependency
//!
//! Project frontmatter is a small line-oriented grammar (scalars, string
//! lists, one level of maps) parsed by [`frontmatter`]. Full YAML would
//! accept far more than the content format means to allow; the tiny
//! grammar makes sloppy-but-unambiguous files (uneven indentation, quoted
//! or bare values) parse the same way everywhere.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod loader;
pub mod markdown;
pub mod output;
pub mod project;
pub mod scan;
pub mod sections;
pub mod state;
