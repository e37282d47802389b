//! Browser-side behavior as DOM-free state machines.
//!
//! The generated site is interactive: the grid filters by tag, the project
//! modal synchronizes with the URL and browser history, the carousel
//! autoplays, and the theme toggle persists a preference. The shipped
//! runtime script is deliberately thin glue; the behavior it implements is
//! specified here, as plain state machines over small abstractions
//! ([`modal::History`], [`theme::ThemeStore`], explicit `now` timestamps),
//! so every transition is unit-testable without a document.
//!
//! Shared mutable state lives in fields of these controllers, never in
//! free-standing globals, and URL-derived state is always rederived from
//! the current query rather than trusted from memory.

pub mod carousel;
pub mod filter;
pub mod modal;
pub mod theme;
pub mod toast;
