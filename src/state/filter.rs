//! The project grid filter engine.
//!
//! A filter is either the sentinel `All` or a non-empty set of technology
//! tags. The two are mutually exclusive: toggling a specific tag drops
//! `All`, toggling `All` drops every specific tag, and removing the last
//! specific tag reverts to `All`. The set round-trips through the `tech`
//! URL query parameter (absent means `All`).

use crate::project::ManifestEntry;
use std::collections::BTreeSet;

/// The sentinel tag shown as the first filter button.
pub const ALL: &str = "All";

/// The set of active technology filters. Never empty: the empty state is
/// represented by `All`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSet {
    All,
    Tags(BTreeSet<String>),
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet::All
    }
}

impl FilterSet {
    /// Derive the filter set from the `tech` query parameter value.
    ///
    /// Absent or empty means `All`. A crafted value containing the `All`
    /// sentinel also collapses to `All`.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return FilterSet::All;
        };
        let tags: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if tags.is_empty() || tags.contains(ALL) {
            FilterSet::All
        } else {
            FilterSet::Tags(tags)
        }
    }

    /// Encode back to a `tech` parameter value; `None` means the parameter
    /// should be absent.
    pub fn to_query(&self) -> Option<String> {
        match self {
            FilterSet::All => None,
            FilterSet::Tags(tags) => Some(tags.iter().cloned().collect::<Vec<_>>().join(",")),
        }
    }

    /// Toggle one filter button.
    pub fn toggle(&mut self, tag: &str) {
        if tag == ALL {
            *self = FilterSet::All;
            return;
        }
        let mut tags = match std::mem::take(self) {
            FilterSet::All => BTreeSet::new(),
            FilterSet::Tags(tags) => tags,
        };
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        *self = if tags.is_empty() {
            FilterSet::All
        } else {
            FilterSet::Tags(tags)
        };
    }

    /// Drop tags that don't occur in the manifest; collapses to `All` when
    /// nothing valid remains.
    pub fn retain_known(&mut self, known: &BTreeSet<String>) {
        if let FilterSet::Tags(tags) = self {
            tags.retain(|t| known.contains(t));
            if tags.is_empty() {
                *self = FilterSet::All;
            }
        }
    }

    /// Whether a filter button should render as active.
    pub fn is_active(&self, tag: &str) -> bool {
        match self {
            FilterSet::All => tag == ALL,
            FilterSet::Tags(tags) => tags.contains(tag),
        }
    }

    /// Whether a project with these tags is visible. OR semantics: any
    /// shared tag keeps the project in the grid.
    pub fn matches(&self, project_tags: &[String]) -> bool {
        match self {
            FilterSet::All => true,
            FilterSet::Tags(tags) => project_tags.iter().any(|t| tags.contains(t)),
        }
    }
}

/// All technology tags occurring in the manifest, deduplicated and sorted.
/// Drives the filter button row.
pub fn collect_tags(entries: &[ManifestEntry]) -> BTreeSet<String> {
    entries
        .iter()
        .flat_map(|e| e.tech.iter().cloned())
        .collect()
}
