//! Modal/URL synchronization.
//!
//! The project modal's open/closed state is bound to the `project` query
//! parameter. The controller never trusts an in-memory flag across a
//! navigation: on every history event it rederives the desired state from
//! the current URL, so the two always agree after a synchronization pass.
//!
//! History discipline:
//!
//! - a card click **pushes** an entry marked with the project id, so the
//!   browser back button closes the modal and forward reopens it
//! - opens driven by the URL itself (initial load, back/forward) never
//!   create entries
//! - a UI close (button, backdrop, Escape) navigates back only when the
//!   current entry is the one pushed for this project; a modal opened from
//!   a direct link instead strips the parameter via replace, leaving
//!   history depth alone
//! - an unknown project id produces one notification, a cleaned URL, and a
//!   closed modal
//!
//! The one subtlety is reentrancy: when a back/forward navigation closes
//! the modal, the UI teardown runs the same close path a user click would,
//! which must not mutate history a second time. A sync-in-progress flag
//! guards that path.

use std::collections::{BTreeMap, BTreeSet};

/// URL query parameters, decoded.
pub type Query = BTreeMap<String, String>;

const PROJECT_PARAM: &str = "project";

/// The slice of browser history the controller needs. The runtime script
/// backs this with `location`/`history`; tests use an in-memory stack.
pub trait History {
    /// Query parameters of the current entry.
    fn query(&self) -> Query;
    /// The project id this entry was pushed for, if it was pushed by
    /// [`ModalController::open_project`] (the `history.state` marker).
    fn pushed_project(&self) -> Option<String>;
    /// Push a new entry marked as pushed for `project`.
    fn push(&mut self, query: Query, project: &str);
    /// Replace the current entry (clears any pushed marker).
    fn replace(&mut self, query: Query);
    /// Navigate one entry back. The host delivers a popstate afterwards.
    fn back(&mut self);
}

/// Owns the modal open/closed state and its agreement with the URL.
#[derive(Debug)]
pub struct ModalController<H: History> {
    history: H,
    known: BTreeSet<String>,
    open: Option<String>,
    /// Set while a URL-driven pass is applying state, so the UI close path
    /// doesn't mutate history underneath it.
    syncing: bool,
    notices: Vec<String>,
}

impl<H: History> ModalController<H> {
    pub fn new(history: H, known: BTreeSet<String>) -> Self {
        Self {
            history,
            known,
            open: None,
            syncing: false,
            notices: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Notifications queued since the last call (unknown project ids).
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Open from a card click: push a marked history entry, then open.
    pub fn open_project(&mut self, id: &str) -> bool {
        if !self.known.contains(id) {
            return false;
        }
        let mut query = self.history.query();
        query.insert(PROJECT_PARAM.to_string(), id.to_string());
        self.history.push(query, id);
        self.open = Some(id.to_string());
        true
    }

    /// Rederive modal state from the current URL. Runs on initial load and
    /// on every popstate; never creates history entries.
    pub fn sync_from_url(&mut self) {
        let query = self.history.query();
        match query.get(PROJECT_PARAM) {
            None => {
                if self.open.is_some() {
                    self.syncing = true;
                    self.close();
                    self.syncing = false;
                }
            }
            Some(id) if self.known.contains(id) => {
                self.open = Some(id.clone());
            }
            Some(id) => {
                self.notices.push(format!("Project not found: {id}"));
                let mut cleaned = query.clone();
                cleaned.remove(PROJECT_PARAM);
                self.history.replace(cleaned);
                if self.open.is_some() {
                    self.syncing = true;
                    self.close();
                    self.syncing = false;
                }
            }
        }
    }

    /// Browser back/forward.
    pub fn on_popstate(&mut self) {
        self.sync_from_url();
    }

    /// Close from the UI: close button, backdrop click, or Escape.
    ///
    /// If the current entry was pushed for this project, navigate back so
    /// forward can reopen it. A direct-link open has no matching push, so
    /// the parameter is stripped in place instead. When a URL-driven close
    /// is already underway, history is left exactly as the navigation put
    /// it.
    pub fn close(&mut self) {
        let Some(closing) = self.open.take() else {
            return;
        };
        if self.syncing {
            return;
        }
        if self.history.pushed_project().as_deref() == Some(closing.as_str()) {
            self.history.back();
        } else {
            let mut query = self.history.query();
            query.remove(PROJECT_PARAM);
            self.history.replace(query);
        }
    }
}
