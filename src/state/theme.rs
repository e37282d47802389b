//! Theme preference handling.
//!
//! Three-way preference: explicit light, explicit dark, or follow the
//! system. Only explicit choices are persisted; picking "system" removes
//! the stored key so a later change of OS setting takes effect without a
//! stale override.

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// What actually gets applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

const STORAGE_KEY: &str = "theme";

/// Persistent key-value store; backed by `localStorage` in the runtime and
/// a map in tests.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug)]
pub struct ThemeController<S: ThemeStore> {
    store: S,
}

impl<S: ThemeStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored preference; anything unrecognized counts as `System`.
    pub fn preference(&self) -> ThemePreference {
        match self.store.get(STORAGE_KEY).as_deref() {
            Some("light") => ThemePreference::Light,
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }

    pub fn set_preference(&mut self, pref: ThemePreference) {
        match pref {
            ThemePreference::Light => self.store.set(STORAGE_KEY, "light"),
            ThemePreference::Dark => self.store.set(STORAGE_KEY, "dark"),
            ThemePreference::System => self.store.remove(STORAGE_KEY),
        }
    }

    /// The theme to apply, given the OS-level dark-mode media query.
    pub fn effective(&self, system_prefers_dark: bool) -> Theme {
        match self.preference() {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System => {
                if system_prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        }
    }

    /// The header button: flips to the opposite of whatever is currently
    /// showing, always storing an explicit choice.
    pub fn toggle(&mut self, system_prefers_dark: bool) -> Theme {
        let next = match self.effective(system_prefers_dark) {
            Theme::Light => ThemePreference::Dark,
            Theme::Dark => ThemePreference::Light,
        };
        self.set_preference(next);
        self.effective(system_prefers_dark)
    }
}
