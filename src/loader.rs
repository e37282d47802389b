//! Cached markdown loading.
//!
//! Every content file is read at most once per build, keyed by its path
//! relative to the content root. Sections and projects both go through the
//! same loader, so a file referenced twice costs one read.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Reads content files relative to a root directory, caching by path.
#[derive(Debug)]
pub struct ContentLoader {
    root: PathBuf,
    cache: HashMap<String, String>,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Load a file by content-root-relative path, reading it on first use.
    pub fn load(&mut self, rel: &str) -> Result<&str, LoadError> {
        if !self.cache.contains_key(rel) {
            let full = self.root.join(rel);
            let text = fs::read_to_string(&full).map_err(|source| LoadError::Io {
                path: rel.to_string(),
                source,
            })?;
            self.cache.insert(rel.to_string(), text);
        }
        Ok(self.cache.get(rel).expect("just inserted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("intro.md"), "# Hello").unwrap();

        let mut loader = ContentLoader::new(tmp.path());
        assert_eq!(loader.load("intro.md").unwrap(), "# Hello");
    }

    #[test]
    fn second_load_served_from_cache() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("intro.md");
        fs::write(&path, "original").unwrap();

        let mut loader = ContentLoader::new(tmp.path());
        assert_eq!(loader.load("intro.md").unwrap(), "original");

        // Mutating the file is not observed: the cache serves the first read
        fs::write(&path, "changed").unwrap();
        assert_eq!(loader.load("intro.md").unwrap(), "original");
    }

    #[test]
    fn missing_file_names_relative_path() {
        let tmp = TempDir::new().unwrap();
        let mut loader = ContentLoader::new(tmp.path());
        let err = loader.load("projects/ghost.md").unwrap_err();
        assert!(err.to_string().contains("projects/ghost.md"));
    }
}
