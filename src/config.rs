//! Site configuration module.
//!
//! Handles loading and validating `content/config.toml`. Config files are
//! sparse — override just the values you want:
//!
//! ```toml
//! # Only slow down the carousel
//! [carousel]
//! autoplay_delay_ms = 6000
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"     # Path to content directory (CLI can override)
//!
//! [carousel]
//! autoplay_delay_ms = 4000     # Time a slide stays up during autoplay
//! resume_delay_ms = 3000       # Pause after manual navigation before autoplay resumes
//! swipe_threshold_px = 30      # Minimum horizontal drag to count as a swipe
//!
//! [toast]
//! duration_ms = 3500           # How long transient notifications stay visible
//!
//! [assets]
//! fallback_image = "assets/images/fallback.png"       # Shown for broken thumbnails/slides
//! fallback_cert_icon = "assets/icons/certificate.png" # Shown for certifications without an icon
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults matching the stock portfolio. User
/// config files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory.
    #[serde(default = "default_content_root")]
    pub content_root: String,
    /// Carousel timing and gesture settings.
    pub carousel: CarouselConfig,
    /// Transient notification settings.
    pub toast: ToastConfig,
    /// Fallback asset paths.
    pub assets: AssetsConfig,
}

fn default_content_root() -> String {
    "content".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            carousel: CarouselConfig::default(),
            toast: ToastConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.autoplay_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_delay_ms must be non-zero".into(),
            ));
        }
        if self.carousel.resume_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.resume_delay_ms must be non-zero".into(),
            ));
        }
        if self.carousel.swipe_threshold_px == 0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold_px must be non-zero".into(),
            ));
        }
        if self.toast.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "toast.duration_ms must be non-zero".into(),
            ));
        }
        if self.assets.fallback_image.is_empty() {
            return Err(ConfigError::Validation(
                "assets.fallback_image must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Carousel timing and gesture settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds a slide stays up before autoplay advances.
    pub autoplay_delay_ms: u64,
    /// Milliseconds after a manual navigation before autoplay resumes.
    pub resume_delay_ms: u64,
    /// Minimum horizontal drag distance (px) to register a swipe.
    pub swipe_threshold_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 4000,
            resume_delay_ms: 3000,
            swipe_threshold_px: 30,
        }
    }
}

/// Transient notification settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastConfig {
    /// Milliseconds a toast stays visible before auto-dismissing.
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 3500 }
    }
}

/// Fallback asset paths, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Replacement for broken grid thumbnails and carousel slides.
    pub fallback_image: String,
    /// Replacement for certifications without an `![icon]` image.
    pub fallback_cert_icon: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            fallback_image: "assets/images/fallback.png".to_string(),
            fallback_cert_icon: "assets/icons/certificate.png".to_string(),
        }
    }
}

/// Load config from `config.toml` in the content root.
///
/// Uses defaults if the file doesn't exist. The loaded config is validated
/// before being returned.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option present and documented.
pub fn stock_config_toml() -> &'static str {
    r#"# folio site configuration
# All options are optional - the values below are the defaults.

# Path to the content directory (the CLI --source flag overrides this).
content_root = "content"

[carousel]
# Time a slide stays up during autoplay, in milliseconds.
autoplay_delay_ms = 4000
# Pause after manual navigation before autoplay resumes.
resume_delay_ms = 3000
# Minimum horizontal drag, in pixels, to count as a swipe.
swipe_threshold_px = 30

[toast]
# How long transient notifications stay visible.
duration_ms = 3500

[assets]
# Shown in place of broken thumbnails and carousel slides.
fallback_image = "assets/images/fallback.png"
# Shown for certifications without an icon image.
fallback_cert_icon = "assets/icons/certificate.png"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_stock_values() {
        let config = SiteConfig::default();
        assert_eq!(config.carousel.autoplay_delay_ms, 4000);
        assert_eq!(config.carousel.resume_delay_ms, 3000);
        assert_eq!(config.carousel.swipe_threshold_px, 30);
        assert_eq!(config.toast.duration_ms, 3500);
        assert_eq!(config.assets.fallback_image, "assets/images/fallback.png");
    }

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.content_root, "content");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[carousel]\nautoplay_delay_ms = 6000\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.carousel.autoplay_delay_ms, 6000);
        assert_eq!(config.carousel.resume_delay_ms, 3000);
        assert_eq!(config.toast.duration_ms, 3500);
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "autplay = 100\n").unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_delay_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[carousel]\nautoplay_delay_ms = 0\n",
        )
        .unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed.carousel.autoplay_delay_ms, 4000);
        assert_eq!(
            parsed.assets.fallback_cert_icon,
            SiteConfig::default().assets.fallback_cert_icon
        );
    }
}
