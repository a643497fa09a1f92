//! Session configuration.
//!
//! Everything here is decided once at startup; the session never re-reads it.

use url::Url;

use crate::error::LoadError;

/// Logo top offset once fully scrolled (px from the top of the viewport).
pub const FINAL_LOGO_TOP: f32 = 50.0;

/// Distance before the bar's natural position at which it becomes sticky.
pub const STICKY_THRESHOLD: f32 = 20.0;

/// Extra spacing added to the placeholder beyond the bar's own height.
pub const STICKY_MARGIN: f32 = 20.0;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
const DEFAULT_MANIFEST_PATH: &str = "articles/index.json";

/// When the article manifest is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// On the first activation of the Articles view.
    #[default]
    Lazy,
    /// As soon as the session starts.
    Eager,
}

/// Which part of a section's box drives its opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Vertical centre of the bounding box. Fades symmetrically.
    #[default]
    Midpoint,
    /// Top edge only.
    TopEdge,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub manifest_path: String,
    pub load_mode: LoadMode,
    pub anchor: Anchor,
    /// Number of tracked content sections (`Region::Section(0..n)`).
    pub section_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            load_mode: LoadMode::Lazy,
            anchor: Anchor::Midpoint,
            section_count: 4,
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = path.into();
        self
    }

    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_section_count(mut self, count: usize) -> Self {
        self.section_count = count;
        self
    }

    /// Absolute URL of the manifest. Article locators resolve against it.
    pub fn manifest_url(&self) -> Result<Url, LoadError> {
        // A base without a trailing slash would drop its last segment on join.
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        let base = Url::parse(&base).map_err(|e| LoadError::BaseUrl(e.to_string()))?;
        base.join(&self.manifest_path)
            .map_err(|e| LoadError::BaseUrl(e.to_string()))
    }
}
