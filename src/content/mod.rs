//! Article content: manifest descriptors, markdown rendering and the
//! lazy per-article cache.

pub mod cache;
pub mod manifest;
pub mod markdown;

pub use cache::ContentCache;
pub use manifest::parse_manifest;

/// One manifest entry. Immutable once loaded; manifest order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDescriptor {
    /// Stable slug, derived from the source file name.
    pub id: String,
    pub title: String,
    pub author: String,
    /// Display-formatted, not necessarily sortable.
    pub date: String,
    pub tags: Vec<String>,
    /// Locator of the raw markdown, relative to the manifest.
    pub source_ref: String,
}

/// Rendered article body as stored by the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    pub id: String,
    pub rendered_body: String,
    pub loaded: bool,
    /// Set when fetching or rendering failed; `rendered_body` holds the notice.
    pub failed: bool,
}
