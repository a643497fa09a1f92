//! In-memory host doubles shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use url::Url;

use crate::content::{parse_manifest, ArticleDescriptor, ContentCache};
use crate::error::FetchError;
use crate::net::Fetcher;
use crate::render::{Height, Rect, Region, StyleOp, Surface};
use crate::route::Location;

/// Manifest URL of the fake site.
pub const BASE: &str = "http://site.test/articles/index.json";
const SITE_DIR: &str = "http://site.test/articles/";

pub const MANIFEST: &str = r#"[
    {"title": "Newest", "author": "Sam", "date": "June 1, 2024", "tags": ["rust"], "file": "newest.md"},
    {"title": "My Post", "author": "Sam", "date": "May 2, 2024", "tags": ["web", "notes"], "file": "my-post.md"},
    {"title": "Oldest", "author": "Sam", "date": "Jan 3, 2020", "tags": [], "file": "oldest.md"}
]"#;

pub fn manifest_articles() -> Vec<ArticleDescriptor> {
    parse_manifest(MANIFEST).unwrap()
}

pub fn article(id: &str) -> ArticleDescriptor {
    ArticleDescriptor {
        id: id.to_string(),
        title: id.to_string(),
        author: "Sam".to_string(),
        date: "today".to_string(),
        tags: Vec::new(),
        source_ref: format!("{}.md", id),
    }
}

/// Serves documents relative to `SITE_DIR` and counts every request.
/// Unknown documents fail with a 404. Held documents block their fetch
/// until released.
pub struct CountingFetcher {
    docs: HashMap<String, String>,
    counts: Mutex<HashMap<String, usize>>,
    held: Mutex<HashSet<String>>,
    released: Condvar,
}

impl CountingFetcher {
    pub fn new() -> Self {
        Self {
            docs: HashMap::new(),
            counts: Mutex::new(HashMap::new()),
            held: Mutex::new(HashSet::new()),
            released: Condvar::new(),
        }
    }

    /// Manifest plus a body for every article in it.
    pub fn with_site() -> Self {
        Self::new()
            .with_doc("index.json", MANIFEST)
            .with_doc("newest.md", "---\ntitle: Newest\n---\n# Newest\n\nFresh.")
            .with_doc("my-post.md", "# My post\n\nSome *text*.")
            .with_doc("oldest.md", "# Oldest\n\nAncient.")
    }

    pub fn with_doc(mut self, name: &str, body: &str) -> Self {
        self.docs.insert(name.to_string(), body.to_string());
        self
    }

    /// Make fetches of `name` block until `release(name)`.
    pub fn holding(self, name: &str) -> Self {
        self.held.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn release(&self, name: &str) {
        self.held.lock().unwrap().remove(name);
        self.released.notify_all();
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.lock().unwrap().values().sum()
    }
}

impl Fetcher for CountingFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let name = url
            .as_str()
            .strip_prefix(SITE_DIR)
            .unwrap_or(url.as_str())
            .to_string();
        *self.counts.lock().unwrap().entry(name.clone()).or_insert(0) += 1;
        let mut held = self.held.lock().unwrap();
        while held.contains(&name) {
            held = self.released.wait(held).unwrap();
        }
        drop(held);
        self.docs.get(&name).cloned().ok_or(FetchError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}

/// Poll `done` until it returns true; panics after five seconds.
pub fn wait_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out waiting for background work");
        std::thread::sleep(Duration::from_millis(1));
    }
}

pub fn drain_cache(cache: &mut ContentCache) -> Vec<String> {
    let mut completed = Vec::new();
    wait_until(|| {
        completed.extend(cache.poll());
        !cache.has_pending()
    });
    completed
}

/// Surface that records every op and keeps the resulting style state.
pub struct RecordingSurface {
    pub viewport_height: f32,
    pub scroll_y: f32,
    pub ops: Vec<StyleOp>,
    rects: HashMap<Region, Rect>,
    content_heights: HashMap<Region, f32>,
    classes: HashSet<(Region, &'static str)>,
    heights: HashMap<Region, Height>,
    notices: HashMap<Region, String>,
}

impl RecordingSurface {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height,
            scroll_y: 0.0,
            ops: Vec::new(),
            rects: HashMap::new(),
            content_heights: HashMap::new(),
            classes: HashSet::new(),
            heights: HashMap::new(),
            notices: HashMap::new(),
        }
    }

    pub fn set_rect(&mut self, region: Region, rect: Rect) {
        self.rects.insert(region, rect);
    }

    pub fn set_content_height(&mut self, region: Region, height: f32) {
        self.content_heights.insert(region, height);
    }

    pub fn has_class(&self, region: &Region, class: &'static str) -> bool {
        self.classes.contains(&(region.clone(), class))
    }

    pub fn last_height(&self, region: &Region) -> Option<Height> {
        self.heights.get(region).copied()
    }

    pub fn notice(&self, region: &Region) -> Option<&str> {
        self.notices.get(region).map(String::as_str)
    }
}

impl Surface for RecordingSurface {
    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn rect(&self, region: &Region) -> Option<Rect> {
        self.rects.get(region).copied()
    }

    fn content_height(&self, region: &Region) -> Option<f32> {
        self.content_heights.get(region).copied()
    }

    fn apply(&mut self, op: StyleOp) {
        match &op {
            StyleOp::SetClass { region, class, on } => {
                if *on {
                    self.classes.insert((region.clone(), *class));
                } else {
                    self.classes.remove(&(region.clone(), *class));
                }
            }
            StyleOp::SetHeight { region, height } => {
                self.heights.insert(region.clone(), *height);
            }
            StyleOp::SetNotice { region, text } => match text {
                Some(text) => {
                    self.notices.insert(region.clone(), text.clone());
                }
                None => {
                    self.notices.remove(region);
                }
            },
            StyleOp::SetTop { .. } | StyleOp::SetOpacity { .. } => {}
        }
        self.ops.push(op);
    }
}

/// Location that remembers every write.
pub struct MemoryLocation {
    fragment: String,
    pub writes: Vec<String>,
}

impl MemoryLocation {
    pub fn new(fragment: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
            writes: Vec::new(),
        }
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
        self.writes.push(fragment.to_string());
    }
}
