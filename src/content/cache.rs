//! Lazy, one-shot article cache.
//!
//! Each article is fetched at most once per session. Fetching and rendering
//! run on a worker thread; results are handed back through a channel and
//! only ever written into the cache from `poll()`, on the UI thread.

use std::collections::HashMap;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use url::Url;

use super::markdown::{failure_notice, render_article};
use super::{ArticleContent, ArticleDescriptor};
use crate::net::Fetcher;

pub struct ContentCache {
    fetcher: Arc<dyn Fetcher>,
    /// Article locators resolve against this (the manifest URL).
    base: Url,
    pending: HashMap<String, (ArticleDescriptor, mpsc::Receiver<ArticleContent>)>,
    entries: HashMap<String, ArticleContent>,
    /// Loads that failed before a fetch could start; reported by the next `poll()`.
    failed_early: Vec<String>,
}

impl ContentCache {
    pub fn new(fetcher: Arc<dyn Fetcher>, base: Url) -> Self {
        Self {
            fetcher,
            base,
            pending: HashMap::new(),
            entries: HashMap::new(),
            failed_early: Vec::new(),
        }
    }

    /// Start loading `article` unless it is cached or already in flight.
    ///
    /// Returns `true` if a fetch was issued.
    pub fn ensure_loaded(&mut self, article: &ArticleDescriptor) -> bool {
        if self.entries.contains_key(&article.id) || self.pending.contains_key(&article.id) {
            log::debug!("Cache HIT: {}", article.id);
            return false;
        }

        let url = match self.base.join(&article.source_ref) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("bad locator `{}` for {}: {}", article.source_ref, article.id, e);
                self.entries.insert(article.id.clone(), failed_entry(article));
                self.failed_early.push(article.id.clone());
                return false;
            }
        };

        log::debug!("Cache MISS: {} -> {}", article.id, url);
        let (tx, rx) = mpsc::channel();
        let fetcher = Arc::clone(&self.fetcher);
        let descriptor = article.clone();

        std::thread::spawn(move || {
            let content = match fetcher.fetch(&url) {
                Ok(source) => ArticleContent {
                    id: descriptor.id.clone(),
                    rendered_body: render_article(&descriptor, &source),
                    loaded: true,
                    failed: false,
                },
                Err(e) => {
                    log::warn!("failed to load article {}: {}", descriptor.id, e);
                    failed_entry(&descriptor)
                }
            };
            let _ = tx.send(content);
        });

        self.pending.insert(article.id.clone(), (article.clone(), rx));
        true
    }

    /// Collect finished loads. Call once per frame. Returns the ids that
    /// completed (successfully or not) during this call.
    pub fn poll(&mut self) -> Vec<String> {
        let mut completed = std::mem::take(&mut self.failed_early);
        for (id, (descriptor, rx)) in &self.pending {
            match rx.try_recv() {
                Ok(content) => {
                    self.entries.insert(id.clone(), content);
                    completed.push(id.clone());
                }
                Err(TryRecvError::Disconnected) => {
                    log::warn!("article worker for {} exited without a result", id);
                    self.entries.insert(id.clone(), failed_entry(descriptor));
                    completed.push(id.clone());
                }
                Err(TryRecvError::Empty) => {}
            }
        }
        for id in &completed {
            self.pending.remove(id);
        }
        completed
    }

    pub fn get(&self, id: &str) -> Option<&ArticleContent> {
        self.entries.get(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Whether a later `poll()` still has completions to report.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty() || !self.failed_early.is_empty()
    }
}

/// Cached marker for a load that failed. Counts as loaded: never retried.
fn failed_entry(article: &ArticleDescriptor) -> ArticleContent {
    ArticleContent {
        id: article.id.clone(),
        rendered_body: failure_notice(article),
        loaded: true,
        failed: true,
    }
}
