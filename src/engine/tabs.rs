//! Top-level view switching and the manifest load lifecycle.

use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use url::Url;

use crate::content::{parse_manifest, ArticleDescriptor};
use crate::error::LoadError;
use crate::net::Fetcher;
use crate::render::{Region, StyleOp, Surface, CLASS_ACTIVE, CLASS_SHOW_ARTICLES};
use crate::route::View;

type ManifestResult = Result<Vec<ArticleDescriptor>, LoadError>;

enum ManifestState {
    NotLoaded,
    Loading(mpsc::Receiver<ManifestResult>),
    Loaded,
    Failed(String),
}

/// Observable manifest lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

pub struct TabController {
    active: View,
    fetcher: Arc<dyn Fetcher>,
    manifest_url: Result<Url, LoadError>,
    manifest: ManifestState,
}

impl TabController {
    pub fn new(fetcher: Arc<dyn Fetcher>, manifest_url: Result<Url, LoadError>) -> Self {
        Self {
            active: View::Projects,
            fetcher,
            manifest_url,
            manifest: ManifestState::NotLoaded,
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn manifest_url(&self) -> Option<&Url> {
        self.manifest_url.as_ref().ok()
    }

    pub fn manifest_status(&self) -> ManifestStatus {
        match self.manifest {
            ManifestState::NotLoaded => ManifestStatus::NotLoaded,
            ManifestState::Loading(_) => ManifestStatus::Loading,
            ManifestState::Loaded => ManifestStatus::Loaded,
            ManifestState::Failed(_) => ManifestStatus::Failed,
        }
    }

    /// Reason the manifest failed, if it did.
    pub fn manifest_error(&self) -> Option<&str> {
        match &self.manifest {
            ManifestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Show `view`: exactly one active tab, `show-articles` on the body iff
    /// Articles. The first switch to Articles starts the manifest load.
    pub fn select(&mut self, view: View, surface: &mut dyn Surface) {
        self.active = view;
        for tab in [View::Projects, View::Articles] {
            surface.apply(StyleOp::SetClass {
                region: Region::Tab(tab),
                class: CLASS_ACTIVE,
                on: tab == view,
            });
        }
        surface.apply(StyleOp::SetClass {
            region: Region::Body,
            class: CLASS_SHOW_ARTICLES,
            on: view == View::Articles,
        });

        if view == View::Articles {
            self.load_manifest();
        }
    }

    /// Start fetching the manifest. No-op once a load has been started.
    pub fn load_manifest(&mut self) {
        if !matches!(self.manifest, ManifestState::NotLoaded) {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.manifest = ManifestState::Loading(rx);

        let url = match &self.manifest_url {
            Ok(url) => url.clone(),
            Err(e) => {
                // Reported through the same channel as a fetch failure.
                let _ = tx.send(Err(e.clone()));
                return;
            }
        };

        log::info!("loading manifest {}", url);
        let fetcher = Arc::clone(&self.fetcher);
        std::thread::spawn(move || {
            let result = fetcher
                .fetch(&url)
                .map_err(LoadError::from)
                .and_then(|json| parse_manifest(&json));
            let _ = tx.send(result);
        });
    }

    /// Take the manifest result once it arrives. Returns `None` while the
    /// load is still in flight, and on every call after the result was taken.
    pub fn poll_manifest(&mut self) -> Option<ManifestResult> {
        let ManifestState::Loading(rx) = &self.manifest else {
            return None;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Manifest(
                "manifest worker exited without a result".to_string(),
            )),
        };

        self.manifest = match &result {
            Ok(list) => {
                log::info!("manifest loaded: {} articles", list.len());
                ManifestState::Loaded
            }
            Err(e) => {
                log::warn!("manifest failed: {}", e);
                ManifestState::Failed(e.to_string())
            }
        };
        Some(result)
    }
}
