//! The page session: one object, constructed at startup, owning every piece
//! of view state for the life of the page.
//!
//! Host events come in through the `on_*`/`click_*` methods; network
//! completions are drained by `poll`. Route changes from UI actions are
//! written back to the location with replace semantics; route changes that
//! arrive from the location itself are applied without writing.

use std::sync::Arc;

use super::accordion::AccordionController;
use super::tabs::{ManifestStatus, TabController};
use crate::config::{Config, LoadMode};
use crate::content::{ArticleDescriptor, ContentCache};
use crate::error::LoadError;
use crate::net::Fetcher;
use crate::render::animator::{ScrollAnimator, ScrollFrame};
use crate::render::{Region, StyleOp, Surface};
use crate::route::{Location, RouteState, Router, View};

const MANIFEST_FAILED_NOTICE: &str = "Articles could not be loaded. Please try again later.";

/// Where a route being applied came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Startup or a tab click: landing on Articles with no article opens
    /// the most recent one.
    Landing,
    /// Back/forward or an edited fragment: the location is authoritative,
    /// so no article in the route means none open.
    External,
}

pub struct Session {
    fetcher: Arc<dyn Fetcher>,
    router: Router,
    tabs: TabController,
    /// Built once the manifest arrives.
    accordion: Option<AccordionController>,
    animator: ScrollAnimator,
    /// Route waiting for the manifest.
    pending_route: Option<(RouteState, Origin)>,
}

impl Session {
    /// Start the session from the current location and viewport.
    pub fn start(
        config: &Config,
        fetcher: Arc<dyn Fetcher>,
        location: &dyn Location,
        surface: &mut dyn Surface,
    ) -> Self {
        let tabs = TabController::new(Arc::clone(&fetcher), config.manifest_url());
        let mut session = Self {
            fetcher,
            router: Router::new(),
            tabs,
            accordion: None,
            animator: ScrollAnimator::new(surface.viewport_height(), config),
            pending_route: None,
        };

        if config.load_mode == LoadMode::Eager {
            session.tabs.load_manifest();
        }

        let route = session.router.observe(&location.fragment());
        log::info!("session start at {:?}", route);
        session.apply_route(route, Origin::Landing, surface);
        session
    }

    pub fn route(&self) -> &RouteState {
        self.router.current()
    }

    pub fn active_view(&self) -> View {
        self.tabs.active()
    }

    pub fn manifest_status(&self) -> ManifestStatus {
        self.tabs.manifest_status()
    }

    pub fn manifest_error(&self) -> Option<&str> {
        self.tabs.manifest_error()
    }

    pub fn accordion(&self) -> Option<&AccordionController> {
        self.accordion.as_ref()
    }

    pub fn articles(&self) -> &[ArticleDescriptor] {
        self.accordion
            .as_ref()
            .map(AccordionController::articles)
            .unwrap_or(&[])
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    /// Whether any network work is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.tabs.manifest_status() == ManifestStatus::Loading
            || self.accordion.as_ref().is_some_and(|a| a.has_pending())
    }

    // ── UI actions ──────────────────────────────────────────────────────────

    /// Tab click.
    pub fn click_tab(
        &mut self,
        view: View,
        location: &mut dyn Location,
        surface: &mut dyn Surface,
    ) {
        let route = match view {
            View::Projects => RouteState::projects(),
            View::Articles => RouteState::articles(
                self.accordion
                    .as_ref()
                    .and_then(|a| a.open_id())
                    .map(str::to_string),
            ),
        };
        self.router.navigate(route.clone(), location);
        self.apply_route(route, Origin::Landing, surface);
    }

    /// Article header click.
    pub fn click_article(
        &mut self,
        id: &str,
        location: &mut dyn Location,
        surface: &mut dyn Surface,
    ) {
        let Some(accordion) = self.accordion.as_mut() else {
            return;
        };
        if !accordion.contains(id) {
            log::warn!("click on unknown article `{}`", id);
            return;
        }
        let open = accordion.toggle(id, surface);
        let route = RouteState::articles(open.then(|| id.to_string()));
        self.router.navigate(route, location);
    }

    // ── Host notifications ──────────────────────────────────────────────────

    /// The location changed outside the app (back/forward, edited URL).
    pub fn on_location_change(&mut self, fragment: &str, surface: &mut dyn Surface) {
        let route = self.router.observe(fragment);
        log::info!("location changed to {:?}", route);
        self.apply_route(route, Origin::External, surface);
    }

    /// Scroll notification; coalesced until the next frame.
    pub fn on_scroll(&mut self) -> bool {
        self.animator.on_scroll()
    }

    /// Display refresh.
    pub fn on_frame(&mut self, surface: &mut dyn Surface) -> Option<ScrollFrame> {
        self.animator.on_frame(surface)
    }

    /// A height transition on `region` finished.
    pub fn on_transition_end(&mut self, region: &Region, surface: &mut dyn Surface) {
        if let (Region::Panel(id), Some(accordion)) = (region, self.accordion.as_mut()) {
            accordion.on_transition_end(id, surface);
        }
    }

    /// Drain finished network work. Returns `true` if anything changed.
    pub fn poll(&mut self, surface: &mut dyn Surface) -> bool {
        let mut changed = false;

        if let Some(result) = self.tabs.poll_manifest() {
            changed = true;
            self.on_manifest(result, surface);
        }

        if let Some(accordion) = self.accordion.as_mut() {
            changed |= !accordion.poll_content(surface).is_empty();
        }
        changed
    }

    // ── internals ───────────────────────────────────────────────────────────

    /// Manifest arrived: build the accordion, then apply the waiting route.
    fn on_manifest(
        &mut self,
        result: Result<Vec<ArticleDescriptor>, LoadError>,
        surface: &mut dyn Surface,
    ) {
        let articles = match result {
            Ok(articles) => articles,
            Err(e) => {
                log::warn!("articles unavailable: {}", e);
                self.pending_route = None;
                surface.apply(StyleOp::SetNotice {
                    region: Region::ArticlesPanel,
                    text: Some(MANIFEST_FAILED_NOTICE.to_string()),
                });
                return;
            }
        };

        // A successful manifest fetch implies a valid manifest url.
        let Some(base) = self.tabs.manifest_url().cloned() else {
            return;
        };
        let cache = ContentCache::new(Arc::clone(&self.fetcher), base);
        surface.apply(StyleOp::SetNotice {
            region: Region::ArticlesPanel,
            text: None,
        });
        self.accordion = Some(AccordionController::new(articles, cache, surface));

        if let Some((route, origin)) = self.pending_route.take() {
            if self.tabs.active() == View::Articles {
                self.apply_articles(route.article_id.as_deref(), origin, surface);
            }
        }
    }

    fn apply_route(&mut self, route: RouteState, origin: Origin, surface: &mut dyn Surface) {
        self.tabs.select(route.view, surface);

        if route.view != View::Articles {
            self.pending_route = None;
            return;
        }
        if self.accordion.is_none() {
            // A failed manifest is final; its notice is already showing.
            if self.tabs.manifest_status() != ManifestStatus::Failed {
                self.pending_route = Some((route, origin));
            }
            return;
        }
        self.apply_articles(route.article_id.as_deref(), origin, surface);
    }

    fn apply_articles(
        &mut self,
        article_id: Option<&str>,
        origin: Origin,
        surface: &mut dyn Surface,
    ) {
        let Some(accordion) = self.accordion.as_mut() else {
            return;
        };
        match (article_id, origin) {
            (Some(id), _) if accordion.contains(id) => {
                accordion.open_by_slug(id, surface);
            }
            (Some(id), Origin::Landing) => {
                log::warn!("no article `{}`, opening most recent", id);
                accordion.expand_most_recent(surface);
            }
            (Some(id), Origin::External) => {
                log::warn!("no article `{}`", id);
            }
            (None, Origin::Landing) => {
                accordion.expand_most_recent(surface);
            }
            (None, Origin::External) => {
                accordion.close_all(surface);
            }
        }
    }
}
