//! Article accordion: at most one panel open, content loaded on first open.
//!
//! Heights animate in two phases. Expanding pins the panel to its measured
//! content height and releases the constraint once the host reports the
//! transition finished, so content that grows later is never clipped.
//! Collapsing first pins the current height (an unconstrained box cannot be
//! transitioned) and then drives it to zero.

use std::collections::HashMap;

use crate::content::{ArticleContent, ArticleDescriptor, ContentCache};
use crate::render::{Height, Region, StyleOp, Surface};

/// Class flag on an open panel.
pub const CLASS_OPEN: &str = "open";

const ARTICLE_FAILED_NOTICE: &str = "This article failed to load.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelHeight {
    Collapsed,
    /// Transitioning towards `target`; released to `Auto` on completion.
    Expanding { target: f32 },
    /// Open with no height constraint.
    Open,
    Collapsing { from: f32 },
}

pub struct AccordionController {
    articles: Vec<ArticleDescriptor>,
    panels: HashMap<String, PanelHeight>,
    open: Option<String>,
    cache: ContentCache,
}

impl AccordionController {
    /// Build panels for `articles` in manifest order, all collapsed.
    pub fn new(
        articles: Vec<ArticleDescriptor>,
        cache: ContentCache,
        surface: &mut dyn Surface,
    ) -> Self {
        let mut panels = HashMap::with_capacity(articles.len());
        for article in &articles {
            panels.insert(article.id.clone(), PanelHeight::Collapsed);
            surface.apply(StyleOp::SetHeight {
                region: Region::Panel(article.id.clone()),
                height: Height::Px(0.0),
            });
        }
        Self {
            articles,
            panels,
            open: None,
            cache,
        }
    }

    pub fn articles(&self) -> &[ArticleDescriptor] {
        &self.articles
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Number of open panels; never more than one.
    pub fn open_count(&self) -> usize {
        usize::from(self.open.is_some())
    }

    pub fn panel(&self, id: &str) -> Option<PanelHeight> {
        self.panels.get(id).copied()
    }

    pub fn content(&self, id: &str) -> Option<&ArticleContent> {
        self.cache.get(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.cache.is_pending(id)
    }

    pub fn has_pending(&self) -> bool {
        self.cache.has_pending()
    }

    /// Open `id` if closed, close it if open. Opening closes whichever other
    /// panel is open. Returns whether `id` is open afterwards; unknown ids
    /// are ignored.
    pub fn toggle(&mut self, id: &str, surface: &mut dyn Surface) -> bool {
        let Some(index) = self.articles.iter().position(|a| a.id == id) else {
            log::warn!("toggle of unknown article `{}`", id);
            return false;
        };

        if self.is_open(id) {
            self.collapse(id, surface);
            self.open = None;
            return false;
        }

        if let Some(previous) = self.open.take() {
            self.collapse(&previous, surface);
        }
        self.open = Some(id.to_string());

        let article = self.articles[index].clone();
        self.cache.ensure_loaded(&article);
        self.expand(id, surface);
        true
    }

    /// Open `id` unless it already is.
    pub fn open_by_slug(&mut self, id: &str, surface: &mut dyn Surface) -> bool {
        if self.is_open(id) {
            return true;
        }
        self.toggle(id, surface)
    }

    /// Open the first (most recent) article if nothing is open.
    pub fn expand_most_recent(&mut self, surface: &mut dyn Surface) -> Option<String> {
        if self.open.is_some() {
            return None;
        }
        let first = self.articles.first()?.id.clone();
        self.toggle(&first, surface);
        Some(first)
    }

    /// Close the open panel, if any.
    pub fn close_all(&mut self, surface: &mut dyn Surface) {
        if let Some(id) = self.open.take() {
            self.collapse(&id, surface);
        }
    }

    /// Host notification that a panel's height transition finished.
    pub fn on_transition_end(&mut self, id: &str, surface: &mut dyn Surface) {
        let Some(state) = self.panels.get_mut(id) else {
            return;
        };
        match *state {
            PanelHeight::Expanding { .. } => {
                *state = PanelHeight::Open;
                surface.apply(StyleOp::SetHeight {
                    region: Region::Panel(id.to_string()),
                    height: Height::Auto,
                });
            }
            PanelHeight::Collapsing { .. } => {
                *state = PanelHeight::Collapsed;
            }
            PanelHeight::Collapsed | PanelHeight::Open => {}
        }
    }

    /// Drain finished content loads. Panels still expanding are retargeted
    /// to the new content height; failures get an inline notice.
    pub fn poll_content(&mut self, surface: &mut dyn Surface) -> Vec<String> {
        let completed = self.cache.poll();
        for id in &completed {
            let region = Region::Panel(id.clone());
            if self.cache.get(id).is_some_and(|c| c.failed) {
                surface.apply(StyleOp::SetNotice {
                    region: region.clone(),
                    text: Some(ARTICLE_FAILED_NOTICE.to_string()),
                });
            }
            if let Some(state) = self.panels.get_mut(id) {
                if let PanelHeight::Expanding { target } = state {
                    let measured = surface.content_height(&region).unwrap_or(*target);
                    *target = measured;
                    surface.apply(StyleOp::SetHeight {
                        region,
                        height: Height::Px(measured),
                    });
                }
            }
        }
        completed
    }

    fn expand(&mut self, id: &str, surface: &mut dyn Surface) {
        let region = Region::Panel(id.to_string());
        let target = surface.content_height(&region).unwrap_or(0.0);
        surface.apply(StyleOp::SetClass {
            region: region.clone(),
            class: CLASS_OPEN,
            on: true,
        });
        surface.apply(StyleOp::SetHeight {
            region,
            height: Height::Px(target),
        });
        self.panels
            .insert(id.to_string(), PanelHeight::Expanding { target });
    }

    fn collapse(&mut self, id: &str, surface: &mut dyn Surface) {
        let region = Region::Panel(id.to_string());
        let from = surface
            .rect(&region)
            .map(|r| r.height)
            .or_else(|| surface.content_height(&region))
            .unwrap_or(0.0);
        // Pin the current height before transitioning to zero.
        surface.apply(StyleOp::SetHeight {
            region: region.clone(),
            height: Height::Px(from),
        });
        surface.apply(StyleOp::SetHeight {
            region: region.clone(),
            height: Height::Px(0.0),
        });
        surface.apply(StyleOp::SetClass {
            region,
            class: CLASS_OPEN,
            on: false,
        });
        self.panels
            .insert(id.to_string(), PanelHeight::Collapsing { from });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use url::Url;

    use super::*;
    use crate::test_support::{
        article, manifest_articles, wait_until, CountingFetcher, RecordingSurface, BASE,
    };

    fn accordion(surface: &mut RecordingSurface) -> (AccordionController, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher::with_site());
        let cache = ContentCache::new(fetcher.clone(), Url::parse(BASE).unwrap());
        (
            AccordionController::new(manifest_articles(), cache, surface),
            fetcher,
        )
    }

    #[test]
    fn toggle_opens_then_closes() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        assert!(acc.toggle("newest", &mut s));
        assert!(acc.is_open("newest"));
        assert!(!acc.toggle("newest", &mut s));
        assert_eq!(acc.open_count(), 0);
    }

    #[test]
    fn opening_another_closes_the_first() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        acc.toggle("newest", &mut s);
        acc.toggle("my-post", &mut s);
        assert!(acc.is_open("my-post"));
        assert!(!acc.is_open("newest"));
        assert!(matches!(
            acc.panel("newest"),
            Some(PanelHeight::Collapsing { .. })
        ));
        assert!(matches!(
            acc.panel("my-post"),
            Some(PanelHeight::Expanding { .. })
        ));
    }

    #[test]
    fn expand_measures_then_releases_on_transition_end() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        let region = Region::Panel("newest".into());
        s.set_content_height(region.clone(), 240.0);
        s.ops.clear();

        acc.toggle("newest", &mut s);
        assert_eq!(
            s.last_height(&region),
            Some(Height::Px(240.0))
        );
        assert_eq!(acc.panel("newest"), Some(PanelHeight::Expanding { target: 240.0 }));

        acc.on_transition_end("newest", &mut s);
        assert_eq!(s.last_height(&region), Some(Height::Auto));
        assert_eq!(acc.panel("newest"), Some(PanelHeight::Open));
    }

    #[test]
    fn collapse_pins_current_height_first() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        let region = Region::Panel("newest".into());
        acc.toggle("newest", &mut s);
        acc.on_transition_end("newest", &mut s);
        s.set_rect(region.clone(), crate::render::Rect::new(100.0, 310.0));
        s.ops.clear();

        acc.toggle("newest", &mut s);
        let heights: Vec<Height> = s
            .ops
            .iter()
            .filter_map(|op| match op {
                StyleOp::SetHeight { region: r, height } if *r == region => Some(*height),
                _ => None,
            })
            .collect();
        assert_eq!(heights, vec![Height::Px(310.0), Height::Px(0.0)]);

        acc.on_transition_end("newest", &mut s);
        assert_eq!(acc.panel("newest"), Some(PanelHeight::Collapsed));
    }

    #[test]
    fn open_by_slug_is_idempotent() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, fetcher) = accordion(&mut s);
        assert!(acc.open_by_slug("my-post", &mut s));
        assert!(acc.open_by_slug("my-post", &mut s));
        assert!(acc.is_open("my-post"));
        wait_until(|| {
            acc.poll_content(&mut s);
            !acc.has_pending()
        });
        assert_eq!(fetcher.count("my-post.md"), 1);
    }

    #[test]
    fn expand_most_recent_only_when_nothing_open() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        assert_eq!(acc.expand_most_recent(&mut s), Some("newest".to_string()));
        acc.toggle("oldest", &mut s);
        assert_eq!(acc.expand_most_recent(&mut s), None);
        assert!(acc.is_open("oldest"));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, fetcher) = accordion(&mut s);
        assert!(!acc.toggle("nope", &mut s));
        assert_eq!(acc.open_count(), 0);
        assert_eq!(fetcher.total(), 0);
    }

    #[test]
    fn failed_article_gets_notice_and_siblings_are_unaffected() {
        let mut s = RecordingSurface::new(800.0);
        let fetcher = Arc::new(CountingFetcher::with_site());
        let cache = ContentCache::new(fetcher.clone(), Url::parse(BASE).unwrap());
        let mut list = manifest_articles();
        list.push(article("broken"));
        let mut acc = AccordionController::new(list, cache, &mut s);

        acc.toggle("broken", &mut s);
        wait_until(|| {
            acc.poll_content(&mut s);
            !acc.has_pending()
        });
        assert!(acc.content("broken").unwrap().failed);
        assert!(s.notice(&Region::Panel("broken".into())).is_some());

        acc.toggle("newest", &mut s);
        wait_until(|| {
            acc.poll_content(&mut s);
            !acc.has_pending()
        });
        assert!(!acc.content("newest").unwrap().failed);
        assert!(s.notice(&Region::Panel("newest".into())).is_none());
    }

    #[test]
    fn unresolvable_locator_still_gets_notice() {
        let mut s = RecordingSurface::new(800.0);
        let fetcher = Arc::new(CountingFetcher::with_site());
        let cache = ContentCache::new(fetcher.clone(), Url::parse(BASE).unwrap());
        let mut bad = article("nowhere");
        bad.source_ref = "//".to_string();
        let mut acc = AccordionController::new(vec![bad], cache, &mut s);

        assert!(acc.toggle("nowhere", &mut s));
        let completed = acc.poll_content(&mut s);

        assert_eq!(completed, vec!["nowhere".to_string()]);
        assert!(acc.content("nowhere").unwrap().failed);
        assert!(s.notice(&Region::Panel("nowhere".into())).is_some());
        assert!(!acc.has_pending());
        assert_eq!(fetcher.total(), 0);
    }

    #[test]
    fn double_toggle_restores_state() {
        let mut s = RecordingSurface::new(800.0);
        let (mut acc, _) = accordion(&mut s);
        acc.toggle("my-post", &mut s);
        acc.toggle("newest", &mut s);
        acc.toggle("newest", &mut s);
        assert_eq!(acc.open_id(), None);
    }

    proptest! {
        #[test]
        fn at_most_one_open(ops in proptest::collection::vec(0usize..4, 0..40)) {
            let ids = ["newest", "my-post", "oldest", "unknown"];
            let mut s = RecordingSurface::new(800.0);
            let (mut acc, _) = accordion(&mut s);
            for op in ops {
                acc.toggle(ids[op], &mut s);
                prop_assert!(acc.open_count() <= 1);
                let open_classes = ids
                    .iter()
                    .filter(|id| s.has_class(&Region::Panel(id.to_string()), CLASS_OPEN))
                    .count();
                prop_assert!(open_classes <= 1);
            }
        }
    }
}
