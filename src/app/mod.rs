//! `FolioApp`: the egui host around a `Session`.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `navigation`: back/forward, typed fragments, page events
//! - `toolbar`: fragment bar and controls
//! - `content`: page drawing
//! - `surface`: the `Surface` the engine styles

pub mod content;
pub mod navigation;
pub mod surface;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use folio_view::dom::Block;
use folio_view::net::Fetcher;
use folio_view::render::Region;
use folio_view::route::{SessionHistory, View};
use folio_view::{Config, Session};

use surface::HostSurface;

/// Repaint interval while background work or transitions are in flight.
const BUSY_REPAINT: Duration = Duration::from_millis(16);

/// Something the user did (or an animation finished) while the page was
/// drawn. Handled once drawing is done.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Tab(View),
    Article(String),
    TransitionEnd(Region),
}

pub struct FolioApp {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher>,
    /// Started on the first frame, once the viewport size is known.
    pub session: Option<Session>,
    pub history: SessionHistory,
    pub surface: HostSurface,
    pub fragment_input: String,
    pub dark_mode: bool,
    pub events: Vec<PageEvent>,
    pub blocks: HashMap<String, Vec<Block>>,
}

impl FolioApp {
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>, fragment: &str) -> Self {
        let history = SessionHistory::new(fragment);
        Self {
            config,
            fetcher,
            session: None,
            fragment_input: history.current().to_string(),
            history,
            surface: HostSurface::default(),
            dark_mode: false,
            events: Vec::new(),
            blocks: HashMap::new(),
        }
    }

    fn needs_repaint(&self) -> bool {
        self.surface.has_transitions()
            || self
                .session
                .as_ref()
                .is_some_and(|s| s.is_busy() || s.animator().frame_pending())
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_page(ui, &ctx_clone);
        });

        self.handle_events();

        if self.needs_repaint() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
