//! Page drawing for `FolioApp`.
//!
//! Every frame: drain network work, run the pending scroll frame, then draw
//! the page from the style state the engine left on the surface, recording
//! the geometry the engine reads on the next frame.

use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;
use folio_view::content::ArticleDescriptor;
use folio_view::dom::{parse_markup, Block};
use folio_view::engine::accordion::CLASS_OPEN;
use folio_view::engine::AccordionController;
use folio_view::render::{
    Height, Rect, Region, Surface, CLASS_ACTIVE, CLASS_SHOW_ARTICLES, CLASS_STICKY,
};
use folio_view::route::View;
use folio_view::Session;

use super::surface::{HostSurface, PANEL_TRANSITION_SECS};
use super::{FolioApp, PageEvent};
use crate::ui;

/// Placeholder project cards; sections past the end repeat from the start.
const PROJECTS: &[(&str, &str)] = &[
    ("Static site engine", "Hash-routed pages, lazy content and scroll-linked styling."),
    ("Markdown pipeline", "Front matter stripping and sanitised HTML rendering."),
    ("Sticky navigation", "A bar that docks and undocks without shifting the page."),
    ("Article accordion", "One panel open at a time, loaded on first open."),
];

const LOGO_TEXT: &str = "folio";
const LOGO_WIDTH: f32 = 120.0;

impl FolioApp {
    pub fn draw_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let viewport = ui.max_rect();
        let resized = (viewport.height() - self.surface.viewport_height).abs() > f32::EPSILON;
        self.surface.viewport_height = viewport.height();

        let session = self.session.get_or_insert_with(|| {
            Session::start(
                &self.config,
                Arc::clone(&self.fetcher),
                &self.history,
                &mut self.surface,
            )
        });

        if session.poll(&mut self.surface) {
            ctx.request_repaint();
        }
        session.on_frame(&mut self.surface);
        self.surface.begin_frame();

        let mut page = Page {
            session: &*session,
            surface: &mut self.surface,
            events: &mut self.events,
            blocks: &mut self.blocks,
            origin_y: viewport.top(),
            section_count: self.config.section_count,
        };
        let offset = page.draw(ui, ctx, viewport);

        let scrolled = (offset - self.surface.scroll_y).abs() > f32::EPSILON;
        self.surface.scroll_y = offset;
        if scrolled || resized {
            session.on_scroll();
        }
    }
}

struct Page<'a> {
    session: &'a Session,
    surface: &'a mut HostSurface,
    events: &'a mut Vec<PageEvent>,
    /// Parsed article bodies, by article id.
    blocks: &'a mut HashMap<String, Vec<Block>>,
    /// Screen y of the viewport's top edge.
    origin_y: f32,
    section_count: usize,
}

impl Page<'_> {
    /// Draw the whole page. Returns the scroll offset after this frame.
    fn draw(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, viewport: egui::Rect) -> f32 {
        let output = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Hero: the logo starts centred and slides up over this.
                ui.add_space(viewport.height());
                self.draw_nav_slot(ui);
                ui.add_space(16.0);
                if self.surface.has_class(&Region::Body, CLASS_SHOW_ARTICLES) {
                    self.draw_articles(ui, ctx);
                } else {
                    self.draw_projects(ui);
                }
                ui.add_space(viewport.height() * 0.5);
            });

        if self.surface.has_class(&Region::NavBar, CLASS_STICKY) {
            egui::Area::new(egui::Id::new("nav_bar"))
                .fixed_pos(viewport.left_top())
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(ui.visuals().panel_fill)
                        .show(ui, |ui| {
                            ui.set_width(viewport.width());
                            let rect = self.draw_tabs(ui);
                            self.surface
                                .record_rect(Region::NavBar, Rect::new(0.0, rect.height()));
                        });
                });
        }

        self.draw_logo(ctx, viewport);
        output.state.offset.y
    }

    fn draw_logo(&self, ctx: &egui::Context, viewport: egui::Rect) {
        let top = self
            .surface
            .top(&Region::Logo)
            .unwrap_or(viewport.height() * 0.5);
        let pos = egui::pos2(
            viewport.center().x - LOGO_WIDTH * 0.5,
            self.origin_y + top,
        );
        egui::Area::new(egui::Id::new("logo"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(LOGO_TEXT).size(32.0).strong());
            });
    }

    /// The bar's place in the flow: the placeholder, then the bar itself
    /// unless it is pinned.
    fn draw_nav_slot(&mut self, ui: &mut egui::Ui) {
        let slot_top = ui.cursor().top();
        let placeholder = match self.surface.height(&Region::NavPlaceholder) {
            Some(Height::Px(px)) => px,
            _ => 0.0,
        };
        ui.add_space(placeholder);

        if self.surface.has_class(&Region::NavBar, CLASS_STICKY) {
            self.surface.record_nav_slot(Rect::new(slot_top - self.origin_y, placeholder));
            return;
        }
        let rect = self.draw_tabs(ui);
        self.surface
            .record_nav_slot(Rect::new(rect.top() - self.origin_y, rect.height()));
    }

    fn draw_tabs(&mut self, ui: &mut egui::Ui) -> egui::Rect {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            for view in [View::Projects, View::Articles] {
                let region = Region::Tab(view);
                let active = self.surface.has_class(&region, CLASS_ACTIVE);
                let response = ui.selectable_label(
                    active,
                    egui::RichText::new(view.label()).size(16.0),
                );
                if response.clicked() {
                    self.events.push(PageEvent::Tab(view));
                }
                self.record(region, response.rect);
            }
        })
        .response
        .rect
    }

    fn draw_projects(&mut self, ui: &mut egui::Ui) {
        for index in 0..self.section_count {
            let region = Region::Section(index);
            let (title, blurb) = PROJECTS[index % PROJECTS.len()];
            let opacity = self.surface.opacity(&region);
            let response = ui
                .scope(|ui| {
                    ui.set_opacity(opacity);
                    egui::Frame::group(ui.style())
                        .inner_margin(egui::Margin::same(16.0))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.heading(title);
                            ui.add_space(4.0);
                            ui.label(blurb);
                            ui.add_space(120.0);
                        });
                })
                .response;
            self.record(region, response.rect);
            ui.add_space(24.0);
        }
    }

    fn draw_articles(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let session = self.session;
        let response = ui
            .vertical(|ui| {
                if let Some(text) = self.surface.notice(&Region::ArticlesPanel) {
                    ui::notice(ui, text);
                    return;
                }
                match session.accordion() {
                    Some(accordion) => {
                        for article in accordion.articles() {
                            self.draw_article(ui, ctx, accordion, article);
                        }
                    }
                    None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading articles\u{2026}");
                        });
                    }
                }
            })
            .response;
        self.record(Region::ArticlesPanel, response.rect);
    }

    fn draw_article(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        accordion: &AccordionController,
        article: &ArticleDescriptor,
    ) {
        let region = Region::Panel(article.id.clone());
        let open = self.surface.has_class(&region, CLASS_OPEN);

        ui.horizontal(|ui| {
            let marker = if open { "\u{25BE}" } else { "\u{25B8}" };
            let header = ui.add(
                egui::Button::new(
                    egui::RichText::new(format!("{} {}", marker, article.title))
                        .size(18.0)
                        .strong(),
                )
                .frame(false),
            );
            if header.clicked() {
                self.events.push(PageEvent::Article(article.id.clone()));
            }
            ui.label(egui::RichText::new(&article.date).weak());
        });

        let measured = self.surface.content_height(&region).unwrap_or(0.0);
        let target = match self.surface.height(&region) {
            Some(Height::Px(px)) => px,
            Some(Height::Auto) => measured,
            None => 0.0,
        };
        let shown = ctx.animate_value_with_time(
            egui::Id::new(("panel", &article.id)),
            target,
            PANEL_TRANSITION_SECS,
        );
        if self.surface.transition_pending(&region) && (shown - target).abs() < 0.5 {
            self.events.push(PageEvent::TransitionEnd(region.clone()));
        }

        // Lay the body out at full height, clipped to the animated height,
        // so its natural height is always known.
        let width = ui.available_width();
        let top_left = ui.cursor().min;
        let mut body = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(egui::Rect::from_min_size(
                    top_left,
                    egui::vec2(width, f32::INFINITY),
                ))
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        body.set_clip_rect(
            egui::Rect::from_min_size(top_left, egui::vec2(width, shown))
                .intersect(ui.clip_rect()),
        );
        self.draw_article_body(&mut body, accordion, &article.id, &region);
        let natural = body.min_rect().height();
        self.surface.record_content_height(region.clone(), natural);

        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, shown), egui::Sense::hover());
        self.record(region, rect);
        ui.add_space(8.0);
    }

    fn draw_article_body(
        &mut self,
        ui: &mut egui::Ui,
        accordion: &AccordionController,
        id: &str,
        region: &Region,
    ) {
        ui.add_space(4.0);
        if let Some(text) = self.surface.notice(region) {
            ui::notice(ui, text);
        } else if let Some(content) = accordion.content(id) {
            let blocks = self
                .blocks
                .entry(id.to_string())
                .or_insert_with(|| parse_markup(&content.rendered_body));
            ui::render_blocks(ui, blocks);
        } else if accordion.is_loading(id) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading\u{2026}");
            });
        }
        ui.add_space(8.0);
    }

    fn record(&mut self, region: Region, rect: egui::Rect) {
        self.surface
            .record_rect(region, Rect::new(rect.top() - self.origin_y, rect.height()));
    }
}
