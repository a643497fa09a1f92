//! `HostSurface`: the egui side of the engine's `Surface`.
//!
//! Geometry is recorded while drawing and read by the engine on the next
//! frame; style ops are stored and consulted while drawing.

use std::collections::{HashMap, HashSet};

use folio_view::render::{Height, Rect, Region, StyleOp, Surface, CLASS_STICKY};

/// Seconds a panel height transition takes.
pub const PANEL_TRANSITION_SECS: f32 = 0.25;

#[derive(Default)]
pub struct HostSurface {
    pub viewport_height: f32,
    pub scroll_y: f32,
    rects: HashMap<Region, Rect>,
    content_heights: HashMap<Region, f32>,
    /// Where the nav bar sits in the flow (the placeholder while sticky).
    nav_slot: Option<Rect>,
    tops: HashMap<Region, f32>,
    opacities: HashMap<Region, f32>,
    heights: HashMap<Region, Height>,
    classes: HashSet<(Region, &'static str)>,
    notices: HashMap<Region, String>,
    /// Regions with a height transition the engine is waiting on.
    transitions: HashSet<Region>,
}

impl HostSurface {
    /// Forget geometry from the previous frame; regions not drawn this frame
    /// read as absent.
    pub fn begin_frame(&mut self) {
        self.rects.clear();
    }

    pub fn record_rect(&mut self, region: Region, rect: Rect) {
        self.rects.insert(region, rect);
    }

    pub fn record_content_height(&mut self, region: Region, height: f32) {
        self.content_heights.insert(region, height);
    }

    pub fn record_nav_slot(&mut self, rect: Rect) {
        self.nav_slot = Some(rect);
    }

    pub fn top(&self, region: &Region) -> Option<f32> {
        self.tops.get(region).copied()
    }

    pub fn opacity(&self, region: &Region) -> f32 {
        self.opacities.get(region).copied().unwrap_or(1.0)
    }

    pub fn height(&self, region: &Region) -> Option<Height> {
        self.heights.get(region).copied()
    }

    pub fn has_class(&self, region: &Region, class: &'static str) -> bool {
        self.classes.contains(&(region.clone(), class))
    }

    pub fn notice(&self, region: &Region) -> Option<&str> {
        self.notices.get(region).map(String::as_str)
    }

    pub fn transition_pending(&self, region: &Region) -> bool {
        self.transitions.contains(region)
    }

    pub fn finish_transition(&mut self, region: &Region) -> bool {
        self.transitions.remove(region)
    }

    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }
}

impl Surface for HostSurface {
    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn rect(&self, region: &Region) -> Option<Rect> {
        if *region == Region::NavBar && !self.has_class(region, CLASS_STICKY) {
            return self.nav_slot;
        }
        self.rects.get(region).copied()
    }

    fn content_height(&self, region: &Region) -> Option<f32> {
        self.content_heights.get(region).copied()
    }

    fn apply(&mut self, op: StyleOp) {
        match op {
            StyleOp::SetTop { region, px } => {
                self.tops.insert(region, px);
            }
            StyleOp::SetOpacity { region, value } => {
                self.opacities.insert(region, value);
            }
            StyleOp::SetHeight { region, height } => {
                if matches!(region, Region::Panel(_)) {
                    match height {
                        Height::Px(_) => {
                            self.transitions.insert(region.clone());
                        }
                        Height::Auto => {
                            self.transitions.remove(&region);
                        }
                    }
                }
                self.heights.insert(region, height);
            }
            StyleOp::SetClass { region, class, on } => {
                if on {
                    self.classes.insert((region, class));
                } else {
                    self.classes.remove(&(region, class));
                }
            }
            StyleOp::SetNotice { region, text } => match text {
                Some(text) => {
                    self.notices.insert(region, text);
                }
                None => {
                    self.notices.remove(&region);
                }
            },
        }
    }
}
