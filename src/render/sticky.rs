//! Sticky navigation bar state machine.
//!
//! The bar's natural (in-flow) document offset is measured while it is not
//! sticky. Past `offset - STICKY_THRESHOLD` it is pinned; a placeholder of
//! the bar's height keeps the content below from jumping.

use super::{Height, Region, StyleOp, Surface, CLASS_STICKY};
use crate::config::{STICKY_MARGIN, STICKY_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StickyState {
    /// Bar not measured yet (or not rendered).
    Unmeasured,
    /// In normal flow; `offset` is its document top.
    Docked { offset: f32 },
    Stuck { offset: f32 },
}

pub struct StickyBar {
    state: StickyState,
}

impl StickyBar {
    pub fn new() -> Self {
        Self {
            state: StickyState::Unmeasured,
        }
    }

    pub fn state(&self) -> StickyState {
        self.state
    }

    pub fn is_stuck(&self) -> bool {
        matches!(self.state, StickyState::Stuck { .. })
    }

    /// Advance one frame. Returns whether the bar is sticky afterwards.
    pub fn update(&mut self, surface: &mut dyn Surface) -> bool {
        let scroll_y = surface.scroll_y();

        if self.state == StickyState::Unmeasured {
            match measure(surface) {
                Some(offset) => self.state = StickyState::Docked { offset },
                None => return false,
            }
        }

        match self.state {
            StickyState::Docked { offset } if scroll_y >= offset - STICKY_THRESHOLD => {
                let bar_height = surface
                    .rect(&Region::NavBar)
                    .map(|r| r.height)
                    .unwrap_or(0.0);
                // Placeholder first, so the bar leaving the flow never shifts content.
                surface.apply(StyleOp::SetHeight {
                    region: Region::NavPlaceholder,
                    height: Height::Px(bar_height + STICKY_MARGIN),
                });
                surface.apply(StyleOp::SetClass {
                    region: Region::NavBar,
                    class: CLASS_STICKY,
                    on: true,
                });
                log::debug!("nav bar stuck at scroll {:.0} (offset {:.0})", scroll_y, offset);
                self.state = StickyState::Stuck { offset };
            }
            StickyState::Stuck { offset } if scroll_y < offset - STICKY_THRESHOLD => {
                surface.apply(StyleOp::SetHeight {
                    region: Region::NavPlaceholder,
                    height: Height::Px(0.0),
                });
                surface.apply(StyleOp::SetClass {
                    region: Region::NavBar,
                    class: CLASS_STICKY,
                    on: false,
                });
                // Layout above the bar may have reflowed while it was pinned.
                self.state = match measure(surface) {
                    Some(offset) => StickyState::Docked { offset },
                    None => StickyState::Unmeasured,
                };
                log::debug!("nav bar released at scroll {:.0}", scroll_y);
            }
            _ => {}
        }

        self.is_stuck()
    }
}

impl Default for StickyBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Document offset of the in-flow bar.
fn measure(surface: &dyn Surface) -> Option<f32> {
    surface
        .rect(&Region::NavBar)
        .map(|rect| rect.top + surface.scroll_y())
}
