//! The engine's view of its host: named regions, geometry reads and style
//! writes. Nothing in the engine touches a real render tree directly.

pub mod animator;
pub mod sticky;

use crate::route::View;

/// Class flag toggled on the navigation bar while it is fixed on screen.
pub const CLASS_STICKY: &str = "sticky";
/// Class flag on the active tab control.
pub const CLASS_ACTIVE: &str = "active";
/// Class flag on `Region::Body` while the Articles view is shown.
pub const CLASS_SHOW_ARTICLES: &str = "show-articles";

/// A named UI region the engine reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    Logo,
    NavBar,
    /// Spacer that takes the nav bar's place in the flow while it is sticky.
    NavPlaceholder,
    /// Tracked content section, by document order.
    Section(usize),
    Tab(View),
    Body,
    ArticlesPanel,
    /// Collapsible content container of one article.
    Panel(String),
}

/// Viewport-relative bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn mid(&self) -> f32 {
        self.top + self.height * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    Px(f32),
    /// No explicit constraint; the region sizes to its content.
    Auto,
}

/// One style mutation on the host.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    SetTop { region: Region, px: f32 },
    SetOpacity { region: Region, value: f32 },
    SetHeight { region: Region, height: Height },
    SetClass { region: Region, class: &'static str, on: bool },
    /// Inline notice shown in place of a region's content, or cleared.
    SetNotice { region: Region, text: Option<String> },
}

/// Host render tree as seen by the engine.
pub trait Surface {
    fn viewport_height(&self) -> f32;

    fn scroll_y(&self) -> f32;

    /// Current box of `region`, `None` if it is not rendered.
    fn rect(&self, region: &Region) -> Option<Rect>;

    /// Natural height of a region's content, regardless of any height
    /// constraint currently applied to it.
    fn content_height(&self, region: &Region) -> Option<f32>;

    fn apply(&mut self, op: StyleOp);
}
