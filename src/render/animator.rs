//! Scroll-linked animation.
//!
//! Scroll notifications only request a frame; the actual computation runs
//! once per displayed frame in `on_frame`, however many notifications
//! arrived in between.

use super::sticky::StickyBar;
use super::{Rect, Region, StyleOp, Surface};
use crate::config::{Anchor, Config, FINAL_LOGO_TOP};

/// Position (percent of viewport height) at and below which a section is
/// invisible near the top edge.
const FADE_TOP_OUTER: f32 = 10.0;
/// Position at which a section becomes fully opaque coming from the top.
const FADE_TOP_INNER: f32 = 20.0;
const FADE_BOTTOM_INNER: f32 = 80.0;
/// Position at and beyond which a section is invisible near the bottom edge.
const FADE_BOTTOM_OUTER: f32 = 90.0;

/// Styles computed for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub logo_top: f32,
    /// `(section index, opacity)` for every section that was rendered.
    pub opacities: Vec<(usize, f32)>,
    pub sticky: bool,
}

pub struct ScrollAnimator {
    /// Half the viewport height at startup. Never recaptured.
    initial_logo_top: f32,
    anchor: Anchor,
    section_count: usize,
    frame_requested: bool,
    frames_computed: u64,
    sticky: StickyBar,
}

impl ScrollAnimator {
    /// Captures the logo's starting offset and schedules the first frame.
    pub fn new(viewport_height: f32, config: &Config) -> Self {
        Self {
            initial_logo_top: viewport_height * 0.5,
            anchor: config.anchor,
            section_count: config.section_count,
            frame_requested: true,
            frames_computed: 0,
            sticky: StickyBar::new(),
        }
    }

    /// Scroll notification. Returns `true` if this requested a new frame,
    /// `false` if one was already pending.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_requested
    }

    /// Display refresh. Runs the pending computation, if any.
    pub fn on_frame(&mut self, surface: &mut dyn Surface) -> Option<ScrollFrame> {
        if !self.frame_requested {
            return None;
        }
        self.frame_requested = false;
        Some(self.compute(surface))
    }

    /// Number of computations run so far.
    pub fn frames_computed(&self) -> u64 {
        self.frames_computed
    }

    fn compute(&mut self, surface: &mut dyn Surface) -> ScrollFrame {
        self.frames_computed += 1;
        let scroll_y = surface.scroll_y();
        let viewport = surface.viewport_height();

        let logo = logo_top(self.initial_logo_top, scroll_y);
        surface.apply(StyleOp::SetTop {
            region: Region::Logo,
            px: logo,
        });

        let mut opacities = Vec::with_capacity(self.section_count);
        for index in 0..self.section_count {
            let region = Region::Section(index);
            // Not rendered yet: skip for this frame.
            let Some(rect) = surface.rect(&region) else {
                continue;
            };
            let value = section_opacity(anchor_percent(rect, viewport, self.anchor));
            surface.apply(StyleOp::SetOpacity { region, value });
            opacities.push((index, value));
        }

        let sticky = self.sticky.update(surface);

        ScrollFrame {
            logo_top: logo,
            opacities,
            sticky,
        }
    }
}

/// Logo offset from the top: slides up with the page until it reaches
/// `FINAL_LOGO_TOP`, then stays there.
pub fn logo_top(initial_top: f32, scroll_y: f32) -> f32 {
    FINAL_LOGO_TOP.max(initial_top - scroll_y)
}

/// Anchor position of `rect` as a percentage of the viewport height.
pub fn anchor_percent(rect: Rect, viewport_height: f32, anchor: Anchor) -> f32 {
    if viewport_height <= 0.0 {
        return f32::NAN;
    }
    let y = match anchor {
        Anchor::Midpoint => rect.mid(),
        Anchor::TopEdge => rect.top,
    };
    y / viewport_height * 100.0
}

/// Four-band opacity curve over a viewport-percentage position.
///
/// Transparent beyond the outer bands, linear across the transition bands,
/// opaque in the middle. Symmetric about 50%.
pub fn section_opacity(p: f32) -> f32 {
    if !p.is_finite() {
        return 0.0;
    }
    let opacity = if p <= FADE_TOP_OUTER || p >= FADE_BOTTOM_OUTER {
        0.0
    } else if p < FADE_TOP_INNER {
        (p - FADE_TOP_OUTER) / (FADE_TOP_INNER - FADE_TOP_OUTER)
    } else if p <= FADE_BOTTOM_INNER {
        1.0
    } else {
        (FADE_BOTTOM_OUTER - p) / (FADE_BOTTOM_OUTER - FADE_BOTTOM_INNER)
    };
    opacity.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;
    use proptest::prelude::*;

    fn surface() -> RecordingSurface {
        let mut s = RecordingSurface::new(1000.0);
        s.set_rect(Region::Section(0), Rect::new(450.0, 100.0));
        s.set_rect(Region::Section(1), Rect::new(850.0, 100.0));
        s
    }

    #[test]
    fn logo_starts_at_half_viewport_and_stops_at_final() {
        assert_eq!(logo_top(500.0, 0.0), 500.0);
        assert_eq!(logo_top(500.0, 200.0), 300.0);
        assert_eq!(logo_top(500.0, 450.0), FINAL_LOGO_TOP);
        assert_eq!(logo_top(500.0, 5000.0), FINAL_LOGO_TOP);
        // Reversible: scrolling back restores the same value.
        assert_eq!(logo_top(500.0, 200.0), 300.0);
    }

    #[test]
    fn opacity_bands() {
        assert_eq!(section_opacity(0.0), 0.0);
        assert_eq!(section_opacity(10.0), 0.0);
        assert!((section_opacity(15.0) - 0.5).abs() < 1e-6);
        assert_eq!(section_opacity(20.0), 1.0);
        assert_eq!(section_opacity(50.0), 1.0);
        assert_eq!(section_opacity(80.0), 1.0);
        assert!((section_opacity(85.0) - 0.5).abs() < 1e-6);
        assert_eq!(section_opacity(90.0), 0.0);
        assert_eq!(section_opacity(150.0), 0.0);
        assert_eq!(section_opacity(f32::NAN), 0.0);
    }

    #[test]
    fn opacity_is_symmetric_about_centre() {
        for p in [11.0_f32, 13.5, 17.0, 19.9, 30.0] {
            assert!((section_opacity(p) - section_opacity(100.0 - p)).abs() < 1e-5);
        }
    }

    #[test]
    fn anchor_policies_differ() {
        let rect = Rect::new(850.0, 100.0);
        assert_eq!(anchor_percent(rect, 1000.0, Anchor::TopEdge), 85.0);
        assert_eq!(anchor_percent(rect, 1000.0, Anchor::Midpoint), 90.0);
    }

    #[test]
    fn scroll_bursts_coalesce_into_one_frame() {
        let mut s = surface();
        let mut anim = ScrollAnimator::new(1000.0, &Config::default());
        anim.on_frame(&mut s);
        assert_eq!(anim.frames_computed(), 1);

        let requested = (0..500).filter(|_| anim.on_scroll()).count();
        assert_eq!(requested, 1);
        assert!(anim.on_frame(&mut s).is_some());
        assert!(anim.on_frame(&mut s).is_none());
        assert_eq!(anim.frames_computed(), 2);
    }

    #[test]
    fn no_computation_inside_scroll_handler() {
        let mut s = surface();
        let mut anim = ScrollAnimator::new(1000.0, &Config::default());
        anim.on_frame(&mut s);
        s.ops.clear();
        anim.on_scroll();
        assert!(s.ops.is_empty());
        assert_eq!(anim.frames_computed(), 1);
    }

    #[test]
    fn missing_sections_are_skipped() {
        let mut s = surface();
        let mut anim = ScrollAnimator::new(1000.0, &Config::default().with_section_count(4));
        let frame = anim.on_frame(&mut s).unwrap();
        let indices: Vec<usize> = frame.opacities.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(frame.opacities[0].1, 1.0);
        assert_eq!(frame.opacities[1].1, 0.0);
    }

    #[test]
    fn unchanged_geometry_gives_identical_frames() {
        let mut s = surface();
        s.scroll_y = 120.0;
        let mut anim = ScrollAnimator::new(1000.0, &Config::default());
        let first = anim.on_frame(&mut s).unwrap();
        anim.on_scroll();
        let second = anim.on_frame(&mut s).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn logo_top_is_monotone_and_bounded(
            viewport in 1.0f32..4000.0,
            a in 0.0f32..10_000.0,
            b in 0.0f32..10_000.0,
        ) {
            let (s1, s2) = if a <= b { (a, b) } else { (b, a) };
            let initial = viewport * 0.5;
            prop_assert!(logo_top(initial, s2) <= logo_top(initial, s1));
            prop_assert!(logo_top(initial, s1) >= FINAL_LOGO_TOP);
        }

        #[test]
        fn opacity_is_bounded_and_deterministic(
            top in -5000.0f32..5000.0,
            height in 0.0f32..3000.0,
            viewport in 0.0f32..3000.0,
        ) {
            for anchor in [Anchor::Midpoint, Anchor::TopEdge] {
                let p = anchor_percent(Rect::new(top, height), viewport, anchor);
                let o = section_opacity(p);
                prop_assert!((0.0..=1.0).contains(&o));
                prop_assert_eq!(o, section_opacity(anchor_percent(Rect::new(top, height), viewport, anchor)));
            }
        }
    }
}
