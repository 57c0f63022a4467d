//! Mapping from page scroll to timeline progress.
//!
//! Ranges are written the way ScrollTrigger writes them: `"top bottom"` means
//! "when the element's top edge meets the viewport's bottom edge". A range is
//! converted to an interval of *document* progress so that one progress value
//! drives the whole timeline.

use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("invalid scroll anchor `{0}`")]
    InvalidAnchor(String),
}

/// A position along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Fraction of the size, 0 = top, 1 = bottom.
    Fraction(f32),
    /// Pixels from the top.
    Pixels(f32),
}

impl Edge {
    #[inline]
    pub fn resolve(self, size: f32) -> f32 {
        match self {
            Edge::Fraction(f) => f * size,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ScrollError::InvalidAnchor(s.to_string());
        match s {
            "top" => Ok(Edge::Fraction(0.0)),
            "center" => Ok(Edge::Fraction(0.5)),
            "bottom" => Ok(Edge::Fraction(1.0)),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    let v: f32 = pct.parse().map_err(|_| bad())?;
                    Ok(Edge::Fraction(v / 100.0))
                } else if let Some(px) = s.strip_suffix("px") {
                    let v: f32 = px.parse().map_err(|_| bad())?;
                    Ok(Edge::Pixels(v))
                } else {
                    Err(bad())
                }
            }
        }
    }
}

/// `"<element edge> <viewport edge>"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl FromStr for Anchor {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(el), Some(vp), None) => Ok(Anchor {
                element: el.parse().map_err(|_| ScrollError::InvalidAnchor(s.to_string()))?,
                viewport: vp.parse().map_err(|_| ScrollError::InvalidAnchor(s.to_string()))?,
            }),
            _ => Err(ScrollError::InvalidAnchor(s.to_string())),
        }
    }
}

/// Page geometry in CSS pixels. `element_top` is relative to the document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub element_top: f32,
    pub element_height: f32,
    pub viewport_height: f32,
    pub scroll_height: f32,
}

impl PageLayout {
    #[inline]
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }
}

impl Anchor {
    /// Scroll offset at which the two edges line up.
    pub fn scroll_offset(&self, layout: &PageLayout) -> f32 {
        layout.element_top + self.element.resolve(layout.element_height)
            - self.viewport.resolve(layout.viewport_height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: Anchor,
    pub end: Anchor,
}

impl ScrollRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, ScrollError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Document-progress interval covered by this range, clamped to `[0, 1]`
    /// and never inverted. A page that cannot scroll yields `(0, 0)`.
    pub fn to_progress(&self, layout: &PageLayout) -> (f32, f32) {
        let max = layout.max_scroll();
        if max <= 0.0 {
            return (0.0, 0.0);
        }
        let a = (self.start.scroll_offset(layout) / max).clamp(0.0, 1.0);
        let b = (self.end.scroll_offset(layout) / max).clamp(0.0, 1.0);
        (a, b.max(a))
    }
}

/// Normalised document scroll position.
pub fn document_progress(scroll_y: f32, layout: &PageLayout) -> f32 {
    let max = layout.max_scroll();
    if max <= 0.0 {
        return 0.0;
    }
    (scroll_y / max).clamp(0.0, 1.0)
}

/// Raw scroll progress as last reported by the page, with a pending flag so
/// that any number of scroll events between two frames costs one evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    progress: f32,
    dirty: bool,
    stale: bool,
}

impl ScrollState {
    pub fn record(&mut self, progress: f32) {
        self.progress = crate::timeline::clamp_progress(progress);
        self.dirty = true;
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The progress recorded since the last call, if any.
    pub fn take_pending(&mut self) -> Option<f32> {
        std::mem::take(&mut self.dirty).then_some(self.progress)
    }

    /// Mark whatever the player last applied as out of date, e.g. after the
    /// timeline was rebuilt.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the next evaluation must run regardless of progress. Clears
    /// the flag.
    pub fn take_stale(&mut self) -> bool {
        std::mem::take(&mut self.stale)
    }
}

// Fraction of the gap left after `lag_sec`: e^-3 ≈ 5%.
const SCRUB_SETTLE_TAUS: f32 = 3.0;
const SCRUB_SNAP: f32 = 1e-4;

/// Lagged follower for `scrub: <seconds>`. The displayed progress eases toward
/// the raw scroll progress independent of frame rate.
#[derive(Clone, Copy, Debug)]
pub struct Scrub {
    lag_sec: f32,
    current: Option<f32>,
}

impl Scrub {
    pub fn new(lag_sec: f32) -> Self {
        Self {
            lag_sec: lag_sec.max(0.0),
            current: None,
        }
    }

    pub fn value(&self) -> Option<f32> {
        self.current
    }

    pub fn snap(&mut self, progress: f32) {
        self.current = Some(progress);
    }

    /// Whether another step would still move the value.
    pub fn is_settled(&self, target: f32) -> bool {
        self.current.is_some_and(|c| (c - target).abs() <= SCRUB_SNAP)
    }

    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        let cur = match self.current {
            Some(c) if self.lag_sec > 0.0 => c,
            _ => {
                self.current = Some(target);
                return target;
            }
        };
        let tau = self.lag_sec / SCRUB_SETTLE_TAUS;
        let alpha = 1.0 - (-dt_sec.max(0.0) / tau).exp();
        let mut next = cur + (target - cur) * alpha;
        if (target - next).abs() <= SCRUB_SNAP {
            next = target;
        }
        self.current = Some(next);
        next
    }
}
