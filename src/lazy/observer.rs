//! Viewport intersection observation.
//!
//! A [`Viewport`] is the host's scrollable area. Loaders register an element
//! box with [`Viewport::observe`] and receive [`IntersectionEntry`] values:
//! one right away, then one each time the element crosses the threshold of
//! the margin-expanded viewport. Dropping the registration guard disconnects
//! synchronously, and the entry channel closes with it.

use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::mpsc;

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two boxes. Edge-adjacent boxes intersect with zero area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        (left <= right && top <= bottom).then(|| Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (or shrink, for negative values) by a margin.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

// =============================================================================
// Root Margin
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginParseError {
    #[error("root margin is empty")]
    Empty,
    #[error("root margin takes 1 to 4 values, got {0}")]
    Arity(usize),
    #[error("invalid root margin length '{0}', expected pixels like '100px'")]
    Length(String),
}

/// Margin around the viewport, in pixels, CSS order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    fn parse_length(value: &str) -> Result<f64, MarginParseError> {
        let number = value.strip_suffix("px").unwrap_or(value);
        // Unitless lengths are only valid for zero.
        let parsed = number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && (value.ends_with("px") || *n == 0.0));
        parsed.ok_or_else(|| MarginParseError::Length(value.to_string()))
    }
}

impl Default for RootMargin {
    /// `100px 0px`: 100px above and below the viewport, none at the sides.
    fn default() -> Self {
        Self {
            top: 100.0,
            right: 0.0,
            bottom: 100.0,
            left: 0.0,
        }
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    /// CSS margin shorthand: `a`, `v h`, `t h b`, or `t r b l`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(Self::parse_length)
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [] => Err(MarginParseError::Empty),
            [all] => Ok(Self::uniform(all)),
            [v, h] => Ok(Self {
                top: v,
                right: h,
                bottom: v,
                left: h,
            }),
            [top, h, bottom] => Ok(Self {
                top,
                right: h,
                bottom,
                left: h,
            }),
            [top, right, bottom, left] => Ok(Self {
                top,
                right,
                bottom,
                left,
            }),
            _ => Err(MarginParseError::Arity(values.len())),
        }
    }
}

// =============================================================================
// Observer Options & Entries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Minimum visible fraction of the element.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            threshold: 0.01,
        }
    }
}

impl ObserverOptions {
    /// Intersection of `target` with the margin-expanded `viewport`.
    pub fn evaluate(&self, target: Rect, viewport: Rect) -> IntersectionEntry {
        let root = viewport.expand(&self.root_margin);
        match target.intersection(&root) {
            Some(overlap) => {
                let area = target.area();
                // Zero-area targets count as fully visible once they touch.
                let ratio = if area > 0.0 {
                    (overlap.area() / area).min(1.0)
                } else {
                    1.0
                };
                IntersectionEntry {
                    is_intersecting: true,
                    ratio,
                }
            }
            None => IntersectionEntry {
                is_intersecting: false,
                ratio: 0.0,
            },
        }
    }
}

/// One observation result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionEntry {
    /// Whether this entry should start a fetch.
    #[inline]
    pub fn triggers(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

// =============================================================================
// Viewport
// =============================================================================

struct Registration {
    target: Rect,
    options: ObserverOptions,
    /// Last delivered `triggers()` state.
    visible: bool,
    tx: mpsc::UnboundedSender<IntersectionEntry>,
}

struct ViewportInner {
    rect: Rect,
    next_id: u64,
    registrations: FxHashMap<u64, Registration>,
}

impl ViewportInner {
    /// Deliver entries for every registration whose state flipped.
    fn notify(&mut self) {
        let rect = self.rect;
        self.registrations.retain(|_, reg| {
            let entry = reg.options.evaluate(reg.target, rect);
            let visible = entry.triggers(reg.options.threshold);
            if visible == reg.visible {
                return true;
            }
            reg.visible = visible;
            reg.tx.send(entry).is_ok()
        });
    }
}

/// Host-side scrollable area shared by all loaders of a page.
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<Mutex<ViewportInner>>,
}

impl Viewport {
    pub fn new(rect: Rect) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewportInner {
                rect,
                next_id: 0,
                registrations: FxHashMap::default(),
            })),
        }
    }

    pub fn rect(&self) -> Rect {
        self.inner.lock().rect
    }

    /// Start observing `target`. The initial entry is queued immediately.
    pub fn observe(&self, target: Rect, options: ObserverOptions) -> Observation {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();

        let entry = options.evaluate(target, inner.rect);
        let _ = tx.send(entry);

        let id = inner.next_id;
        inner.next_id += 1;
        inner.registrations.insert(
            id,
            Registration {
                target,
                options,
                visible: entry.triggers(options.threshold),
                tx,
            },
        );

        Observation {
            guard: ObserverGuard {
                id,
                inner: Arc::clone(&self.inner),
            },
            rx,
        }
    }

    /// Move the viewport to a new scroll position.
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut inner = self.inner.lock();
        inner.rect.x = x;
        inner.rect.y = y;
        inner.notify();
    }

    /// Change the viewport size (window resize).
    pub fn resize(&self, width: f64, height: f64) {
        let mut inner = self.inner.lock();
        inner.rect.width = width;
        inner.rect.height = height;
        inner.notify();
    }

    /// Number of live registrations.
    pub fn observer_count(&self) -> usize {
        self.inner.lock().registrations.len()
    }
}

/// A live registration: the guard that disconnects and the entry stream.
pub struct Observation {
    guard: ObserverGuard,
    rx: mpsc::UnboundedReceiver<IntersectionEntry>,
}

impl Observation {
    /// Next entry, or `None` once disconnected.
    pub async fn next(&mut self) -> Option<IntersectionEntry> {
        self.rx.recv().await
    }

    /// Split so the stream can move into a task while the guard stays
    /// with the owner that may disconnect it.
    pub fn into_parts(self) -> (ObserverGuard, mpsc::UnboundedReceiver<IntersectionEntry>) {
        (self.guard, self.rx)
    }
}

/// Disconnects its registration when dropped.
pub struct ObserverGuard {
    id: u64,
    inner: Arc<Mutex<ViewportInner>>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.inner.lock().registrations.remove(&self.id);
    }
}
