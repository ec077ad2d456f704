//! Layout geometry as seen by the navigator.
//!
//! Rects are in viewport coordinates: `top == 0` is the top edge of the
//! scrolling viewport.  Units are whatever the host lays out in (terminal
//! rows here, CSS pixels on the web); the navigator never assumes which.

/// Opaque handle to a laid-out node (a section or its hero block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub usize);

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A full-width box spanning `top..top + height`.
    pub fn vertical(top: f64, height: f64) -> Self {
        Self::new(0.0, top, 0.0, height)
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Measures nodes on demand.
///
/// `rect` returns `None` when the node is not mounted (or was unmounted
/// mid-tick); callers treat that as "not visible".
pub trait GeometryProvider {
    fn viewport_height(&self) -> f64;
    fn rect(&self, node: NodeRef) -> Option<Rect>;
}
