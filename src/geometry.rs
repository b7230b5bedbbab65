//! Screen-space geometry in whole pixels.

use serde::{Deserialize, Serialize};

/// A point in screen pixels (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from two corners, as returned by a bounding-box query.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(
            x0.min(x1),
            y0.min(y1),
            x1.abs_diff(x0).try_into().unwrap_or(i32::MAX),
            y1.abs_diff(y0).try_into().unwrap_or(i32::MAX),
        )
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Parse `"WxH"` (e.g. `1920x1080`).
pub fn parse_size(s: &str) -> Option<Size> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some(Size::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Parse a comma-separated list of integers of the given arity.
pub fn parse_ints(s: &str, arity: usize) -> Option<Vec<i32>> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    (parts.len() == arity).then_some(parts)
}
