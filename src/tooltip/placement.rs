//! Overlay placement that keeps the tooltip on screen.
//!
//! Each attachment variant has its own strategy. All of them return the
//! overlay's top-left corner in screen pixels and flip to the opposite side
//! of the anchor when the default spot would run past the screen edge.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use crate::{Error, Result};

/// Largest margin, gap or offset accepted from configuration.
pub const MAX_SPACING: i32 = 10_000;

fn check_spacing(name: &str, value: i32) -> Result<()> {
    if !(0..=MAX_SPACING).contains(&value) {
        return Err(Error::invalid(format!(
            "<placement.{}> must be between 0 and {}, got {}",
            name, MAX_SPACING, value
        )));
    }
    Ok(())
}

/// Margins for tooltips beside a plain widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetPlacement {
    /// Space kept free below the tooltip before flipping above the widget.
    pub bottom_margin: i32,
    /// Horizontal gap between widget and tooltip.
    pub gap: i32,
}

impl Default for WidgetPlacement {
    fn default() -> Self {
        Self { bottom_margin: 50, gap: 5 }
    }
}

/// Offset for tooltips that follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerPlacement {
    /// Distance right of and below the pointer.
    pub offset: i32,
}

impl Default for PointerPlacement {
    fn default() -> Self {
        Self { offset: 10 }
    }
}

/// How a scrolled-region tooltip reacts to running off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlipMode {
    /// Overflow on either axis moves the tooltip to the opposite corner.
    #[default]
    Corner,
    /// Only the overflowing axis flips.
    PerAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPlacement {
    /// Space kept free right of and below the tooltip.
    pub margin: i32,
    /// Gap between region and tooltip after flipping.
    pub gap: i32,
    pub flip: FlipMode,
}

impl Default for ScrollPlacement {
    fn default() -> Self {
        Self { margin: 50, gap: 5, flip: FlipMode::Corner }
    }
}

/// Tunable placement constants for all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub widget: WidgetPlacement,
    pub pointer: PointerPlacement,
    pub scroll: ScrollPlacement,
}

impl PlacementConfig {
    /// Reject negative or absurdly large spacing values.
    pub fn validate(&self) -> Result<()> {
        check_spacing("widget.bottom_margin", self.widget.bottom_margin)?;
        check_spacing("widget.gap", self.widget.gap)?;
        check_spacing("pointer.offset", self.pointer.offset)?;
        check_spacing("scroll.margin", self.scroll.margin)?;
        check_spacing("scroll.gap", self.scroll.gap)
    }
}

/// Scroll position of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffsets {
    /// Leading-edge fraction reported by the horizontal scrollbar.
    pub fraction_x: f64,
    /// Leading-edge fraction reported by the vertical scrollbar.
    pub fraction_y: f64,
    /// Size of the whole scrollable content area.
    pub extent: Size,
}

impl ScrollOffsets {
    /// Content pixels scrolled out of view on each axis.
    pub fn shift(&self) -> (f64, f64) {
        (
            self.fraction_x * f64::from(self.extent.width),
            self.fraction_y * f64::from(self.extent.height),
        )
    }
}

/// A rectangle with fractional coordinates, used before truncating to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a region's bounding box from content to viewport coordinates.
pub fn viewport_rect(region: Rect, scroll: &ScrollOffsets) -> ViewportRect {
    let (dx, dy) = scroll.shift();
    ViewportRect {
        x: f64::from(region.x) - dx,
        y: f64::from(region.y) - dy,
        width: f64::from(region.width),
        height: f64::from(region.height),
    }
}

/// Place beside a widget: below and to the right by default, above and/or to
/// the left when that would leave the screen.
pub fn place_beside_widget(target: Rect, overlay: Size, screen: Size, cfg: &WidgetPlacement) -> Point {
    let y = if target.y.saturating_add(overlay.height).saturating_add(cfg.bottom_margin) > screen.height {
        target.y.saturating_sub(overlay.height)
    } else {
        target.bottom()
    };
    let x = if target
        .x
        .saturating_add(overlay.width)
        .saturating_add(target.width)
        .saturating_add(cfg.gap)
        > screen.width
    {
        target.x.saturating_sub(overlay.width).saturating_sub(cfg.gap)
    } else {
        target.right().saturating_add(cfg.gap)
    };
    Point::new(x, y)
}

/// Place down-right of the pointer, flipping each axis independently.
pub fn place_at_pointer(pointer: Point, overlay: Size, screen: Size, cfg: &PointerPlacement) -> Point {
    let mut x = pointer.x.saturating_add(cfg.offset);
    let mut y = pointer.y.saturating_add(cfg.offset);
    if x.saturating_add(overlay.width) > screen.width {
        x = pointer.x.saturating_sub(overlay.width);
    }
    if y.saturating_add(overlay.height) > screen.height {
        y = pointer.y.saturating_sub(overlay.height);
    }
    Point::new(x, y)
}

/// Place at the bottom-right corner of a region on a scrolled surface.
///
/// `region` is in content coordinates; `surface_origin` is the surface's
/// top-left corner on screen.
pub fn place_beside_scrolled_region(
    region: Rect,
    scroll: &ScrollOffsets,
    surface_origin: Point,
    overlay: Size,
    screen: Size,
    cfg: &ScrollPlacement,
) -> Point {
    let view = viewport_rect(region, scroll);
    let left = view.x + f64::from(surface_origin.x);
    let top = view.y + f64::from(surface_origin.y);

    let below_right = (left + view.width, top + view.height);
    let above_left = (
        left - f64::from(overlay.width) - f64::from(cfg.gap),
        top - f64::from(overlay.height) - f64::from(cfg.gap),
    );

    let overflow_x = below_right.0 + f64::from(overlay.width) + f64::from(cfg.margin) > f64::from(screen.width);
    let overflow_y = below_right.1 + f64::from(overlay.height) + f64::from(cfg.margin) > f64::from(screen.height);

    let (x, y) = match cfg.flip {
        FlipMode::Corner if overflow_x || overflow_y => above_left,
        FlipMode::Corner => below_right,
        FlipMode::PerAxis => (
            if overflow_x { above_left.0 } else { below_right.0 },
            if overflow_y { above_left.1 } else { below_right.1 },
        ),
    };
    // Truncate toward zero, like the toolkit's integer geometry strings.
    // Float-to-int `as` saturates at the i32 bounds.
    Point::new(x as i32, y as i32)
}
