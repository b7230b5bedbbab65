//! Capability interface to the GUI toolkit.
//!
//! The tooltip controller never touches native resources directly. It holds
//! opaque `Copy` handles and asks a [`HostSurface`] to create, measure, move
//! and destroy overlays, to answer geometry queries and to run one-shot
//! timers. Notifications flow back as [`HostEvent`] values that the caller
//! hands to [`crate::TooltipManager::dispatch`].

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::geometry::{Point, Rect, Size};
use crate::tooltip::FontSpec;
use crate::Result;

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle_type!(
    /// A plain toolkit widget (button, label, ...).
    WidgetId, "widget"
);
handle_type!(
    /// A top-level window that can parent overlays.
    WindowId, "window"
);
handle_type!(
    /// A drawing surface (canvas) with tagged items.
    SurfaceId, "surface"
);
handle_type!(
    /// A tagged item on a drawing surface.
    ItemId, "item"
);
handle_type!(
    /// A scroll-position provider reporting the visible fraction offset.
    ScrollbarId, "scrollbar"
);
handle_type!(OverlayId, "overlay");
handle_type!(TimerId, "timer");
handle_type!(BindingId, "binding");

/// Something that can receive enter/leave notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Target {
    Widget(WidgetId),
    Region { surface: SurfaceId, item: ItemId },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(id) => write!(f, "{}", id),
            Self::Region { surface, item } => write!(f, "{}/{}", surface, item),
        }
    }
}

/// Which native window an overlay belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OverlayParent {
    /// Parent the overlay on the widget's containing window.
    Widget(WidgetId),
    Window(WindowId),
}

/// Border style drawn around the overlay label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Relief {
    /// No border is drawn, whatever the border width.
    Flat,
    #[default]
    Ridge,
}

/// Everything the host needs to render the tooltip label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayContent {
    pub text: String,
    pub font: FontSpec,
    pub fg: String,
    pub bg: String,
    pub relief: Relief,
    pub border_width: i32,
    /// Horizontal padding inside the label, per side.
    pub padding_x: i32,
}

/// Notification delivered by the host on its dispatch thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Enter(BindingId),
    Leave(BindingId),
    TimerFired(TimerId),
}

/// Toolkit primitives used by the tooltip controller.
///
/// Geometry is in screen pixels, except [`HostSurface::target_geometry`] for
/// a [`Target::Region`], which returns the item's bounding box in the
/// surface's content (scrollable) coordinates.
pub trait HostSurface {
    /// Register enter/leave notifications for `target`. Bindings are additive:
    /// earlier bindings on the same target keep firing.
    fn bind_enter_leave(&mut self, target: &Target) -> Result<BindingId>;

    /// Remove a binding. Unknown handles are ignored.
    fn unbind(&mut self, binding: BindingId);

    fn target_exists(&self, target: &Target) -> bool;

    /// Create an undecorated overlay window showing `content`.
    fn create_overlay(&mut self, parent: OverlayParent, content: &OverlayContent) -> Result<OverlayId>;

    /// Destroy an overlay. Returns `ResourceUnavailable` if it is already gone.
    fn destroy_overlay(&mut self, overlay: OverlayId) -> Result<()>;

    fn measure_overlay(&self, overlay: OverlayId) -> Result<Size>;

    fn move_overlay(&mut self, overlay: OverlayId, position: Point) -> Result<()>;

    fn target_geometry(&self, target: &Target) -> Result<Rect>;

    /// Screen position of the drawing surface's top-left corner.
    fn surface_origin(&self, surface: SurfaceId) -> Result<Point>;

    fn pointer_position(&self) -> Result<Point>;

    fn screen_size(&self) -> Size;

    /// Leading edge of the visible part of the content, as a fraction in `[0, 1]`.
    fn scroll_fraction(&self, scrollbar: ScrollbarId) -> Result<f64>;

    /// Schedule a one-shot [`HostEvent::TimerFired`] after `delay`.
    fn schedule_timer(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Cancelling a fired or unknown timer is a no-op.
    fn cancel_timer(&mut self, timer: TimerId);
}
