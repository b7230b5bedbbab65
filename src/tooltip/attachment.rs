//! What a tooltip is attached to.

use serde::Serialize;

use crate::geometry::Size;
use crate::host::{ItemId, OverlayParent, ScrollbarId, SurfaceId, Target, WidgetId, WindowId};
use crate::{Error, Result};

/// Scroll state needed to map a region from content to viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollBinding {
    pub x: ScrollbarId,
    pub y: ScrollbarId,
    /// Full size of the scrollable content area.
    pub extent: Size,
}

/// The three tooltip variants. Each selects its own placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Attachment {
    /// Plain widget: placed beside the widget.
    Widget { widget: WidgetId },
    /// Item on a drawing surface: placed next to the pointer.
    Region {
        window: WindowId,
        surface: SurfaceId,
        item: ItemId,
    },
    /// Item on a scrolled drawing surface: placed at the item's corner.
    ScrollableRegion {
        window: WindowId,
        surface: SurfaceId,
        item: ItemId,
        scroll: ScrollBinding,
    },
}

impl Attachment {
    pub fn widget(widget: WidgetId) -> Self {
        Self::Widget { widget }
    }

    pub fn region(window: WindowId, surface: SurfaceId, item: ItemId) -> Self {
        Self::Region { window, surface, item }
    }

    pub fn scrollable_region(
        window: WindowId,
        surface: SurfaceId,
        item: ItemId,
        scroll: ScrollBinding,
    ) -> Self {
        Self::ScrollableRegion { window, surface, item, scroll }
    }

    /// The element enter/leave notifications are bound on.
    pub fn target(&self) -> Target {
        match *self {
            Self::Widget { widget } => Target::Widget(widget),
            Self::Region { surface, item, .. } | Self::ScrollableRegion { surface, item, .. } => {
                Target::Region { surface, item }
            }
        }
    }

    pub fn overlay_parent(&self) -> OverlayParent {
        match *self {
            Self::Widget { widget } => OverlayParent::Widget(widget),
            Self::Region { window, .. } | Self::ScrollableRegion { window, .. } => {
                OverlayParent::Window(window)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Widget { .. } => "widget",
            Self::Region { .. } => "region",
            Self::ScrollableRegion { .. } => "scrollable-region",
        }
    }
}

/// The element a loosely specified attachment points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    Widget(WidgetId),
    Item(ItemId),
}

/// Builds an [`Attachment`] from independently optional fields and rejects
/// combinations that do not name exactly one variant.
#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    target: Option<TargetRef>,
    window: Option<WindowId>,
    surface: Option<SurfaceId>,
    scroll_x: Option<ScrollbarId>,
    scroll_y: Option<ScrollbarId>,
    extent_x: Option<i32>,
    extent_y: Option<i32>,
}

impl AttachmentBuilder {
    pub fn new(target: TargetRef) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }

    pub fn surface(mut self, surface: SurfaceId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn scrollbars(mut self, x: ScrollbarId, y: ScrollbarId) -> Self {
        self.scroll_x = Some(x);
        self.scroll_y = Some(y);
        self
    }

    pub fn scroll_x(mut self, x: ScrollbarId) -> Self {
        self.scroll_x = Some(x);
        self
    }

    pub fn scroll_y(mut self, y: ScrollbarId) -> Self {
        self.scroll_y = Some(y);
        self
    }

    /// Width and height of the scrollable content area.
    pub fn scroll_region(mut self, width: i32, height: i32) -> Self {
        self.extent_x = Some(width);
        self.extent_y = Some(height);
        self
    }

    pub fn build(self) -> Result<Attachment> {
        let target = self
            .target
            .ok_or_else(|| Error::invalid("a tooltip needs a target"))?;
        let scroll = (self.scroll_x, self.scroll_y, self.extent_x, self.extent_y);
        let no_scroll = scroll == (None, None, None, None);

        match (self.window, self.surface, target) {
            (None, None, TargetRef::Widget(widget)) if no_scroll => Ok(Attachment::widget(widget)),
            (None, None, TargetRef::Widget(_)) => Err(Error::invalid(
                "scroll options require a window and a drawing surface",
            )),
            (None, None, TargetRef::Item(_)) => Err(Error::invalid(
                "a drawing-surface item needs a window and a drawing surface",
            )),
            (Some(_), None, _) | (None, Some(_), _) => Err(Error::invalid(
                "window and drawing surface must be given together",
            )),
            (Some(_), Some(_), TargetRef::Widget(_)) => Err(Error::invalid(
                "a region tooltip must target a drawing-surface item",
            )),
            (Some(window), Some(surface), TargetRef::Item(item)) => match scroll {
                (None, None, None, None) => Ok(Attachment::region(window, surface, item)),
                (Some(x), Some(y), Some(w), Some(h)) => {
                    if w <= 0 || h <= 0 {
                        return Err(Error::invalid("scroll region extents must be positive"));
                    }
                    Ok(Attachment::scrollable_region(
                        window,
                        surface,
                        item,
                        ScrollBinding { x, y, extent: Size::new(w, h) },
                    ))
                }
                _ => Err(Error::invalid(
                    "scrollbars and scroll region must all be given together",
                )),
            },
        }
    }
}
