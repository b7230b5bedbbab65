//! Headless [`HostSurface`] with a virtual clock.
//!
//! `SimHost` models just enough of a GUI toolkit to drive tooltips without a
//! display: a widget tree with screen rects, drawing surfaces holding tagged
//! items, scrollbars, overlays with measured text, and one-shot timers that
//! fire when the clock is advanced. Pointer moves and clock advances return
//! the [`HostEvent`]s a real toolkit would deliver, in delivery order.
//!
//! Failure injection (`fail_next_render`, `destroy_widget`, ...) exercises
//! the controller's recovery paths.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::geometry::{Point, Rect, Size};
use crate::host::{
    BindingId, HostEvent, HostSurface, ItemId, OverlayContent, OverlayId, OverlayParent, Relief,
    ScrollbarId, SurfaceId, Target, TimerId, WidgetId, WindowId,
};
use crate::{Error, Result};

/// Character cell used to measure overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    pub char_width: i32,
    pub line_height: i32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self { char_width: 6, line_height: 14 }
    }
}

#[derive(Debug, Clone)]
pub struct SimWidget {
    pub rect: Rect,
    pub parent: Option<WidgetId>,
    pub window: WindowId,
}

#[derive(Debug, Clone)]
pub struct SimSurface {
    pub window: WindowId,
    /// Screen position of the surface's top-left corner.
    pub origin: Point,
    /// Item bounding boxes in content coordinates.
    pub items: HashMap<ItemId, Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimOverlay {
    pub parent: OverlayParent,
    pub content: OverlayContent,
    pub size: Size,
    /// Where the host put it on creation, before any move.
    pub position: Point,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due_ms: u64,
}

#[derive(Debug, Default)]
pub struct SimHost {
    screen: Size,
    metrics: TextMetrics,
    overlay_size: Option<Size>,
    now_ms: u64,
    next_id: u64,

    windows: HashMap<WindowId, Rect>,
    widgets: HashMap<WidgetId, SimWidget>,
    surfaces: HashMap<SurfaceId, SimSurface>,
    scrollbars: HashMap<ScrollbarId, f64>,
    overlays: BTreeMap<OverlayId, SimOverlay>,
    timers: BTreeMap<TimerId, PendingTimer>,
    bindings: BTreeMap<BindingId, Target>,

    pointer: Option<Point>,
    hovered: Option<Target>,
    fail_renders: u32,
    overlays_created: u64,
}

impl SimHost {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Force every overlay to measure as `size`, ignoring its text.
    pub fn set_overlay_size(&mut self, size: Option<Size>) {
        self.overlay_size = size;
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    fn next_raw_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_window(&mut self, rect: Rect) -> WindowId {
        let id = WindowId(self.next_raw_id());
        self.windows.insert(id, rect);
        id
    }

    /// Add a widget at `rect` (screen coordinates).
    pub fn add_widget(&mut self, window: WindowId, parent: Option<WidgetId>, rect: Rect) -> WidgetId {
        let id = WidgetId(self.next_raw_id());
        self.widgets.insert(id, SimWidget { rect, parent, window });
        id
    }

    pub fn add_surface(&mut self, window: WindowId, origin: Point) -> SurfaceId {
        let id = SurfaceId(self.next_raw_id());
        self.surfaces.insert(id, SimSurface { window, origin, items: HashMap::new() });
        id
    }

    /// Add an item to a surface. `bbox` is in content coordinates.
    pub fn add_item(&mut self, surface: SurfaceId, bbox: Rect) -> Result<ItemId> {
        let id = ItemId(self.next_raw_id());
        self.surfaces
            .get_mut(&surface)
            .ok_or_else(|| Error::unavailable(format!("{} does not exist", surface)))?
            .items
            .insert(id, bbox);
        Ok(id)
    }

    pub fn add_scrollbar(&mut self, fraction: f64) -> ScrollbarId {
        let id = ScrollbarId(self.next_raw_id());
        self.scrollbars.insert(id, fraction);
        id
    }

    pub fn set_scroll_fraction(&mut self, scrollbar: ScrollbarId, fraction: f64) {
        if let Some(f) = self.scrollbars.get_mut(&scrollbar) {
            *f = fraction.clamp(0.0, 1.0);
        }
    }

    pub fn destroy_widget(&mut self, widget: WidgetId) {
        self.widgets.remove(&widget);
    }

    pub fn destroy_item(&mut self, surface: SurfaceId, item: ItemId) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.items.remove(&item);
        }
    }

    /// Make the next `count` overlay creations fail.
    pub fn fail_next_render(&mut self, count: u32) {
        self.fail_renders = count;
    }

    /// Destroy an overlay behind the controller's back, as a window manager might.
    pub fn close_overlay_externally(&mut self, overlay: OverlayId) {
        self.overlays.remove(&overlay);
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Move the pointer onto `target` and report the enter/leave transitions.
    pub fn hover(&mut self, target: Target, at: Point) -> Vec<HostEvent> {
        self.pointer = Some(at);
        if self.hovered == Some(target) {
            return Vec::new();
        }
        let mut events = self.unhover();
        self.pointer = Some(at);
        self.hovered = Some(target);
        events.extend(self.bindings_on(target).map(HostEvent::Enter));
        events
    }

    /// Move the pointer off whatever it is hovering.
    pub fn unhover(&mut self) -> Vec<HostEvent> {
        let Some(target) = self.hovered.take() else {
            return Vec::new();
        };
        self.bindings_on(target).map(HostEvent::Leave).collect()
    }

    fn bindings_on(&self, target: Target) -> impl Iterator<Item = BindingId> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, t)| **t == target)
            .map(|(&b, _)| b)
    }

    /// Advance the virtual clock and return the timers that came due, oldest first.
    pub fn advance(&mut self, by: Duration) -> Vec<HostEvent> {
        self.now_ms = self.now_ms.saturating_add(u64::try_from(by.as_millis()).unwrap_or(u64::MAX));
        let mut due: Vec<(u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= self.now_ms)
            .map(|(&id, t)| (t.due_ms, id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| HostEvent::TimerFired(id)).collect()
    }

    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, &SimOverlay)> {
        self.overlays.iter().map(|(&id, o)| (id, o))
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&SimOverlay> {
        self.overlays.get(&id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Total overlays ever created.
    pub fn overlays_created(&self) -> u64 {
        self.overlays_created
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    fn measure(&self, content: &OverlayContent) -> Size {
        if let Some(size) = self.overlay_size {
            return size;
        }
        let lines: Vec<&str> = content.text.lines().collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let chars = i32::try_from(widest).unwrap_or(i32::MAX);
        let rows = i32::try_from(lines.len().max(1)).unwrap_or(i32::MAX);
        let frame = match content.relief {
            Relief::Flat => 0,
            Relief::Ridge => content.border_width.saturating_mul(2),
        };
        Size::new(
            chars
                .saturating_mul(self.metrics.char_width)
                .saturating_add(content.padding_x.saturating_mul(2))
                .saturating_add(frame),
            rows.saturating_mul(self.metrics.line_height).saturating_add(frame),
        )
    }

    fn parent_exists(&self, parent: OverlayParent) -> bool {
        match parent {
            OverlayParent::Widget(w) => self.widgets.contains_key(&w),
            OverlayParent::Window(w) => self.windows.contains_key(&w),
        }
    }
}

impl HostSurface for SimHost {
    fn bind_enter_leave(&mut self, target: &Target) -> Result<BindingId> {
        if !self.target_exists(target) {
            return Err(Error::unavailable(format!("cannot bind {}: no such target", target)));
        }
        let id = BindingId(self.next_raw_id());
        self.bindings.insert(id, *target);
        Ok(id)
    }

    fn unbind(&mut self, binding: BindingId) {
        self.bindings.remove(&binding);
    }

    fn target_exists(&self, target: &Target) -> bool {
        match target {
            Target::Widget(w) => self.widgets.contains_key(w),
            Target::Region { surface, item } => self
                .surfaces
                .get(surface)
                .is_some_and(|s| s.items.contains_key(item)),
        }
    }

    fn create_overlay(&mut self, parent: OverlayParent, content: &OverlayContent) -> Result<OverlayId> {
        if self.fail_renders > 0 {
            self.fail_renders -= 1;
            return Err(Error::RenderFailure(format!("cannot render label {:?}", content.text)));
        }
        if !self.parent_exists(parent) {
            return Err(Error::unavailable(format!("overlay parent {:?} is gone", parent)));
        }
        let id = OverlayId(self.next_raw_id());
        let size = self.measure(content);
        self.overlays.insert(
            id,
            SimOverlay {
                parent,
                content: content.clone(),
                size,
                position: Point::default(),
            },
        );
        self.overlays_created += 1;
        Ok(id)
    }

    fn destroy_overlay(&mut self, overlay: OverlayId) -> Result<()> {
        self.overlays
            .remove(&overlay)
            .map(|_| ())
            .ok_or_else(|| Error::unavailable(format!("{} already destroyed", overlay)))
    }

    fn measure_overlay(&self, overlay: OverlayId) -> Result<Size> {
        self.overlays
            .get(&overlay)
            .map(|o| o.size)
            .ok_or_else(|| Error::unavailable(format!("{} does not exist", overlay)))
    }

    fn move_overlay(&mut self, overlay: OverlayId, position: Point) -> Result<()> {
        let o = self
            .overlays
            .get_mut(&overlay)
            .ok_or_else(|| Error::unavailable(format!("{} does not exist", overlay)))?;
        o.position = position;
        Ok(())
    }

    fn target_geometry(&self, target: &Target) -> Result<Rect> {
        let rect = match target {
            Target::Widget(w) => self.widgets.get(w).map(|w| w.rect),
            Target::Region { surface, item } => self
                .surfaces
                .get(surface)
                .and_then(|s| s.items.get(item))
                .copied(),
        };
        rect.ok_or_else(|| Error::unavailable(format!("{} does not exist", target)))
    }

    fn surface_origin(&self, surface: SurfaceId) -> Result<Point> {
        self.surfaces
            .get(&surface)
            .map(|s| s.origin)
            .ok_or_else(|| Error::unavailable(format!("{} does not exist", surface)))
    }

    fn pointer_position(&self) -> Result<Point> {
        self.pointer
            .ok_or_else(|| Error::unavailable("pointer is not on this screen"))
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn scroll_fraction(&self, scrollbar: ScrollbarId) -> Result<f64> {
        self.scrollbars
            .get(&scrollbar)
            .copied()
            .ok_or_else(|| Error::unavailable(format!("{} does not exist", scrollbar)))
    }

    fn schedule_timer(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_raw_id());
        let due_ms = self.now_ms.saturating_add(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
        self.timers.insert(id, PendingTimer { due_ms });
        id
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}
