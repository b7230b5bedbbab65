//! Hover/dismiss state machine for a single tooltip attachment.
//!
//! ```text
//! Idle --enter--> Visible --leave|timeout--> Disposing --> Idle
//! ```
//!
//! Enter while `Visible` is ignored, so there is at most one overlay per
//! attachment. Leave and timeout while `Idle` or `Disposing` are ignored
//! because a single pointer movement can be reported by more than one
//! binding. Teardown always cancels the pending timer before it destroys the
//! overlay and never returns an error.

use crate::geometry::Point;
use crate::host::{HostSurface, OverlayId, TimerId};
use crate::tooltip::attachment::Attachment;
use crate::tooltip::options::{ConfigPatch, TooltipOptions};
use crate::tooltip::placement::{self, PlacementConfig, ScrollOffsets};
use crate::{Error, Result};

/// A tooltip that is currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipSession {
    pub overlay: OverlayId,
    /// Pending auto-dismiss timer, if auto-dismiss is enabled.
    pub timer: Option<TimerId>,
    /// Where the overlay was moved to. `None` if a geometry query failed and
    /// the overlay kept the host's default position.
    pub position: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Visible(TooltipSession),
    Disposing,
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Visible(_) => "visible",
            Self::Disposing => "disposing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Leave,
    Timeout,
    /// Torn down by the owner, e.g. on detach.
    Forced,
}

/// Result of feeding one notification to the controller.
#[derive(Debug)]
pub enum Transition {
    Shown {
        overlay: OverlayId,
        position: Option<Point>,
    },
    Dismissed(DismissReason),
    /// The notification did not apply to the current state.
    Ignored,
    /// Enter was abandoned; the controller stayed `Idle`.
    Aborted(Error),
}

impl Transition {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Drives one attachment through its enter/leave/timeout lifecycle.
#[derive(Debug)]
pub struct TooltipController {
    attachment: Attachment,
    options: TooltipOptions,
    placement: PlacementConfig,
    state: ControllerState,
}

impl TooltipController {
    /// Create an idle controller. Fails if `options` do not validate.
    pub fn new(attachment: Attachment, options: TooltipOptions, placement: PlacementConfig) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            attachment,
            options,
            placement,
            state: ControllerState::Idle,
        })
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn options(&self) -> &TooltipOptions {
        &self.options
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn session(&self) -> Option<&TooltipSession> {
        match &self.state {
            ControllerState::Visible(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.session().is_some()
    }

    /// Whether `timer` is this controller's live auto-dismiss timer.
    pub fn owns_timer(&self, timer: TimerId) -> bool {
        self.session().is_some_and(|s| s.timer == Some(timer))
    }

    /// Update display options. A visible tooltip keeps its current look; the
    /// change shows on the next enter. Nothing changes if validation fails.
    pub fn reconfigure(&mut self, patch: ConfigPatch) -> Result<()> {
        patch.apply_to(&mut self.options)
    }

    pub fn on_enter<H: HostSurface + ?Sized>(&mut self, host: &mut H) -> Transition {
        if !matches!(self.state, ControllerState::Idle) {
            tracing::trace!(target_ref = %self.attachment.target(), state = self.state.name(), "enter ignored");
            return Transition::Ignored;
        }

        let target = self.attachment.target();
        if !host.target_exists(&target) {
            tracing::debug!(target_ref = %target, "enter on vanished target");
            return Transition::Aborted(Error::unavailable(format!("{} no longer exists", target)));
        }

        let content = self.options.overlay_content();
        let overlay = match host.create_overlay(self.attachment.overlay_parent(), &content) {
            Ok(overlay) => overlay,
            Err(e) => {
                tracing::warn!(target_ref = %target, "tooltip overlay creation failed: {}", e);
                let e = if e.is_recoverable() { e } else { Error::RenderFailure(e.to_string()) };
                return Transition::Aborted(e);
            }
        };

        let position = match self.place(host, overlay) {
            Ok(pos) => Some(pos),
            Err(e) => {
                tracing::debug!(target_ref = %target, "tooltip placement skipped: {}", e);
                None
            }
        };

        let timer = self.options.auto_dismiss().map(|delay| host.schedule_timer(delay));
        tracing::debug!(target_ref = %target, %overlay, ?position, ?timer, "tooltip shown");

        self.state = ControllerState::Visible(TooltipSession { overlay, timer, position });
        Transition::Shown { overlay, position }
    }

    pub fn on_leave<H: HostSurface + ?Sized>(&mut self, host: &mut H) -> Transition {
        if !self.is_visible() {
            return Transition::Ignored;
        }
        self.teardown(host);
        Transition::Dismissed(DismissReason::Leave)
    }

    /// Handle a fired timer. Stale timers (cancelled, or from an earlier
    /// session) are ignored.
    pub fn on_timeout<H: HostSurface + ?Sized>(&mut self, host: &mut H, timer: TimerId) -> Transition {
        if !self.owns_timer(timer) {
            tracing::trace!(%timer, state = self.state.name(), "timeout ignored");
            return Transition::Ignored;
        }
        self.teardown(host);
        Transition::Dismissed(DismissReason::Timeout)
    }

    /// Tear down any visible tooltip regardless of pointer state.
    pub fn dismiss<H: HostSurface + ?Sized>(&mut self, host: &mut H) -> Transition {
        if !self.is_visible() {
            return Transition::Ignored;
        }
        self.teardown(host);
        Transition::Dismissed(DismissReason::Forced)
    }

    fn teardown<H: HostSurface + ?Sized>(&mut self, host: &mut H) {
        let ControllerState::Visible(session) = std::mem::replace(&mut self.state, ControllerState::Disposing) else {
            return;
        };
        if let Some(timer) = session.timer {
            host.cancel_timer(timer);
        }
        if let Err(e) = host.destroy_overlay(session.overlay) {
            tracing::debug!(overlay = %session.overlay, "overlay already gone: {}", e);
        }
        self.state = ControllerState::Idle;
        tracing::debug!(target_ref = %self.attachment.target(), "tooltip hidden");
    }

    /// Measure the overlay, compute its position and move it there.
    fn place<H: HostSurface + ?Sized>(&self, host: &mut H, overlay: OverlayId) -> Result<Point> {
        let size = host.measure_overlay(overlay)?;
        let screen = host.screen_size();
        let target = self.attachment.target();

        let pos = match self.attachment {
            Attachment::Widget { .. } => {
                let rect = host.target_geometry(&target)?;
                placement::place_beside_widget(rect, size, screen, &self.placement.widget)
            }
            Attachment::Region { .. } => {
                let pointer = host.pointer_position()?;
                placement::place_at_pointer(pointer, size, screen, &self.placement.pointer)
            }
            Attachment::ScrollableRegion { surface, scroll, .. } => {
                let region = host.target_geometry(&target)?;
                let offsets = ScrollOffsets {
                    fraction_x: host.scroll_fraction(scroll.x)?,
                    fraction_y: host.scroll_fraction(scroll.y)?,
                    extent: scroll.extent,
                };
                let origin = host.surface_origin(surface)?;
                placement::place_beside_scrolled_region(
                    region,
                    &offsets,
                    origin,
                    size,
                    screen,
                    &self.placement.scroll,
                )
            }
        };
        host.move_overlay(overlay, pos)?;
        Ok(pos)
    }
}
