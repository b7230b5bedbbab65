//! Tests for the tooltip hover/dismiss state machine.

use std::time::Duration;

use hover_tip::geometry::{Point, Rect, Size};
use hover_tip::host::{HostEvent, HostSurface, Target, TimerId, WidgetId};
use hover_tip::sim::SimHost;
use hover_tip::tooltip::{
    Attachment, AttachmentBuilder, ConfigPatch, ControllerState, DismissReason, PlacementConfig,
    TargetRef, TooltipController, TooltipOptions, Transition,
};
use hover_tip::Error;

/// A host with one 50x20 widget at (100, 100) and fixed 80x30 overlays.
fn widget_host() -> (SimHost, WidgetId) {
    let mut host = SimHost::new(Size::new(800, 600));
    host.set_overlay_size(Some(Size::new(80, 30)));
    let window = host.add_window(Rect::new(0, 0, 800, 600));
    let widget = host.add_widget(window, None, Rect::new(100, 100, 50, 20));
    (host, widget)
}

fn widget_controller(widget: WidgetId, options: TooltipOptions) -> TooltipController {
    TooltipController::new(Attachment::widget(widget), options, PlacementConfig::default()).unwrap()
}

fn fired_timer(events: &[HostEvent]) -> TimerId {
    match events {
        [HostEvent::TimerFired(t)] => *t,
        other => panic!("expected exactly one timer, got {:?}", other),
    }
}

#[test]
fn test_enter_then_leave_returns_to_idle_without_timers() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));

    match tip.on_enter(&mut host) {
        Transition::Shown { position, .. } => assert_eq!(position, Some(Point::new(155, 120))),
        other => panic!("expected Shown, got {:?}", other),
    }
    assert!(tip.is_visible());
    assert_eq!(host.pending_timers(), 1);
    assert_eq!(host.overlay_count(), 1);

    assert!(matches!(tip.on_leave(&mut host), Transition::Dismissed(DismissReason::Leave)));
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(host.overlay_count(), 0);
}

#[test]
fn test_overlay_is_moved_to_computed_position() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    tip.on_enter(&mut host);

    let session = tip.session().unwrap();
    let overlay = host.overlay(session.overlay).unwrap();
    assert_eq!(overlay.position, Point::new(155, 120));
    assert_eq!(overlay.content.text, "Save");
    assert_eq!(overlay.content.bg, "lightyellow");
}

#[test]
fn test_unvalidated_extreme_margin_still_places() {
    let (mut host, widget) = widget_host();
    let mut placement = PlacementConfig::default();
    placement.widget.bottom_margin = i32::MAX;
    let mut tip =
        TooltipController::new(Attachment::widget(widget), TooltipOptions::new("Save"), placement).unwrap();

    match tip.on_enter(&mut host) {
        Transition::Shown { position, .. } => assert_eq!(position, Some(Point::new(155, 70))),
        other => panic!("expected Shown, got {:?}", other),
    }
}

#[test]
fn test_auto_dismiss_after_timeout() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save").time_ms(750));
    tip.on_enter(&mut host);

    assert!(host.advance(Duration::from_millis(749)).is_empty());
    let timer = fired_timer(&host.advance(Duration::from_millis(1)));

    assert!(matches!(tip.on_timeout(&mut host, timer), Transition::Dismissed(DismissReason::Timeout)));
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.overlay_count(), 0);
}

#[test]
fn test_non_positive_timeout_waits_for_leave() {
    for time_ms in [0, -1] {
        let (mut host, widget) = widget_host();
        let mut tip = widget_controller(widget, TooltipOptions::new("Sticky").time_ms(time_ms));
        tip.on_enter(&mut host);

        assert_eq!(host.pending_timers(), 0);
        assert!(host.advance(Duration::from_secs(60)).is_empty());
        assert!(tip.is_visible(), "time {} should not auto-dismiss", time_ms);

        assert!(matches!(tip.on_leave(&mut host), Transition::Dismissed(_)));
    }
}

#[test]
fn test_leave_and_timeout_while_idle_are_ignored() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));

    for _ in 0..3 {
        assert!(tip.on_leave(&mut host).is_ignored());
        assert!(tip.on_timeout(&mut host, TimerId(42)).is_ignored());
    }
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.overlays_created(), 0);
}

#[test]
fn test_double_leave_after_show_is_idempotent() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    tip.on_enter(&mut host);

    assert!(matches!(tip.on_leave(&mut host), Transition::Dismissed(_)));
    assert!(tip.on_leave(&mut host).is_ignored());
    assert_eq!(host.overlay_count(), 0);
}

#[test]
fn test_second_enter_while_visible_is_ignored() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));

    assert!(matches!(tip.on_enter(&mut host), Transition::Shown { .. }));
    assert!(tip.on_enter(&mut host).is_ignored());
    assert_eq!(host.overlay_count(), 1);
    assert_eq!(host.overlays_created(), 1);
    assert_eq!(host.pending_timers(), 1);
}

#[test]
fn test_vanished_target_aborts_silently() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    host.destroy_widget(widget);

    assert!(matches!(
        tip.on_enter(&mut host),
        Transition::Aborted(Error::ResourceUnavailable(_))
    ));
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.overlays_created(), 0);
}

#[test]
fn test_render_failure_reverts_to_idle_without_timer() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    host.fail_next_render(1);

    assert!(matches!(tip.on_enter(&mut host), Transition::Aborted(Error::RenderFailure(_))));
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.pending_timers(), 0);

    // The next hover works normally.
    assert!(matches!(tip.on_enter(&mut host), Transition::Shown { .. }));
}

#[test]
fn test_stale_timer_from_earlier_session_is_ignored() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));

    tip.on_enter(&mut host);
    let first = tip.session().unwrap().timer.unwrap();
    tip.on_leave(&mut host);
    tip.on_enter(&mut host);
    let second = tip.session().unwrap().timer.unwrap();
    assert_ne!(first, second);

    assert!(tip.on_timeout(&mut host, first).is_ignored());
    assert!(tip.is_visible());
    assert!(matches!(tip.on_timeout(&mut host, second), Transition::Dismissed(DismissReason::Timeout)));
}

#[test]
fn test_externally_destroyed_overlay_still_tears_down() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    tip.on_enter(&mut host);

    let overlay = tip.session().unwrap().overlay;
    host.close_overlay_externally(overlay);

    assert!(matches!(tip.on_leave(&mut host), Transition::Dismissed(DismissReason::Leave)));
    assert_eq!(*tip.state(), ControllerState::Idle);
    assert_eq!(host.pending_timers(), 0);
}

#[test]
fn test_region_tooltip_follows_pointer() {
    let mut host = SimHost::new(Size::new(800, 600));
    host.set_overlay_size(Some(Size::new(60, 20)));
    let window = host.add_window(Rect::new(0, 0, 800, 600));
    let surface = host.add_surface(window, Point::new(0, 0));
    let item = host.add_item(surface, Rect::new(5, 5, 100, 15)).unwrap();

    let attachment = AttachmentBuilder::new(TargetRef::Item(item))
        .window(window)
        .surface(surface)
        .build()
        .unwrap();
    let mut tip = TooltipController::new(attachment, TooltipOptions::new("Item"), PlacementConfig::default()).unwrap();

    host.set_pointer(Some(Point::new(790, 100)));
    match tip.on_enter(&mut host) {
        Transition::Shown { position, .. } => assert_eq!(position, Some(Point::new(730, 110))),
        other => panic!("expected Shown, got {:?}", other),
    }
}

#[test]
fn test_failed_geometry_keeps_host_default_position() {
    let mut host = SimHost::new(Size::new(800, 600));
    let window = host.add_window(Rect::new(0, 0, 800, 600));
    let surface = host.add_surface(window, Point::new(0, 0));
    let item = host.add_item(surface, Rect::new(5, 5, 100, 15)).unwrap();
    let mut tip = TooltipController::new(
        Attachment::region(window, surface, item),
        TooltipOptions::new("Item"),
        PlacementConfig::default(),
    )
    .unwrap();

    // No pointer on this screen: placement cannot be computed.
    host.set_pointer(None);
    match tip.on_enter(&mut host) {
        Transition::Shown { overlay, position } => {
            assert_eq!(position, None);
            assert_eq!(host.overlay(overlay).unwrap().position, Point::default());
        }
        other => panic!("expected Shown, got {:?}", other),
    }
    assert!(tip.is_visible());
}

#[test]
fn test_scrollable_region_uses_viewport_position() {
    let mut host = SimHost::new(Size::new(800, 600));
    host.set_overlay_size(Some(Size::new(80, 30)));
    let window = host.add_window(Rect::new(0, 0, 800, 600));
    let surface = host.add_surface(window, Point::new(500, 500));
    let item = host.add_item(surface, Rect::from_corners(200, 200, 250, 220)).unwrap();
    let sx = host.add_scrollbar(0.5);
    let sy = host.add_scrollbar(0.5);

    let attachment = AttachmentBuilder::new(TargetRef::Item(item))
        .window(window)
        .surface(surface)
        .scrollbars(sx, sy)
        .scroll_region(1200, 1200)
        .build()
        .unwrap();
    let mut tip = TooltipController::new(attachment, TooltipOptions::new("Item"), PlacementConfig::default()).unwrap();

    match tip.on_enter(&mut host) {
        // (-400 + 500 + 50, -400 + 500 + 20)
        Transition::Shown { position, .. } => assert_eq!(position, Some(Point::new(150, 120))),
        other => panic!("expected Shown, got {:?}", other),
    }
}

#[test]
fn test_reconfigure_applies_on_next_enter() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Before"));
    tip.on_enter(&mut host);
    let shown = tip.session().unwrap().overlay;

    tip.reconfigure(ConfigPatch::new().text("After").bg("white")).unwrap();
    assert!(tip.is_visible(), "reconfigure must not hide a visible tooltip");
    assert_eq!(host.overlay(shown).unwrap().content.text, "Before");

    tip.on_leave(&mut host);
    tip.on_enter(&mut host);
    let overlay = host.overlay(tip.session().unwrap().overlay).unwrap();
    assert_eq!(overlay.content.text, "After");
    assert_eq!(overlay.content.bg, "white");
}

#[test]
fn test_invalid_reconfigure_leaves_options_untouched() {
    let (_host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Keep").time_ms(500));

    let err = tip
        .reconfigure(ConfigPatch::new().time_ms(9000).text(""))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
    assert_eq!(tip.options().text, "Keep");
    assert_eq!(tip.options().time_ms, 500);
}

#[test]
fn test_controller_rejects_invalid_options() {
    let err = TooltipController::new(
        Attachment::widget(WidgetId(1)),
        TooltipOptions::new(""),
        PlacementConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn test_dismiss_forces_teardown() {
    let (mut host, widget) = widget_host();
    let mut tip = widget_controller(widget, TooltipOptions::new("Save"));
    tip.on_enter(&mut host);

    assert!(matches!(tip.dismiss(&mut host), Transition::Dismissed(DismissReason::Forced)));
    assert!(tip.dismiss(&mut host).is_ignored());
    assert_eq!(host.pending_timers(), 0);
    assert!(host.target_exists(&Target::Widget(widget)));
}
