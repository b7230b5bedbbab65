//! Scripted demo scene.
//!
//! One window holds a button, a plain drawing surface with a text item, and a
//! scrolled drawing surface (1200x1200 content) with an item far from the
//! origin. Each gets one tooltip variant. A [`Step`] script then hovers,
//! waits, scrolls and reconfigures, and every resulting transition is
//! recorded as a [`TranscriptEntry`].

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::geometry::{Point, Rect, Size};
use crate::host::{HostEvent, ItemId, ScrollbarId, SurfaceId, Target, WidgetId};
use crate::sim::SimHost;
use crate::tooltip::{
    AttachmentBuilder, ConfigPatch, DismissReason, PlacementConfig, TargetRef, TooltipId, TooltipManager,
    TooltipOptions, Transition,
};
use crate::Result;

const SCROLL_EXTENT: i32 = 1200;

/// Which of the three demo tooltips a step refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoTarget {
    Button,
    CanvasItem,
    ScrolledItem,
}

impl DemoTarget {
    fn label(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::CanvasItem => "canvas item",
            Self::ScrolledItem => "scrolled item",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Hover { target: DemoTarget, at: Point },
    Leave,
    Wait(Duration),
    Scroll { x: f64, y: f64 },
    Retext { target: DemoTarget, text: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hover { target, at } => write!(f, "hover {} at ({}, {})", target.label(), at.x, at.y),
            Self::Leave => write!(f, "leave"),
            Self::Wait(d) => write!(f, "wait {}ms", d.as_millis()),
            Self::Scroll { x, y } => write!(f, "scroll to ({:.2}, {:.2})", x, y),
            Self::Retext { target, text } => write!(f, "retext {} to {:?}", target.label(), text),
        }
    }
}

/// One recorded line of a demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub at_ms: u64,
    pub step: String,
    pub tooltip: Option<String>,
    pub outcome: String,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tooltip {
            Some(tip) => write!(f, "[{}ms] {} -> {}: {}", self.at_ms, self.step, tip, self.outcome),
            None => write!(f, "[{}ms] {}: {}", self.at_ms, self.step, self.outcome),
        }
    }
}

/// The simulated host, its tooltips and the handles the script needs.
pub struct DemoScene {
    pub host: SimHost,
    pub manager: TooltipManager,
    pub button: WidgetId,
    pub canvas: (SurfaceId, ItemId),
    pub scrolled: (SurfaceId, ItemId),
    pub scrollbars: (ScrollbarId, ScrollbarId),
    pub tips: [(DemoTarget, TooltipId); 3],
}

impl DemoScene {
    /// Lay out the scene on a `screen`-sized display. `defaults` supplies font
    /// and colors; each tooltip sets its own text.
    pub fn build(screen: Size, placement: PlacementConfig, defaults: &TooltipOptions) -> Result<Self> {
        let mut host = SimHost::new(screen);
        let mut manager = TooltipManager::new(placement);

        let window = host.add_window(Rect::new(100, 40, 420, 860));
        let button = host.add_widget(window, None, Rect::new(275, 40, 70, 26));

        let canvas = host.add_surface(window, Point::new(110, 70));
        let canvas_item = host.add_item(canvas, Rect::from_corners(5, 5, 125, 18))?;

        let scrolled = host.add_surface(window, Point::new(110, 480));
        let scrolled_item = host.add_item(scrolled, Rect::from_corners(650, 650, 830, 663))?;
        let scroll_x = host.add_scrollbar(0.0);
        let scroll_y = host.add_scrollbar(0.0);

        let button_tip = manager.attach(
            &mut host,
            AttachmentBuilder::new(TargetRef::Widget(button)).build()?,
            TooltipOptions { text: "Default Settings".into(), ..defaults.clone() },
        )?;
        let canvas_tip = manager.attach(
            &mut host,
            AttachmentBuilder::new(TargetRef::Item(canvas_item))
                .window(window)
                .surface(canvas)
                .build()?,
            TooltipOptions { text: "Drawing-surface item".into(), ..defaults.clone() },
        )?;
        let scrolled_tip = manager.attach(
            &mut host,
            AttachmentBuilder::new(TargetRef::Item(scrolled_item))
                .window(window)
                .surface(scrolled)
                .scrollbars(scroll_x, scroll_y)
                .scroll_region(SCROLL_EXTENT, SCROLL_EXTENT)
                .build()?,
            TooltipOptions { text: "Scrolled item".into(), time_ms: 0, ..defaults.clone() },
        )?;

        Ok(Self {
            host,
            manager,
            button,
            canvas: (canvas, canvas_item),
            scrolled: (scrolled, scrolled_item),
            scrollbars: (scroll_x, scroll_y),
            tips: [
                (DemoTarget::Button, button_tip),
                (DemoTarget::CanvasItem, canvas_tip),
                (DemoTarget::ScrolledItem, scrolled_tip),
            ],
        })
    }

    pub fn target(&self, which: DemoTarget) -> Target {
        match which {
            DemoTarget::Button => Target::Widget(self.button),
            DemoTarget::CanvasItem => Target::Region { surface: self.canvas.0, item: self.canvas.1 },
            DemoTarget::ScrolledItem => Target::Region { surface: self.scrolled.0, item: self.scrolled.1 },
        }
    }

    pub fn tooltip(&self, which: DemoTarget) -> TooltipId {
        let index = match which {
            DemoTarget::Button => 0,
            DemoTarget::CanvasItem => 1,
            DemoTarget::ScrolledItem => 2,
        };
        self.tips[index].1
    }

    /// Run `steps`, calling `pace` before each wait is applied to the clock.
    pub fn run<F>(&mut self, steps: &[Step], mut pace: F) -> Result<Vec<TranscriptEntry>>
    where
        F: FnMut(Duration),
    {
        let mut transcript = Vec::new();
        for step in steps {
            let events: Vec<HostEvent> = match step {
                Step::Hover { target, at } => {
                    let target = self.target(*target);
                    self.host.hover(target, *at)
                }
                Step::Leave => self.host.unhover(),
                Step::Wait(d) => {
                    pace(*d);
                    self.host.advance(*d)
                }
                Step::Scroll { x, y } => {
                    self.host.set_scroll_fraction(self.scrollbars.0, *x);
                    self.host.set_scroll_fraction(self.scrollbars.1, *y);
                    Vec::new()
                }
                Step::Retext { target, text } => {
                    let id = self.tooltip(*target);
                    self.manager.reconfigure(id, ConfigPatch::new().text(text.clone()))?;
                    transcript.push(self.entry(step, Some(id), "reconfigured".into()));
                    continue;
                }
            };

            let transitions = self.manager.dispatch_all(&mut self.host, events);
            if transitions.is_empty() {
                transcript.push(self.entry(step, None, "no change".into()));
            }
            for (id, transition) in transitions {
                let outcome = self.describe(&transition);
                transcript.push(self.entry(step, Some(id), outcome));
            }
        }

        transcript.push(self.entry_raw(
            "done",
            None,
            format!(
                "{} overlays created, {} live, {} timers pending",
                self.host.overlays_created(),
                self.host.overlay_count(),
                self.host.pending_timers()
            ),
        ));
        Ok(transcript)
    }

    fn entry(&self, step: &Step, tooltip: Option<TooltipId>, outcome: String) -> TranscriptEntry {
        self.entry_raw(&step.to_string(), tooltip, outcome)
    }

    fn entry_raw(&self, step: &str, tooltip: Option<TooltipId>, outcome: String) -> TranscriptEntry {
        TranscriptEntry {
            at_ms: u64::try_from(self.host.now().as_millis()).unwrap_or(u64::MAX),
            step: step.to_string(),
            tooltip: tooltip.map(|id| id.to_string()),
            outcome,
        }
    }

    fn describe(&self, transition: &Transition) -> String {
        match transition {
            Transition::Shown { overlay, position } => {
                let text = self
                    .host
                    .overlay(*overlay)
                    .map(|o| o.content.text.as_str())
                    .unwrap_or_default();
                match position {
                    Some(p) => format!("shown {:?} at ({}, {})", text, p.x, p.y),
                    None => format!("shown {:?} at host default position", text),
                }
            }
            Transition::Dismissed(reason) => {
                let reason = match reason {
                    DismissReason::Leave => "leave",
                    DismissReason::Timeout => "timeout",
                    DismissReason::Forced => "forced",
                };
                format!("dismissed ({})", reason)
            }
            Transition::Ignored => "ignored".into(),
            Transition::Aborted(e) => format!("aborted: {}", e),
        }
    }
}

/// The default walkthrough: every variant, a timeout, a stray leave, a
/// scroll and a reconfigure while visible.
pub fn default_script() -> Vec<Step> {
    vec![
        Step::Hover { target: DemoTarget::Button, at: Point::new(300, 50) },
        Step::Wait(Duration::from_millis(500)),
        Step::Leave,
        Step::Hover { target: DemoTarget::CanvasItem, at: Point::new(150, 85) },
        Step::Wait(Duration::from_millis(2000)),
        Step::Leave,
        Step::Scroll { x: 0.5, y: 0.5 },
        Step::Hover { target: DemoTarget::ScrolledItem, at: Point::new(170, 540) },
        Step::Retext { target: DemoTarget::ScrolledItem, text: "Scrolled item (updated)".into() },
        Step::Wait(Duration::from_millis(5000)),
        Step::Leave,
        Step::Hover { target: DemoTarget::ScrolledItem, at: Point::new(170, 540) },
        Step::Leave,
    ]
}
