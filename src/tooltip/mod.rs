//! Hover tooltips: options, attachment variants, placement and lifecycle.

pub mod attachment;
pub mod controller;
pub mod manager;
pub mod options;
pub mod placement;

pub use attachment::{Attachment, AttachmentBuilder, ScrollBinding, TargetRef};
pub use controller::{ControllerState, DismissReason, TooltipController, TooltipSession, Transition};
pub use manager::{TooltipId, TooltipManager};
pub use options::{ConfigPatch, FontSpec, TooltipOptions};
pub use placement::{FlipMode, PlacementConfig, PointerPlacement, ScrollOffsets, ScrollPlacement, WidgetPlacement};
