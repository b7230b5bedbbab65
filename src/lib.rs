//! Hover tooltips
//!
//! Attaches hover tooltips to widgets and to items on (optionally scrolled)
//! drawing surfaces. The toolkit is abstracted behind [`HostSurface`]; the
//! crate owns the enter/leave/timeout lifecycle and keeps the overlay on
//! screen. [`sim::SimHost`] is a headless host for tests and the demo CLI.

pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod host;
pub mod sim;
pub mod tooltip;

pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use host::{HostEvent, HostSurface, Target};
pub use tooltip::{Attachment, AttachmentBuilder, TooltipController, TooltipManager, TooltipOptions};

/// Crate version, e.g. `"0.1.0"`.
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
