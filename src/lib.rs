//! Infinite-canvas desktop: a pan/zoom/momentum viewport engine and the
//! desktop model (icons, windows, taskbar) that sits on top of it.
//!
//! The engine is renderer-agnostic. A host forwards pointer, touch and wheel
//! input to a [`ViewportEngine`], drives a [`FrameLoop`] once per display
//! refresh, and applies the resulting [`Transform`] to the surface layer only.

pub mod animation;
pub mod clock;
pub mod config;
pub mod desktop;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod momentum;
pub mod transform;
pub mod viewport;

pub use animation::{CancelHandle, FrameLoop, FrameOutcome};
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::{ConfigError, MomentumConfig, ViewportConfig, ZoomConfig};
pub use desktop::{
    AppKind, DesktopIcon, Window, WindowError, WindowId, WindowManager, WindowState,
};
pub use engine::ViewportEngine;
pub use geometry::{Rect, Vec2};
pub use gesture::GesturePhase;
pub use transform::{Layer, Transform, TransformPublisher};
pub use viewport::{Pinch, ViewportState};
