//! Draggable, snap-to-position bottom sheet.
//!
//! The crate owns the gesture-to-animation state machine: imperative commands
//! ([`BottomSheet::open`], [`BottomSheet::close`], ...) and a vertical drag
//! gesture both resolve to a spring animation toward one of the configured
//! snap points. Rendering is left to the host, which reads a [`SheetFrame`]
//! projection after each frame.

mod backdrop;
mod config;
mod error;
pub mod geometry;
pub mod gesture;
mod projection;
mod sheet;
pub mod style;

pub use backdrop::BackdropRange;
pub use config::{IndicatorPosition, SheetConfig, DEFAULT_DRAG_SLOP};
pub use error::{ConfigurationError, PointsError, SnapError};
pub use geometry::{nearest_point, parse_percentage, Geometry, PixelOffset, SnapPoints};
pub use gesture::{PointerEvent, PointerEventKind, PointerId, SheetGestureDetector};
pub use projection::{BackdropFrame, LayerFrame, Shadow, SheetFrame};
pub use sheet::{BottomSheet, ChangePoint, SheetCallbacks, SheetState};
pub use style::{BackdropStyle, Color, IndicatorStyle, SheetStyle, SurfaceStyle};

pub use snapsheet_animation::SpringSpec;
pub use snapsheet_core::{FrameClock, FrameRuntime};
