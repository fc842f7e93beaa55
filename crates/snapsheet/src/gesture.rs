//! Vertical drag tracking.
//!
//! [`SheetGestureDetector`] turns raw pointer events into the grant/move/release
//! calls on [`BottomSheet`]. Only one pointer is tracked at a time.

use crate::geometry::PixelOffset;
use crate::sheet::BottomSheet;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer sample on the sheet's drag handle. Only the vertical position matters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, y: f32) -> Self {
        Self { id: 0, kind, y }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }
}

/// Offset captured when a drag is granted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DragSession {
    baseline: PixelOffset,
    last_dy: f32,
}

impl DragSession {
    pub fn new(baseline: PixelOffset) -> Self {
        Self {
            baseline,
            last_dy: 0.0,
        }
    }

    pub fn baseline(&self) -> PixelOffset {
        self.baseline
    }

    pub fn last_dy(&self) -> f32 {
        self.last_dy
    }

    pub fn record(&mut self, dy: f32) -> PixelOffset {
        self.last_dy = dy;
        self.baseline + dy
    }

    pub fn offset_for(&self, dy: f32) -> PixelOffset {
        self.baseline + dy
    }
}

/// Damps movement past the most expanded point to a third of the overshoot.
///
/// Only the expand side is damped; dragging downward always tracks 1:1.
pub(crate) fn rubber_band(candidate: PixelOffset, min: PixelOffset) -> PixelOffset {
    if candidate < min {
        min - (min - candidate) / 3.0
    } else {
        candidate
    }
}

#[derive(Clone, Copy, Debug)]
struct Tracking {
    id: PointerId,
    start_y: f32,
    last_dy: f32,
}

/// Feeds pointer events from the drag handle into a [`BottomSheet`].
#[derive(Debug, Default)]
pub struct SheetGestureDetector {
    tracking: Option<Tracking>,
}

impl SheetGestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Routes `event` to `sheet`. Returns `true` if the event was consumed.
    pub fn handle(&mut self, sheet: &BottomSheet, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if self.tracking.is_some() {
                    log::debug!("ignoring pointer {} while another drag is active", event.id);
                    return false;
                }
                if !sheet.drag_start() {
                    return false;
                }
                self.tracking = Some(Tracking {
                    id: event.id,
                    start_y: event.y,
                    last_dy: 0.0,
                });
                true
            }
            PointerEventKind::Move => match self.tracking.as_mut() {
                Some(tracking) if tracking.id == event.id => {
                    let dy = event.y - tracking.start_y;
                    tracking.last_dy = dy;
                    sheet.drag_move(dy);
                    true
                }
                _ => false,
            },
            PointerEventKind::Up => match self.tracking {
                Some(tracking) if tracking.id == event.id => {
                    self.tracking = None;
                    sheet.drag_end(event.y - tracking.start_y);
                    true
                }
                _ => false,
            },
            PointerEventKind::Cancel => match self.tracking {
                Some(tracking) if tracking.id == event.id => {
                    self.tracking = None;
                    sheet.drag_end(tracking.last_dy);
                    true
                }
                _ => false,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
