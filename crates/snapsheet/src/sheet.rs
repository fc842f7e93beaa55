//! The sheet state machine.
//!
//! Every command and every gesture release ends up in [`BottomSheet::animate_to`],
//! which springs the offset toward a target and commits it once the spring
//! settles. Nothing calls back into host code while the sheet state is
//! borrowed, so callbacks are free to issue further commands.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use snapsheet_animation::{Animatable, AnimationEnd};
use snapsheet_core::FrameClock;

use crate::backdrop::BackdropRange;
use crate::config::{ResolvedConfig, SheetConfig};
use crate::error::{ConfigurationError, SnapError};
use crate::geometry::{Geometry, PixelOffset, SnapPoints};
use crate::gesture::{rubber_band, DragSession};
use crate::projection::{project, SheetFrame};

/// Resting position reported to `on_change_point`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangePoint {
    /// The sheet was closed (hidden or back at its peek offset).
    Closed,
    /// The sheet settled on the snap point with this index.
    Snap(usize),
}

impl ChangePoint {
    /// Integer form for hosts that expect `-1` for closed. Indices beyond
    /// `i32::MAX` saturate.
    pub fn index(self) -> i32 {
        match self {
            ChangePoint::Closed => -1,
            ChangePoint::Snap(index) => i32::try_from(index).unwrap_or(i32::MAX),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SheetState {
    Hidden,
    Visible { at: PixelOffset },
    Dragging { from: PixelOffset },
}

/// Host callbacks. All are optional.
#[derive(Clone, Default)]
pub struct SheetCallbacks {
    on_change_point: Option<Rc<dyn Fn(ChangePoint)>>,
    on_press_backdrop: Option<Rc<dyn Fn()>>,
    on_drag: Option<Rc<dyn Fn(PixelOffset)>>,
}

impl SheetCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the de-duplicated resting position.
    pub fn on_change_point(mut self, callback: impl Fn(ChangePoint) + 'static) -> Self {
        self.on_change_point = Some(Rc::new(callback));
        self
    }

    /// Replaces the default close-on-tap behaviour of the backdrop.
    pub fn on_press_backdrop(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_press_backdrop = Some(Rc::new(callback));
        self
    }

    /// Called with the live offset for every applied drag move.
    pub fn on_drag(mut self, callback: impl Fn(PixelOffset) + 'static) -> Self {
        self.on_drag = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for SheetCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetCallbacks")
            .field("on_change_point", &self.on_change_point.is_some())
            .field("on_press_backdrop", &self.on_press_backdrop.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .finish()
    }
}

/// Bookkeeping to run once an animation reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settle {
    /// Resting on a snap point; notify its index.
    Point(usize),
    /// Back at the pre-drag offset. Only reports when the last notification
    /// no longer describes that offset.
    Restore,
    /// At the closed offset; hide unless a peek offset keeps the sheet up.
    Close,
}

enum Release {
    Commit(usize, PixelOffset),
    Dismiss,
    Restore(PixelOffset),
}

struct SheetInner {
    config: ResolvedConfig,
    offset: Animatable,
    last_committed: PixelOffset,
    visible: bool,
    last_notified: Option<ChangePoint>,
    /// Bookkeeping for the animation in flight.
    pending: Option<Settle>,
    drag: Option<DragSession>,
    callbacks: SheetCallbacks,
}

impl SheetInner {
    /// Change point describing a sheet at rest on `offset`, if any.
    fn change_point_at(&self, offset: PixelOffset) -> Option<ChangePoint> {
        if offset == self.config.closed_offset() {
            return Some(ChangePoint::Closed);
        }
        self.config
            .points
            .as_slice()
            .iter()
            .position(|&point| point == offset)
            .map(ChangePoint::Snap)
    }

    fn backdrop_range(&self) -> Option<BackdropRange> {
        if self.config.peek.is_some() {
            return None;
        }
        Some(BackdropRange::new(
            self.config.points.last(),
            self.config.geometry.hidden_offset(),
            self.config.style.backdrop.max_opacity(),
        ))
    }
}

/// Handle to a bottom sheet. Clones share the same sheet.
#[derive(Clone)]
pub struct BottomSheet {
    inner: Rc<RefCell<SheetInner>>,
}

impl BottomSheet {
    /// Validates `config` and creates a sheet resting at its peek offset, or
    /// hidden when no peek offset is configured.
    pub fn new(config: SheetConfig, clock: FrameClock) -> Result<Self, ConfigurationError> {
        let config = config.resolve()?;
        let initial = config.closed_offset();
        let visible = config.peek.is_some();
        log::debug!(
            "sheet created with {} points, resting at {initial} (visible={visible})",
            config.points.len()
        );
        let inner = SheetInner {
            offset: Animatable::new(initial, clock),
            last_committed: initial,
            visible,
            last_notified: None,
            pending: None,
            drag: None,
            callbacks: SheetCallbacks::default(),
            config,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    pub fn set_callbacks(&self, callbacks: SheetCallbacks) {
        self.inner.borrow_mut().callbacks = callbacks;
    }

    /// Applies a new configuration. On error the previous one stays in effect.
    ///
    /// A sheet at rest or in flight is moved onto the nearest offset of the
    /// new configuration; an active drag is left to its release.
    pub fn reconfigure(&self, config: SheetConfig) -> Result<(), ConfigurationError> {
        let resolved = config.resolve()?;
        log::debug!("sheet reconfigured with {} points", resolved.points.len());
        let previous_closed = {
            let mut inner = self.inner.borrow_mut();
            let previous_closed = inner.config.closed_offset();
            inner.config = resolved;
            previous_closed
        };
        self.realign(previous_closed);
        Ok(())
    }

    fn realign(&self, previous_closed: PixelOffset) {
        let (aim, heading_closed) = {
            let mut inner = self.inner.borrow_mut();
            if inner.drag.is_some() {
                return;
            }
            if !inner.visible {
                let closed = inner.config.closed_offset();
                inner.visible = inner.config.peek.is_some();
                inner.last_committed = closed;
                let offset = inner.offset.clone();
                drop(inner);
                if offset.value() != closed {
                    offset.snap_to(closed);
                }
                return;
            }
            let aim = if inner.offset.is_running() {
                inner.offset.target()
            } else {
                inner.last_committed
            };
            let heading_closed = match inner.pending {
                Some(Settle::Close) => true,
                Some(Settle::Point(_)) => false,
                Some(Settle::Restore) | None => aim == previous_closed,
            };
            (aim, heading_closed)
        };

        if heading_closed {
            let closed = self.inner.borrow().config.closed_offset();
            log::debug!("realigning closed sheet {aim} -> {closed}");
            self.animate_to(closed, Settle::Close);
        } else {
            let (index, target) = self.inner.borrow().config.points.nearest(aim);
            log::debug!("realigning sheet {aim} -> point {index} at {target}");
            self.animate_to(target, Settle::Point(index));
        }
    }

    /// Shows the sheet and springs it to the configured initial snap point.
    pub fn open(&self) {
        let (target, index) = {
            let mut inner = self.inner.borrow_mut();
            inner.visible = true;
            let target = inner.config.points.as_slice()[inner.config.index];
            (target, inner.config.points.nearest(target).0)
        };
        log::debug!("open -> {target}");
        self.animate_to(target, Settle::Point(index));
    }

    /// Shows the sheet and springs it to its most expanded snap point.
    pub fn expand(&self) {
        let (target, index) = {
            let mut inner = self.inner.borrow_mut();
            inner.visible = true;
            let target = inner.config.points.min();
            (target, inner.config.points.nearest(target).0)
        };
        log::debug!("expand -> {target}");
        self.animate_to(target, Settle::Point(index));
    }

    /// Springs the sheet to its peek offset, or off screen.
    ///
    /// [`ChangePoint::Closed`] is reported immediately, not when the
    /// animation finishes.
    pub fn close(&self) {
        let target = self.inner.borrow().config.closed_offset();
        log::debug!("close -> {target}");
        self.notify(ChangePoint::Closed);
        self.animate_to(target, Settle::Close);
    }

    /// Springs the sheet to snap point `index`.
    ///
    /// An out-of-range index leaves the sheet untouched; the error is logged
    /// and returned.
    pub fn snap(&self, index: usize) -> Result<(), SnapError> {
        let target = {
            let inner = self.inner.borrow();
            let points = &inner.config.points;
            points.get(index).ok_or(SnapError::OutOfRange {
                index,
                len: points.len(),
            })
        };
        let target = match target {
            Ok(target) => target,
            Err(err) => {
                log::warn!("snap ignored: {err}");
                return Err(err);
            }
        };
        self.inner.borrow_mut().visible = true;
        log::debug!("snap({index}) -> {target}");
        self.animate_to(target, Settle::Point(index));
        Ok(())
    }

    /// Grants a drag: halts any animation where it is and records the
    /// baseline. Returns `false` (and does nothing) while the sheet is hidden.
    pub fn drag_start(&self) -> bool {
        let offset = {
            let inner = self.inner.borrow();
            if !inner.visible {
                log::debug!("drag ignored while hidden");
                return false;
            }
            inner.offset.clone()
        };
        let baseline = offset.stop();
        log::debug!("drag granted at {baseline}");
        let mut inner = self.inner.borrow_mut();
        inner.pending = None;
        inner.drag = Some(DragSession::new(baseline));
        true
    }

    /// Moves the sheet by `dy` relative to the drag baseline, without a spring.
    pub fn drag_move(&self, dy: f32) {
        if !dy.is_finite() {
            log::debug!("ignoring non-finite drag delta {dy}");
            return;
        }
        let (offset, live, on_drag) = {
            let mut inner = self.inner.borrow_mut();
            let slop = inner.config.drag_slop;
            let min = inner.config.points.min();
            let candidate = match inner.drag.as_mut() {
                Some(session) => session.record(dy),
                None => return,
            };
            if dy.abs() <= slop {
                return;
            }
            let live = rubber_band(candidate, min);
            (inner.offset.clone(), live, inner.callbacks.on_drag.clone())
        };
        offset.snap_to(live);
        if let Some(on_drag) = on_drag {
            on_drag(live);
        }
    }

    /// Releases the drag after a total movement of `dy` and decides where the
    /// sheet comes to rest. A non-finite `dy` releases at the last applied move.
    pub fn drag_end(&self, dy: f32) {
        let release = {
            let mut inner = self.inner.borrow_mut();
            let Some(session) = inner.drag.take() else {
                return;
            };
            let dy = if dy.is_finite() {
                dy
            } else {
                log::debug!("ignoring non-finite release delta {dy}");
                session.last_dy()
            };
            let final_offset = session.offset_for(dy);
            let points = &inner.config.points;
            let (min, max) = (points.min(), points.max());

            if final_offset < min {
                Release::Commit(points.nearest(min).0, min)
            } else if final_offset > max {
                Release::Dismiss
            } else {
                let (index, nearest) = points.nearest(final_offset);
                if (final_offset - nearest).abs() < inner.config.geometry.commit_threshold() {
                    Release::Commit(index, nearest)
                } else {
                    Release::Restore(inner.last_committed)
                }
            }
        };

        match release {
            Release::Commit(index, target) => {
                log::debug!("drag released, committing to point {index} at {target}");
                self.animate_to(target, Settle::Point(index));
            }
            Release::Dismiss => {
                log::debug!("drag released past the last point, closing");
                self.close();
            }
            Release::Restore(target) => {
                log::debug!("drag released short of the threshold, restoring {target}");
                self.animate_to(target, Settle::Restore);
            }
        }
    }

    /// Ends the drag as if released at the last reported movement.
    pub fn drag_cancel(&self) {
        let last_dy = match self.inner.borrow().drag {
            Some(session) => session.last_dy(),
            None => return,
        };
        self.drag_end(last_dy);
    }

    /// Backdrop tap: runs `on_press_backdrop` if set, otherwise closes.
    pub fn press_backdrop(&self) {
        let callback = {
            let inner = self.inner.borrow();
            if inner.config.peek.is_some() {
                log::debug!("backdrop press ignored; peeking sheets have no backdrop");
                return;
            }
            inner.callbacks.on_press_backdrop.clone()
        };
        match callback {
            Some(callback) => callback(),
            None => self.close(),
        }
    }

    pub fn state(&self) -> SheetState {
        let inner = self.inner.borrow();
        match (inner.drag, inner.visible) {
            (Some(session), _) => SheetState::Dragging {
                from: session.baseline(),
            },
            (None, true) => SheetState::Visible {
                at: inner.offset.value(),
            },
            (None, false) => SheetState::Hidden,
        }
    }

    /// Live offset, possibly mid-animation.
    pub fn offset(&self) -> PixelOffset {
        self.inner.borrow().offset.value()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().offset.is_running()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().drag.is_some()
    }

    /// Offset the sheet last came to rest at.
    pub fn last_committed_offset(&self) -> PixelOffset {
        self.inner.borrow().last_committed
    }

    pub fn last_change_point(&self) -> Option<ChangePoint> {
        self.inner.borrow().last_notified
    }

    pub fn snap_points(&self) -> SnapPoints {
        self.inner.borrow().config.points.clone()
    }

    pub fn geometry(&self) -> Geometry {
        self.inner.borrow().config.geometry
    }

    pub fn peek_offset(&self) -> Option<PixelOffset> {
        self.inner.borrow().config.peek
    }

    pub fn backdrop_range(&self) -> Option<BackdropRange> {
        self.inner.borrow().backdrop_range()
    }

    /// `None` when a peek offset is configured.
    pub fn backdrop_opacity(&self) -> Option<f32> {
        let inner = self.inner.borrow();
        let offset = inner.offset.value();
        inner.backdrop_range().map(|range| range.opacity_at(offset))
    }

    /// Render projection of the current state.
    pub fn frame(&self) -> SheetFrame {
        let inner = self.inner.borrow();
        let offset = inner.offset.value();
        let opacity = inner.backdrop_range().map(|range| range.opacity_at(offset));
        project(&inner.config, offset, inner.visible, opacity)
    }

    /// Springs toward `target` unless already there or already heading there.
    ///
    /// When the animation in flight already heads to `target`, it keeps
    /// running and finishes with the newer `settle`.
    fn animate_to(&self, target: PixelOffset, settle: Settle) {
        let (offset, spring) = {
            let inner = self.inner.borrow();
            (inner.offset.clone(), inner.config.spring)
        };

        if offset.is_running() && offset.target() == target {
            let mut inner = self.inner.borrow_mut();
            if inner.pending != Some(settle) {
                log::debug!("already animating toward {target}, now settling as {settle:?}");
                inner.pending = Some(settle);
            } else {
                log::debug!("already animating toward {target}");
            }
            return;
        }
        if !offset.is_running() && offset.value() == target {
            self.settle(target, settle);
            return;
        }

        self.inner.borrow_mut().pending = Some(settle);
        let weak: Weak<RefCell<SheetInner>> = Rc::downgrade(&self.inner);
        offset.animate_to(target, spring, move |end| {
            if end != AnimationEnd::Finished {
                return;
            }
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let pending = inner.borrow_mut().pending.take();
            if let Some(settle) = pending {
                BottomSheet { inner }.settle(target, settle);
            }
        });
    }

    fn settle(&self, target: PixelOffset, settle: Settle) {
        let change = {
            let mut inner = self.inner.borrow_mut();
            inner.pending = None;
            inner.last_committed = target;
            let hides = inner.config.peek.is_none();
            match settle {
                Settle::Point(index) => Some(ChangePoint::Snap(index)),
                Settle::Restore => {
                    if hides && target >= inner.config.geometry.hidden_offset() {
                        inner.visible = false;
                    }
                    // Resync after an interrupted close; silent otherwise.
                    inner
                        .last_notified
                        .and(inner.change_point_at(target))
                }
                Settle::Close => {
                    if hides {
                        inner.visible = false;
                    }
                    None
                }
            }
        };
        log::debug!("settled at {target} ({settle:?})");
        if let Some(change) = change {
            self.notify(change);
        }
    }

    fn notify(&self, change: ChangePoint) {
        let callback = {
            let mut inner = self.inner.borrow_mut();
            if inner.last_notified == Some(change) {
                return;
            }
            inner.last_notified = Some(change);
            inner.callbacks.on_change_point.clone()
        };
        log::debug!("change point {}", change.index());
        if let Some(callback) = callback {
            callback(change);
        }
    }
}

impl fmt::Debug for BottomSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("BottomSheet")
            .field("offset", &inner.offset.value())
            .field("last_committed", &inner.last_committed)
            .field("visible", &inner.visible)
            .field("last_notified", &inner.last_notified)
            .field("dragging", &inner.drag.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/sheet_tests.rs"]
mod tests;
