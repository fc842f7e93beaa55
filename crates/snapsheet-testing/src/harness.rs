use std::cell::RefCell;
use std::rc::Rc;

use snapsheet::{
    BottomSheet, ChangePoint, ConfigurationError, PixelOffset, PointerEvent, PointerEventKind,
    SheetCallbacks, SheetConfig, SheetGestureDetector,
};
use snapsheet_core::{FrameRuntime, FRAME_INTERVAL_NANOS};

/// Frames [`SheetHarness::run_until_idle`] pumps before giving up.
pub const DEFAULT_MAX_FRAMES: usize = 1_000;

/// Headless driver for a single sheet.
///
/// Owns the frame runtime, advances it in fixed 60 Hz steps and records every
/// change notification and drag offset the sheet emits.
pub struct SheetHarness {
    runtime: FrameRuntime,
    sheet: BottomSheet,
    detector: SheetGestureDetector,
    frame_time_nanos: u64,
    changes: Rc<RefCell<Vec<ChangePoint>>>,
    drag_offsets: Rc<RefCell<Vec<PixelOffset>>>,
    change_hook: Option<Rc<dyn Fn(ChangePoint)>>,
    press_hook: Option<Rc<dyn Fn()>>,
}

impl SheetHarness {
    pub fn new(config: SheetConfig) -> Result<Self, ConfigurationError> {
        let runtime = FrameRuntime::new();
        let sheet = BottomSheet::new(config, runtime.frame_clock())?;
        let changes = Rc::new(RefCell::new(Vec::new()));
        let drag_offsets = Rc::new(RefCell::new(Vec::new()));
        let harness = Self {
            runtime,
            sheet,
            detector: SheetGestureDetector::new(),
            frame_time_nanos: 0,
            changes,
            drag_offsets,
            change_hook: None,
            press_hook: None,
        };
        harness.install_callbacks();
        Ok(harness)
    }

    /// Forwards change notifications to `hook` after recording them.
    pub fn on_change_point(&mut self, hook: impl Fn(ChangePoint) + 'static) {
        self.change_hook = Some(Rc::new(hook));
        self.install_callbacks();
    }

    /// Replaces the sheet's default close-on-backdrop-press behaviour.
    pub fn on_press_backdrop(&mut self, hook: impl Fn() + 'static) {
        self.press_hook = Some(Rc::new(hook));
        self.install_callbacks();
    }

    fn install_callbacks(&self) {
        let changes = Rc::clone(&self.changes);
        let drag_offsets = Rc::clone(&self.drag_offsets);
        let change_hook = self.change_hook.clone();
        let mut callbacks = SheetCallbacks::new()
            .on_change_point(move |change| {
                changes.borrow_mut().push(change);
                if let Some(hook) = &change_hook {
                    hook(change);
                }
            })
            .on_drag(move |offset| drag_offsets.borrow_mut().push(offset));
        if let Some(press_hook) = self.press_hook.clone() {
            callbacks = callbacks.on_press_backdrop(move || press_hook());
        }
        self.sheet.set_callbacks(callbacks);
    }

    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    pub fn runtime(&self) -> &FrameRuntime {
        &self.runtime
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Advances one frame.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Pumps frames until nothing is scheduled and returns how many ran.
    ///
    /// Panics if the sheet is still animating after [`DEFAULT_MAX_FRAMES`].
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            if frames >= DEFAULT_MAX_FRAMES {
                panic!("sheet still animating after {DEFAULT_MAX_FRAMES} frames");
            }
            self.advance_frame();
            frames += 1;
        }
        log::trace!("harness idle after {frames} frames");
        frames
    }

    pub fn changes(&self) -> Vec<ChangePoint> {
        self.changes.borrow().clone()
    }

    pub fn change_indices(&self) -> Vec<i32> {
        self.changes.borrow().iter().map(|change| change.index()).collect()
    }

    pub fn drag_offsets(&self) -> Vec<PixelOffset> {
        self.drag_offsets.borrow().clone()
    }

    pub fn clear_recordings(&self) {
        self.changes.borrow_mut().clear();
        self.drag_offsets.borrow_mut().clear();
    }

    /// Feeds a raw pointer event through the gesture detector.
    pub fn pointer(&mut self, kind: PointerEventKind, y: f32) -> bool {
        self.detector
            .handle(&self.sheet, &PointerEvent::new(kind, y))
    }

    /// Presses at `start_y`, moves through `path` one frame apart, and lifts
    /// at the last position.
    pub fn drag(&mut self, start_y: f32, path: &[f32]) {
        self.pointer(PointerEventKind::Down, start_y);
        let mut last = start_y;
        for &y in path {
            self.pointer(PointerEventKind::Move, y);
            self.advance_frame();
            last = y;
        }
        self.pointer(PointerEventKind::Up, last);
    }
}
