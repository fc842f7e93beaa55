use crate::runtime::{FrameCallbackId, RuntimeHandle};

/// Entry point animations use to ask for the next frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Whether frames can still be delivered.
    pub fn is_attached(&self) -> bool {
        self.runtime.is_alive()
    }

    /// Schedules `callback` for the next frame. The callback is removed when
    /// the returned registration is cancelled or dropped.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let pending = self
            .runtime
            .register_frame_callback(callback)
            .map(|id| (self.runtime.clone(), id));
        FrameCallbackRegistration { pending }
    }
}

/// Keeps a scheduled frame callback alive.
#[must_use = "dropping the registration cancels the frame callback"]
pub struct FrameCallbackRegistration {
    pending: Option<(RuntimeHandle, FrameCallbackId)>,
}

impl FrameCallbackRegistration {
    /// Returns `false` when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some((runtime, id)) = self.pending.take() {
            runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
