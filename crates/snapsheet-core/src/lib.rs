//! Frame runtime for snapsheet.
//!
//! Everything in this crate is single-threaded: the host UI thread registers
//! frame callbacks and drains them once per frame tick.

mod clock;
mod frame_clock;
mod runtime;

pub use clock::StdClock;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, FrameRuntime, RuntimeHandle};

/// Nominal frame interval used by headless drivers (~60 FPS).
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
