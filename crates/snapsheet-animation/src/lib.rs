//! Spring animation for snapsheet.
//!
//! Unlike fire-and-forget animation APIs, an [`Animatable`] exposes its
//! current value at any time and can be stopped in place, which the sheet
//! state machine needs to hand a moving panel over to a drag gesture.

mod animation;

pub use animation::{Animatable, AnimationEnd, SpringSpec};
