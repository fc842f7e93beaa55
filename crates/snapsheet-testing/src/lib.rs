//! Testing utilities and harness for snapsheet

mod harness;

pub use harness::{SheetHarness, DEFAULT_MAX_FRAMES};

pub mod prelude {
    pub use crate::harness::*;
    pub use snapsheet::{
        BottomSheet, ChangePoint, PointerEvent, PointerEventKind, SheetCallbacks, SheetConfig,
        SheetState,
    };
}
