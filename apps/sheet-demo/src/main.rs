use std::thread;
use std::time::Duration;

use snapsheet::{
    BottomSheet, IndicatorPosition, PointerEvent, PointerEventKind, SheetCallbacks, SheetConfig,
    SheetGestureDetector, SheetStyle,
};
use snapsheet_core::{FrameRuntime, StdClock, FRAME_INTERVAL_NANOS};

const SCREEN_HEIGHT: f32 = 800.0;
const MAX_FRAMES: usize = 600;

/// Drives the runtime in real time until the sheet stops animating.
fn pump(runtime: &FrameRuntime, clock: &StdClock, sheet: &BottomSheet, label: &str) {
    let mut frames = 0;
    while runtime.take_frame_request() && frames < MAX_FRAMES {
        thread::sleep(Duration::from_nanos(FRAME_INTERVAL_NANOS));
        runtime.drain_frame_callbacks(clock.now_nanos());
        frames += 1;
        if frames % 6 == 0 {
            print_frame(sheet, label);
        }
    }
    log::info!("{label}: settled after {frames} frames");
    print_frame(sheet, label);
}

fn print_frame(sheet: &BottomSheet, label: &str) {
    let frame = sheet.frame();
    let backdrop = frame
        .backdrop
        .map(|b| format!("{:.2}", b.opacity))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  [{label:>8}] offset={:7.1} visible={:5} backdrop={backdrop}",
        frame.offset, frame.visible
    );
}

fn drag(
    detector: &mut SheetGestureDetector,
    sheet: &BottomSheet,
    from: f32,
    to: f32,
    steps: usize,
) {
    detector.handle(sheet, &PointerEvent::new(PointerEventKind::Down, from));
    for step in 1..=steps {
        let y = from + (to - from) * step as f32 / steps as f32;
        detector.handle(sheet, &PointerEvent::new(PointerEventKind::Move, y));
    }
    detector.handle(sheet, &PointerEvent::new(PointerEventKind::Up, to));
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== snapsheet headless demo ===");
    println!("Screen height {SCREEN_HEIGHT}px, points 20% / 50% / 90%");
    println!();

    let runtime = FrameRuntime::new();
    let clock = StdClock::new();
    let config = SheetConfig::new(SCREEN_HEIGHT, ["20%", "50%", "90%"], 1)
        .with_indicator_position(IndicatorPosition::Under)
        .with_style(SheetStyle::default().with_shadow(true));

    let sheet = match BottomSheet::new(config, runtime.frame_clock()) {
        Ok(sheet) => sheet,
        Err(err) => {
            log::error!("invalid sheet configuration: {err}");
            std::process::exit(1);
        }
    };
    sheet.set_callbacks(
        SheetCallbacks::new()
            .on_change_point(|change| println!("  -> change point {}", change.index())),
    );
    let mut detector = SheetGestureDetector::new();

    println!("open()");
    sheet.open();
    pump(&runtime, &clock, &sheet, "open");

    println!("snap(2)");
    if let Err(err) = sheet.snap(2) {
        log::warn!("{err}");
    }
    pump(&runtime, &clock, &sheet, "snap");

    println!("drag halfway toward the middle point (restores)");
    let top = sheet.offset();
    drag(&mut detector, &sheet, top, top + 160.0, 10);
    pump(&runtime, &clock, &sheet, "restore");

    println!("drag down to the middle point (commits)");
    let top = sheet.offset();
    drag(&mut detector, &sheet, top, top + 300.0, 10);
    pump(&runtime, &clock, &sheet, "commit");

    println!("snap(7)");
    if let Err(err) = sheet.snap(7) {
        println!("  rejected: {err}");
    }

    println!("backdrop press (closes)");
    sheet.press_backdrop();
    pump(&runtime, &clock, &sheet, "close");
}
