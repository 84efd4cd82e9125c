use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use snapsheet_animation::SpringSpec;
use snapsheet_core::{Runtime, RuntimeScheduler, FRAME_NANOS_60HZ};
use snapsheet_ui::prelude::*;
use snapsheet_ui::{Point, PointerEvent, PointerEventKind};

const SCREEN_HEIGHT: f32 = 844.0;
const MAX_FRAMES_PER_STEP: usize = 600;

/// Counts redraw requests the way a windowing backend would receive them.
#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

struct Session {
    runtime: Runtime,
    sheet: BottomSheet<Vec<&'static str>>,
    frame_time: u64,
    uptime_ms: i64,
}

impl Session {
    fn pump(&mut self, label: &str) {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() && frames < MAX_FRAMES_PER_STEP {
            self.tick(&handle);
            frames += 1;
            if frames % 10 == 0 {
                if let Some(frame) = self.sheet.frame() {
                    log::debug!(
                        "  frame {:3}: offset {:6.1}  fraction {:.3}  backdrop {:.2}",
                        frames,
                        frame.offset,
                        frame.fraction,
                        frame.backdrop_opacity
                    );
                }
            }
        }
        log::info!(
            "{label}: {:?} after {frames} frames, {}",
            self.sheet.controller().state(),
            describe(self.sheet.frame())
        );
    }

    fn tick(&mut self, handle: &snapsheet_core::RuntimeHandle) {
        self.frame_time += FRAME_NANOS_60HZ;
        self.uptime_ms += 16;
        handle.drain_frame_callbacks(self.frame_time);
    }

    fn pointer(&self, kind: PointerEventKind, y: f32) {
        let event = PointerEvent::new(kind, Point::new(195.0, y), self.uptime_ms);
        self.sheet.controller().handle_pointer_event(&event);
    }

    /// Finger down at `start_y`, `steps` moves one frame apart, optional
    /// pause, finger up.
    fn gesture(&mut self, start_y: f32, distance: f32, steps: usize, pause_frames: usize) {
        let handle = self.runtime.handle();
        self.pointer(PointerEventKind::Down, start_y);
        for step in 1..=steps {
            self.tick(&handle);
            self.pointer(
                PointerEventKind::Move,
                start_y + distance * step as f32 / steps as f32,
            );
        }
        for _ in 0..pause_frames {
            self.tick(&handle);
        }
        self.pointer(PointerEventKind::Up, start_y + distance);
    }

    fn top(&self) -> f32 {
        self.sheet.controller().current_offset()
    }
}

fn describe(frame: Option<SheetFrame>) -> String {
    match frame {
        Some(frame) => format!(
            "offset {:.1}, {:.0}% visible, backdrop {:.2}",
            frame.offset,
            frame.fraction * 100.0,
            frame.backdrop_opacity
        ),
        None => "not on screen".to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== snapsheet demo ===");
    println!("Scripted session on a {SCREEN_HEIGHT}px screen; RUST_LOG=debug shows");
    println!("every state transition, RUST_LOG=trace every animation frame.");
    println!();

    let rejected = SheetController::new(
        SheetConfig::default().with_initial_snap_point(5),
        SCREEN_HEIGHT,
        Runtime::new(Arc::new(CountingScheduler::default())).handle(),
        || {},
    );
    if let Err(err) = rejected {
        log::info!("rejected configuration as expected: {err}");
    }

    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let closes = Rc::new(Cell::new(0u32));
    let on_close = {
        let closes = closes.clone();
        move || {
            closes.set(closes.get() + 1);
            log::info!("onClose fired (#{})", closes.get());
        }
    };

    // A little stiffer and better damped than the stock sheet.
    let config = SheetConfig::default()
        .with_backdrop_opacity(0.6)
        .with_position_spring(SpringSpec::from_tension_friction(140.0, 12.0).with_thresholds(0.5, 0.5));
    let sheet = BottomSheet::new(
        config,
        SCREEN_HEIGHT,
        runtime.handle(),
        vec!["AAPL 189.84 +1.2%", "MSFT 415.10 -0.4%", "NVDA 903.56 +3.1%"],
        on_close,
    )
    .context("building the demo sheet")?
    .with_title("Watchlist");

    log::info!(
        "sheet '{}' with {} rows, close button: {}",
        sheet.title().unwrap_or("untitled"),
        sheet.content().len(),
        sheet.has_close_button()
    );

    let mut session = Session {
        runtime,
        sheet,
        frame_time: 0,
        uptime_ms: 0,
    };

    session.sheet.controller().set_visible(true);
    session.pump("open");

    let top = session.top();
    session.gesture(top, -90.0, 6, 0);
    session.pump("fast swipe up");

    let top = session.top();
    session.gesture(top, 420.0, 12, 4);
    session.pump("slow drag down");

    session
        .sheet
        .controller()
        .snap_to(0)
        .context("snapping to the lowest point")?;
    session.pump("snap_to(0)");

    session.sheet.backdrop_pressed();
    session.sheet.close_button_pressed();
    session.pump("backdrop tap racing the close button");

    session.sheet.controller().set_visible(true);
    session.pump("reopen");

    session
        .sheet
        .controller()
        .resize(667.0)
        .context("rotating to a smaller screen")?;
    log::info!("resized: {}", describe(session.sheet.frame()));

    let top = session.top();
    session.gesture(top, 60.0, 4, 0);
    session.pump("fast swipe down");

    println!();
    println!(
        "onClose calls: {}, redraw requests: {}",
        closes.get(),
        scheduler.requests.load(Ordering::Relaxed)
    );
    Ok(())
}
