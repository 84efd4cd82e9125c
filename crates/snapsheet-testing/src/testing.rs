use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use snapsheet_core::{DefaultScheduler, Runtime, RuntimeHandle, FRAME_NANOS_60HZ};
use snapsheet_foundation::{Point, PointerEvent, PointerEventKind};
use snapsheet_ui::{SheetConfig, SheetController, SheetError, SheetState};

/// Upper bound for [`SheetTestRule::wait_for_idle`]; ten seconds at 60 fps.
pub const MAX_IDLE_FRAMES: usize = 600;

const FRAME_MILLIS: i64 = 16;

/// Headless harness for exercising a sheet in tests.
///
/// `SheetTestRule` owns the runtime the sheet animates on and advances it
/// with deterministic 60 fps timestamps, so every run sees the same frames.
/// It also counts `on_close` calls and keeps a pointer clock for scripted
/// gestures.
pub struct SheetTestRule {
    runtime: Runtime,
    sheet: SheetController,
    close_count: Rc<Cell<u32>>,
    frame_time_nanos: u64,
    frames: usize,
    uptime_ms: i64,
}

impl SheetTestRule {
    pub fn new(config: SheetConfig, screen_height: f32) -> Result<Self, SheetError> {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let close_count = Rc::new(Cell::new(0));
        let counter = close_count.clone();
        let sheet = SheetController::new(config, screen_height, runtime.handle(), move || {
            counter.set(counter.get() + 1);
        })?;
        Ok(Self {
            runtime,
            sheet,
            close_count,
            frame_time_nanos: 0,
            frames: 0,
            uptime_ms: 0,
        })
    }

    /// A rule whose sheet has already opened and come to rest.
    pub fn opened(config: SheetConfig, screen_height: f32) -> Result<Self, SheetError> {
        let mut rule = Self::new(config, screen_height)?;
        rule.sheet.set_visible(true);
        rule.wait_for_idle();
        Ok(rule)
    }

    pub fn sheet(&self) -> &SheetController {
        &self.sheet
    }

    pub fn state(&self) -> SheetState {
        self.sheet.state()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// How many times the sheet reported `on_close`.
    pub fn close_count(&self) -> u32 {
        self.close_count.get()
    }

    /// Frames drained so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    /// Drains one 60 fps frame, whether or not anything is scheduled.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS_60HZ;
        self.frames += 1;
        self.uptime_ms += FRAME_MILLIS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Drains frames until nothing is scheduled. Returns the number of
    /// frames it took.
    ///
    /// Panics after [`MAX_IDLE_FRAMES`]: an animation that never settles is
    /// a bug.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut drained = 0;
        while self.has_pending_frames() {
            if drained == MAX_IDLE_FRAMES {
                panic!(
                    "sheet still animating after {} frames ({:?}, offset {})",
                    MAX_IDLE_FRAMES,
                    self.sheet.state(),
                    self.sheet.current_offset()
                );
            }
            self.advance_frame();
            drained += 1;
        }
        drained
    }

    /// Scripts a complete drag through the controller's gesture commands.
    pub fn fling(&mut self, delta: f32, velocity: f32) {
        self.sheet.drag_started();
        self.sheet.drag_moved(delta);
        self.sheet.drag_ended(delta, velocity);
    }

    /// Scripts a pointer swipe: down at `start_y`, `steps` evenly spaced
    /// moves covering `distance` one frame apart, then up right away.
    pub fn swipe(&mut self, start_y: f32, distance: f32, steps: usize) {
        let steps = steps.max(1);
        self.send_pointer(PointerEventKind::Down, start_y);
        for step in 1..=steps {
            self.advance_frame();
            let y = start_y + distance * step as f32 / steps as f32;
            self.send_pointer(PointerEventKind::Move, y);
        }
        self.send_pointer(PointerEventKind::Up, start_y + distance);
    }

    /// Like [`swipe`](Self::swipe) but the finger pauses before lifting, so
    /// the release reads as slow.
    pub fn drag_and_hold(&mut self, start_y: f32, distance: f32, steps: usize) {
        let steps = steps.max(1);
        self.send_pointer(PointerEventKind::Down, start_y);
        for step in 1..=steps {
            self.advance_frame();
            let y = start_y + distance * step as f32 / steps as f32;
            self.send_pointer(PointerEventKind::Move, y);
        }
        self.advance_frames(4);
        self.send_pointer(PointerEventKind::Up, start_y + distance);
    }

    pub fn send_pointer(&mut self, kind: PointerEventKind, y: f32) -> PointerEvent {
        let event = PointerEvent::new(kind, Point::new(0.0, y), self.uptime_ms);
        log::trace!("test pointer {:?} y={} t={}", kind, y, self.uptime_ms);
        self.sheet.handle_pointer_event(&event);
        event
    }
}
